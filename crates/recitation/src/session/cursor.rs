/// Position state carried between transcript segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCursor {
    /// Where the last finalized segment left the matcher.
    pub committed_index: usize,
    /// Completions already dispatched for the segment in progress.
    pub completions_fired_in_segment: u32,
}

impl MatchCursor {
    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of completions in `completions` that have not been dispatched
    /// yet for this segment. Marks them dispatched.
    pub(super) fn take_new_completions(&mut self, completions: u32) -> u32 {
        let new = completions.saturating_sub(self.completions_fired_in_segment);
        self.completions_fired_in_segment = self.completions_fired_in_segment.max(completions);
        new
    }

    pub(super) fn commit(&mut self, index: usize) {
        self.committed_index = index;
        self.completions_fired_in_segment = 0;
    }
}
