//! # Streaming session
//!
//! Recognizers send a run of **partial** results for an utterance, each one
//! carrying the whole transcript-so-far, then one **final** result. The
//! session therefore re-matches every result from the last committed index
//! rather than from the previous partial, and only moves the committed index
//! when a segment is final.
//!
//! How results turn into callbacks depends on [`SessionMode`]:
//!
//! - **AutoReset**: completions fire as soon as a result shows them, deduped
//!   against what this segment already fired. The highlight follows every
//!   result. Never asks recognition to stop.
//! - **SingleShot**: partials only move the highlight forward. A final result
//!   with a completion fires it once and asks recognition to stop.

mod cursor;

pub use cursor::MatchCursor;

use crate::callbacks::SessionCallbacks;
use crate::config::{SessionConfig, SessionMode};
use crate::matcher::{MatchResult, SequentialMatcher, TargetText};
use crate::tokenize::normalized_words;
use crate::view::RecitationFrame;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SegmentState {
    /// No result seen since the reference text was set.
    #[default]
    Idle,
    /// Partial results of a segment are arriving.
    InSegment,
    /// The last segment was finalized; the next result opens a new one.
    BetweenSegments,
}

/// What one [`RecitationSession::on_transcript_segment`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct SegmentOutcome {
    pub completions_fired: u32,
    pub highlight_index: usize,
    pub committed: bool,
    pub stop_requested: bool,
}

/// Tracks a reciter through one reference text across a stream of
/// transcript segments.
///
/// Owned by the recognizer adapter and fed results in arrival order. All
/// state lives here, so there is nothing to keep fresh between calls.
#[derive(Debug)]
pub struct RecitationSession {
    mode: SessionMode,
    matcher: SequentialMatcher,
    target: TargetText,
    cursor: MatchCursor,
    state: SegmentState,
    highlight_index: usize,
    completions_total: u32,
}

impl RecitationSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            mode: config.mode,
            matcher: SequentialMatcher::new(config.matcher),
            target: TargetText::default(),
            cursor: MatchCursor::default(),
            state: SegmentState::Idle,
            highlight_index: 0,
            completions_total: 0,
        }
    }

    pub fn with_reference_text(config: SessionConfig, text: &str) -> Self {
        let mut session = Self::new(config);
        session.set_reference_text(text);
        session
    }

    /// Replace the reference text. Drops any segment in progress.
    pub fn set_reference_text(&mut self, text: &str) {
        self.target = TargetText::new(text);
        self.reset();

        tracing::debug!(
            words = self.target.len(),
            mode = %self.mode,
            "reference_text_set"
        );
    }

    /// Back to the start of the current reference text.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.state = SegmentState::Idle;
        self.highlight_index = 0;
        self.completions_total = 0;
    }

    /// Handle one partial or final recognizer result.
    ///
    /// `text` is the full transcript of the current segment so far.
    pub fn on_transcript_segment(
        &mut self,
        text: &str,
        is_final: bool,
        callbacks: &mut dyn SessionCallbacks,
    ) -> SegmentOutcome {
        let spoken = normalized_words(text);
        let result =
            self.matcher
                .match_batch(&spoken, self.target.words(), self.cursor.committed_index);

        tracing::trace!(
            is_final,
            spoken = spoken.len(),
            start = self.cursor.committed_index,
            completions = result.completions,
            current_index = result.current_index,
            "segment_matched"
        );

        self.state = if is_final {
            SegmentState::BetweenSegments
        } else {
            SegmentState::InSegment
        };

        let outcome = match self.mode {
            SessionMode::AutoReset => self.apply_auto_reset(result, is_final, callbacks),
            SessionMode::SingleShot => self.apply_single_shot(result, is_final, callbacks),
        };

        self.completions_total += outcome.completions_fired;
        outcome
    }

    fn apply_auto_reset(
        &mut self,
        result: MatchResult,
        is_final: bool,
        callbacks: &mut dyn SessionCallbacks,
    ) -> SegmentOutcome {
        let fired = self.cursor.take_new_completions(result.completions);
        for _ in 0..fired {
            callbacks.on_completion();
        }
        if fired > 0 {
            tracing::debug!(fired, is_final, "recitation_completed");
        }

        self.highlight_index = result.current_index;

        if is_final {
            self.commit(result.current_index);
        }

        SegmentOutcome {
            completions_fired: fired,
            highlight_index: self.highlight_index,
            committed: is_final,
            stop_requested: false,
        }
    }

    fn apply_single_shot(
        &mut self,
        result: MatchResult,
        is_final: bool,
        callbacks: &mut dyn SessionCallbacks,
    ) -> SegmentOutcome {
        if !is_final {
            if result.completions > 0 || result.current_index > self.highlight_index {
                self.highlight_index = result.current_index;
            }

            return SegmentOutcome {
                highlight_index: self.highlight_index,
                ..Default::default()
            };
        }

        self.highlight_index = result.current_index;
        self.commit(result.current_index);

        if result.completions == 0 {
            return SegmentOutcome {
                highlight_index: self.highlight_index,
                committed: true,
                ..Default::default()
            };
        }

        callbacks.on_completion();
        callbacks.on_request_stop();
        tracing::debug!(completions = result.completions, "recitation_completed");
        tracing::debug!("recognition_stop_requested");

        SegmentOutcome {
            completions_fired: 1,
            highlight_index: self.highlight_index,
            committed: true,
            stop_requested: true,
        }
    }

    fn commit(&mut self, index: usize) {
        self.cursor.commit(index);
        tracing::debug!(committed_index = index, "segment_committed");
    }

    /// Index of the word the reciter is expected to say next. Words before
    /// it are recited.
    pub fn current_highlight_index(&self) -> usize {
        self.highlight_index
    }

    pub fn committed_index(&self) -> usize {
        self.cursor.committed_index
    }

    pub fn cursor(&self) -> MatchCursor {
        self.cursor
    }

    /// Completions fired since the reference text was last set or reset.
    pub fn completions_total(&self) -> u32 {
        self.completions_total
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn target(&self) -> &TargetText {
        &self.target
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SegmentState::Idle
    }

    pub fn frame(&self) -> RecitationFrame {
        RecitationFrame::build(&self.target, self.highlight_index, self.completions_total)
    }
}

impl Default for RecitationSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
