use crate::callbacks::SessionCallbacks;
use crate::error::{Error, Result};

/// One recitation unit and how many times it is to be recited.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Zeker {
    pub text: String,
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
}

fn default_repetitions() -> u32 {
    1
}

/// Progress through an ordered list of azkar.
///
/// Constructed by the application and handed to the session as its
/// [`SessionCallbacks`]. It never touches the session itself: after each
/// segment the caller checks [`RecitationStore::is_current_done`] and loads
/// the next text with `set_reference_text` when it moves on.
#[derive(Debug, Clone, Default)]
pub struct RecitationStore {
    azkar: Vec<Zeker>,
    counts: Vec<u32>,
    selected: usize,
    stop_requested: bool,
}

impl RecitationStore {
    pub fn new(azkar: Vec<Zeker>) -> Self {
        let counts = vec![0; azkar.len()];
        Self {
            azkar,
            counts,
            selected: 0,
            stop_requested: false,
        }
    }

    /// Load a JSON array of `{ "text", "repetitions" }` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let azkar: Vec<Zeker> = serde_json::from_str(json)?;
        Ok(Self::new(azkar))
    }

    pub fn azkar(&self) -> &[Zeker] {
        &self.azkar
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) -> Result<&Zeker> {
        let zeker = self.azkar.get(index).ok_or(Error::UnknownZeker(index))?;
        self.selected = index;
        Ok(zeker)
    }

    pub fn current(&self) -> Option<&Zeker> {
        self.azkar.get(self.selected)
    }

    /// Completions recorded for the selected zeker.
    pub fn count(&self) -> u32 {
        self.counts.get(self.selected).copied().unwrap_or(0)
    }

    pub fn count_of(&self, index: usize) -> Option<u32> {
        self.counts.get(index).copied()
    }

    pub fn remaining(&self) -> u32 {
        self.current()
            .map_or(0, |z| z.repetitions.saturating_sub(self.count()))
    }

    pub fn is_current_done(&self) -> bool {
        self.current().is_some() && self.remaining() == 0
    }

    pub fn is_all_done(&self) -> bool {
        self.azkar
            .iter()
            .zip(&self.counts)
            .all(|(z, &count)| count >= z.repetitions)
    }

    /// Select the next unfinished zeker after the current one, wrapping
    /// around. Returns its text, or `None` when everything is done.
    pub fn advance(&mut self) -> Option<&str> {
        let len = self.azkar.len();
        let next = (1..=len)
            .map(|offset| (self.selected + offset) % len)
            .find(|&i| self.counts[i] < self.azkar[i].repetitions)?;

        self.selected = next;
        tracing::debug!(index = next, "zeker_advanced");
        Some(self.azkar[next].text.as_str())
    }

    /// Clear every count and go back to the first zeker.
    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.selected = 0;
        self.stop_requested = false;
    }

    /// Whether a stop was requested since the last call.
    pub fn take_stop_request(&mut self) -> bool {
        std::mem::take(&mut self.stop_requested)
    }
}

impl SessionCallbacks for RecitationStore {
    fn on_completion(&mut self) {
        let Some(zeker) = self.azkar.get(self.selected) else {
            return;
        };
        let count = &mut self.counts[self.selected];
        if *count < zeker.repetitions {
            *count += 1;
        }
    }

    fn on_request_stop(&mut self) {
        self.stop_requested = true;
    }
}
