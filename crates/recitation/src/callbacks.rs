/// Receiver for what a [`crate::RecitationSession`] decides while handling a
/// transcript segment.
///
/// Both methods may be called several times per segment in auto-reset mode.
pub trait SessionCallbacks {
    /// One full traversal of the reference text was heard.
    fn on_completion(&mut self);

    /// Recognition should stop. Only sent in single-shot mode.
    fn on_request_stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type")]
pub enum SessionEvent {
    #[serde(rename = "completion")]
    Completion,
    #[serde(rename = "stopRequested")]
    StopRequested,
}

/// Records callbacks as [`SessionEvent`]s, for callers that would rather poll.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn completions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Completion))
            .count()
    }

    pub fn stop_requested(&self) -> bool {
        self.events.contains(&SessionEvent::StopRequested)
    }

    /// Take every event recorded so far.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SessionCallbacks for EventLog {
    fn on_completion(&mut self) {
        self.events.push(SessionEvent::Completion);
    }

    fn on_request_stop(&mut self) {
        self.events.push(SessionEvent::StopRequested);
    }
}
