use crate::api::FetchError;
use crate::prediction::Prediction;

/// Notifications pushed by the engine. The published `EngineView` carries the
/// full state; these are the one-off signals a presentation layer reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Latest issue moved on. Sent exactly once per transition, never for the
    /// first poll that only establishes the baseline.
    NewIssue {
        issue: String,
        previous: String,
        prediction: Option<Prediction>,
    },

    /// A poll failed. Previous data is still being shown.
    FetchFailed { error: FetchError },

    /// Engine stopped on request.
    Shutdown,
}

impl Event {
    pub fn is_new_issue(&self) -> bool {
        matches!(self, Event::NewIssue { .. })
    }
}
