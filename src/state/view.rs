use super::Draw;
use crate::api::FetchError;
use crate::prediction::Prediction;

/// Where the poll state machine sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    /// No successful poll yet
    #[default]
    Uninitialized,
    /// Request in flight
    Polling,
    /// New latest issue seen, prediction recomputed
    Updated,
    /// Nothing new (same issue, empty list or stale response)
    Unchanged,
    /// Last poll failed, previous data kept
    Failed,
}

/// Read-only picture of the engine handed to observers.
///
/// Published as a single value, so `draws` and `prediction` always come
/// from the same poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineView {
    pub draws: Vec<Draw>,
    pub prediction: Option<Prediction>,
    pub seconds_remaining: u32,
    pub last_error: Option<FetchError>,
    pub phase: PollPhase,
}

impl EngineView {
    pub fn latest(&self) -> Option<&Draw> {
        self.draws.first()
    }

    /// True while the data shown comes from before a failed poll.
    pub fn is_stale(&self) -> bool {
        self.last_error.is_some()
    }
}
