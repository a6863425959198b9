use tracing::{debug, info, warn};

use crate::api::{DrawSource, FetchError};
use crate::prediction::{Prediction, SizePolicy};
use crate::state::{EngineView, FeedSnapshot, IssueTracker, Observation, PollPhase};

/// Polls a draw source and keeps the latest snapshot and prediction.
///
/// A poll takes `&mut self`, so one poller never has two requests in flight.
pub struct FeedPoller<S> {
    source: S,
    policy: SizePolicy,
    tracker: IssueTracker,
    snapshot: FeedSnapshot,
    prediction: Option<Prediction>,
    last_error: Option<FetchError>,
    phase: PollPhase,
}

impl<S: DrawSource> FeedPoller<S> {
    pub fn new(source: S, policy: SizePolicy) -> Self {
        Self {
            source,
            policy,
            tracker: IssueTracker::new(),
            snapshot: FeedSnapshot::empty(),
            prediction: None,
            last_error: None,
            phase: PollPhase::Uninitialized,
        }
    }

    /// Fetch one snapshot without touching any state.
    pub async fn poll(&self) -> Result<FeedSnapshot, FetchError> {
        self.source.fetch().await
    }

    /// Fetch and fold the result into the poller state.
    pub async fn poll_once(&mut self) -> Result<Observation, FetchError> {
        self.phase = PollPhase::Polling;
        let result = self.poll().await;
        self.apply(result)
    }

    /// Fold a fetch result into the poller state.
    ///
    /// Errors keep the previous snapshot and prediction. Snapshot and
    /// prediction are replaced together, never one without the other.
    pub fn apply(
        &mut self,
        result: Result<FeedSnapshot, FetchError>,
    ) -> Result<Observation, FetchError> {
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "poll failed, keeping previous snapshot");
                self.last_error = Some(e.clone());
                self.phase = PollPhase::Failed;
                return Err(e);
            }
        };
        self.last_error = None;

        let observation = self.tracker.observe(&snapshot);
        match &observation {
            Observation::Baseline | Observation::NewIssue { .. } => {
                self.recompute_prediction(&snapshot);
                if let (Observation::NewIssue { previous }, Some(latest)) =
                    (&observation, snapshot.latest())
                {
                    info!(
                        issue = %latest.issue_number,
                        previous = %previous,
                        number = latest.number,
                        "new issue"
                    );
                }
                self.snapshot = snapshot;
                self.phase = PollPhase::Updated;
            }
            Observation::Unchanged => {
                debug!(draws = snapshot.len(), "latest issue unchanged");
                self.snapshot = snapshot;
                self.phase = PollPhase::Unchanged;
            }
            Observation::Empty => {
                debug!("feed returned no draws");
                self.snapshot = snapshot;
                self.phase = PollPhase::Unchanged;
            }
            Observation::Stale { latest } => {
                warn!(
                    latest = %latest,
                    seen = self.tracker.last_issue().unwrap_or_default(),
                    "discarding stale response"
                );
                self.phase = PollPhase::Unchanged;
            }
        }

        Ok(observation)
    }

    // A prediction never outlives the draw it was derived from.
    fn recompute_prediction(&mut self, snapshot: &FeedSnapshot) {
        let Some(latest) = snapshot.latest() else {
            return;
        };
        self.prediction = match Prediction::derive(latest, &self.policy) {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                warn!(error = %e, "cannot derive prediction for new issue");
                None
            }
        };
    }

    pub fn snapshot(&self) -> &FeedSnapshot {
        &self.snapshot
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn policy(&self) -> &SizePolicy {
        &self.policy
    }

    /// Copy of the current state for observers.
    pub fn view(&self, seconds_remaining: u32) -> EngineView {
        EngineView {
            draws: self.snapshot.draws.clone(),
            prediction: self.prediction.clone(),
            seconds_remaining,
            last_error: self.last_error.clone(),
            phase: self.phase,
        }
    }
}
