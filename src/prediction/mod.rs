mod color;
mod issue;
mod size;

pub use color::derive_color_class;
pub use issue::derive_next_issue_id;
pub use size::{derive_size_class, SizeClass, SizePolicy};

use crate::state::Draw;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("issue number `{0}` does not end in digits")]
    InvalidIssue(String),
}

/// Heuristic call for the round after the latest observed draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Short id of the round not yet drawn (000-999)
    pub next_issue_number: String,
    pub size_class: SizeClass,
    /// Color of the last completed draw, relabelled for the next one
    pub color_class: String,
}

impl Prediction {
    /// Derive the prediction from the latest draw.
    ///
    /// Pure: the same draw and policy always give the same prediction.
    pub fn derive(latest: &Draw, policy: &SizePolicy) -> Result<Self, PredictionError> {
        Ok(Self {
            next_issue_number: derive_next_issue_id(&latest.issue_number)?,
            size_class: derive_size_class(latest.number, policy),
            color_class: derive_color_class(&latest.color).to_string(),
        })
    }
}
