mod countdown;
mod draw;
mod tracker;
mod view;

pub use countdown::Countdown;
pub use draw::{Draw, FeedSnapshot};
pub use tracker::{IssueTracker, Observation};
pub use view::{EngineView, PollPhase};
