mod engine;
mod poller;

pub use engine::{Engine, EngineHandle, Schedule};
pub use poller::FeedPoller;
