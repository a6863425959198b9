pub mod api;
pub mod config;
pub mod display;
pub mod events;
pub mod feeds;
pub mod prediction;
pub mod state;
