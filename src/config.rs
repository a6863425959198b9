use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::api::history::DEFAULT_BASE_URL;
use crate::feeds::Schedule;
use crate::prediction::SizePolicy;

const BASE_URL_ENV: &str = "DRAWFEED_BASE_URL";
const ROUND_SECS_ENV: &str = "DRAWFEED_ROUND_SECS";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: Feed,
    pub schedule: ScheduleConfig,
    pub prediction: SizePolicy,
    pub general: General,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Feed {
    /// Game root, the history page path is appended to it
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    Countdown,
    Fixed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub mode: ScheduleMode,
    /// Seconds between draws on the feed
    pub round_secs: u32,
    /// Fixed mode only
    pub interval_ms: u64,
    pub align_to_clock: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            mode: ScheduleMode::Countdown,
            round_secs: 60,
            interval_ms: 1_000,
            align_to_clock: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if it exists, else defaults. Env overrides applied last.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(url) = var(BASE_URL_ENV) {
            self.feed.base_url = url;
        }
        if let Some(secs) = var(ROUND_SECS_ENV) {
            self.schedule.round_secs = secs
                .parse()
                .map_err(|e| anyhow::anyhow!("{} must be a number of seconds: {}", ROUND_SECS_ENV, e))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.feed.timeout_ms)
    }

    pub fn schedule(&self) -> Schedule {
        let s = &self.schedule;
        match s.mode {
            ScheduleMode::Countdown => Schedule::Countdown {
                round_secs: s.round_secs,
                align_to_clock: s.align_to_clock,
            },
            ScheduleMode::Fixed => Schedule::FixedInterval {
                interval: Duration::from_millis(s.interval_ms),
                round_secs: s.round_secs,
            },
        }
    }
}
