/// Seconds left until the next fetch, aligned to the feed's round length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    round_secs: u32,
    remaining: u32,
}

impl Countdown {
    /// Start a full round.
    pub fn new(round_secs: u32) -> Self {
        let round_secs = round_secs.max(1);
        Self {
            round_secs,
            remaining: round_secs,
        }
    }

    /// Start at the seconds left until the next round boundary on the
    /// wall clock. A clock sitting exactly on a boundary gives a full round.
    pub fn aligned(round_secs: u32, now_ms: i64) -> Self {
        let mut countdown = Self::new(round_secs);
        let round = countdown.round_secs as i64;
        let into_round = (now_ms / 1000).rem_euclid(round);
        countdown.remaining = (round - into_round) as u32;
        countdown
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn round_secs(&self) -> u32 {
        self.round_secs
    }

    /// Advance one second. Returns true once the countdown sits at zero.
    /// Never goes below zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Back to a full round.
    pub fn reset(&mut self) {
        self.remaining = self.round_secs;
    }
}
