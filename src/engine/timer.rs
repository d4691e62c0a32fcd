use crate::MAX_HAND_TIMEOUT_MS;
use std::time::Duration;
use tokio::time::Instant;

/// Upper bound on how long one hand can run, in milliseconds: every
/// opponent uses their whole clock on every street.
pub fn hand_timeout_ms(players: usize, max_turn_length: u64, num_streets: usize) -> u64 {
    1000u64
        .saturating_mul(players.saturating_sub(1) as u64)
        .saturating_mul(max_turn_length)
        .saturating_mul(num_streets as u64)
}

/// Deadline for the hand in progress, never more than a day out.
#[derive(Debug, Default)]
pub struct HandTimer {
    millis: u64,
    deadline: Option<Instant>,
}

impl HandTimer {
    pub fn start(&mut self, players: usize, max_turn_length: u64, num_streets: usize) {
        self.millis = hand_timeout_ms(players, max_turn_length, num_streets).min(MAX_HAND_TIMEOUT_MS);
        self.deadline = Some(Instant::now() + Duration::from_millis(self.millis));
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn millis(&self) -> u64 {
        self.millis
    }
    /// Now, if no hand is running.
    pub fn deadline(&self) -> Instant {
        self.deadline.unwrap_or_else(Instant::now)
    }
}

/// Doubling sleep between polls, capped.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    max: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            current: initial,
            max: max.max(initial),
        }
    }
    /// The delay to sleep now; the next one is twice as long.
    pub fn step(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }
}
