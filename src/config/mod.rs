//! Session settings, loaded from JSON and overridden from the command line.
use crate::units::Blinds;
use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Advise shows the recommendation; automate also presses the button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Advise,
    Automate,
}

impl TryFrom<&str> for Mode {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "advise" => Ok(Self::Advise),
            "automate" => Ok(Self::Automate),
            _ => Err(Error::configuration(format!("unknown mode {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: String,
    /// Display name of the hero at the table.
    pub hero: String,
    pub mode: Mode,
    /// Watch without taking a seat.
    pub observe_only: bool,
    pub blinds: Blinds,
    /// Seconds per turn.
    pub max_turn_length: u64,
    pub num_streets: usize,
    pub poll_interval_ms: u64,
    pub max_poll_interval_ms: u64,
    pub oracle_retries: usize,
    pub oracle_backoff_ms: u64,
    pub oracle_timeout_ms: u64,
    pub ingest_retries: usize,
    pub max_history: usize,
    pub system_prompt: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: String::new(),
            hero: String::new(),
            mode: Mode::Advise,
            observe_only: false,
            blinds: Blinds::default(),
            max_turn_length: MAX_TURN_LENGTH,
            num_streets: NUM_STREETS,
            poll_interval_ms: POLL_INTERVAL_MS,
            max_poll_interval_ms: MAX_POLL_INTERVAL_MS,
            oracle_retries: ORACLE_RETRIES,
            oracle_backoff_ms: ORACLE_BACKOFF_MS,
            oracle_timeout_ms: 60_000,
            ingest_retries: INGEST_RETRIES,
            max_history: MAX_HISTORY,
            system_prompt: Some(String::from(
                "You are a no-limit hold'em coach. Amounts are in big blinds. Answer with one action.",
            )),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::configuration(format!("bad config: {}", e)))
    }
    pub fn load(path: &str) -> Result<Self> {
        std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("cannot read {}: {}", path, e)))
            .and_then(|json| Self::from_json(&json))
    }
    pub fn validate(&self) -> Result<()> {
        Blinds::new(self.blinds.small(), self.blinds.big())?;
        if self.max_turn_length == 0 {
            return Err(Error::configuration("max turn length must be positive"));
        }
        if self.max_turn_length > MAX_TURN_LENGTH_LIMIT {
            return Err(Error::configuration(format!(
                "max turn length {}s is over the {}s limit",
                self.max_turn_length, MAX_TURN_LENGTH_LIMIT
            )));
        }
        if self.num_streets == 0 {
            return Err(Error::configuration("a hand needs at least one street"));
        }
        if self.max_poll_interval_ms < self.poll_interval_ms {
            return Err(Error::configuration("poll interval cap is below the poll interval"));
        }
        if self.max_history == 0 {
            return Err(Error::configuration("history must keep at least one message"));
        }
        Ok(())
    }
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
    pub fn max_poll_interval(&self) -> Duration {
        Duration::from_millis(self.max_poll_interval_ms)
    }
    pub fn oracle_backoff(&self) -> Duration {
        Duration::from_millis(self.oracle_backoff_ms)
    }
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.oracle_timeout_ms)
    }
    /// Zero delays everywhere, for tests and replays.
    pub fn instant(self) -> Self {
        Self {
            poll_interval_ms: 0,
            max_poll_interval_ms: 0,
            oracle_backoff_ms: 0,
            ..self
        }
    }
}
