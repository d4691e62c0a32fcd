use super::*;
use serde::Deserialize;
use serde::Serialize;

/// Blind sizes in chips. Validated once so conversions can't fail later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blinds {
    small: Chips,
    big: Chips,
}

impl Blinds {
    pub fn new(small: Chips, big: Chips) -> Result<Self> {
        check(big)?;
        if !small.is_finite() || small < 0.0 {
            return Err(Error::configuration(format!(
                "small blind must be non-negative, got {}",
                small
            )));
        }
        Ok(Self { small, big })
    }
    pub fn small(&self) -> Chips {
        self.small
    }
    pub fn big(&self) -> Chips {
        self.big
    }
    /// Chips → big blinds.
    pub fn bb(&self, chips: Chips) -> BigBlinds {
        chips / self.big
    }
    /// Big blinds → chips.
    pub fn chips(&self, bb: BigBlinds) -> Chips {
        bb * self.big
    }
    /// Same blinds with a new big blind, as announced by a blind post.
    pub fn with_big(self, big: Chips) -> Result<Self> {
        Self::new(self.small.min(big), big)
    }
    /// Same blinds with a new small blind, as announced by a blind post.
    pub fn with_small(self, small: Chips) -> Result<Self> {
        Self::new(small, self.big)
    }
}

impl Default for Blinds {
    fn default() -> Self {
        Self {
            small: 1.0,
            big: 2.0,
        }
    }
}

impl std::fmt::Display for Blinds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}
