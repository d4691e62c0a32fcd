//! Chip ↔ big-blind normalization.
//!
//! Every amount the advisor reasons about is expressed in big blinds;
//! the table shows chips. These are the only conversions in the crate.
mod blinds;

pub use blinds::*;

use crate::*;

/// `chips / big_blind`. Fails only for a non-positive big blind.
pub fn to_big_blinds(chips: Chips, big_blind: Chips) -> Result<BigBlinds> {
    check(big_blind)?;
    Ok(chips / big_blind)
}

/// Inverse of [`to_big_blinds`].
pub fn to_chips(big_blinds: BigBlinds, big_blind: Chips) -> Result<Chips> {
    check(big_blind)?;
    Ok(big_blinds * big_blind)
}

fn check(big_blind: Chips) -> Result<()> {
    if big_blind.is_finite() && big_blind > 0.0 {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "big blind must be positive, got {}",
            big_blind
        )))
    }
}
