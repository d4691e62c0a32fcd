use crate::cards::*;
use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// The betting vocabulary shared by the log, the Oracle, and the buttons.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Check,
    Call,
    Bet,
    Raise,
    Fold,
    AllIn,
}

impl ActionKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Check,
            Self::Call,
            Self::Bet,
            Self::Raise,
            Self::Fold,
            Self::AllIn,
        ]
    }
    /// True if the action must carry a positive size.
    pub fn is_sized(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }
    /// True if the action puts chips in voluntarily.
    pub fn is_voluntary(&self) -> bool {
        matches!(self, Self::Call | Self::Bet | Self::Raise | Self::AllIn)
    }
    /// True if this is a bet, raise, or shove.
    pub fn is_aggro(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise | Self::AllIn)
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "check" | "checks" => Ok(Self::Check),
            "call" | "calls" => Ok(Self::Call),
            "bet" | "bets" => Ok(Self::Bet),
            "raise" | "raises" => Ok(Self::Raise),
            "fold" | "folds" => Ok(Self::Fold),
            "all-in" | "all_in" | "allin" | "all in" | "shove" | "jam" => Ok(Self::AllIn),
            _ => Err(format!("invalid action: {}", s)),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Check => "check",
                Self::Call => "call",
                Self::Bet => "bet",
                Self::Raise => "raise",
                Self::Fold => "fold",
                Self::AllIn => "all-in",
            }
        )
    }
}

/// One logged action of the current hand, kept for the query history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandAction {
    pub street: Street,
    pub seat: Option<Seat>,
    pub name: String,
    pub kind: ActionKind,
    pub amount: Option<Chips>,
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parses_log_and_oracle_spellings() {
        assert_eq!(ActionKind::try_from("Raises"), Ok(ActionKind::Raise));
        assert_eq!(ActionKind::try_from("ALL IN"), Ok(ActionKind::AllIn));
        assert_eq!(ActionKind::try_from("shove"), Ok(ActionKind::AllIn));
        assert!(ActionKind::try_from("limp").is_err());
    }
    #[test]
    fn display_round_trips() {
        for kind in ActionKind::all() {
            assert_eq!(ActionKind::try_from(kind.to_string().as_str()), Ok(*kind));
        }
    }
    #[test]
    fn serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&ActionKind::AllIn).unwrap(), "\"all-in\"");
    }
}
