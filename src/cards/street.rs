use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    #[default]
    Pref = 0isize,
    Flop = 1isize,
    Turn = 2isize,
    Rive = 3isize,
}

impl Street {
    pub const fn all() -> &'static [Self] {
        &[Self::Pref, Self::Flop, Self::Turn, Self::Rive]
    }
    pub const fn n_observed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
        }
    }
    /// Street implied by the number of community cards on the board.
    pub fn from_board(n: usize) -> Option<Self> {
        match n {
            0 => Some(Self::Pref),
            3 => Some(Self::Flop),
            4 => Some(Self::Turn),
            5 => Some(Self::Rive),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Street {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "preflop" | "pre-flop" => Ok(Self::Pref),
            "flop" => Ok(Self::Flop),
            "turn" => Ok(Self::Turn),
            "river" => Ok(Self::Rive),
            _ => Err(format!("invalid street: {}", s)),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "Preflop"),
            Self::Flop => write!(f, "Flop"),
            Self::Turn => write!(f, "Turn"),
            Self::Rive => write!(f, "River"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn board_size_implies_street() {
        for street in Street::all() {
            assert_eq!(Street::from_board(street.n_observed()), Some(*street));
        }
        assert_eq!(Street::from_board(2), None);
        assert_eq!(Street::from_board(6), None);
    }
    #[test]
    fn parses_log_names() {
        assert_eq!(Street::try_from("River"), Ok(Street::Rive));
        assert_eq!(Street::try_from("flop"), Ok(Street::Flop));
        assert!(Street::try_from("showdown").is_err());
    }
}
