use super::rank::Rank;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    /// Parses a comma- or space-separated run of cards, e.g. "Ah, 10d Ks".
    pub fn many(s: &str) -> Result<Vec<Self>, String> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Card::try_from)
            .collect()
    }
}

/// str isomorphism
/// the suit is the last character; everything before it is the rank
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let (split, _) = s
            .char_indices()
            .last()
            .ok_or_else(|| String::from("empty card"))?;
        let (rank, suit) = s.split_at(split);
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}
impl TryFrom<String> for Card {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parses_letters_glyphs_and_tens() {
        assert_eq!(Card::try_from("Ah").unwrap(), Card::new(Rank::Ace, Suit::Heart));
        assert_eq!(Card::try_from("10d").unwrap(), Card::new(Rank::Ten, Suit::Diamond));
        assert_eq!(Card::try_from("K♠").unwrap(), Card::new(Rank::King, Suit::Spade));
        assert_eq!(Card::try_from(" 7c ").unwrap().to_string(), "7c");
    }
    #[test]
    fn rejects_malformed() {
        assert!(Card::try_from("").is_err());
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Zh").is_err());
    }
    #[test]
    fn parses_runs() {
        let cards = Card::many("Ah, 10d Ks").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].to_string(), "Td");
        assert!(Card::many("").unwrap().is_empty());
        assert!(Card::many("Ah, Xx").is_err());
    }
    #[test]
    fn serializes_as_text() {
        let card = Card::try_from("Qc").unwrap();
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"Qc\"");
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
    }
}
