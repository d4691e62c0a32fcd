use super::*;
use crate::cards::*;
use crate::*;
use std::collections::BTreeMap;

/// Seats, pot, and board for the hand in progress.
#[derive(Debug, Clone, Default)]
pub struct Table {
    seats: BTreeMap<Seat, Player>,
    pot: BigBlinds,
    board: Vec<Card>,
    dealt: usize,
}

impl Table {
    pub fn seats(&self) -> impl Iterator<Item = &Player> {
        self.seats.values()
    }
    pub fn seat(&self, seat: Seat) -> Option<&Player> {
        self.seats.get(&seat)
    }
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        self.seats.values().find(|p| p.name() == name)
    }
    pub fn pot(&self) -> BigBlinds {
        self.pot
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    /// Players dealt into the pot this hand.
    pub fn dealt(&self) -> usize {
        self.dealt
    }
    /// Largest street bet on the table, in chips.
    pub fn max_bet(&self) -> Chips {
        self.seats.values().map(Player::bet).fold(0.0, Chips::max)
    }
    pub fn len(&self) -> usize {
        self.seats.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl Table {
    pub(crate) fn reset(&mut self, dealt: usize) {
        self.seats.clear();
        self.board.clear();
        self.pot = 0.0;
        self.dealt = dealt;
    }
    pub(crate) fn sit(&mut self, player: Player) {
        self.seats.insert(player.seat(), player);
    }
    pub(crate) fn seat_mut(&mut self, seat: Seat) -> Option<&mut Player> {
        self.seats.get_mut(&seat)
    }
    pub(crate) fn seats_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.seats.values_mut()
    }
    pub(crate) fn clear_seats(&mut self) {
        self.seats.clear();
    }
    pub(crate) fn set_pot(&mut self, pot: BigBlinds) {
        self.pot = pot.max(0.0);
    }
    pub(crate) fn set_dealt(&mut self, dealt: usize) {
        self.dealt = dealt;
    }
    /// Accepts a board only if it extends the current one.
    /// Returns false (and keeps the old board) otherwise.
    pub(crate) fn extend_board(&mut self, cards: &[Card]) -> bool {
        let grows = cards.len() >= self.board.len()
            && Street::from_board(cards.len()).is_some()
            && cards.starts_with(&self.board);
        if grows {
            self.board = cards.to_vec();
        } else {
            log::warn!(
                "[table] rejected board {:?} over {:?}",
                cards.iter().map(Card::to_string).collect::<Vec<_>>(),
                self.board.iter().map(Card::to_string).collect::<Vec<_>>()
            );
        }
        grows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn cards(s: &str) -> Vec<Card> {
        Card::many(s).unwrap()
    }
    #[test]
    fn board_only_grows() {
        let mut table = Table::default();
        assert!(table.extend_board(&cards("Ah 7d 2c")));
        assert!(table.extend_board(&cards("Ah 7d 2c Ks")));
        assert!(!table.extend_board(&cards("Ah 7d 2c")));
        assert!(!table.extend_board(&cards("Qh 7d 2c Ks 3s")));
        assert!(!table.extend_board(&cards("Ah 7d 2c Ks 3s 4s")));
        assert_eq!(table.board().len(), 4);
        assert!(table.extend_board(&cards("Ah 7d 2c Ks 3s")));
        assert_eq!(table.board().len(), 5);
    }
    #[test]
    fn reset_clears_board_and_seats() {
        let mut table = Table::default();
        table.sit(Player::new("a1", "alice", 1, 100.0));
        table.extend_board(&cards("Ah 7d 2c"));
        table.set_pot(3.0);
        table.reset(6);
        assert!(table.is_empty());
        assert!(table.board().is_empty());
        assert_eq!(table.pot(), 0.0);
        assert_eq!(table.dealt(), 6);
    }
    #[test]
    fn seats_are_ordered() {
        let mut table = Table::default();
        table.sit(Player::new("c3", "carol", 7, 100.0));
        table.sit(Player::new("a1", "alice", 1, 100.0));
        let seats = table.seats().map(Player::seat).collect::<Vec<_>>();
        assert_eq!(seats, vec![1, 7]);
        assert_eq!(table.find_by_name("carol").map(Player::seat), Some(7));
    }
}
