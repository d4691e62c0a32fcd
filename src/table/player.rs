use crate::cards::*;
use crate::*;

/// One seated player as the aggregate tracks them.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: String,
    name: String,
    seat: Seat,
    stack: Chips,
    bet: Chips,
    hole: Vec<Card>,
    folded: bool,
    all_in: bool,
    dealer: bool,
    turn: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, seat: Seat, stack: Chips) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seat,
            stack: Self::clamp(stack),
            bet: 0.0,
            hole: Vec::new(),
            folded: false,
            all_in: false,
            dealer: false,
            turn: false,
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn bet(&self) -> Chips {
        self.bet
    }
    pub fn hole(&self) -> &[Card] {
        &self.hole
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_dealer(&self) -> bool {
        self.dealer
    }
    pub fn is_turn(&self) -> bool {
        self.turn
    }
    /// Folded and all-in players have nothing left to decide.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }
}

impl Player {
    fn clamp(stack: Chips) -> Chips {
        if stack < 0.0 {
            log::warn!("[player] negative stack {} clamped to 0", stack);
            0.0
        } else {
            stack
        }
    }
    pub(crate) fn set_stack(&mut self, stack: Chips) {
        self.stack = Self::clamp(stack);
    }
    pub(crate) fn set_bet(&mut self, bet: Chips) {
        self.bet = bet.max(0.0);
    }
    pub(crate) fn set_hole(&mut self, hole: Vec<Card>) {
        self.hole = hole;
    }
    pub(crate) fn set_dealer(&mut self, dealer: bool) {
        self.dealer = dealer;
    }
    pub(crate) fn set_turn(&mut self, turn: bool) {
        self.turn = turn;
    }
    /// Folding is one-way within a hand.
    pub(crate) fn fold(&mut self) {
        self.folded = true;
        self.turn = false;
    }
    pub(crate) fn shove(&mut self) {
        self.all_in = true;
    }
    /// Puts chips in until this street's total bet reaches `to`.
    pub(crate) fn commit_to(&mut self, to: Chips) {
        let delta = (to - self.bet).max(0.0);
        self.set_stack(self.stack - delta);
        self.bet = self.bet.max(to);
    }
    /// Adds a forced or incremental contribution on top of the current bet.
    pub(crate) fn commit(&mut self, amount: Chips) {
        self.commit_to(self.bet + amount);
    }
    pub(crate) fn clear_bet(&mut self) {
        self.bet = 0.0;
    }
}
