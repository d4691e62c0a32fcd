use super::*;
use crate::cards::*;
use crate::observer::TableSnapshot;
use crate::oracle::BotAction;
use crate::parse::*;
use crate::units::Blinds;
use crate::*;

/// The hand as the advisor understands it.
///
/// Owned by the engine, which is the only caller of the `pub(crate)`
/// mutators below. Everyone else gets `&Game`.
#[derive(Debug, Clone)]
pub struct Game {
    table: Table,
    blinds: Blinds,
    variant: String,
    max_turn_length: u64,
    street: Street,
    hand: u64,
    hero: String,
    hero_seat: Option<Seat>,
    hero_hand: Vec<Card>,
    hero_stack: Chips,
    history: Vec<HandAction>,
    advised: Vec<(Street, BotAction)>,
    available: Vec<ActionKind>,
}

impl Game {
    pub fn new(hero: impl Into<String>, blinds: Blinds, max_turn_length: u64) -> Self {
        Self {
            table: Table::default(),
            blinds,
            variant: String::from("No Limit Texas Hold'em"),
            max_turn_length,
            street: Street::Pref,
            hand: 0,
            hero: hero.into(),
            hero_seat: None,
            hero_hand: Vec::new(),
            hero_stack: 0.0,
            history: Vec::new(),
            advised: Vec::new(),
            available: Vec::new(),
        }
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn variant(&self) -> &str {
        &self.variant
    }
    /// Seconds each player may take per turn.
    pub fn max_turn_length(&self) -> u64 {
        self.max_turn_length
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn hand(&self) -> u64 {
        self.hand
    }
    pub fn hero(&self) -> &str {
        &self.hero
    }
    pub fn hero_seat(&self) -> Option<Seat> {
        self.hero_seat
    }
    pub fn hero_player(&self) -> Option<&Player> {
        self.hero_seat.and_then(|s| self.table.seat(s))
    }
    pub fn hero_hand(&self) -> &[Card] {
        &self.hero_hand
    }
    pub fn hero_stack(&self) -> Chips {
        self.hero_stack
    }
    pub fn hero_stack_bb(&self) -> BigBlinds {
        self.blinds.bb(self.hero_stack)
    }
    pub fn pot_bb(&self) -> BigBlinds {
        self.table.pot()
    }
    /// Chips the hero still needs to put in to call, in big blinds.
    pub fn to_call_bb(&self) -> BigBlinds {
        let mine = self.hero_player().map(Player::bet).unwrap_or(0.0);
        self.blinds.bb((self.table.max_bet() - mine).max(0.0))
    }
    pub fn history(&self) -> &[HandAction] {
        &self.history
    }
    pub fn advised(&self) -> &[(Street, BotAction)] {
        &self.advised
    }
    /// Buttons the table offered at the last snapshot.
    pub fn available(&self) -> &[ActionKind] {
        &self.available
    }
    /// Check is open if the table shows the button, or, when the
    /// Observer reports no buttons, if nobody has bet more than the hero.
    pub fn can_check(&self) -> bool {
        if self.available.is_empty() {
            self.to_call_bb() <= TOLERANCE
        } else {
            self.available.contains(&ActionKind::Check)
        }
    }
    pub fn to_bb(&self, chips: Chips) -> BigBlinds {
        self.blinds.bb(chips)
    }
}

impl Game {
    /// Fresh hand: seats, board, pot, history, and hero cards all go.
    /// The hero's seat is looked up again once the roster arrives.
    pub(crate) fn reset_hand(&mut self, number: u64, players: usize) {
        self.table.reset(players);
        self.hand = number;
        self.hero_seat = None;
        self.street = Street::Pref;
        self.hero_hand.clear();
        self.history.clear();
        self.advised.clear();
        self.available.clear();
    }
    /// Rebuilds seats and history from a validated batch.
    ///
    /// The batch is the whole hand so far, so this replays from the
    /// roster every time rather than patching incrementally. Anything
    /// before the latest hand start belongs to an earlier hand.
    pub(crate) fn apply_events(&mut self, events: &[LogEvent], maps: &IdentityMaps) {
        let events = events
            .iter()
            .rposition(|e| matches!(e.kind, EventKind::HandStarted { .. }))
            .map_or(events, |i| &events[i..]);
        self.table.clear_seats();
        self.table.set_dealt(maps.len());
        self.history.clear();
        for (seat, id) in maps.seat_to_id.iter() {
            let name = maps.id_to_name.get(id).cloned().unwrap_or_else(|| id.clone());
            let stack = maps.id_to_stack.get(id).copied().unwrap_or(0.0);
            self.table.sit(Player::new(id.clone(), name, *seat, stack));
        }
        let mut street = Street::Pref;
        let mut dealer = None;
        for event in events {
            match &event.kind {
                EventKind::HandStarted {
                    number,
                    variant,
                    dealer: button,
                    ..
                } => {
                    self.hand = *number;
                    if !variant.is_empty() {
                        self.variant = variant.clone();
                    }
                    dealer = button.as_ref().map(|p| p.id.clone());
                    street = Street::Pref;
                    self.history.clear();
                }
                EventKind::Blind {
                    player,
                    kind,
                    amount,
                    all_in,
                } => {
                    if !*all_in {
                        let updated = match kind {
                            BlindKind::Big => self.blinds.with_big(*amount),
                            BlindKind::Small => self.blinds.with_small(*amount),
                        };
                        match updated {
                            Ok(blinds) => self.blinds = blinds,
                            Err(e) => log::warn!("[game] ignoring blind post: {}", e),
                        }
                    }
                    if let Some(p) = self.seated(maps, player) {
                        p.commit(*amount);
                        if *all_in {
                            p.shove();
                        }
                    }
                }
                EventKind::Action {
                    player,
                    kind,
                    amount,
                } => self.replay(maps, street, player, *kind, *amount),
                EventKind::Board { street: next, cards } => {
                    if *next > street {
                        self.table.seats_mut().for_each(Player::clear_bet);
                        street = *next;
                    }
                    if cards.as_slice() != self.table.board() {
                        self.table.extend_board(cards);
                    }
                }
                _ => {}
            }
        }
        if let Some(id) = dealer {
            self.table
                .seats_mut()
                .for_each(|p| p.set_dealer(p.id() == id));
        }
        self.street = self.street.max(street);
        self.hero_seat = self
            .table
            .find_by_name(&self.hero)
            .map(Player::seat)
            .or(self.hero_seat);
    }
    fn seated(&mut self, maps: &IdentityMaps, player: &PlayerRef) -> Option<&mut Player> {
        let seat = maps.id_to_seat.get(&player.id)?;
        self.table.seat_mut(*seat)
    }
    fn replay(
        &mut self,
        maps: &IdentityMaps,
        street: Street,
        player: &PlayerRef,
        kind: ActionKind,
        amount: Option<Chips>,
    ) {
        let seat = maps.id_to_seat.get(&player.id).copied();
        if let Some(p) = self.seated(maps, player) {
            if p.is_folded() {
                log::warn!("[game] {} acted after folding, ignored", player);
                return;
            }
            if p.is_all_in() {
                log::warn!("[game] {} acted after going all in, ignored", player);
                return;
            }
            match kind {
                ActionKind::Fold => p.fold(),
                ActionKind::Check => {}
                ActionKind::Call | ActionKind::Bet | ActionKind::Raise => {
                    p.commit_to(amount.unwrap_or(0.0))
                }
                ActionKind::AllIn => {
                    p.commit_to(amount.unwrap_or(0.0));
                    p.shove();
                }
            }
        }
        self.history.push(HandAction {
            street,
            seat,
            name: player.name.clone(),
            kind,
            amount,
        });
    }
    /// Overlays the freshest scrape: pot, board, hero, and live seat state.
    pub(crate) fn apply_snapshot(&mut self, snapshot: &TableSnapshot) {
        self.table.set_pot(self.blinds.bb(snapshot.pot));
        if snapshot.community_cards.as_slice() != self.table.board() {
            self.table.extend_board(&snapshot.community_cards);
        }
        if let Some(street) = Street::from_board(self.table.board().len()) {
            self.street = self.street.max(street);
        }
        if !snapshot.hero_hand.is_empty() {
            self.hero_hand = snapshot.hero_hand.clone();
        }
        if snapshot.hero_stack < 0.0 {
            log::warn!("[game] negative hero stack {} clamped to 0", snapshot.hero_stack);
        }
        self.hero_stack = snapshot.hero_stack.max(0.0);
        self.hero_seat = snapshot
            .hero_seat
            .or_else(|| self.table.find_by_name(&self.hero).map(Player::seat))
            .or(self.hero_seat);
        for seat in snapshot.players.iter() {
            match self.table.seat_mut(seat.seat) {
                Some(p) => {
                    p.set_stack(seat.stack);
                    p.set_bet(seat.bet);
                    p.set_dealer(seat.dealer);
                    p.set_turn(seat.turn);
                    if seat.folded {
                        p.fold();
                    }
                    if seat.all_in {
                        p.shove();
                    }
                }
                None => {
                    let mut p = Player::new(seat.name.clone(), seat.name.clone(), seat.seat, seat.stack);
                    p.set_bet(seat.bet);
                    p.set_dealer(seat.dealer);
                    p.set_turn(seat.turn);
                    if seat.folded {
                        p.fold();
                    }
                    if seat.all_in {
                        p.shove();
                    }
                    self.table.sit(p);
                }
            }
        }
        if let Some(hero) = self.hero_seat.and_then(|s| self.table.seat_mut(s)) {
            hero.set_hole(snapshot.hero_hand.clone());
        }
        self.available = snapshot.available_actions.clone();
    }
    pub(crate) fn record_action(&mut self, action: &BotAction) {
        self.advised.push((self.street, action.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::SeatSnapshot;
    fn game() -> Game {
        Game::new("alice", Blinds::new(10.0, 20.0).unwrap(), 30)
    }
    fn hand() -> Vec<LogEvent> {
        [
            "-- starting hand #7 (id: h7)  (No Limit Texas Hold'em) (dealer: \"bob @ b2\") --",
            "Player stacks: #1 \"alice @ a1\" (1000) | #4 \"bob @ b2\" (950) | #6 \"carol @ c3\" (400)",
            "\"bob @ b2\" posts a small blind of 10",
            "\"carol @ c3\" posts a big blind of 20",
            "\"alice @ a1\" raises to 60",
            "\"bob @ b2\" folds",
            "\"carol @ c3\" calls 60",
            "Flop:  [Ah, 7d, 2c]",
            "\"carol @ c3\" bets 100",
        ]
        .iter()
        .enumerate()
        .flat_map(|(i, text)| parse_line(&LogLine::new(i.to_string(), *text)).unwrap())
        .collect()
    }
    fn applied() -> Game {
        let events = hand();
        let maps = IdentityMaps::extract(&events);
        let mut game = game();
        game.reset_hand(7, 3);
        game.apply_events(&events, &maps);
        game
    }
    #[test]
    fn replays_roster_and_actions() {
        let game = applied();
        assert_eq!(game.hand(), 7);
        assert_eq!(game.table().len(), 3);
        assert_eq!(game.table().dealt(), 3);
        assert_eq!(game.street(), Street::Flop);
        assert_eq!(game.hero_seat(), Some(1));
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.history()[3].street, Street::Flop);
        let bob = game.table().seat(4).unwrap();
        assert!(bob.is_folded());
        assert!(bob.is_dealer());
        assert_eq!(bob.stack(), 940.0);
        let carol = game.table().seat(6).unwrap();
        assert_eq!(carol.stack(), 240.0);
        assert_eq!(carol.bet(), 100.0);
        let alice = game.table().seat(1).unwrap();
        assert_eq!(alice.bet(), 0.0);
        assert_eq!(alice.stack(), 940.0);
        assert_eq!(game.table().board().len(), 3);
        assert!((game.to_call_bb() - 5.0).abs() < TOLERANCE);
        assert!(!game.can_check());
    }
    #[test]
    fn folded_player_cannot_act_again() {
        let mut events = hand();
        events.extend(parse_line(&LogLine::new("99", "\"bob @ b2\" bets 500")).unwrap());
        let maps = IdentityMaps::extract(&events);
        let mut game = game();
        game.apply_events(&events, &maps);
        assert_eq!(game.table().seat(4).unwrap().stack(), 940.0);
        assert_eq!(game.history().len(), 4);
    }
    #[test]
    fn reapplying_the_same_batch_is_stable() {
        let events = hand();
        let maps = IdentityMaps::extract(&events);
        let mut game = applied();
        game.apply_events(&events, &maps);
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.table().seat(6).unwrap().stack(), 240.0);
    }
    #[test]
    fn snapshot_overlays_pot_hero_and_board() {
        let mut game = applied();
        let snapshot = TableSnapshot {
            pot: 280.0,
            hero_seat: Some(1),
            hero_hand: Card::many("Ks Kd").unwrap(),
            hero_stack: 940.0,
            community_cards: Card::many("Ah 7d 2c").unwrap(),
            players: vec![SeatSnapshot {
                seat: 6,
                name: String::from("carol"),
                stack: 240.0,
                bet: 100.0,
                turn: false,
                ..SeatSnapshot::default()
            }],
            available_actions: vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
        };
        game.apply_snapshot(&snapshot);
        assert_eq!(game.pot_bb(), 14.0);
        assert_eq!(game.hero_stack_bb(), 47.0);
        assert_eq!(game.hero_hand().len(), 2);
        assert_eq!(game.hero_player().unwrap().hole().len(), 2);
        assert!(!game.can_check());
        let shrunk = TableSnapshot {
            community_cards: Vec::new(),
            ..snapshot
        };
        game.apply_snapshot(&shrunk);
        assert_eq!(game.table().board().len(), 3);
    }
    #[test]
    fn reset_clears_the_hand() {
        let mut game = applied();
        game.record_action(&BotAction::new(ActionKind::Check, 0.0));
        game.reset_hand(8, 5);
        assert!(game.history().is_empty());
        assert!(game.advised().is_empty());
        assert!(game.table().board().is_empty());
        assert_eq!(game.street(), Street::Pref);
        assert_eq!(game.table().dealt(), 5);
        assert_eq!(game.hand(), 8);
    }
    #[test]
    fn blind_posts_update_blinds() {
        let game = applied();
        assert_eq!(game.blinds().big(), 20.0);
        assert_eq!(game.blinds().small(), 10.0);
    }
    #[test]
    fn short_all_in_post_keeps_the_stakes() {
        let events = [
            "-- starting hand #9 (id: h9)  (No Limit Texas Hold'em) --",
            "Player stacks: #1 \"alice @ a1\" (1000) | #4 \"bob @ b2\" (950) | #6 \"carol @ c3\" (5)",
            "\"bob @ b2\" posts a small blind of 10",
            "\"carol @ c3\" posts a big blind of 5 and go all in",
        ]
        .iter()
        .enumerate()
        .flat_map(|(i, text)| parse_line(&LogLine::new(i.to_string(), *text)).unwrap())
        .collect::<Vec<_>>();
        let maps = IdentityMaps::extract(&events);
        let mut game = Game::new("alice", Blinds::new(10.0, 20.0).unwrap(), 30);
        game.apply_events(&events, &maps);
        assert_eq!(game.blinds().big(), 20.0);
        assert_eq!(game.blinds().small(), 10.0);
        let carol = game.table().seat(6).unwrap();
        assert!(carol.is_all_in());
        assert_eq!(carol.stack(), 0.0);
        assert_eq!(game.to_bb(100.0), 5.0);
    }
    #[test]
    fn hero_seat_follows_the_hero_between_hands() {
        let mut game = applied();
        assert_eq!(game.hero_seat(), Some(1));
        let events = [
            "-- starting hand #8 (id: h8)  (No Limit Texas Hold'em) --",
            "Player stacks: #1 \"dave @ d4\" (800) | #3 \"alice @ a1\" (940) | #4 \"bob @ b2\" (940)",
            "\"bob @ b2\" posts a small blind of 10",
            "\"dave @ d4\" posts a big blind of 20",
        ]
        .iter()
        .enumerate()
        .flat_map(|(i, text)| parse_line(&LogLine::new((50 + i).to_string(), *text)).unwrap())
        .collect::<Vec<_>>();
        let maps = IdentityMaps::extract(&events);
        game.reset_hand(8, 3);
        assert_eq!(game.hero_seat(), None);
        game.apply_events(&events, &maps);
        assert_eq!(game.hero_seat(), Some(3));
        game.apply_snapshot(&TableSnapshot {
            hero_stack: 940.0,
            ..TableSnapshot::default()
        });
        assert_eq!(game.hero_seat(), Some(3));
        assert_eq!(game.hero_player().unwrap().name(), "alice");
        assert!((game.to_call_bb() - 1.0).abs() < TOLERANCE);
    }
}
