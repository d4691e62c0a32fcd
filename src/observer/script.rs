use super::*;
use crate::table::ActionKind;
use serde::Deserialize;
use serde::Serialize;

/// A recorded session: hands in order, each a run of hero turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub seated: bool,
    /// Seat requests fail with this reason when set.
    pub refuse_seat: Option<String>,
    pub hands: Vec<ScriptHand>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptHand {
    pub number: u64,
    pub players: usize,
    /// Lines visible once the hand is reported.
    pub log: Vec<LogLine>,
    pub turns: Vec<ScriptTurn>,
    /// Lines revealed with the winner.
    pub tail: Vec<LogLine>,
    /// Never report a winner; the engine's deadline has to fire.
    /// The script still moves on to the next hand.
    pub stall: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptTurn {
    /// Lines revealed just before the hero is put on the clock.
    pub log: Vec<LogLine>,
    pub snapshot: TableSnapshot,
}

/// Replays a [`Script`] and records what the engine pressed.
#[derive(Debug, Default)]
pub struct ScriptObserver {
    script: Script,
    game: Option<String>,
    hand: usize,
    turn: usize,
    started: bool,
    feed: Vec<LogLine>,
    snapshot: TableSnapshot,
    pressed: Vec<(ActionKind, Option<Chips>)>,
}

impl From<Script> for ScriptObserver {
    fn from(script: Script) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }
}

impl ScriptObserver {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Script>(json)
            .map(Self::from)
            .map_err(|e| Error::configuration(format!("bad session script: {}", e)))
    }
    pub fn load(path: &str) -> Result<Self> {
        std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("cannot read {}: {}", path, e)))
            .and_then(|json| Self::from_json(&json))
    }
    pub fn game(&self) -> Option<&str> {
        self.game.as_deref()
    }
    /// Buttons pressed so far, with bet targets in chips.
    pub fn pressed(&self) -> &[(ActionKind, Option<Chips>)] {
        &self.pressed
    }
    fn current(&self) -> std::result::Result<&ScriptHand, ObserverError> {
        self.script.hands.get(self.hand).ok_or(ObserverError::Closed)
    }
    fn finish(&mut self) {
        self.hand += 1;
        self.turn = 0;
        self.started = false;
        self.snapshot = TableSnapshot::default();
    }
    fn press(&mut self, kind: ActionKind, to: Option<Chips>) -> std::result::Result<(), ObserverError> {
        if !self.snapshot.available_actions.is_empty()
            && !self.snapshot.available_actions.contains(&kind)
        {
            return Err(ObserverError::Actuation(format!("{} is not offered", kind)));
        }
        log::debug!("[script] pressed {}", kind);
        self.pressed.push((kind, to));
        Ok(())
    }
}

#[async_trait::async_trait]
impl Observer for ScriptObserver {
    async fn navigate_to_game(&mut self, game: &str) -> std::result::Result<(), ObserverError> {
        self.game = Some(game.to_string());
        Ok(())
    }
    async fn is_seated(&mut self) -> std::result::Result<bool, ObserverError> {
        Ok(self.script.seated)
    }
    async fn take_seat(&mut self) -> std::result::Result<(), ObserverError> {
        match self.script.refuse_seat.clone() {
            Some(reason) => Err(ObserverError::Actuation(reason)),
            None => {
                self.script.seated = true;
                Ok(())
            }
        }
    }
    async fn current_hand(&mut self) -> std::result::Result<Option<HandInfo>, ObserverError> {
        let hand = self.current()?.clone();
        if !self.started {
            self.started = true;
            self.feed.extend(hand.log);
        }
        Ok(Some(HandInfo {
            number: hand.number,
            players: hand.players,
        }))
    }
    async fn wait_for_bot_turn_or_winner(
        &mut self,
        _: usize,
        _: u64,
    ) -> std::result::Result<Signal, ObserverError> {
        let hand = self.current()?.clone();
        match hand.turns.get(self.turn) {
            Some(turn) => {
                self.turn += 1;
                self.feed.extend(turn.log.iter().cloned());
                self.snapshot = turn.snapshot.clone();
                Ok(Signal::Action)
            }
            None if hand.stall => {
                self.finish();
                std::future::pending().await
            }
            None => {
                self.feed.extend(hand.tail);
                self.finish();
                Ok(Signal::Winner)
            }
        }
    }
    async fn table_snapshot(&mut self) -> std::result::Result<TableSnapshot, ObserverError> {
        Ok(self.snapshot.clone())
    }
    async fn fetch_log_lines_since(
        &mut self,
        since: Option<&LogId>,
    ) -> std::result::Result<Vec<LogLine>, ObserverError> {
        Ok(self
            .feed
            .iter()
            .filter(|line| since.is_none_or(|since| line.id > *since))
            .cloned()
            .collect())
    }
    async fn check(&mut self) -> std::result::Result<(), ObserverError> {
        self.press(ActionKind::Check, None)
    }
    async fn call(&mut self) -> std::result::Result<(), ObserverError> {
        self.press(ActionKind::Call, None)
    }
    async fn fold(&mut self) -> std::result::Result<(), ObserverError> {
        self.press(ActionKind::Fold, None)
    }
    async fn bet_or_raise(&mut self, to: Chips) -> std::result::Result<(), ObserverError> {
        let kind = match self.snapshot.available_actions.contains(&ActionKind::Bet) {
            true => ActionKind::Bet,
            false => ActionKind::Raise,
        };
        self.press(kind, Some(to))
    }
}
