use super::*;
use crate::config::*;
use crate::ingest::LogCursor;
use crate::ledger::*;
use crate::observer::*;
use crate::operator::*;
use crate::oracle::*;
use crate::parse::*;
use crate::table::*;
use crate::*;

/// Drives one table session from seating to shutdown.
///
/// The engine is the only writer of the [`Game`]. Every collaborator is
/// awaited in turn, so there is exactly one hand and one decision in
/// flight at any time. Operator commands are honored only between
/// Observer waits; an Oracle call is never cut short.
pub struct Engine<O, A, L, P> {
    config: Config,
    game: Game,
    cursor: LogCursor,
    conversation: Conversation,
    timer: HandTimer,
    phase: Phase,
    resume: Phase,
    players: usize,
    last_hand: Option<u64>,
    last_turn: Option<TableSnapshot>,
    observer: O,
    oracle: A,
    ledger: L,
    operator: P,
}

impl<O, A, L, P> Engine<O, A, L, P>
where
    O: Observer,
    A: Oracle,
    L: Ledger,
    P: Operator,
{
    pub fn new(config: Config, observer: O, oracle: A, ledger: L, operator: P) -> Self {
        Self {
            game: Game::new(config.hero.clone(), config.blinds, config.max_turn_length),
            conversation: Conversation::new(config.system_prompt.clone(), config.max_history),
            cursor: LogCursor::default(),
            timer: HandTimer::default(),
            phase: Phase::EnteringTable,
            resume: Phase::Monitoring,
            players: 0,
            last_hand: None,
            last_turn: None,
            config,
            observer,
            oracle,
            ledger,
            operator,
        }
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn observer(&self) -> &O {
        &self.observer
    }
    pub fn oracle(&self) -> &A {
        &self.oracle
    }
    pub fn ledger(&self) -> &L {
        &self.ledger
    }
    pub fn operator(&self) -> &P {
        &self.operator
    }

    /// Runs until the operator quits, the Observer closes, or a fatal
    /// error. Everything else is logged and retried.
    pub async fn run(&mut self) -> Result<()> {
        self.config.validate()?;
        while !self.phase.is_terminal() {
            let step = match self.phase {
                Phase::EnteringTable => self.enter().await,
                Phase::WaitingForHand => self.wait_for_hand().await,
                Phase::Monitoring => self.monitor().await,
                Phase::HandEnding => self.end_hand().await,
                Phase::Paused => self.paused().await,
                Phase::Stopped => Ok(Phase::Stopped),
            };
            let next = match step {
                Ok(next) => next,
                Err(Error::Observer(ObserverError::Closed))
                | Err(Error::Ingestion(ObserverError::Closed)) => {
                    log::info!("[engine] observer closed");
                    Phase::Stopped
                }
                Err(e) if e.is_fatal() => {
                    log::error!("[engine] {}", e);
                    self.phase = Phase::Stopped;
                    return Err(e);
                }
                Err(e) => {
                    log::warn!("[engine] {}: {}", self.phase, e);
                    tokio::time::sleep(self.config.poll_interval()).await;
                    self.phase
                }
            };
            if next != self.phase {
                log::debug!("[engine] {} -> {}", self.phase, next);
            }
            self.phase = next;
        }
        Ok(())
    }
}

impl<O, A, L, P> Engine<O, A, L, P>
where
    O: Observer,
    A: Oracle,
    L: Ledger,
    P: Operator,
{
    /// Operator check between waits. `None` means carry on.
    async fn boundary(&mut self) -> Option<Phase> {
        match self.operator.poll().await {
            Command::Continue | Command::Resume => None,
            Command::Pause => {
                log::info!("[engine] paused");
                self.resume = self.phase;
                Some(Phase::Paused)
            }
            Command::Quit => {
                log::info!("[engine] quit requested");
                Some(Phase::Stopped)
            }
        }
    }

    async fn enter(&mut self) -> Result<Phase> {
        let game = self.config.game.clone();
        let seating = |e: ObserverError| Error::Seating(e.to_string());
        self.observer
            .navigate_to_game(&game)
            .await
            .map_err(|e| Error::Seating(format!("cannot open {}: {}", game, e)))?;
        if self.config.observe_only {
            log::info!("[engine] watching {} without a seat", game);
        } else if self.observer.is_seated().await.map_err(seating)? {
            log::info!("[engine] already seated at {}", game);
        } else {
            self.observer.take_seat().await.map_err(seating)?;
            log::info!("[engine] took a seat at {}", game);
        }
        Ok(Phase::WaitingForHand)
    }

    async fn wait_for_hand(&mut self) -> Result<Phase> {
        let mut backoff = Backoff::new(self.config.poll_interval(), self.config.max_poll_interval());
        loop {
            if let Some(next) = self.boundary().await {
                return Ok(next);
            }
            match self.observer.current_hand().await? {
                Some(info) if Some(info.number) != self.last_hand => {
                    self.start_hand(info);
                    return Ok(Phase::Monitoring);
                }
                _ => tokio::time::sleep(backoff.step()).await,
            }
        }
    }

    fn start_hand(&mut self, info: HandInfo) {
        log::info!("[engine] hand #{} with {} players", info.number, info.players);
        self.players = info.players;
        self.cursor.begin_hand(info.number);
        self.conversation.clear();
        self.last_turn = None;
        self.game.reset_hand(info.number, info.players);
        self.timer.start(
            info.players,
            self.config.max_turn_length,
            self.config.num_streets,
        );
    }

    async fn monitor(&mut self) -> Result<Phase> {
        if let Some(next) = self.boundary().await {
            return Ok(next);
        }
        let deadline = self.timer.deadline();
        let wait = self
            .observer
            .wait_for_bot_turn_or_winner(self.players, self.config.max_turn_length);
        let signal = tokio::time::timeout_at(deadline, wait).await;
        match signal {
            Err(_) => {
                let e = Error::Timeout {
                    millis: self.timer.millis(),
                };
                log::warn!("[engine] hand #{}: {}, treating it as over", self.game.hand(), e);
                Ok(Phase::HandEnding)
            }
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(Signal::Winner)) => Ok(Phase::HandEnding),
            Ok(Ok(Signal::Action)) => self.act().await.map(|_| Phase::Monitoring),
        }
    }

    /// One hero turn: refresh state, decide, surface, maybe execute.
    async fn act(&mut self) -> Result<()> {
        let snapshot = self.observer.table_snapshot().await?;
        if self.last_turn.as_ref() == Some(&snapshot) {
            log::debug!("[engine] same turn as last time, not asking again");
            return Ok(());
        }
        self.ingest().await?;
        self.game.apply_snapshot(&snapshot);
        let action = decide(
            &mut self.oracle,
            &self.game,
            &self.ledger,
            &mut self.conversation,
            self.config.oracle_retries,
            self.config.oracle_backoff(),
        )
        .await;
        let executed = match self.config.mode {
            Mode::Automate => self.execute(&action).await,
            Mode::Advise => false,
        };
        let advice = Advice::new(&self.game, &action, executed);
        log::info!("[engine] {}", advice);
        self.operator.present(&advice).await;
        self.game.record_action(&action);
        self.last_turn = Some(snapshot);
        Ok(())
    }

    /// Pulls until the identity maps are complete, then applies the hand.
    /// Gives up after `ingest_retries` extra pulls and keeps the old seats.
    async fn ingest(&mut self) -> Result<()> {
        let attempts = self.config.ingest_retries + 1;
        for attempt in 1..=attempts {
            match self.cursor.pull(&mut self.observer).await {
                Err(Error::Ingestion(ObserverError::Closed)) => {
                    return Err(Error::Ingestion(ObserverError::Closed));
                }
                Err(e) => log::warn!("[engine] {}", e),
                Ok(_) => {}
            }
            let maps = IdentityMaps::extract(self.cursor.accumulated());
            match validate_all(&maps) {
                Ok(()) => {
                    self.game.apply_events(self.cursor.accumulated(), &maps);
                    return Ok(());
                }
                Err(e) => log::warn!("[engine] pull {}/{}: {}", attempt, attempts, e),
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.poll_interval()).await;
            }
        }
        log::warn!("[engine] deciding on stale seats");
        Ok(())
    }

    /// Presses the button for `action`. False if the table refused.
    async fn execute(&mut self, action: &BotAction) -> bool {
        let committed = self.game.hero_player().map(Player::bet).unwrap_or(0.0);
        let result = match action.kind {
            ActionKind::Check => self.observer.check().await,
            ActionKind::Call => self.observer.call().await,
            ActionKind::Fold => self.observer.fold().await,
            ActionKind::Bet | ActionKind::Raise => {
                let to = self.game.blinds().chips(action.size);
                self.observer.bet_or_raise(to).await
            }
            ActionKind::AllIn => {
                let to = self.game.hero_stack() + committed;
                self.observer.bet_or_raise(to).await
            }
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[engine] could not {}: {}", action, e);
                false
            }
        }
    }

    async fn end_hand(&mut self) -> Result<Phase> {
        let hand = self.game.hand();
        if let Err(e) = self.cursor.pull(&mut self.observer).await {
            log::warn!("[engine] catch-up pull failed: {}", e);
        }
        match self.cursor.history(&mut self.observer).await {
            Ok(events) => {
                let start = events
                    .iter()
                    .position(|e| matches!(e.kind, EventKind::HandStarted { number, .. } if number == hand))
                    .unwrap_or(0);
                let stats = PlayerStats::from_hand(&events[start..]);
                self.ledger.record(&stats);
                log::info!("[engine] hand #{} over, {} players recorded", hand, stats.len());
            }
            Err(e) => log::warn!("[engine] hand #{} history unavailable: {}", hand, e),
        }
        self.last_hand = Some(hand);
        self.cursor.reset_hand(hand);
        self.conversation.clear();
        self.last_turn = None;
        self.timer.clear();
        self.game.reset_hand(hand, 0);
        Ok(Phase::WaitingForHand)
    }

    async fn paused(&mut self) -> Result<Phase> {
        match self.operator.wait().await {
            Command::Resume | Command::Continue => {
                log::info!("[engine] resumed");
                Ok(self.resume)
            }
            Command::Pause => Ok(Phase::Paused),
            Command::Quit => Ok(Phase::Stopped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    fn lines(start: u64, texts: &[&str]) -> Vec<LogLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| LogLine::new((start + i as u64).to_string(), *text))
            .collect()
    }
    fn turn(pot: Chips, actions: Vec<ActionKind>) -> ScriptTurn {
        ScriptTurn {
            log: vec![],
            snapshot: TableSnapshot {
                pot,
                hero_seat: Some(1),
                hero_hand: Card::many("Ks Kd").unwrap(),
                hero_stack: 1000.0,
                available_actions: actions,
                ..TableSnapshot::default()
            },
        }
    }
    fn first() -> ScriptHand {
        ScriptHand {
            number: 1,
            players: 3,
            log: lines(100, &[
                "-- starting hand #1 (id: h1)  (No Limit Texas Hold'em) (dealer: \"alice @ a1\") --",
                "Player stacks: #1 \"alice @ a1\" (1000) | #4 \"bob @ b2\" (950) | #6 \"carol @ c3\" (400)",
                "\"bob @ b2\" posts a small blind of 10",
                "\"carol @ c3\" posts a big blind of 20",
            ]),
            turns: vec![turn(30.0, vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise])],
            tail: lines(110, &[
                "\"alice @ a1\" raises to 60",
                "\"bob @ b2\" folds",
                "\"carol @ c3\" folds",
                "\"alice @ a1\" collected 90 from pot",
                "-- ending hand #1 --",
            ]),
            stall: false,
        }
    }
    fn second() -> ScriptHand {
        ScriptHand {
            number: 2,
            players: 3,
            log: lines(200, &[
                "-- starting hand #2 (id: h2)  (No Limit Texas Hold'em) (dealer: \"carol @ c3\") --",
                "Player stacks: #1 \"alice @ a1\" (1060) | #4 \"bob @ b2\" (940) | #6 \"carol @ c3\" (380)",
                "\"bob @ b2\" posts a small blind of 10",
                "\"alice @ a1\" posts a big blind of 20",
                "\"carol @ c3\" calls 20",
                "\"bob @ b2\" calls 20",
            ]),
            turns: vec![turn(60.0, vec![ActionKind::Check, ActionKind::Bet])],
            tail: lines(210, &["\"alice @ a1\" checks", "-- ending hand #2 --"]),
            stall: false,
        }
    }
    fn raised() -> ScriptHand {
        ScriptHand {
            number: 2,
            players: 3,
            log: lines(200, &[
                "-- starting hand #2 (id: h2)  (No Limit Texas Hold'em) (dealer: \"carol @ c3\") --",
                "Player stacks: #1 \"alice @ a1\" (1060) | #4 \"bob @ b2\" (940) | #6 \"carol @ c3\" (380)",
                "\"bob @ b2\" posts a small blind of 10",
                "\"alice @ a1\" posts a big blind of 20",
                "\"carol @ c3\" raises to 60",
                "\"bob @ b2\" folds",
            ]),
            turns: vec![turn(90.0, vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise])],
            tail: lines(210, &["\"alice @ a1\" calls 60", "-- ending hand #2 --"]),
            stall: false,
        }
    }
    fn config(mode: Mode) -> Config {
        Config {
            game: String::from("pgl-test"),
            hero: String::from("alice"),
            mode,
            ..Config::default()
        }
        .instant()
    }
    fn engine(
        mode: Mode,
        hands: Vec<ScriptHand>,
        replies: Vec<Option<&str>>,
        commands: Vec<Command>,
    ) -> Engine<ScriptObserver, ScriptOracle, MemoryLedger, ScriptOperator> {
        Engine::new(
            config(mode),
            ScriptObserver::from(Script {
                hands,
                ..Script::default()
            }),
            ScriptOracle::new(replies.into_iter().map(|r| r.map(String::from))),
            MemoryLedger::default(),
            ScriptOperator::new(commands),
        )
    }
    #[tokio::test]
    async fn advises_every_hero_turn() {
        let mut engine = engine(
            Mode::Advise,
            vec![first(), second()],
            vec![Some("raise 3"), Some("{\"action\": \"check\"}")],
            vec![],
        );
        engine.run().await.unwrap();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert_eq!(engine.observer().game(), Some("pgl-test"));
        assert!(engine.observer().pressed().is_empty());
        let advice = engine.operator().presented();
        assert_eq!(advice.len(), 2);
        assert_eq!(advice[0].hand, 1);
        assert_eq!(advice[0].action, BotAction::new(ActionKind::Raise, 3.0));
        assert_eq!(advice[0].pot, 1.5);
        assert_eq!(advice[0].stack, 50.0);
        assert_eq!(advice[0].to_call, 1.0);
        assert!(!advice[0].executed);
        assert_eq!(advice[1].hand, 2);
        assert_eq!(advice[1].action.kind, ActionKind::Check);
        assert_eq!(advice[1].to_call, 0.0);
        assert_eq!(engine.oracle().asked(), 2);
    }
    #[tokio::test]
    async fn automate_presses_the_buttons() {
        let mut engine = engine(
            Mode::Automate,
            vec![first(), second()],
            vec![Some("raise 3"), Some("bet 2.5")],
            vec![],
        );
        engine.run().await.unwrap();
        assert_eq!(
            engine.observer().pressed(),
            &[(ActionKind::Raise, Some(60.0)), (ActionKind::Bet, Some(50.0))]
        );
        assert!(engine.operator().presented().iter().all(|a| a.executed));
    }
    #[tokio::test]
    async fn all_in_pushes_stack_plus_committed() {
        let mut engine = engine(
            Mode::Automate,
            vec![first(), second()],
            vec![Some("check"), Some("all in, they are weak")],
            vec![],
        );
        engine.run().await.unwrap();
        assert_eq!(engine.observer().pressed(), &[(ActionKind::Bet, Some(1020.0))]);
        let advice = engine.operator().presented();
        assert_eq!(advice.len(), 2);
        assert_eq!(advice[0].action.kind, ActionKind::Check);
        assert!(!advice[0].executed);
        assert_eq!(advice[1].action.kind, ActionKind::AllIn);
        assert_eq!(advice[1].action.size, 50.0);
        assert!(advice[1].executed);
    }
    #[tokio::test]
    async fn next_hand_opening_in_the_catch_up_pull_is_kept() {
        let mut late = first();
        let mut next = raised();
        late.tail.append(&mut next.log);
        let mut engine = engine(
            Mode::Advise,
            vec![late, next],
            vec![Some("fold"), Some("call")],
            vec![],
        );
        engine.run().await.unwrap();
        let advice = engine.operator().presented();
        assert_eq!(advice.len(), 2);
        assert_eq!(advice[1].hand, 2);
        assert_eq!(advice[1].to_call, 2.0);
        let carol = engine.ledger().get("carol").unwrap();
        assert_eq!((carol.hands, carol.pfr), (2, 1));
    }
    #[tokio::test]
    async fn ledger_learns_from_finished_hands() {
        let mut engine = engine(
            Mode::Advise,
            vec![first(), second()],
            vec![Some("raise 3"), Some("check")],
            vec![],
        );
        engine.run().await.unwrap();
        let alice = engine.ledger().get("alice").unwrap();
        assert_eq!((alice.hands, alice.vpip, alice.pfr), (2, 1, 1));
        let bob = engine.ledger().get("bob").unwrap();
        assert_eq!((bob.hands, bob.vpip, bob.folds, bob.passive), (2, 1, 1, 1));
        let carol = engine.ledger().get("carol").unwrap();
        assert_eq!((carol.hands, carol.vpip), (2, 1));
    }
    #[tokio::test]
    async fn oracle_failures_fall_back() {
        let mut engine = engine(Mode::Advise, vec![first(), second()], vec![], vec![]);
        engine.run().await.unwrap();
        assert_eq!(engine.oracle().asked(), 6);
        let advice = engine.operator().presented();
        assert_eq!(advice[0].action.kind, ActionKind::Fold);
        assert_eq!(advice[1].action.kind, ActionKind::Check);
    }
    #[tokio::test]
    async fn repeated_turn_is_not_requeried() {
        let mut hand = first();
        hand.turns.push(hand.turns[0].clone());
        let mut engine = engine(Mode::Advise, vec![hand], vec![Some("call"), Some("fold")], vec![]);
        engine.run().await.unwrap();
        assert_eq!(engine.oracle().asked(), 1);
        assert_eq!(engine.operator().presented().len(), 1);
    }
    #[tokio::test]
    async fn pause_then_resume_continues_the_hand() {
        let mut engine = engine(
            Mode::Advise,
            vec![first()],
            vec![Some("call")],
            vec![Command::Continue, Command::Pause, Command::Resume],
        );
        engine.run().await.unwrap();
        assert_eq!(engine.operator().presented().len(), 1);
        assert_eq!(engine.operator().presented()[0].action.kind, ActionKind::Call);
    }
    #[tokio::test]
    async fn quit_takes_effect_at_the_next_boundary() {
        let mut engine = engine(
            Mode::Advise,
            vec![first(), second()],
            vec![Some("call")],
            vec![Command::Continue, Command::Quit],
        );
        engine.run().await.unwrap();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert_eq!(engine.operator().polls(), 2);
        assert_eq!(engine.oracle().asked(), 0);
        assert!(engine.operator().presented().is_empty());
    }
    #[tokio::test]
    async fn refused_seat_is_fatal() {
        let mut engine = Engine::new(
            config(Mode::Advise),
            ScriptObserver::from(Script {
                refuse_seat: Some(String::from("table full")),
                hands: vec![first()],
                ..Script::default()
            }),
            ScriptOracle::default(),
            MemoryLedger::default(),
            ScriptOperator::default(),
        );
        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, Error::Seating(_)));
        assert_eq!(engine.phase(), Phase::Stopped);
    }
    #[tokio::test]
    async fn observe_only_never_sits() {
        let mut engine = Engine::new(
            Config {
                observe_only: true,
                ..config(Mode::Advise)
            },
            ScriptObserver::from(Script {
                refuse_seat: Some(String::from("table full")),
                hands: vec![first()],
                ..Script::default()
            }),
            ScriptOracle::new([Some(String::from("fold"))]),
            MemoryLedger::default(),
            ScriptOperator::default(),
        );
        engine.run().await.unwrap();
        assert_eq!(engine.operator().presented().len(), 1);
    }
    #[tokio::test]
    async fn stalled_hand_times_out() {
        let stalled = ScriptHand {
            number: 1,
            players: 1,
            log: lines(100, &["-- starting hand #1 (id: h1)  (No Limit Texas Hold'em) --"]),
            stall: true,
            ..ScriptHand::default()
        };
        let mut engine = engine(Mode::Advise, vec![stalled], vec![], vec![]);
        engine.run().await.unwrap();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert!(engine.operator().presented().is_empty());
    }
    #[tokio::test]
    async fn invalid_config_is_rejected_up_front() {
        let mut engine = Engine::new(
            Config {
                max_turn_length: 0,
                ..config(Mode::Advise)
            },
            ScriptObserver::default(),
            ScriptOracle::default(),
            MemoryLedger::default(),
            ScriptOperator::default(),
        );
        assert!(matches!(engine.run().await, Err(Error::Configuration(_))));
    }
}
