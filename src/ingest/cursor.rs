use super::*;

/// Session watermark plus the events accumulated for the current hand.
///
/// The watermark never moves backwards and survives hand boundaries;
/// only the accumulation is cleared between hands. A catch-up pull can
/// run into the next hand's opening lines, so those are carried over
/// rather than dropped.
#[derive(Debug, Clone)]
pub struct LogCursor {
    last_seen_id: Option<LogId>,
    first_fetch: bool,
    origin: Option<LogId>,
    accumulated: Vec<LogEvent>,
}

impl Default for LogCursor {
    fn default() -> Self {
        Self {
            last_seen_id: None,
            first_fetch: true,
            origin: None,
            accumulated: Vec::new(),
        }
    }
}

impl LogCursor {
    pub fn last_seen_id(&self) -> Option<&LogId> {
        self.last_seen_id.as_ref()
    }
    pub fn is_first_fetch(&self) -> bool {
        self.first_fetch
    }
    /// The current hand's lines all come after this id.
    pub fn origin(&self) -> Option<&LogId> {
        self.origin.as_ref()
    }
    /// Everything parsed for the current hand.
    pub fn accumulated(&self) -> &[LogEvent] {
        &self.accumulated
    }
    /// Pulls the delta, appends it, and returns it. An unchanged feed
    /// yields an empty delta.
    pub async fn pull<O>(&mut self, observer: &mut O) -> Result<Vec<LogEvent>>
    where
        O: Observer + ?Sized,
    {
        let processed =
            pull_and_process_logs(observer, self.last_seen_id.as_ref(), self.first_fetch).await?;
        self.last_seen_id = processed.last_seen_id;
        self.first_fetch = processed.first_fetch;
        self.accumulated.extend(processed.valid_events.iter().cloned());
        Ok(processed.valid_events)
    }
    /// Re-reads the current hand from its origin without moving the
    /// watermark.
    pub async fn history<O>(&self, observer: &mut O) -> Result<Vec<LogEvent>>
    where
        O: Observer + ?Sized,
    {
        let origin = self.origin.as_ref();
        pull_and_process_logs(observer, origin, origin.is_none())
            .await
            .map(|processed| processed.valid_events)
    }
    /// Opens hand `number`, keeping its lines if they were already pulled.
    pub fn begin_hand(&mut self, number: u64) {
        let carried = self
            .accumulated
            .first()
            .is_some_and(|e| matches!(e.kind, EventKind::HandStarted { number: n, .. } if n == number));
        if !carried {
            self.accumulated.clear();
            self.origin = self.last_seen_id.clone();
        }
    }
    /// Closes hand `ended`. Events from a later hand start stay behind
    /// for [`LogCursor::begin_hand`].
    pub fn reset_hand(&mut self, ended: u64) {
        let next = self
            .accumulated
            .iter()
            .rposition(|e| matches!(e.kind, EventKind::HandStarted { number, .. } if number != ended));
        match next {
            Some(i) => {
                if let Some(before) = i.checked_sub(1).map(|j| self.accumulated[j].id.clone()) {
                    self.origin = Some(before);
                }
                self.accumulated.drain(..i);
            }
            None => {
                self.accumulated.clear();
                self.origin = self.last_seen_id.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::*;

    /// Hands back the whole feed every time, newest first.
    #[derive(Default)]
    struct Sloppy {
        lines: Vec<LogLine>,
        broken: bool,
    }

    #[async_trait::async_trait]
    impl Observer for Sloppy {
        async fn navigate_to_game(&mut self, _: &str) -> std::result::Result<(), ObserverError> {
            Ok(())
        }
        async fn is_seated(&mut self) -> std::result::Result<bool, ObserverError> {
            Ok(true)
        }
        async fn take_seat(&mut self) -> std::result::Result<(), ObserverError> {
            Ok(())
        }
        async fn current_hand(&mut self) -> std::result::Result<Option<HandInfo>, ObserverError> {
            Ok(None)
        }
        async fn wait_for_bot_turn_or_winner(
            &mut self,
            _: usize,
            _: u64,
        ) -> std::result::Result<Signal, ObserverError> {
            Ok(Signal::Winner)
        }
        async fn table_snapshot(&mut self) -> std::result::Result<TableSnapshot, ObserverError> {
            Ok(TableSnapshot::default())
        }
        async fn fetch_log_lines_since(
            &mut self,
            _: Option<&LogId>,
        ) -> std::result::Result<Vec<LogLine>, ObserverError> {
            match self.broken {
                true => Err(ObserverError::Scrape(String::from("log panel missing"))),
                false => Ok(self.lines.iter().rev().cloned().collect()),
            }
        }
        async fn check(&mut self) -> std::result::Result<(), ObserverError> {
            Ok(())
        }
        async fn call(&mut self) -> std::result::Result<(), ObserverError> {
            Ok(())
        }
        async fn fold(&mut self) -> std::result::Result<(), ObserverError> {
            Ok(())
        }
        async fn bet_or_raise(&mut self, _: Chips) -> std::result::Result<(), ObserverError> {
            Ok(())
        }
    }

    fn lines() -> Vec<LogLine> {
        vec![
            LogLine::new("100", "-- starting hand #1 (id: h1)  (No Limit Texas Hold'em) --"),
            LogLine::new("101", "Player stacks: #1 \"alice @ a1\" (500) | #2 \"bob @ b2\" (500)"),
            LogLine::new("102", "\"alice @ a1\" posts a small blind of 5"),
            LogLine::new("103", "gl everyone"),
            LogLine::new("104", "\"bob @ b2\" posts a big blind of 10"),
            LogLine::new("105", "\"alice @ a1\" calls 10"),
            LogLine::new("106", "\"bob @ b2\" checks"),
        ]
    }
    #[tokio::test]
    async fn split_batches_accumulate_like_one() {
        let all = lines();
        let mut whole = LogCursor::default();
        let mut observer = Sloppy {
            lines: all.clone(),
            ..Sloppy::default()
        };
        whole.pull(&mut observer).await.unwrap();
        let mut split = LogCursor::default();
        let mut observer = Sloppy::default();
        for cut in [2, 3, 5, 7] {
            observer.lines = all[..cut].to_vec();
            split.pull(&mut observer).await.unwrap();
        }
        assert_eq!(whole.accumulated(), split.accumulated());
        assert_eq!(whole.last_seen_id(), split.last_seen_id());
        assert_eq!(whole.accumulated().len(), 7);
    }
    #[tokio::test]
    async fn unchanged_feed_yields_empty_delta() {
        let mut cursor = LogCursor::default();
        let mut observer = Sloppy {
            lines: lines(),
            ..Sloppy::default()
        };
        assert!(!cursor.pull(&mut observer).await.unwrap().is_empty());
        assert!(!cursor.is_first_fetch());
        assert!(cursor.pull(&mut observer).await.unwrap().is_empty());
        assert_eq!(cursor.accumulated().len(), 7);
    }
    #[tokio::test]
    async fn watermark_passes_unparseable_lines() {
        let mut cursor = LogCursor::default();
        let mut observer = Sloppy {
            lines: lines()[..4].to_vec(),
            ..Sloppy::default()
        };
        cursor.pull(&mut observer).await.unwrap();
        assert_eq!(cursor.last_seen_id(), Some(&LogId::from("103")));
    }
    #[tokio::test]
    async fn duplicates_inside_a_batch_are_dropped() {
        let mut cursor = LogCursor::default();
        let mut doubled = lines();
        doubled.extend(lines());
        let mut observer = Sloppy {
            lines: doubled,
            ..Sloppy::default()
        };
        let delta = cursor.pull(&mut observer).await.unwrap();
        assert_eq!(delta.len(), 7);
        assert_eq!(delta[0].id, LogId::from("100"));
    }
    #[tokio::test]
    async fn observer_failure_leaves_cursor_alone() {
        let mut cursor = LogCursor::default();
        let mut observer = Sloppy {
            lines: lines(),
            ..Sloppy::default()
        };
        cursor.pull(&mut observer).await.unwrap();
        observer.broken = true;
        let err = cursor.pull(&mut observer).await.unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
        assert_eq!(cursor.last_seen_id(), Some(&LogId::from("106")));
        assert_eq!(cursor.accumulated().len(), 7);
    }
    #[tokio::test]
    async fn reset_keeps_the_watermark() {
        let mut cursor = LogCursor::default();
        let mut observer = Sloppy {
            lines: lines(),
            ..Sloppy::default()
        };
        cursor.begin_hand(1);
        cursor.pull(&mut observer).await.unwrap();
        assert_eq!(cursor.history(&mut observer).await.unwrap().len(), 7);
        cursor.reset_hand(1);
        assert!(cursor.accumulated().is_empty());
        assert_eq!(cursor.last_seen_id(), Some(&LogId::from("106")));
        assert_eq!(cursor.origin(), Some(&LogId::from("106")));
        assert!(cursor.history(&mut observer).await.unwrap().is_empty());
        assert_eq!(cursor.last_seen_id(), Some(&LogId::from("106")));
    }
    #[tokio::test]
    async fn next_hand_opening_survives_the_reset() {
        let mut all = lines();
        all.push(LogLine::new("107", "-- ending hand #1 --"));
        all.push(LogLine::new("108", "-- starting hand #2 (id: h2)  (No Limit Texas Hold'em) --"));
        all.push(LogLine::new("109", "Player stacks: #1 \"alice @ a1\" (490) | #2 \"bob @ b2\" (510)"));
        let mut cursor = LogCursor::default();
        let mut observer = Sloppy {
            lines: all,
            ..Sloppy::default()
        };
        cursor.begin_hand(1);
        cursor.pull(&mut observer).await.unwrap();
        cursor.reset_hand(1);
        assert_eq!(cursor.accumulated().len(), 3);
        assert_eq!(cursor.origin(), Some(&LogId::from("107")));
        cursor.begin_hand(2);
        assert_eq!(cursor.accumulated().len(), 3);
        assert_eq!(cursor.history(&mut observer).await.unwrap().len(), 3);
        assert_eq!(cursor.last_seen_id(), Some(&LogId::from("109")));
        cursor.reset_hand(2);
        cursor.begin_hand(3);
        assert!(cursor.accumulated().is_empty());
        assert_eq!(cursor.origin(), Some(&LogId::from("109")));
    }
}
