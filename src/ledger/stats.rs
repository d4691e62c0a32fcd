use crate::cards::Street;
use crate::parse::*;
use crate::table::ActionKind;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counting stats, the usual HUD columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub hands: u32,
    /// Hands with a voluntary preflop call, bet, or raise.
    pub vpip: u32,
    /// Hands with a preflop raise.
    pub pfr: u32,
    pub aggressive: u32,
    pub passive: u32,
    pub folds: u32,
}

impl PlayerStats {
    pub fn vpip_pct(&self) -> f64 {
        Self::pct(self.vpip, self.hands)
    }
    pub fn pfr_pct(&self) -> f64 {
        Self::pct(self.pfr, self.hands)
    }
    /// Bets and raises per call. `None` until the player has done either.
    pub fn aggression(&self) -> Option<f64> {
        match (self.aggressive, self.passive) {
            (0, 0) => None,
            (a, 0) => Some(a as f64),
            (a, p) => Some(a as f64 / p as f64),
        }
    }
    fn pct(n: u32, of: u32) -> f64 {
        match of {
            0 => 0.0,
            of => 100.0 * n as f64 / of as f64,
        }
    }

    /// Counts for everyone dealt into one hand, keyed by name.
    ///
    /// Stops at a second hand start, so a history read that runs into
    /// the next hand does not leak into this one.
    pub fn from_hand(events: &[LogEvent]) -> BTreeMap<String, PlayerStats> {
        let mut stats = BTreeMap::<String, PlayerStats>::new();
        let mut vpip = BTreeMap::<String, bool>::new();
        let mut pfr = BTreeMap::<String, bool>::new();
        let mut street = Street::Pref;
        let mut started = false;
        for event in events {
            match &event.kind {
                EventKind::HandStarted { .. } if started => break,
                EventKind::HandStarted { .. } => started = true,
                EventKind::InitialStack { player, .. } => {
                    stats.entry(player.name.clone()).or_default().hands = 1;
                }
                EventKind::Board { street: next, .. } => street = street.max(*next),
                EventKind::Action { player, kind, .. } => {
                    let entry = stats.entry(player.name.clone()).or_default();
                    entry.hands = 1;
                    match kind {
                        ActionKind::Fold => entry.folds += 1,
                        ActionKind::Call => entry.passive += 1,
                        ActionKind::Check => {}
                        _ => entry.aggressive += 1,
                    }
                    if street == Street::Pref && kind.is_voluntary() {
                        vpip.insert(player.name.clone(), true);
                    }
                    if street == Street::Pref && kind.is_aggro() {
                        pfr.insert(player.name.clone(), true);
                    }
                }
                _ => {}
            }
        }
        for (name, entry) in stats.iter_mut() {
            entry.vpip = vpip.get(name).copied().unwrap_or(false) as u32;
            entry.pfr = pfr.get(name).copied().unwrap_or(false) as u32;
        }
        stats
    }
}

impl std::ops::Add for PlayerStats {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            hands: self.hands + other.hands,
            vpip: self.vpip + other.vpip,
            pfr: self.pfr + other.pfr,
            aggressive: self.aggressive + other.aggressive,
            passive: self.passive + other.passive,
            folds: self.folds + other.folds,
        }
    }
}

impl std::fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "hands {}, vpip {:.0}%, pfr {:.0}%, af {}",
            self.hands,
            self.vpip_pct(),
            self.pfr_pct(),
            self.aggression()
                .map(|af| format!("{:.2}", af))
                .unwrap_or_else(|| String::from("-"))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn events(texts: &[&str]) -> Vec<LogEvent> {
        texts
            .iter()
            .enumerate()
            .flat_map(|(i, text)| parse_line(&LogLine::new(i.to_string(), *text)).unwrap())
            .collect()
    }
    #[test]
    fn counts_one_hand() {
        let stats = PlayerStats::from_hand(&events(&[
            "-- starting hand #1 (id: h1)  (No Limit Texas Hold'em) --",
            "Player stacks: #1 \"alice @ a1\" (500) | #2 \"bob @ b2\" (500) | #3 \"carol @ c3\" (500)",
            "\"bob @ b2\" posts a small blind of 5",
            "\"carol @ c3\" posts a big blind of 10",
            "\"alice @ a1\" raises to 30",
            "\"bob @ b2\" folds",
            "\"carol @ c3\" calls 30",
            "Flop:  [Ah, 7d, 2c]",
            "\"carol @ c3\" checks",
            "\"alice @ a1\" bets 40",
            "\"carol @ c3\" raises to 120",
            "\"alice @ a1\" calls 120",
            "-- ending hand #1 --",
            "-- starting hand #2 (id: h2)  (No Limit Texas Hold'em) --",
            "\"bob @ b2\" raises to 30",
        ]));
        let alice = stats["alice"];
        assert_eq!((alice.hands, alice.vpip, alice.pfr), (1, 1, 1));
        assert_eq!((alice.aggressive, alice.passive), (2, 1));
        let bob = stats["bob"];
        assert_eq!((bob.vpip, bob.pfr, bob.folds, bob.aggressive), (0, 0, 1, 0));
        let carol = stats["carol"];
        assert_eq!((carol.vpip, carol.pfr), (1, 0));
        assert_eq!((carol.aggressive, carol.passive), (1, 1));
    }
    #[test]
    fn percentages_and_aggression() {
        let stats = PlayerStats {
            hands: 4,
            vpip: 2,
            pfr: 1,
            aggressive: 3,
            passive: 2,
            folds: 1,
        };
        assert_eq!(stats.vpip_pct(), 50.0);
        assert_eq!(stats.pfr_pct(), 25.0);
        assert_eq!(stats.aggression(), Some(1.5));
        assert_eq!(PlayerStats::default().aggression(), None);
        assert_eq!(PlayerStats::default().vpip_pct(), 0.0);
        assert_eq!(stats.to_string(), "hands 4, vpip 50%, pfr 25%, af 1.50");
    }
}
