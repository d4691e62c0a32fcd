use super::*;
use crate::*;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The four identity extractions over a hand's events.
///
/// Rebuilt from the whole batch every time, never from the newest line
/// alone: a player may be named before their seat or stack shows up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityMaps {
    pub seat_to_id: BTreeMap<Seat, String>,
    pub id_to_name: BTreeMap<String, String>,
    pub id_to_stack: BTreeMap<String, Chips>,
    pub id_to_seat: BTreeMap<String, Seat>,
}

impl IdentityMaps {
    /// Pure and idempotent: the same events always give the same maps.
    /// A hand start clears everything, so the current hand's roster wins.
    pub fn extract(events: &[LogEvent]) -> Self {
        let mut maps = Self::default();
        for event in events {
            match &event.kind {
                EventKind::HandStarted { .. } => maps = Self::default(),
                EventKind::SeatAssigned { seat, player } => {
                    maps.seat(*seat, player);
                }
                EventKind::PlayerJoined { player, stack } => {
                    maps.id_to_name.insert(player.id.clone(), player.name.clone());
                    if let Some(stack) = stack {
                        maps.id_to_stack.insert(player.id.clone(), *stack);
                    }
                }
                EventKind::InitialStack {
                    seat,
                    player,
                    stack,
                } => {
                    maps.seat(*seat, player);
                    maps.id_to_stack.insert(player.id.clone(), *stack);
                }
                _ => {}
            }
        }
        maps
    }
    /// Seats `player`, evicting whoever held the seat before.
    fn seat(&mut self, seat: Seat, player: &PlayerRef) {
        if let Some(previous) = self.seat_to_id.get(&seat).cloned() {
            if previous != player.id {
                self.forget(&previous);
            }
        }
        if let Some(old) = self.id_to_seat.insert(player.id.clone(), seat) {
            if old != seat {
                self.seat_to_id.remove(&old);
            }
        }
        self.seat_to_id.insert(seat, player.id.clone());
        self.id_to_name.insert(player.id.clone(), player.name.clone());
    }
    fn forget(&mut self, id: &str) {
        self.id_to_name.remove(id);
        self.id_to_stack.remove(id);
        if let Some(seat) = self.id_to_seat.remove(id) {
            self.seat_to_id.remove(&seat);
        }
    }
    /// Every id mentioned by any of the four maps.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.seat_to_id
            .values()
            .chain(self.id_to_name.keys())
            .chain(self.id_to_stack.keys())
            .chain(self.id_to_seat.keys())
            .map(String::as_str)
            .collect()
    }
    /// Ids absent from at least one map, or whose two seat entries disagree.
    pub fn missing(&self) -> Vec<String> {
        self.ids()
            .into_iter()
            .filter(|id| !self.complete(id))
            .map(String::from)
            .collect()
    }
    fn complete(&self, id: &str) -> bool {
        self.id_to_name.contains_key(id)
            && self.id_to_stack.contains_key(id)
            && self
                .id_to_seat
                .get(id)
                .is_some_and(|seat| self.seat_to_id.get(seat).is_some_and(|s| s == id))
    }
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
    pub fn len(&self) -> usize {
        self.seat_to_id.len()
    }
}

/// The batch is usable only once all four maps agree on the same,
/// non-empty set of ids. Otherwise the caller pulls again.
pub fn validate_all(maps: &IdentityMaps) -> Result<()> {
    let missing = maps.missing();
    if maps.is_empty() || !missing.is_empty() {
        Err(Error::IncompleteMapping { missing })
    } else {
        Ok(())
    }
}
