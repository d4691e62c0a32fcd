use super::*;
use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// A ledger that lives in memory and round-trips through a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryLedger(BTreeMap<String, PlayerStats>);

impl MemoryLedger {
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("cannot read {}: {}", path, e)))?;
        serde_json::from_str(&json).map_err(|e| Error::Storage(format!("bad ledger {}: {}", path, e)))
    }
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Storage(format!("cannot encode ledger: {}", e)))?;
        std::fs::write(path, json).map_err(|e| Error::Storage(format!("cannot write {}: {}", path, e)))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, name: &str) -> Option<PlayerStats> {
        self.0.get(name).copied()
    }
    fn upsert(&mut self, name: &str, stats: PlayerStats) {
        self.0.insert(name.to_string(), stats);
    }
}
