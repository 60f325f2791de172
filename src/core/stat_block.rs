//! Named integer stats.
//!
//! Stat names are content-defined (`health`, `strength`, `perception`, ...);
//! the engine only knows the keys `EngineConfig` points it at. Missing keys
//! read as zero unless a default is given.
//!
//! Backed by `im::OrdMap` so that cloning a character is O(1) and stat
//! listings come out in a stable order.

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// A set of named stat values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatBlock(OrdMap<String, i64>);

impl StatBlock {
    /// Create an empty stat block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stat (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Get a stat value with default.
    #[must_use]
    pub fn get_or(&self, key: &str, default: i64) -> i64 {
        self.0.get(key).copied().unwrap_or(default)
    }

    /// Get a stat value, zero if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> i64 {
        self.get_or(key, 0)
    }

    /// Check whether a stat is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a stat value.
    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.0.insert(key.into(), value);
    }

    /// Modify a stat value by delta.
    pub fn modify(&mut self, key: &str, delta: i64) {
        let current = self.get(key);
        self.0.insert(key.to_string(), current + delta);
    }

    /// Add every entry of `deltas` to this block.
    pub fn apply_deltas<'a, I>(&mut self, deltas: I)
    where
        I: IntoIterator<Item = (&'a String, &'a i64)>,
    {
        for (key, delta) in deltas {
            self.modify(key, *delta);
        }
    }

    /// Iterate stats in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.0.iter()
    }

    /// Number of stats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no stats are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for StatBlock {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_modify() {
        let mut stats = StatBlock::new().with("health", 10);

        assert_eq!(stats.get("health"), 10);
        assert_eq!(stats.get("mana"), 0);
        assert_eq!(stats.get_or("mana", 3), 3);

        stats.modify("health", -4);
        stats.modify("mana", 2);
        assert_eq!(stats.get("health"), 6);
        assert_eq!(stats.get("mana"), 2);
    }

    #[test]
    fn test_apply_deltas() {
        let mut stats = StatBlock::new().with("health", 10).with("strength", 5);
        let mut deltas = rustc_hash::FxHashMap::default();
        deltas.insert("health".to_string(), -1);
        deltas.insert("luck".to_string(), 2);

        stats.apply_deltas(&deltas);

        assert_eq!(stats.get("health"), 9);
        assert_eq!(stats.get("strength"), 5);
        assert_eq!(stats.get("luck"), 2);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let stats: StatBlock = [("strength", 5), ("agility", 3), ("health", 10)]
            .into_iter()
            .collect();

        let keys: Vec<_> = stats.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["agility", "health", "strength"]);
    }
}
