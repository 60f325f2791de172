//! Characters and the effects attached to them.
//!
//! ## CharacterState
//!
//! `base_stats` is the authoritative foundation; only stat effects and
//! per-turn ticks change it. `stats` is derived from base stats, carried
//! objects, and active effects, and is recomputed by the turn processor
//! before any turn is committed. Never write to `stats` directly.
//!
//! ## Effects
//!
//! `EffectDefinition` is content (what "poison" does). `CharacterEffect`
//! is an instance on a character with its own remaining duration.

use im::{OrdSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, EffectId, ObjectId};
use super::stat_block::StatBlock;

/// A top-level entry in a character's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Arena id of the held object.
    pub id: ObjectId,

    /// Mirrors the arena object's quantity.
    pub quantity: u32,
}

impl InventoryEntry {
    /// Create an entry.
    pub fn new(id: impl Into<ObjectId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Content definition of a named effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub id: EffectId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Applied on every stat recompute while active.
    #[serde(default)]
    pub stat_modifiers: FxHashMap<String, i64>,

    /// Folded into base stats once per tick.
    #[serde(default)]
    pub per_turn_modifiers: FxHashMap<String, i64>,

    /// Ticks until expiry. `None` = permanent.
    #[serde(default)]
    pub duration: Option<u32>,
}

impl EffectDefinition {
    /// Create a permanent effect with no modifiers.
    pub fn new(id: impl Into<EffectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            stat_modifiers: FxHashMap::default(),
            per_turn_modifiers: FxHashMap::default(),
            duration: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_stat_modifier(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.stat_modifiers.insert(stat.into(), delta);
        self
    }

    #[must_use]
    pub fn with_per_turn(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.per_turn_modifiers.insert(stat.into(), delta);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    /// Instantiate this definition on a character.
    #[must_use]
    pub fn instantiate(&self) -> CharacterEffect {
        CharacterEffect {
            id: self.id.clone(),
            name: self.name.clone(),
            stat_modifiers: self.stat_modifiers.clone(),
            per_turn_modifiers: self.per_turn_modifiers.clone(),
            remaining: self.duration,
        }
    }
}

/// An effect active on a character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEffect {
    pub id: EffectId,
    pub name: String,
    pub stat_modifiers: FxHashMap<String, i64>,
    pub per_turn_modifiers: FxHashMap<String, i64>,

    /// Remaining ticks. `None` = permanent.
    pub remaining: Option<u32>,
}

impl CharacterEffect {
    /// Check if this effect never expires.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.remaining.is_none()
    }
}

/// A character in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    pub id: CharacterId,
    pub name: String,
    pub base_stats: StatBlock,
    pub stats: StatBlock,
    pub traits: OrdSet<String>,
    pub inventory: Vector<InventoryEntry>,
    pub flags: OrdSet<String>,
    pub effects: Vector<CharacterEffect>,
}

impl CharacterState {
    /// Create a character with empty inventory.
    ///
    /// `stats` starts equal to `base_stats`; hands are added by
    /// `GameState::spawn_character`.
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>, base_stats: StatBlock) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats: base_stats.clone(),
            base_stats,
            traits: OrdSet::new(),
            inventory: Vector::new(),
            flags: OrdSet::new(),
            effects: Vector::new(),
        }
    }

    /// Add a trait (builder pattern).
    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    /// Find the top-level inventory entry for an object.
    #[must_use]
    pub fn entry(&self, id: &ObjectId) -> Option<&InventoryEntry> {
        self.inventory.iter().find(|e| &e.id == id)
    }

    /// Remove a top-level entry. Returns true if it was present.
    pub fn remove_entry(&mut self, id: &ObjectId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|e| &e.id == id) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check for an active effect.
    #[must_use]
    pub fn has_effect(&self, id: &EffectId) -> bool {
        self.effects.iter().any(|e| &e.id == id)
    }

    /// Add an effect, replacing (and so refreshing) any instance with the same id.
    pub fn add_effect(&mut self, effect: CharacterEffect) {
        self.remove_effect(&effect.id);
        self.effects.push_back(effect);
    }

    /// Remove an effect. Returns true if it was active.
    pub fn remove_effect(&mut self, id: &EffectId) -> bool {
        if let Some(pos) = self.effects.iter().position(|e| &e.id == id) {
            self.effects.remove(pos);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> CharacterState {
        CharacterState::new("hero", "Hero", StatBlock::new().with("health", 10))
    }

    #[test]
    fn test_new_character_stats_mirror_base() {
        let c = hero();
        assert_eq!(c.stats, c.base_stats);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn test_effect_instantiation() {
        let poison = EffectDefinition::new("poison", "Poison")
            .with_per_turn("health", -1)
            .with_duration(3);

        let instance = poison.instantiate();
        assert_eq!(instance.remaining, Some(3));
        assert!(!instance.is_permanent());
        assert_eq!(instance.per_turn_modifiers.get("health"), Some(&-1));
    }

    #[test]
    fn test_add_effect_refreshes() {
        let mut c = hero();
        let def = EffectDefinition::new("blessed", "Blessed").with_duration(2);

        let mut first = def.instantiate();
        first.remaining = Some(1);
        c.add_effect(first);
        c.add_effect(def.instantiate());

        assert_eq!(c.effects.len(), 1);
        assert_eq!(c.effects[0].remaining, Some(2));
        assert!(c.remove_effect(&EffectId::new("blessed")));
        assert!(!c.has_effect(&EffectId::new("blessed")));
    }

    #[test]
    fn test_inventory_entries() {
        let mut c = hero();
        c.inventory.push_back(InventoryEntry::new("backpack", 1));

        assert!(c.entry(&ObjectId::new("backpack")).is_some());
        assert!(c.remove_entry(&ObjectId::new("backpack")));
        assert!(!c.remove_entry(&ObjectId::new("backpack")));
    }
}
