//! Declarative state diffs.
//!
//! A resolution never touches state. It describes what should change as an
//! `ActionEffects` value, and the effect pipeline applies it. Object content
//! (`view_effects`, `proximity_effect`) uses the same type, so a scene
//! object's proximity diff can be merged straight into a move resolution.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CharacterId, EffectId, ObjectId};

/// An object (and how many units of it) to add or remove.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrant {
    pub id: ObjectId,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

impl ItemGrant {
    pub fn new(id: impl Into<ObjectId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Move a carried item into a container, optionally into a named slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSpec {
    pub item_id: ObjectId,

    /// Container the item was in when the transfer was resolved.
    /// Checked against the item's actual holder when set.
    #[serde(default)]
    pub from_container_id: Option<ObjectId>,

    pub to_container_id: ObjectId,

    #[serde(default)]
    pub slot_id: Option<String>,
}

/// Declarative diff attached to a resolution.
///
/// Stat deltas go into the target's base stats. Everything targets the
/// acting character unless `target_character_id` is set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionEffects {
    pub stats: FxHashMap<String, i64>,

    pub add_traits: Vec<String>,
    pub remove_traits: Vec<String>,

    /// Character flags.
    pub add_flags: Vec<String>,
    pub remove_flags: Vec<String>,

    /// Global world flags.
    pub add_world_flags: Vec<String>,
    pub remove_world_flags: Vec<String>,

    pub add_items: Vec<ItemGrant>,
    pub remove_items: Vec<ItemGrant>,

    pub add_effects: Vec<EffectId>,
    pub remove_effects: Vec<EffectId>,

    pub transfer_item: Option<TransferSpec>,

    /// Objects to lay in the current scene.
    pub add_scene_objects: Vec<ObjectId>,

    /// Objects to take out of the current scene.
    pub remove_scene_objects: Vec<ObjectId>,

    pub target_character_id: Option<CharacterId>,

    /// UI hint: show the scene narrative again.
    pub reprint_narrative: bool,

    /// UI hint: show the inventory.
    pub list_inventory: bool,
}

impl ActionEffects {
    /// Create an empty diff.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stat(mut self, stat: impl Into<String>, delta: i64) -> Self {
        *self.stats.entry(stat.into()).or_insert(0) += delta;
        self
    }

    #[must_use]
    pub fn with_added_trait(mut self, name: impl Into<String>) -> Self {
        self.add_traits.push(name.into());
        self
    }

    #[must_use]
    pub fn with_added_flag(mut self, flag: impl Into<String>) -> Self {
        self.add_flags.push(flag.into());
        self
    }

    #[must_use]
    pub fn with_added_world_flag(mut self, flag: impl Into<String>) -> Self {
        self.add_world_flags.push(flag.into());
        self
    }

    #[must_use]
    pub fn with_added_item(mut self, id: impl Into<ObjectId>, quantity: u32) -> Self {
        self.add_items.push(ItemGrant::new(id, quantity));
        self
    }

    #[must_use]
    pub fn with_removed_item(mut self, id: impl Into<ObjectId>, quantity: u32) -> Self {
        self.remove_items.push(ItemGrant::new(id, quantity));
        self
    }

    #[must_use]
    pub fn with_added_effect(mut self, id: impl Into<EffectId>) -> Self {
        self.add_effects.push(id.into());
        self
    }

    #[must_use]
    pub fn with_removed_effect(mut self, id: impl Into<EffectId>) -> Self {
        self.remove_effects.push(id.into());
        self
    }

    #[must_use]
    pub fn with_transfer(mut self, transfer: TransferSpec) -> Self {
        self.transfer_item = Some(transfer);
        self
    }

    #[must_use]
    pub fn for_character(mut self, id: impl Into<CharacterId>) -> Self {
        self.target_character_id = Some(id.into());
        self
    }

    /// Merge another diff into this one.
    ///
    /// Stat deltas are summed and lists concatenated. A transfer already set
    /// on `self` wins over the other diff's. The target is never taken from
    /// `other`; merge only diffs aimed at the same character.
    pub fn merge(&mut self, other: &ActionEffects) {
        for (stat, delta) in &other.stats {
            *self.stats.entry(stat.clone()).or_insert(0) += delta;
        }
        self.add_traits.extend(other.add_traits.iter().cloned());
        self.remove_traits.extend(other.remove_traits.iter().cloned());
        self.add_flags.extend(other.add_flags.iter().cloned());
        self.remove_flags.extend(other.remove_flags.iter().cloned());
        self.add_world_flags.extend(other.add_world_flags.iter().cloned());
        self.remove_world_flags.extend(other.remove_world_flags.iter().cloned());
        self.add_items.extend(other.add_items.iter().cloned());
        self.remove_items.extend(other.remove_items.iter().cloned());
        self.add_effects.extend(other.add_effects.iter().cloned());
        self.remove_effects.extend(other.remove_effects.iter().cloned());
        self.add_scene_objects.extend(other.add_scene_objects.iter().cloned());
        self.remove_scene_objects.extend(other.remove_scene_objects.iter().cloned());
        if self.transfer_item.is_none() {
            self.transfer_item = other.transfer_item.clone();
        }
        self.reprint_narrative |= other.reprint_narrative;
        self.list_inventory |= other.list_inventory;
    }

    /// Check whether applying this diff would change any state.
    ///
    /// UI hints and the target do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
            && self.add_traits.is_empty()
            && self.remove_traits.is_empty()
            && self.add_flags.is_empty()
            && self.remove_flags.is_empty()
            && self.add_world_flags.is_empty()
            && self.remove_world_flags.is_empty()
            && self.add_items.is_empty()
            && self.remove_items.is_empty()
            && self.add_effects.is_empty()
            && self.remove_effects.is_empty()
            && self.transfer_item.is_none()
            && self.add_scene_objects.is_empty()
            && self.remove_scene_objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_stats_and_concatenates() {
        let mut base = ActionEffects::new()
            .with_stat("health", -1)
            .with_added_flag("wet");
        let other = ActionEffects::new()
            .with_stat("health", -2)
            .with_stat("fear", 1)
            .with_added_flag("cold");

        base.merge(&other);

        assert_eq!(base.stats.get("health"), Some(&-3));
        assert_eq!(base.stats.get("fear"), Some(&1));
        assert_eq!(base.add_flags, vec!["wet".to_string(), "cold".to_string()]);
    }

    #[test]
    fn test_merge_keeps_existing_target() {
        let mut base = ActionEffects::new().for_character("hero");
        base.merge(&ActionEffects::new().for_character("villain"));
        assert_eq!(base.target_character_id, Some(CharacterId::new("hero")));
    }

    #[test]
    fn test_merge_never_adopts_a_target() {
        let mut base = ActionEffects::new().with_stat("health", -1);
        base.merge(&ActionEffects::new().with_stat("health", -2).for_character("villain"));
        assert_eq!(base.target_character_id, None);
    }

    #[test]
    fn test_is_empty_ignores_hints() {
        let hints = ActionEffects {
            reprint_narrative: true,
            list_inventory: true,
            ..ActionEffects::default()
        };
        assert!(hints.is_empty());
        assert!(!ActionEffects::new().with_added_effect("poison").is_empty());
    }

    #[test]
    fn test_deserialize_partial() {
        let effects: ActionEffects =
            serde_json::from_str(r#"{"stats": {"health": -1}, "add_items": [{"id": "key"}]}"#)
                .unwrap();
        assert_eq!(effects.stats.get("health"), Some(&-1));
        assert_eq!(effects.add_items, vec![ItemGrant::new("key", 1)]);
    }
}
