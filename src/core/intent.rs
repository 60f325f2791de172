//! Action intents and the action history.
//!
//! An `ActionIntent` is the normalized record of what the actor wants to do
//! this turn. It is produced by a command's `execute` from parser output and
//! consumed by the same command's `resolve`. Once a turn commits, the intent
//! is stamped with the engine's clock and appended to the action history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, SceneId};

/// What an actor wants to do this turn.
///
/// `item_id` and `target_id` hold the player's reference as the parser
/// produced it; commands resolve them against the scene or inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIntent {
    pub actor_id: CharacterId,

    /// The verb; equals the id of the command that handles it.
    pub verb: String,

    #[serde(default)]
    pub scene_id: Option<SceneId>,

    #[serde(default)]
    pub choice_id: Option<String>,

    #[serde(default)]
    pub item_id: Option<String>,

    #[serde(default)]
    pub target_id: Option<String>,

    /// Named slot for transfers into slotted containers.
    #[serde(default)]
    pub slot_id: Option<String>,

    /// Assigned by the turn processor when the turn commits.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub original_input: Option<String>,
}

impl ActionIntent {
    /// Create an intent with only actor and verb set.
    pub fn new(actor_id: impl Into<CharacterId>, verb: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            verb: verb.into(),
            scene_id: None,
            choice_id: None,
            item_id: None,
            target_id: None,
            slot_id: None,
            timestamp: None,
            original_input: None,
        }
    }

    #[must_use]
    pub fn in_scene(mut self, scene: impl Into<SceneId>) -> Self {
        self.scene_id = Some(scene.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item_id = Some(item.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_id = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot_id = Some(slot.into());
        self
    }

    #[must_use]
    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice_id = Some(choice.into());
        self
    }

    #[must_use]
    pub fn with_original_input(mut self, input: impl Into<String>) -> Self {
        self.original_input = Some(input.into());
        self
    }
}

/// A committed intent in the action history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Turn number the intent was processed in.
    pub turn: u32,

    /// The intent, with `timestamp` set.
    pub intent: ActionIntent,
}

impl ActionRecord {
    /// Create a record, stamping the intent.
    #[must_use]
    pub fn new(turn: u32, mut intent: ActionIntent, at: DateTime<Utc>) -> Self {
        intent.timestamp = Some(at);
        Self { turn, intent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_builder() {
        let intent = ActionIntent::new("hero", "transfer")
            .with_item("sword")
            .with_target("backpack")
            .with_slot("strap");

        assert_eq!(intent.verb, "transfer");
        assert_eq!(intent.item_id.as_deref(), Some("sword"));
        assert_eq!(intent.target_id.as_deref(), Some("backpack"));
        assert_eq!(intent.slot_id.as_deref(), Some("strap"));
        assert!(intent.timestamp.is_none());
    }

    #[test]
    fn test_record_stamps_intent() {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let record = ActionRecord::new(4, ActionIntent::new("hero", "look"), at);

        assert_eq!(record.turn, 4);
        assert_eq!(record.intent.timestamp, Some(at));
    }

    #[test]
    fn test_intent_serialization() {
        let intent = ActionIntent::new("hero", "move").with_target("north");
        let json = serde_json::to_string(&intent).unwrap();
        let back: ActionIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
    }
}
