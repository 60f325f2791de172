//! Engine configuration.
//!
//! The engine never hardcodes stat names or hand layouts - the host
//! configures them once at startup via `EngineConfig`, and the config is
//! handed to the `TurnProcessor` explicitly.

use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, ObjectId};

/// Side of the body a hand container belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Both hands, in the order they are added to a new inventory.
    pub const BOTH: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    /// Lower-case label used in ids and narration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

/// Complete engine configuration.
///
/// ## Example
///
/// ```
/// use taleforge::core::EngineConfig;
///
/// let config = EngineConfig::new("hero")
///     .with_carry_multiplier(12)
///     .with_hand_max_items(2);
///
/// assert_eq!(config.carry_multiplier, 12);
/// assert_eq!(config.hand_slots.len(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The player character. Its hands get the bare `left-hand` /
    /// `right-hand` ids; every other character's hands are prefixed.
    pub player_id: CharacterId,

    /// Carrying capacity = effective strength * multiplier.
    pub carry_multiplier: i64,

    /// Stat key holding strength.
    pub strength_stat: String,

    /// Stat key compared against object perception thresholds.
    pub perception_stat: String,

    /// Carried objects with a `<prefix><N>` trait add N to strength.
    pub strength_trait_prefix: String,

    /// Named ring slots created on every hand.
    pub hand_slots: Vec<String>,

    /// General storage capacity of a hand.
    pub hand_max_items: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_id: CharacterId::new("player"),
            carry_multiplier: 10,
            strength_stat: "strength".to_string(),
            perception_stat: "perception".to_string(),
            strength_trait_prefix: "strength_".to_string(),
            hand_slots: ["thumb", "index", "middle", "ring", "pinky"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            hand_max_items: 1,
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults for the given player.
    pub fn new(player_id: impl Into<CharacterId>) -> Self {
        Self {
            player_id: player_id.into(),
            ..Self::default()
        }
    }

    /// Set the carry multiplier.
    #[must_use]
    pub fn with_carry_multiplier(mut self, multiplier: i64) -> Self {
        self.carry_multiplier = multiplier;
        self
    }

    /// Set the strength and perception stat keys.
    #[must_use]
    pub fn with_stat_keys(
        mut self,
        strength: impl Into<String>,
        perception: impl Into<String>,
    ) -> Self {
        self.strength_stat = strength.into();
        self.perception_stat = perception.into();
        self
    }

    /// Replace the hand slot names.
    #[must_use]
    pub fn with_hand_slots<S: Into<String>>(mut self, slots: impl IntoIterator<Item = S>) -> Self {
        self.hand_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Set general storage capacity of hands.
    #[must_use]
    pub fn with_hand_max_items(mut self, max: usize) -> Self {
        self.hand_max_items = max;
        self
    }

    /// Id of a character's hand container.
    #[must_use]
    pub fn hand_id(&self, owner: &CharacterId, side: HandSide) -> ObjectId {
        if *owner == self.player_id {
            ObjectId::new(format!("{}-hand", side.label()))
        } else {
            ObjectId::new(format!("{}-{}-hand", owner.as_str(), side.label()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.carry_multiplier, 10);
        assert_eq!(config.strength_stat, "strength");
        assert_eq!(config.hand_max_items, 1);
        assert_eq!(
            config.hand_slots,
            vec!["thumb", "index", "middle", "ring", "pinky"]
        );
    }

    #[test]
    fn test_hand_ids() {
        let config = EngineConfig::new("hero");
        let hero = CharacterId::new("hero");
        let guard = CharacterId::new("guard");

        assert_eq!(config.hand_id(&hero, HandSide::Left).as_str(), "left-hand");
        assert_eq!(config.hand_id(&hero, HandSide::Right).as_str(), "right-hand");
        assert_eq!(config.hand_id(&guard, HandSide::Left).as_str(), "guard-left-hand");
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"player_id": "hero", "carry_multiplier": 5}"#).unwrap();

        assert_eq!(config.player_id, CharacterId::new("hero"));
        assert_eq!(config.carry_multiplier, 5);
        assert_eq!(config.perception_stat, "perception");
    }
}
