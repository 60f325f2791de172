//! Game state.
//!
//! ## WorldState
//!
//! Global information: flags, visited scenes, turn counter, game over.
//!
//! ## GameState
//!
//! The complete, self-describing state of a game:
//! - Characters by id
//! - The object arena (every object definition, wherever it currently is)
//! - Objects lying in each scene
//! - Current scene, log, and action history
//! - Effect definitions
//!
//! Every collection is an `im` persistent structure, so a turn clones the
//! state in O(1) and mutates its own copy. A value handed back by the turn
//! processor never aliases the value that was passed in.

use im::{HashMap as ImHashMap, HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::character::{CharacterState, EffectDefinition, InventoryEntry};
use super::config::{EngineConfig, HandSide};
use super::error::{EngineError, EngineResult};
use super::ids::{CharacterId, EffectId, ObjectId, SceneId};
use super::intent::ActionRecord;
use crate::commands::Outcome;
use crate::objects::{ObjectDefinition, Slot};
use crate::stats::StatCalculator;

/// Global world state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Global story flags.
    pub flags: ImHashSet<String>,

    /// Scenes the player has entered.
    pub visited_scenes: ImHashSet<SceneId>,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Set when a resolution ends the game.
    pub game_over: bool,
}

/// A narrated turn in the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn number before the turn counter advanced.
    pub turn: u32,
    pub actor: CharacterId,
    pub outcome: Outcome,
    pub narrative: String,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub characters: ImHashMap<CharacterId, CharacterState>,
    pub world: WorldState,
    pub current_scene_id: SceneId,

    /// Object arena.
    pub objects: ImHashMap<ObjectId, ObjectDefinition>,

    /// Objects present in each scene and not owned by a character.
    pub scene_objects: ImHashMap<SceneId, Vector<ObjectId>>,

    pub effect_definitions: ImHashMap<EffectId, EffectDefinition>,

    /// Append-only narration log.
    pub log: Vector<LogEntry>,

    /// Append-only committed intents.
    pub action_history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a new game starting in `start_scene`.
    pub fn new(start_scene: impl Into<SceneId>) -> Self {
        let start_scene = start_scene.into();
        let mut world = WorldState {
            turn: 1,
            ..WorldState::default()
        };
        world.visited_scenes.insert(start_scene.clone());

        Self {
            characters: ImHashMap::new(),
            world,
            current_scene_id: start_scene,
            objects: ImHashMap::new(),
            scene_objects: ImHashMap::new(),
            effect_definitions: ImHashMap::new(),
            log: Vector::new(),
            action_history: Vector::new(),
        }
    }

    // === Objects ===

    /// Insert an object into the arena, replacing any previous definition.
    pub fn add_object(&mut self, object: ObjectDefinition) {
        self.objects.insert(object.id.clone(), object);
    }

    /// Insert an object into the arena and lay it in a scene.
    pub fn place_in_scene(&mut self, scene: impl Into<SceneId>, object: ObjectDefinition) {
        let id = object.id.clone();
        self.add_object(object);
        self.scene_objects
            .entry(scene.into())
            .or_default()
            .push_back(id);
    }

    /// Get an object from the arena.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&ObjectDefinition> {
        self.objects.get(id)
    }

    /// Get a mutable object from the arena.
    pub fn object_mut(&mut self, id: &ObjectId) -> Option<&mut ObjectDefinition> {
        self.objects.get_mut(id)
    }

    /// Get an object, treating absence as a contract violation.
    pub fn require_object(&self, id: &ObjectId) -> EngineResult<&ObjectDefinition> {
        self.objects
            .get(id)
            .ok_or_else(|| EngineError::ObjectNotFound(id.clone()))
    }

    /// Objects lying in a scene, in placement order.
    pub fn objects_in_scene(&self, scene: &SceneId) -> impl Iterator<Item = &ObjectDefinition> {
        self.scene_objects
            .get(scene)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.objects.get(id))
    }

    /// Check if an object lies in a scene.
    #[must_use]
    pub fn is_in_scene(&self, scene: &SceneId, id: &ObjectId) -> bool {
        self.scene_objects
            .get(scene)
            .is_some_and(|ids| ids.contains(id))
    }

    // === Characters ===

    /// Get a character.
    #[must_use]
    pub fn character(&self, id: &CharacterId) -> Option<&CharacterState> {
        self.characters.get(id)
    }

    /// Get a character, treating absence as a contract violation.
    pub fn require_character(&self, id: &CharacterId) -> EngineResult<&CharacterState> {
        self.characters
            .get(id)
            .ok_or_else(|| EngineError::CharacterNotFound(id.clone()))
    }

    /// Add a character with a fresh pair of hands.
    ///
    /// Hands are ordinary containers: general storage for
    /// `config.hand_max_items` objects with no weight ceiling, plus one
    /// empty slot per name in `config.hand_slots`. Stats are computed
    /// before the character is inserted.
    pub fn spawn_character(&mut self, mut character: CharacterState, config: &EngineConfig) {
        for side in HandSide::BOTH {
            let hand_id = config.hand_id(&character.id, side);
            if character.entry(&hand_id).is_some() {
                continue;
            }

            let mut hand = ObjectDefinition::container(
                hand_id.clone(),
                format!("{}'s {} hand.", character.name, side.label()),
            )
            .with_name(format!("{} hand", side.label()))
            .with_max_items(config.hand_max_items)
            .fixed();
            for slot in &config.hand_slots {
                hand = hand.with_slot(Slot::new(slot.clone()));
            }

            self.add_object(hand);
            character.inventory.push_back(InventoryEntry::new(hand_id, 1));
        }

        character.stats = StatCalculator::new(config).calculate(&character, self);
        self.characters.insert(character.id.clone(), character);
    }

    // === Effects ===

    /// Register an effect definition.
    pub fn register_effect(&mut self, definition: EffectDefinition) {
        self.effect_definitions
            .insert(definition.id.clone(), definition);
    }

    // === Snapshots ===

    /// Encode the full state for the persistence layer.
    pub fn to_snapshot(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by `to_snapshot`.
    pub fn from_snapshot(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
