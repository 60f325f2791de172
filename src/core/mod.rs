//! Core engine types: ids, configuration, stats, characters, state, intents, errors.
//!
//! This module contains the data model every other subsystem reads and
//! writes. Nothing here resolves commands or applies effects.

pub mod ids;
pub mod config;
pub mod stat_block;
pub mod character;
pub mod intent;
pub mod state;
pub mod error;

pub use ids::{CharacterId, EffectId, ObjectId, SceneId};
pub use config::{EngineConfig, HandSide};
pub use stat_block::StatBlock;
pub use character::{CharacterEffect, CharacterState, EffectDefinition, InventoryEntry};
pub use intent::{ActionIntent, ActionRecord};
pub use state::{GameState, LogEntry, WorldState};
pub use error::{EngineError, EngineResult, ErrorSeverity};
