//! # taleforge
//!
//! The rules engine of a turn-based interactive-fiction runtime.
//!
//! Given a player's already-normalized intent, the engine resolves the
//! action, applies its effects, and returns the next game state together
//! with the narration for the turn.
//!
//! ## Design Principles
//!
//! 1. **Immutable turns**: `process_turn` borrows the current state and
//!    returns a new one. A failed turn leaves the caller's state exactly as
//!    it was.
//!
//! 2. **Diffs, not mutation**: commands never touch state. They return an
//!    `ActionEffects` diff, and an ordered pipeline of effect handlers
//!    applies it.
//!
//! 3. **Configuration over convention**: stat names, hand layout and
//!    carrying rules come from `EngineConfig`.
//!
//! ## Architecture
//!
//! - **Object arena**: every object lives once in `GameState::objects`.
//!   Containers, slots, scenes and inventories hold ids, so containment
//!   is a reachability question over stable ids.
//!
//! - **Persistent data structures**: O(1) state cloning via `im`.
//!
//! ## Modules
//!
//! - `core`: ids, configuration, stats, characters, state, intents, errors
//! - `objects`: object definitions and the container model
//! - `stats`: stat calculation
//! - `scene`: scene content and the per-turn scene projection
//! - `effects`: the effect pipeline and per-turn ticking
//! - `commands`: verbs and the command registry
//! - `rules`: the turn processor

pub mod core;
pub mod objects;
pub mod stats;
pub mod scene;
pub mod effects;
pub mod commands;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CharacterId, EffectId, ObjectId, SceneId,
    EngineConfig, HandSide,
    StatBlock,
    CharacterState, CharacterEffect, EffectDefinition, InventoryEntry,
    ActionIntent, ActionRecord,
    GameState, WorldState, LogEntry,
    EngineError, EngineResult, ErrorSeverity,
};

pub use crate::objects::{
    ObjectDefinition, Slot, Dimensions, CONTAINER_TRAIT,
    Containers, FitError, Holder, TransferPlan,
    fuzzy_find,
};

pub use crate::stats::StatCalculator;

pub use crate::scene::{SceneContext, SceneDefinition, ExitDefinition, NpcDefinition};

pub use crate::effects::{
    ActionEffects, ItemGrant, TransferSpec,
    EffectApplier, EffectHandler, EffectContext, PipelineOutput,
};

pub use crate::commands::{
    Command, CommandContext, CommandRegistry,
    NormalizedCommandInput, ParamValue, ParameterSpec,
    Outcome, NextScene, ResolutionResult,
};

pub use crate::rules::{TurnProcessor, TurnOutput};
