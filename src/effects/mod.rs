//! The effect pipeline.
//!
//! Commands describe state changes as an `ActionEffects` diff. The
//! `EffectApplier` turns a resolution and its diff into a new `GameState`
//! by running an ordered list of independent `EffectHandler`s over a shared
//! `EffectContext`:
//!
//! - `StatsHandler`, `TraitsHandler`, `FlagsHandler`, `CharacterEffectsHandler`
//! - `InventoryHandler`, `TransferItemHandler`, `SceneObjectsHandler`
//! - `VisitedScenesHandler`, `SceneTransitionHandler`
//!
//! `tick_effects` runs separately, once per turn, for every character.

mod diff;
mod context;
mod handler;
mod inventory;
mod travel;
mod applier;
mod tick;

pub use diff::{ActionEffects, ItemGrant, TransferSpec};
pub use context::EffectContext;
pub use handler::{CharacterEffectsHandler, EffectHandler, FlagsHandler, StatsHandler, TraitsHandler};
pub use inventory::{InventoryHandler, SceneObjectsHandler, TransferItemHandler};
pub use travel::{SceneTransitionHandler, VisitedScenesHandler};
pub use applier::{EffectApplier, PipelineOutput};
pub use tick::tick_effects;
