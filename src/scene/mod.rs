//! Scenes and the per-turn scene projection.
//!
//! Scene content (`SceneDefinition`, exits, NPCs) is loaded by the host.
//! Each turn the host projects it into a `SceneContext`: the read-only,
//! perception-filtered view that commands resolve against.

mod definition;
mod context;

pub use definition::{ExitDefinition, NpcDefinition, SceneDefinition};
pub use context::{is_visible, visible_objects, SceneContext};
