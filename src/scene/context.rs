//! Per-turn scene projection.
//!
//! ## Visibility
//!
//! Objects, exits and NPCs carry a perception threshold. A viewer notices
//! one when the threshold does not exceed the viewer's current perception
//! stat (`EngineConfig::perception_stat`).

use crate::core::{CharacterState, EngineConfig, GameState, ObjectId, SceneId};
use crate::objects::{normalize, ObjectDefinition};

use super::definition::{ExitDefinition, NpcDefinition, SceneDefinition};

/// Check a perception threshold against a viewer's perception.
#[must_use]
pub fn is_visible(threshold: i64, perception: i64) -> bool {
    threshold <= perception
}

/// Objects lying in `scene` that a viewer with `perception` notices.
pub fn visible_objects<'a>(
    state: &'a GameState,
    scene: &SceneId,
    perception: i64,
) -> impl Iterator<Item = &'a ObjectDefinition> {
    state
        .objects_in_scene(scene)
        .filter(move |o| is_visible(o.perception, perception))
}

/// Read-only view of the current scene for one turn.
///
/// Built fresh every turn and never stored in `GameState`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneContext {
    pub id: SceneId,
    pub narrative: String,

    /// Visible objects lying in the scene, as of projection time.
    pub objects: Vec<ObjectDefinition>,

    /// Visible exits.
    pub exits: Vec<ExitDefinition>,

    /// Visible NPCs.
    pub npcs: Vec<NpcDefinition>,
}

impl SceneContext {
    /// Create an empty context.
    pub fn new(id: impl Into<SceneId>, narrative: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            narrative: narrative.into(),
            objects: Vec::new(),
            exits: Vec::new(),
            npcs: Vec::new(),
        }
    }

    /// Project a scene definition for `viewer`.
    #[must_use]
    pub fn project(
        state: &GameState,
        scene: &SceneDefinition,
        viewer: &CharacterState,
        config: &EngineConfig,
    ) -> Self {
        let perception = viewer.stats.get(&config.perception_stat);
        Self {
            id: scene.id.clone(),
            narrative: scene.narrative.clone(),
            objects: visible_objects(state, &scene.id, perception).cloned().collect(),
            exits: scene
                .exits
                .iter()
                .filter(|e| is_visible(e.perception, perception))
                .cloned()
                .collect(),
            npcs: scene
                .npcs
                .iter()
                .filter(|n| is_visible(n.perception, perception))
                .cloned()
                .collect(),
        }
    }

    /// Resolve an exit by id, name, or normalized name.
    #[must_use]
    pub fn find_exit(&self, query: &str) -> Option<&ExitDefinition> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let lower = query.to_lowercase();
        let normalized = normalize(query);

        self.exits
            .iter()
            .find(|e| e.id == query)
            .or_else(|| {
                self.exits
                    .iter()
                    .find(|e| e.id.to_lowercase() == lower || e.name.to_lowercase() == lower)
            })
            .or_else(|| {
                self.exits
                    .iter()
                    .find(|e| normalize(&e.id) == normalized || normalize(&e.name) == normalized)
            })
    }

    /// Check if an object id is among the visible objects.
    #[must_use]
    pub fn shows(&self, id: &ObjectId) -> bool {
        self.objects.iter().any(|o| &o.id == id)
    }
}
