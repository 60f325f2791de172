//! Scene content definitions.

use serde::{Deserialize, Serialize};

use crate::core::SceneId;

/// A way out of a scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitDefinition {
    /// Direction or short id (`"north"`, `"trapdoor"`).
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Scene reached through this exit.
    pub target: SceneId,

    /// Minimum perception needed to notice the exit.
    #[serde(default)]
    pub perception: i64,

    /// Taking this exit ends the game instead of entering `target`.
    #[serde(default)]
    pub ends_game: bool,
}

impl ExitDefinition {
    /// Create an exit leading to `target`.
    pub fn new(id: impl Into<String>, target: impl Into<SceneId>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            target: target.into(),
            perception: 0,
            ends_game: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_perception(mut self, threshold: i64) -> Self {
        self.perception = threshold;
        self
    }

    /// Make this exit end the game.
    #[must_use]
    pub fn ending(mut self) -> Self {
        self.ends_game = true;
        self
    }
}

/// A non-player character present in a scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcDefinition {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub perception: i64,
}

impl NpcDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            perception: 0,
        }
    }

    #[must_use]
    pub fn with_perception(mut self, threshold: i64) -> Self {
        self.perception = threshold;
        self
    }
}

/// Static content of a scene.
///
/// Objects are not part of the definition: what lies in a scene is game
/// state (`GameState::scene_objects`), because players pick things up and
/// drop them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDefinition {
    pub id: SceneId,

    #[serde(default)]
    pub narrative: String,

    #[serde(default)]
    pub exits: Vec<ExitDefinition>,

    #[serde(default)]
    pub npcs: Vec<NpcDefinition>,
}

impl SceneDefinition {
    pub fn new(id: impl Into<SceneId>, narrative: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            narrative: narrative.into(),
            exits: Vec::new(),
            npcs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_exit(mut self, exit: ExitDefinition) -> Self {
        self.exits.push(exit);
        self
    }

    #[must_use]
    pub fn with_npc(mut self, npc: NpcDefinition) -> Self {
        self.npcs.push(npc);
        self
    }
}
