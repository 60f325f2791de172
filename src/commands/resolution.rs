//! Resolution results.

use serde::{Deserialize, Serialize};

use crate::core::SceneId;
use crate::effects::ActionEffects;

/// How a resolution went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    /// Player-facing failure. The effect pipeline is skipped.
    Failure,
    Partial,
}

/// Where the story goes after a resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextScene {
    /// Enter another scene.
    Scene(SceneId),
    /// End the game.
    GameEnd,
}

/// The outcome of resolving an intent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub outcome: Outcome,
    pub narrative: String,

    #[serde(default)]
    pub effects: Option<ActionEffects>,

    /// `None` = stay in the current scene.
    #[serde(default)]
    pub next_scene: Option<NextScene>,
}

impl ResolutionResult {
    /// A successful resolution with no effects.
    pub fn success(narrative: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            narrative: narrative.into(),
            effects: None,
            next_scene: None,
        }
    }

    /// A player-facing failure.
    pub fn failure(narrative: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            narrative: narrative.into(),
            effects: None,
            next_scene: None,
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: ActionEffects) -> Self {
        self.effects = Some(effects);
        self
    }

    #[must_use]
    pub fn with_next_scene(mut self, next: NextScene) -> Self {
        self.next_scene = Some(next);
        self
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }

    /// Destination scene, if this resolution enters one.
    #[must_use]
    pub fn destination(&self) -> Option<&SceneId> {
        match &self.next_scene {
            Some(NextScene::Scene(id)) => Some(id),
            _ => None,
        }
    }
}
