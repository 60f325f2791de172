//! Shared context for one run of the effect pipeline.

use crate::commands::ResolutionResult;
use crate::core::{CharacterId, CharacterState, EffectId, EngineConfig, GameState};
use crate::objects::Containers;

use super::diff::ActionEffects;

/// Mutable-during-turn context handed to every handler in order.
///
/// `state` is the turn's working copy. The target character is taken out
/// of it once and lives in `character` until the pipeline finishes, so
/// handlers never race on two copies of the same character.
pub struct EffectContext<'a> {
    /// Working copy of the game state. `state.characters` still holds the
    /// target's pre-pipeline value while handlers run.
    pub state: GameState,

    /// Working copy of the target character.
    pub character: CharacterState,

    pub effects: &'a ActionEffects,
    pub result: &'a ResolutionResult,
    pub config: &'a EngineConfig,

    /// Effects added by this run, read by the turn processor so the
    /// per-turn tick skips them until the next turn.
    pub added_effects: Vec<(CharacterId, EffectId)>,
}

impl<'a> EffectContext<'a> {
    /// Create a context for `character`.
    pub fn new(
        state: GameState,
        character: CharacterState,
        effects: &'a ActionEffects,
        result: &'a ResolutionResult,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            state,
            character,
            effects,
            result,
            config,
            added_effects: Vec::new(),
        }
    }

    /// Container queries over the working arena.
    #[must_use]
    pub fn containers(&self) -> Containers<'_> {
        Containers::new(&self.state.objects, self.config)
    }

    /// Write the working character back and hand over the state.
    pub fn finish(mut self) -> (GameState, Vec<(CharacterId, EffectId)>) {
        let id = self.character.id.clone();
        self.state.characters.insert(id, self.character);
        (self.state, self.added_effects)
    }
}
