//! Current stats as a pure function of state.
//!
//! ```text
//! stats = base_stats
//!       + stat_modifiers of every carried object (nested and slotted included)
//!       + stat_modifiers of every active effect
//! ```
//!
//! Each carried object contributes once, regardless of its quantity.
//! Modifiers for stats absent from the base block create the stat.

use crate::core::{CharacterState, EngineConfig, GameState, StatBlock};
use crate::objects::Containers;

/// Derives a character's current stats.
#[derive(Clone, Copy)]
pub struct StatCalculator<'a> {
    config: &'a EngineConfig,
}

impl<'a> StatCalculator<'a> {
    /// Create a calculator.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Compute current stats for a character against the arena in `state`.
    ///
    /// The character does not need to be inserted in `state` yet.
    #[must_use]
    pub fn calculate(&self, character: &CharacterState, state: &GameState) -> StatBlock {
        let mut stats = character.base_stats.clone();

        let containers = Containers::new(&state.objects, self.config);
        for object in containers.carried(character) {
            stats.apply_deltas(&object.stat_modifiers);
        }
        for effect in &character.effects {
            stats.apply_deltas(&effect.stat_modifiers);
        }
        stats
    }

    /// Recompute `stats` for every character in `state`.
    pub fn recompute_all(&self, state: &mut GameState) {
        let ids: Vec<_> = state.characters.keys().cloned().collect();
        for id in ids {
            let Some(character) = state.characters.get(&id) else {
                continue;
            };
            let stats = self.calculate(character, state);
            tracing::debug!(character = %id, ?stats, "recomputed stats");
            if let Some(character) = state.characters.get_mut(&id) {
                character.stats = stats;
            }
        }
    }

    /// Check that `character.stats` is what `calculate` would produce.
    #[must_use]
    pub fn is_consistent(&self, character: &CharacterState, state: &GameState) -> bool {
        character.stats == self.calculate(character, state)
    }
}
