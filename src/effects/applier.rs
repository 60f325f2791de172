//! The ordered effect pipeline.

use crate::commands::ResolutionResult;
use crate::core::{CharacterId, EffectId, EngineConfig, EngineResult, GameState};

use super::context::EffectContext;
use super::diff::ActionEffects;
use super::handler::{CharacterEffectsHandler, EffectHandler, FlagsHandler, StatsHandler, TraitsHandler};
use super::inventory::{InventoryHandler, SceneObjectsHandler, TransferItemHandler};
use super::travel::{SceneTransitionHandler, VisitedScenesHandler};

/// What a pipeline run produced.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// The new state. Equal to the input state when nothing ran.
    pub state: GameState,

    /// Effect instances added during this run.
    pub added_effects: Vec<(CharacterId, EffectId)>,

    /// Names of the handlers that ran, in order.
    pub applied: Vec<&'static str>,
}

/// Applies a resolution to a state through an ordered list of handlers.
///
/// The standard order is:
///
/// 1. stats
/// 2. traits
/// 3. flags
/// 4. character effects
/// 5. inventory
/// 6. transfer
/// 7. scene objects
/// 8. visited scenes
/// 9. scene transition
///
/// A failed resolution skips the whole pipeline. If any handler returns an
/// error the run is abandoned; the caller's state was never touched.
pub struct EffectApplier {
    handlers: Vec<Box<dyn EffectHandler>>,
}

impl Default for EffectApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectApplier {
    /// Create the standard pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::with_handlers(vec![
            Box::new(StatsHandler),
            Box::new(TraitsHandler),
            Box::new(FlagsHandler),
            Box::new(CharacterEffectsHandler),
            Box::new(InventoryHandler),
            Box::new(TransferItemHandler),
            Box::new(SceneObjectsHandler),
            Box::new(VisitedScenesHandler),
            Box::new(SceneTransitionHandler),
        ])
    }

    /// Create a pipeline with a custom handler list, run in the given order.
    #[must_use]
    pub fn with_handlers(handlers: Vec<Box<dyn EffectHandler>>) -> Self {
        Self { handlers }
    }

    /// Handler names in execution order.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run the pipeline for `result`.
    ///
    /// The diff targets `effects.target_character_id`, or `actor` when unset.
    pub fn apply(
        &self,
        state: &GameState,
        result: &ResolutionResult,
        actor: &CharacterId,
        config: &EngineConfig,
    ) -> EngineResult<PipelineOutput> {
        if result.is_failure() {
            tracing::debug!("resolution failed; skipping effect pipeline");
            return Ok(PipelineOutput {
                state: state.clone(),
                added_effects: Vec::new(),
                applied: Vec::new(),
            });
        }

        let empty = ActionEffects::default();
        let effects = result.effects.as_ref().unwrap_or(&empty);
        let target = effects.target_character_id.as_ref().unwrap_or(actor);
        let character = state.require_character(target)?.clone();

        let mut ctx = EffectContext::new(state.clone(), character, effects, result, config);
        let mut applied = Vec::new();
        for handler in &self.handlers {
            if !handler.should_apply(&ctx) {
                continue;
            }
            tracing::debug!(handler = handler.name(), character = %target, "applying effect handler");
            handler.apply(&mut ctx)?;
            applied.push(handler.name());
        }

        let (state, added_effects) = ctx.finish();
        Ok(PipelineOutput {
            state,
            added_effects,
            applied,
        })
    }
}
