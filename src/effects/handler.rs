//! The handler contract and the character-level handlers.
//!
//! Every handler decides for itself whether it has work to do
//! (`should_apply`) and mutates the shared `EffectContext` in `apply`.
//! Handlers are independent: none reads another handler's output except
//! through the state they both see.

use crate::core::{EngineError, EngineResult};

use super::context::EffectContext;

/// One step of the effect pipeline.
pub trait EffectHandler: Send + Sync {
    /// Name used in logs and pipeline traces.
    fn name(&self) -> &'static str;

    /// Whether this handler has anything to do for this resolution.
    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool;

    /// Apply this handler's part of the diff.
    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()>;
}

/// Adds stat deltas to the target's base stats.
#[derive(Debug, Default)]
pub struct StatsHandler;

impl EffectHandler for StatsHandler {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        !ctx.effects.stats.is_empty()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        ctx.character.base_stats.apply_deltas(&ctx.effects.stats);
        Ok(())
    }
}

/// Adds and removes character traits.
#[derive(Debug, Default)]
pub struct TraitsHandler;

impl EffectHandler for TraitsHandler {
    fn name(&self) -> &'static str {
        "traits"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        !ctx.effects.add_traits.is_empty() || !ctx.effects.remove_traits.is_empty()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        for name in &ctx.effects.add_traits {
            ctx.character.traits.insert(name.clone());
        }
        for name in &ctx.effects.remove_traits {
            ctx.character.traits.remove(name);
        }
        Ok(())
    }
}

/// Adds and removes character flags and world flags.
#[derive(Debug, Default)]
pub struct FlagsHandler;

impl EffectHandler for FlagsHandler {
    fn name(&self) -> &'static str {
        "flags"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        let e = ctx.effects;
        !(e.add_flags.is_empty()
            && e.remove_flags.is_empty()
            && e.add_world_flags.is_empty()
            && e.remove_world_flags.is_empty())
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        for flag in &ctx.effects.add_flags {
            ctx.character.flags.insert(flag.clone());
        }
        for flag in &ctx.effects.remove_flags {
            ctx.character.flags.remove(flag);
        }
        for flag in &ctx.effects.add_world_flags {
            ctx.state.world.flags.insert(flag.clone());
        }
        for flag in &ctx.effects.remove_world_flags {
            ctx.state.world.flags.remove(flag);
        }
        Ok(())
    }
}

/// Adds and removes character effects.
///
/// Removals run first so that removing and re-adding an effect in one
/// diff refreshes it. Added instances are recorded in
/// `EffectContext::added_effects`.
#[derive(Debug, Default)]
pub struct CharacterEffectsHandler;

impl EffectHandler for CharacterEffectsHandler {
    fn name(&self) -> &'static str {
        "character_effects"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        !ctx.effects.add_effects.is_empty() || !ctx.effects.remove_effects.is_empty()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        for id in &ctx.effects.remove_effects {
            if !ctx.character.remove_effect(id) {
                tracing::debug!(effect = %id, character = %ctx.character.id, "effect was not active");
            }
        }

        for id in &ctx.effects.add_effects {
            let definition = ctx
                .state
                .effect_definitions
                .get(id)
                .ok_or_else(|| EngineError::UnknownEffect(id.clone()))?;
            ctx.character.add_effect(definition.instantiate());
            ctx.added_effects
                .push((ctx.character.id.clone(), id.clone()));
        }
        Ok(())
    }
}
