//! Per-turn effect ticking.
//!
//! Once per turn, for every character: each active effect folds its
//! `per_turn_modifiers` into base stats, then its remaining duration drops
//! by one. Effects reaching zero are removed. Permanent effects apply their
//! per-turn modifiers forever.

use im::Vector;

use crate::core::{CharacterId, EffectId, GameState};

/// Tick every character's effects.
///
/// Instances listed in `skip` were added this turn and are left untouched.
/// Returns the effects that expired.
pub fn tick_effects(state: &mut GameState, skip: &[(CharacterId, EffectId)]) -> Vec<(CharacterId, EffectId)> {
    let mut expired = Vec::new();
    let ids: Vec<CharacterId> = state.characters.keys().cloned().collect();

    for id in ids {
        let Some(character) = state.characters.get_mut(&id) else {
            continue;
        };
        if character.effects.is_empty() {
            continue;
        }

        let mut kept = Vector::new();
        for mut effect in std::mem::take(&mut character.effects) {
            if skip.iter().any(|(c, e)| c == &id && e == &effect.id) {
                kept.push_back(effect);
                continue;
            }

            character.base_stats.apply_deltas(&effect.per_turn_modifiers);

            match effect.remaining {
                None => kept.push_back(effect),
                Some(n) if n <= 1 => {
                    tracing::debug!(character = %id, effect = %effect.id, "effect expired");
                    expired.push((id.clone(), effect.id));
                }
                Some(n) => {
                    effect.remaining = Some(n - 1);
                    kept.push_back(effect);
                }
            }
        }
        character.effects = kept;
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CharacterState, EffectDefinition, EngineConfig, StatBlock};

    fn poisoned_state() -> GameState {
        let mut state = GameState::new("room");
        let mut hero = CharacterState::new("hero", "Hero", StatBlock::new().with("health", 10));
        hero.add_effect(
            EffectDefinition::new("poison", "Poison")
                .with_per_turn("health", -1)
                .with_duration(3)
                .instantiate(),
        );
        state.spawn_character(hero, &EngineConfig::new("hero"));
        state
    }

    fn health(state: &GameState) -> i64 {
        state.character(&"hero".into()).unwrap().base_stats.get("health")
    }

    #[test]
    fn test_poison_runs_its_course() {
        let mut state = poisoned_state();

        assert!(tick_effects(&mut state, &[]).is_empty());
        assert!(tick_effects(&mut state, &[]).is_empty());
        let expired = tick_effects(&mut state, &[]);

        assert_eq!(expired, vec![(CharacterId::new("hero"), EffectId::new("poison"))]);
        assert_eq!(health(&state), 7);
        assert!(state.character(&"hero".into()).unwrap().effects.is_empty());

        tick_effects(&mut state, &[]);
        assert_eq!(health(&state), 7);
    }

    #[test]
    fn test_skip_leaves_new_effects_alone() {
        let mut state = poisoned_state();
        let skip = [(CharacterId::new("hero"), EffectId::new("poison"))];

        tick_effects(&mut state, &skip);

        let hero = state.character(&"hero".into()).unwrap();
        assert_eq!(hero.base_stats.get("health"), 10);
        assert_eq!(hero.effects[0].remaining, Some(3));
    }

    #[test]
    fn test_permanent_effect_never_expires() {
        let mut state = GameState::new("room");
        let mut hero = CharacterState::new("hero", "Hero", StatBlock::new().with("health", 5));
        hero.add_effect(EffectDefinition::new("regen", "Regeneration").with_per_turn("health", 1).instantiate());
        state.spawn_character(hero, &EngineConfig::new("hero"));

        for _ in 0..4 {
            tick_effects(&mut state, &[]);
        }
        let hero = state.character(&"hero".into()).unwrap();
        assert_eq!(hero.base_stats.get("health"), 9);
        assert!(hero.has_effect(&EffectId::new("regen")));
    }
}
