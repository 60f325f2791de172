//! Effect pipeline, processor and serialization behavior.

mod common;

use common::*;
use taleforge::{
    ActionEffects, EffectApplier, EffectContext, EffectHandler, EngineConfig, EngineError,
    EngineResult, ErrorSeverity, GameState, Outcome, ResolutionResult, TransferSpec, TurnProcessor,
};
use taleforge::effects::{SceneObjectsHandler, StatsHandler};

/// Plain `look` changes nothing but the turn bookkeeping.
#[test]
fn test_look_is_idempotent() {
    let mut world = World::new();

    let first = world.act(intent("look"));
    let after_first = world.state.clone();
    let second = world.act(intent("look"));

    assert_eq!(first, second);
    assert_eq!(world.state.objects, after_first.objects);
    assert_eq!(world.state.characters, after_first.characters);
    assert!(first.narrative.starts_with("A draughty hall."));
    assert!(first.narrative.contains("sword"));
    assert!(!first.narrative.contains("gem"));
    assert!(first.narrative.contains("north (Oak Door)"));
    assert!(first.effects.unwrap().reprint_narrative);
}

#[test]
fn test_examine_object() {
    let mut world = World::new();

    let result = world.act(look_at("Sword"));
    assert_eq!(result.narrative, "A short sword.");
    assert!(result.effects.is_none());

    world.act(pickup("backpack"));
    let result = world.act(look_at("backpack"));
    assert_eq!(result.narrative, "A leather backpack. It is empty.");

    let result = world.act(look_at("unicorn"));
    assert_eq!(result.outcome, Outcome::Failure);
}

#[test]
fn test_informational_commands() {
    let mut world = World::new();
    world.act(pickup("sword"));

    let items = world.act(intent("items"));
    assert!(items.narrative.starts_with("You are carrying 2.0 of 50.0:"));
    assert!(items.narrative.contains("- left hand (2.0) [1/1 items]"));
    assert!(items.narrative.contains("  - sword (2.0)"));
    assert!(items.effects.unwrap().list_inventory);

    let stats = world.act(intent("stats"));
    assert!(stats.narrative.contains("- strength: 5"));
    assert!(stats.narrative.contains("Carrying 2.0 of 50.0."));

    let help = world.act(intent("help"));
    assert!(help.narrative.contains("- transfer <item> <container> [slot]:"));
    assert!(help.narrative.contains("- look [item]:"));

    world.act(look_at("mushroom"));
    let effects = world.act(intent("effects"));
    assert_eq!(effects.narrative, "Active effects:\n- Poison (3 turns left)");
}

/// Records every run so tests can see whether the pipeline ran.
struct WitnessHandler;

impl EffectHandler for WitnessHandler {
    fn name(&self) -> &'static str {
        "witness"
    }

    fn should_apply(&self, _ctx: &EffectContext<'_>) -> bool {
        true
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        ctx.state.world.flags.insert("witnessed".to_string());
        Ok(())
    }
}

#[test]
fn test_custom_pipeline_skipped_on_failure() {
    let mut world = World::new();
    world.processor = TurnProcessor::new(EngineConfig::new(HERO)).with_applier(EffectApplier::with_handlers(vec![
        Box::new(StatsHandler),
        Box::new(WitnessHandler),
    ]));

    world.act(pickup("boulder"));
    assert!(!world.state.world.flags.contains("witnessed"));

    world.act(intent("look"));
    assert!(world.state.world.flags.contains("witnessed"));
}

/// A transfer that no longer matches the state aborts instead of corrupting it.
#[test]
fn test_stale_transfer_is_an_inconsistency() {
    let mut world = World::new();
    world.act(pickup("sword"));
    world.act(pickup("backpack"));

    let result = ResolutionResult::success("You put the sword in the backpack.").with_effects(
        ActionEffects::new().with_transfer(TransferSpec {
            item_id: "sword".into(),
            from_container_id: Some("right-hand".into()),
            to_container_id: "backpack".into(),
            slot_id: None,
        }),
    );

    let err = EffectApplier::new()
        .apply(&world.state, &result, &HERO.into(), world.processor.config())
        .unwrap_err();
    assert!(matches!(err, EngineError::Inconsistent(_)));
    assert_eq!(err.severity(), ErrorSeverity::Inconsistency);
    assert_eq!(world.contents("left-hand"), vec!["sword"]);
}

#[test]
fn test_vanished_destination_is_a_contract_violation() {
    let mut world = World::new();
    world.act(pickup("sword"));

    let result = ResolutionResult::success("?").with_effects(ActionEffects::new().with_transfer(TransferSpec {
        item_id: "sword".into(),
        from_container_id: None,
        to_container_id: "chest".into(),
        slot_id: None,
    }));

    let err = EffectApplier::new()
        .apply(&world.state, &result, &HERO.into(), world.processor.config())
        .unwrap_err();
    assert_eq!(err, EngineError::ContainerNotFound("chest".into()));
    assert_eq!(err.severity(), ErrorSeverity::Contract);
}

/// Removing an object from a scene it already left is an inconsistency.
#[test]
fn test_scene_sync_guard() {
    let world = World::new();
    let effects = ActionEffects {
        remove_scene_objects: vec!["idol".into()],
        ..ActionEffects::default()
    };
    let result = ResolutionResult::success("?").with_effects(effects);

    let applier = EffectApplier::with_handlers(vec![Box::new(SceneObjectsHandler)]);
    let err = applier
        .apply(&world.state, &result, &HERO.into(), world.processor.config())
        .unwrap_err();
    assert!(matches!(err, EngineError::Inconsistent(_)));
}

#[test]
fn test_json_round_trip_after_play() {
    let mut world = World::new();
    world.act(pickup("backpack"));
    world.act(pickup("ring"));
    world.act(transfer("ring", "left-hand").with_slot("thumb"));
    world.act(look_at("mushroom"));
    world.act(go("north"));

    let json = serde_json::to_string(&world.state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, world.state);
    assert!(restored.world.visited_scenes.contains("library"));
    assert_eq!(restored.action_history.len(), 5);
}

#[test]
fn test_snapshot_round_trip_after_play() {
    let mut world = World::new();
    world.act(pickup("sword"));
    world.act(go("north"));

    let bytes = world.state.to_snapshot().unwrap();
    let restored = GameState::from_snapshot(&bytes).unwrap();
    assert_eq!(restored, world.state);

    // A restored state keeps playing.
    world.state = restored;
    let result = world.act(go("south"));
    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(world.state.current_scene_id.as_str(), "hall");
}
