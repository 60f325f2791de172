//! Shared fixture for integration tests.
//!
//! Two scenes:
//! - `hall`: sword, dagger, boulder, backpack, pouch, mushroom, ring, a hidden gem.
//!   Exits north to `library` and through the `gate`, which ends the game.
//! - `library`: a cursed idol whose presence hurts on entry.

#![allow(dead_code)]

use taleforge::{
    ActionEffects, ActionIntent, CharacterState, Dimensions, EffectDefinition, EngineConfig,
    EngineResult, ExitDefinition, GameState, ObjectDefinition, ObjectId, ResolutionResult,
    SceneContext, SceneDefinition, Slot, StatBlock, TurnOutput, TurnProcessor,
};

pub const HERO: &str = "hero";

pub struct World {
    pub processor: TurnProcessor,
    pub state: GameState,
    pub scenes: Vec<SceneDefinition>,
}

impl World {
    pub fn new() -> Self {
        let config = EngineConfig::new(HERO);
        let mut state = GameState::new("hall");

        state.register_effect(
            EffectDefinition::new("poison", "Poison")
                .with_per_turn("health", -1)
                .with_duration(3),
        );
        state.register_effect(EffectDefinition::new("blessed", "Blessed").with_stat_modifier("strength", 1));

        state.place_in_scene("hall", ObjectDefinition::new("sword", "A short sword.").with_weight(2.0));
        state.place_in_scene("hall", ObjectDefinition::new("dagger", "A thin dagger.").with_weight(1.0));
        state.place_in_scene("hall", ObjectDefinition::new("boulder", "A huge boulder.").with_weight(100.0));
        state.place_in_scene(
            "hall",
            ObjectDefinition::container("backpack", "A leather backpack.")
                .with_weight(1.0)
                .with_max_items(3)
                .with_max_weight(30.0)
                .with_slot(Slot::new("strap")),
        );
        state.place_in_scene(
            "hall",
            ObjectDefinition::container("pouch", "A small pouch.")
                .with_weight(0.5)
                .with_max_items(2)
                .with_dimensions(Dimensions::new(10.0, 10.0, 10.0)),
        );
        state.place_in_scene(
            "hall",
            ObjectDefinition::new("mushroom", "A pale, spotted mushroom.")
                .with_view_effects(ActionEffects::new().with_added_effect("poison")),
        );
        state.place_in_scene(
            "hall",
            ObjectDefinition::new("ring", "A silver ring.")
                .with_weight(0.1)
                .with_stat_modifier("perception", 1),
        );
        state.place_in_scene(
            "hall",
            ObjectDefinition::new("gem", "A glittering gem.").with_perception(5),
        );
        state.place_in_scene(
            "library",
            ObjectDefinition::new("idol", "A cursed idol.")
                .fixed()
                .with_proximity_effect(ActionEffects::new().with_stat("health", -1)),
        );

        state.spawn_character(
            CharacterState::new(
                HERO,
                "Hero",
                StatBlock::new()
                    .with("strength", 5)
                    .with("perception", 2)
                    .with("health", 10),
            ),
            &config,
        );

        let scenes = vec![
            SceneDefinition::new("hall", "A draughty hall.")
                .with_exit(ExitDefinition::new("north", "library").with_name("Oak Door"))
                .with_exit(ExitDefinition::new("gate", "outside").ending()),
            SceneDefinition::new("library", "Dusty shelves.")
                .with_exit(ExitDefinition::new("south", "hall")),
        ];

        let processor = TurnProcessor::new(config)
            .with_clock(|| chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_000_000, 0).unwrap());

        Self {
            processor,
            state,
            scenes,
        }
    }

    /// Scene context for the current scene as the hero sees it.
    pub fn scene(&self) -> SceneContext {
        let definition = self
            .scenes
            .iter()
            .find(|s| s.id == self.state.current_scene_id)
            .expect("scene definition");
        SceneContext::project(&self.state, definition, self.hero(), self.processor.config())
    }

    pub fn try_act(&self, intent: ActionIntent) -> EngineResult<TurnOutput> {
        self.processor.process_turn(&self.state, intent, &self.scene())
    }

    /// Process a turn, commit it, and return the resolution.
    pub fn act(&mut self, intent: ActionIntent) -> ResolutionResult {
        let output = self.try_act(intent).expect("turn should commit");
        self.state = output.state;
        output.resolution
    }

    pub fn hero(&self) -> &CharacterState {
        self.state.character(&HERO.into()).expect("hero")
    }

    pub fn object(&self, id: &str) -> &ObjectDefinition {
        self.state.object(&ObjectId::new(id)).expect("object")
    }

    pub fn contents(&self, id: &str) -> Vec<&str> {
        self.object(id).contains.iter().map(|c| c.as_str()).collect()
    }

    pub fn in_scene(&self, scene: &str, id: &str) -> bool {
        self.state.is_in_scene(&scene.into(), &ObjectId::new(id))
    }
}

pub fn intent(verb: &str) -> ActionIntent {
    ActionIntent::new(HERO, verb)
}

pub fn pickup(item: &str) -> ActionIntent {
    intent("pickup").with_item(item)
}

pub fn drop(item: &str) -> ActionIntent {
    intent("drop").with_item(item)
}

pub fn transfer(item: &str, container: &str) -> ActionIntent {
    intent("transfer").with_item(item).with_target(container)
}

pub fn go(exit: &str) -> ActionIntent {
    intent("move").with_target(exit)
}

pub fn look_at(item: &str) -> ActionIntent {
    intent("look").with_item(item)
}
