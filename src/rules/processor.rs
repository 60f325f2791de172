//! The turn processor.
//!
//! ## Turn Steps
//!
//! 1. Check the game is running and the scene context is current
//! 2. Look up the command for the intent
//! 3. Resolve the intent
//! 4. On entering a scene, merge proximity effects of its visible objects
//! 5. Run the effect pipeline (skipped for failed resolutions), then once
//!    more for each other character a proximity effect is aimed at
//! 6. Tick per-turn effects for every character
//! 7. Recompute stats for every character
//! 8. Append the stamped intent to the action history
//! 9. Append the narrative to the log under the current turn number
//! 10. Advance the turn counter
//!
//! A turn either commits as a whole, returning a new `GameState`, or fails
//! with an `EngineError`. The input state is borrowed and never modified.

use chrono::{DateTime, Utc};

use crate::commands::{CommandContext, CommandRegistry, ResolutionResult};
use crate::core::{
    ActionIntent, ActionRecord, CharacterState, EngineConfig, EngineError, EngineResult,
    GameState, LogEntry, SceneId,
};
use crate::effects::{tick_effects, ActionEffects, EffectApplier};
use crate::scene::{visible_objects, SceneContext};
use crate::stats::StatCalculator;

/// Source of the timestamps stamped on committed intents.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A committed turn.
#[derive(Clone, Debug)]
pub struct TurnOutput {
    /// State after the turn.
    pub state: GameState,

    /// The resolution, including any merged proximity effects.
    pub resolution: ResolutionResult,
}

/// Runs turns.
///
/// ## Example
///
/// ```
/// use taleforge::{ActionIntent, CharacterState, EngineConfig, GameState, SceneContext, StatBlock, TurnProcessor};
///
/// let config = EngineConfig::new("hero");
/// let mut state = GameState::new("hall");
/// state.spawn_character(
///     CharacterState::new("hero", "Hero", StatBlock::new().with("strength", 5)),
///     &config,
/// );
///
/// let processor = TurnProcessor::new(config);
/// let scene = SceneContext::new("hall", "A draughty hall.");
/// let output = processor
///     .process_turn(&state, ActionIntent::new("hero", "look"), &scene)
///     .unwrap();
///
/// assert_eq!(output.resolution.narrative, "A draughty hall.");
/// assert_eq!(output.state.world.turn, 2);
/// assert_eq!(state.world.turn, 1);
/// ```
pub struct TurnProcessor {
    config: EngineConfig,
    registry: CommandRegistry,
    applier: EffectApplier,
    clock: Clock,
}

impl TurnProcessor {
    /// Create a processor with every built-in command and the standard pipeline.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: CommandRegistry::standard(),
            applier: EffectApplier::new(),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the command registry.
    #[must_use]
    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the effect pipeline.
    #[must_use]
    pub fn with_applier(mut self, applier: EffectApplier) -> Self {
        self.applier = applier;
        self
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Context handed to command resolution.
    #[must_use]
    pub fn command_context(&self) -> CommandContext<'_> {
        CommandContext {
            config: &self.config,
            registry: &self.registry,
        }
    }

    /// Process one turn.
    pub fn process_turn(
        &self,
        state: &GameState,
        intent: ActionIntent,
        scene: &SceneContext,
    ) -> EngineResult<TurnOutput> {
        let result = self.run_turn(state, intent, scene);
        if let Err(err) = &result {
            tracing::warn!(%err, severity = err.severity().as_str(), "turn aborted");
        }
        result
    }

    fn run_turn(
        &self,
        state: &GameState,
        intent: ActionIntent,
        scene: &SceneContext,
    ) -> EngineResult<TurnOutput> {
        if state.world.game_over {
            return Err(EngineError::GameOver);
        }
        if scene.id != state.current_scene_id {
            return Err(EngineError::StaleSceneContext {
                context: scene.id.clone(),
                state: state.current_scene_id.clone(),
            });
        }
        let actor = state.require_character(&intent.actor_id)?;

        let command = self
            .registry
            .find_command(&intent)
            .ok_or_else(|| EngineError::UnknownCommand(intent.verb.clone()))?;
        tracing::debug!(command = command.id(), actor = %intent.actor_id, "resolving intent");

        let mut resolution = command.resolve(state, &intent, scene, &self.command_context());
        tracing::debug!(outcome = ?resolution.outcome, "resolved");

        let mut aimed_elsewhere = Vec::new();
        if !resolution.is_failure() {
            if let Some(destination) = resolution.destination().cloned() {
                aimed_elsewhere = self.merge_proximity(state, actor, &destination, &mut resolution);
            }
        }

        let pipeline = self
            .applier
            .apply(state, &resolution, &intent.actor_id, &self.config)?;
        let mut next = pipeline.state;
        let mut added_effects = pipeline.added_effects;
        let mut applied = pipeline.applied;

        for effects in aimed_elsewhere {
            let proximity = ResolutionResult::success(String::new()).with_effects(effects);
            let run = self
                .applier
                .apply(&next, &proximity, &intent.actor_id, &self.config)?;
            next = run.state;
            added_effects.extend(run.added_effects);
            applied.extend(run.applied);
        }

        let expired = tick_effects(&mut next, &added_effects);
        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "effects expired");
        }

        StatCalculator::new(&self.config).recompute_all(&mut next);

        let turn = next.world.turn;
        let actor_id = intent.actor_id.clone();
        next.action_history
            .push_back(ActionRecord::new(turn, intent, (self.clock)()));
        next.log.push_back(LogEntry {
            turn,
            actor: actor_id.clone(),
            outcome: resolution.outcome,
            narrative: resolution.narrative.clone(),
        });
        next.world.turn += 1;

        tracing::info!(
            turn,
            actor = %actor_id,
            command = command.id(),
            outcome = ?resolution.outcome,
            handlers = ?applied,
            "turn committed"
        );

        Ok(TurnOutput {
            state: next,
            resolution,
        })
    }

    /// Fold the proximity effects of every object the actor will notice in
    /// `destination` into the resolution.
    ///
    /// Only diffs aimed at the resolution's own target are folded in. The
    /// rest are grouped per target character and returned, to be applied in
    /// their own pipeline runs.
    fn merge_proximity(
        &self,
        state: &GameState,
        actor: &CharacterState,
        destination: &SceneId,
        resolution: &mut ResolutionResult,
    ) -> Vec<ActionEffects> {
        let perception = actor.stats.get(&self.config.perception_stat);
        let target = resolution
            .effects
            .as_ref()
            .and_then(|e| e.target_character_id.clone())
            .unwrap_or_else(|| actor.id.clone());

        let mut merged: Option<ActionEffects> = None;
        let mut elsewhere: Vec<ActionEffects> = Vec::new();
        for object in visible_objects(state, destination, perception) {
            let Some(proximity) = &object.proximity_effect else {
                continue;
            };
            let aimed_at = proximity.target_character_id.as_ref().unwrap_or(&actor.id);
            tracing::debug!(object = %object.id, scene = %destination, character = %aimed_at, "proximity effect");

            if *aimed_at == target {
                merged.get_or_insert_with(ActionEffects::default).merge(proximity);
                continue;
            }
            match elsewhere
                .iter()
                .position(|g| g.target_character_id.as_ref() == Some(aimed_at))
            {
                Some(i) => elsewhere[i].merge(proximity),
                None => elsewhere.push(proximity.clone().for_character(aimed_at.clone())),
            }
        }

        if let Some(proximity) = merged {
            resolution
                .effects
                .get_or_insert_with(ActionEffects::default)
                .merge(&proximity);
        }
        elsewhere
    }
}
