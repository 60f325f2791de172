//! Commands: one variant per verb.
//!
//! Every verb exposes the same contract:
//!
//! - `id`: the verb, also the `ActionIntent::verb` it handles
//! - `parameter_contract`: what the parsing layer must extract
//! - `execute`: parser output to `ActionIntent`, failing loudly on a broken contract
//! - `resolve`: intent to `ResolutionResult`, never failing; player mistakes
//!   come back as `Outcome::Failure` with narrative
//!
//! Dispatch is a closed enum, so a verb without a `resolve` arm does not compile.

mod params;
mod resolution;
mod registry;

mod look;
mod items;
mod pickup;
mod drop;
mod movement;
mod transfer;
mod help;
mod effect_list;
mod stat_sheet;

pub use params::{NormalizedCommandInput, ParamKind, ParamValue, ParameterContract, ParameterSpec};
pub use resolution::{NextScene, Outcome, ResolutionResult};
pub use registry::CommandRegistry;

use crate::core::{ActionIntent, CharacterId, CharacterState, EngineConfig, EngineResult, GameState};
use crate::scene::SceneContext;

/// Everything a resolution may consult besides state, intent and scene.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub config: &'a EngineConfig,
    pub registry: &'a CommandRegistry,
}

/// A verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Look,
    Items,
    Pickup,
    Drop,
    Move,
    Transfer,
    Help,
    Effects,
    Stats,
}

impl Command {
    /// Every verb, in help order.
    pub const ALL: [Command; 9] = [
        Command::Look,
        Command::Items,
        Command::Pickup,
        Command::Drop,
        Command::Move,
        Command::Transfer,
        Command::Effects,
        Command::Stats,
        Command::Help,
    ];

    /// The verb this command handles.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Command::Look => "look",
            Command::Items => "items",
            Command::Pickup => "pickup",
            Command::Drop => "drop",
            Command::Move => "move",
            Command::Transfer => "transfer",
            Command::Help => "help",
            Command::Effects => "effects",
            Command::Stats => "stats",
        }
    }

    /// Look up a verb by id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// One-line description for `help`.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Command::Look => "Look around, or examine something.",
            Command::Items => "List what you are carrying.",
            Command::Pickup => "Pick something up.",
            Command::Drop => "Drop something you are carrying.",
            Command::Move => "Go through an exit.",
            Command::Transfer => "Put something you carry into a container.",
            Command::Help => "List the available commands.",
            Command::Effects => "List the effects you are under.",
            Command::Stats => "Show your stats.",
        }
    }

    /// Parameters the parsing layer must supply.
    #[must_use]
    pub fn parameter_contract(self) -> ParameterContract {
        match self {
            Command::Look => look::CONTRACT,
            Command::Pickup => pickup::CONTRACT,
            Command::Drop => drop::CONTRACT,
            Command::Move => movement::CONTRACT,
            Command::Transfer => transfer::CONTRACT,
            Command::Items | Command::Help | Command::Effects | Command::Stats => &[],
        }
    }

    /// Check if this command handles an intent.
    #[must_use]
    pub fn matches_intent(self, intent: &ActionIntent) -> bool {
        intent.verb == self.id()
    }

    /// Turn parser output into an intent.
    ///
    /// Returns `MissingParameter`/`InvalidParameter` if the input breaks
    /// this command's contract.
    pub fn execute(
        self,
        actor: &CharacterId,
        input: &NormalizedCommandInput,
        scene: &SceneContext,
    ) -> EngineResult<ActionIntent> {
        let intent = ActionIntent::new(actor.clone(), self.id()).in_scene(scene.id.clone());
        let intent = match &input.original_input {
            Some(text) => intent.with_original_input(text.clone()),
            None => intent,
        };
        match self {
            Command::Look => look::execute(intent, input),
            Command::Pickup => pickup::execute(intent, input),
            Command::Drop => drop::execute(intent, input),
            Command::Move => movement::execute(intent, input),
            Command::Transfer => transfer::execute(intent, input),
            Command::Items | Command::Help | Command::Effects | Command::Stats => Ok(intent),
        }
    }

    /// Resolve an intent against the current state.
    #[must_use]
    pub fn resolve(
        self,
        state: &GameState,
        intent: &ActionIntent,
        scene: &SceneContext,
        ctx: &CommandContext<'_>,
    ) -> ResolutionResult {
        let Some(actor) = state.character(&intent.actor_id) else {
            return ResolutionResult::failure("There is nobody here to do that.");
        };
        match self {
            Command::Look => look::resolve(state, actor, intent, scene, ctx),
            Command::Items => items::resolve(state, actor, ctx),
            Command::Pickup => pickup::resolve(state, actor, intent, scene, ctx),
            Command::Drop => drop::resolve(state, actor, intent, ctx),
            Command::Move => movement::resolve(actor, intent, scene, ctx),
            Command::Transfer => transfer::resolve(state, actor, intent, ctx),
            Command::Help => help::resolve(ctx),
            Command::Effects => effect_list::resolve(actor),
            Command::Stats => stat_sheet::resolve(state, actor, ctx),
        }
    }
}

/// The actor's current perception.
fn perception_of(actor: &CharacterState, config: &EngineConfig) -> i64 {
    actor.stats.get(&config.perception_stat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_id(command.id()), Some(command));
        }
        assert_eq!(Command::from_id("dance"), None);
    }

    #[test]
    fn test_matches_intent() {
        let intent = ActionIntent::new("hero", "pickup");
        assert!(Command::Pickup.matches_intent(&intent));
        assert!(!Command::Drop.matches_intent(&intent));
    }

    #[test]
    fn test_execute_fills_intent() {
        let scene = SceneContext::new("hall", "");
        let input = NormalizedCommandInput::new("transfer")
            .with("item", "sword")
            .with("container", "backpack")
            .with("slot", "strap")
            .with_original_input("put sword in backpack strap");

        let intent = Command::Transfer.execute(&"hero".into(), &input, &scene).unwrap();
        assert_eq!(intent.verb, "transfer");
        assert_eq!(intent.scene_id, Some("hall".into()));
        assert_eq!(intent.item_id.as_deref(), Some("sword"));
        assert_eq!(intent.target_id.as_deref(), Some("backpack"));
        assert_eq!(intent.slot_id.as_deref(), Some("strap"));
        assert_eq!(intent.original_input.as_deref(), Some("put sword in backpack strap"));
    }

    #[test]
    fn test_execute_missing_parameter() {
        let scene = SceneContext::new("hall", "");
        let err = Command::Move
            .execute(&"hero".into(), &NormalizedCommandInput::new("move"), &scene)
            .unwrap_err();
        assert_eq!(
            err,
            crate::core::EngineError::MissingParameter { command: "move", parameter: "exit" }
        );
    }

    #[test]
    fn test_contracts() {
        assert!(Command::Help.parameter_contract().is_empty());
        let transfer = Command::Transfer.parameter_contract();
        assert_eq!(transfer.len(), 3);
        assert!(transfer.iter().filter(|p| p.required).count() == 2);
    }
}
