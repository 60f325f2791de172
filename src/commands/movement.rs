//! `move <exit>`

use crate::core::{ActionIntent, CharacterState, EngineResult};
use crate::scene::{is_visible, SceneContext};

use super::params::{NormalizedCommandInput, ParameterContract, ParameterSpec};
use super::resolution::{NextScene, ResolutionResult};
use super::{perception_of, CommandContext};

pub(super) const CONTRACT: ParameterContract =
    &[ParameterSpec::required("exit", "Exit id, direction or name")];

pub(super) fn execute(intent: ActionIntent, input: &NormalizedCommandInput) -> EngineResult<ActionIntent> {
    Ok(intent.with_target(input.required_text("move", "exit")?))
}

pub(super) fn resolve(
    actor: &CharacterState,
    intent: &ActionIntent,
    scene: &SceneContext,
    ctx: &CommandContext<'_>,
) -> ResolutionResult {
    let Some(query) = intent.target_id.as_deref() else {
        return ResolutionResult::failure("Go where?");
    };

    let exit = scene
        .find_exit(query)
        .filter(|e| is_visible(e.perception, perception_of(actor, ctx.config)));
    let Some(exit) = exit else {
        return ResolutionResult::failure("You can't go that way.");
    };

    let name = if exit.name.is_empty() { &exit.id } else { &exit.name };
    let next = if exit.ends_game {
        NextScene::GameEnd
    } else {
        NextScene::Scene(exit.target.clone())
    };
    ResolutionResult::success(format!("You go {name}.")).with_next_scene(next)
}
