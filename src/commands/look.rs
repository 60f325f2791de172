//! `look [item]`

use crate::core::{ActionIntent, CharacterState, EngineResult, GameState};
use crate::effects::ActionEffects;
use crate::objects::{fuzzy_find, Containers, ObjectDefinition};
use crate::scene::SceneContext;

use super::params::{NormalizedCommandInput, ParameterContract, ParameterSpec};
use super::resolution::ResolutionResult;
use super::CommandContext;

pub(super) const CONTRACT: ParameterContract =
    &[ParameterSpec::optional("item", "Something in the scene or inventory to examine")];

pub(super) fn execute(intent: ActionIntent, input: &NormalizedCommandInput) -> EngineResult<ActionIntent> {
    Ok(match input.optional_text("look", "item")? {
        Some(item) => intent.with_item(item),
        None => intent,
    })
}

pub(super) fn resolve(
    state: &GameState,
    actor: &CharacterState,
    intent: &ActionIntent,
    scene: &SceneContext,
    ctx: &CommandContext<'_>,
) -> ResolutionResult {
    match intent.item_id.as_deref() {
        None => describe_scene(scene),
        Some(query) => examine(state, actor, scene, ctx, query),
    }
}

/// Scene narrative plus everything visible. Reads only the scene context.
fn describe_scene(scene: &SceneContext) -> ResolutionResult {
    let mut text = scene.narrative.clone();

    if !scene.objects.is_empty() {
        let names: Vec<_> = scene.objects.iter().map(|o| o.display_name()).collect();
        text.push_str(&format!("\n\nYou see: {}.", names.join(", ")));
    }
    if !scene.exits.is_empty() {
        let exits: Vec<_> = scene
            .exits
            .iter()
            .map(|e| {
                if e.name.is_empty() || e.name == e.id {
                    e.id.clone()
                } else {
                    format!("{} ({})", e.id, e.name)
                }
            })
            .collect();
        text.push_str(&format!("\nExits: {}.", exits.join(", ")));
    }
    if !scene.npcs.is_empty() {
        let npcs: Vec<_> = scene.npcs.iter().map(|n| n.name.as_str()).collect();
        text.push_str(&format!("\nPresent: {}.", npcs.join(", ")));
    }

    ResolutionResult::success(text).with_effects(ActionEffects {
        reprint_narrative: true,
        ..ActionEffects::default()
    })
}

fn examine(
    state: &GameState,
    actor: &CharacterState,
    scene: &SceneContext,
    ctx: &CommandContext<'_>,
    query: &str,
) -> ResolutionResult {
    let containers = Containers::new(&state.objects, ctx.config);
    let candidates: Vec<&ObjectDefinition> = scene
        .objects
        .iter()
        .map(|o| state.object(&o.id).unwrap_or(o))
        .chain(containers.carried(actor))
        .collect();

    let Some(object) = fuzzy_find(candidates, query) else {
        return ResolutionResult::failure(format!("You don't see any {query} here."));
    };

    let mut text = if object.description.is_empty() {
        format!("You see nothing special about the {}.", object.display_name())
    } else {
        object.description.clone()
    };
    if object.is_container() {
        let held: Vec<_> = object
            .children()
            .filter_map(|id| containers.get(id))
            .map(|o| o.display_name())
            .collect();
        if held.is_empty() {
            text.push_str(" It is empty.");
        } else {
            text.push_str(&format!(" It holds: {}.", held.join(", ")));
        }
    }

    let result = ResolutionResult::success(text);
    match &object.view_effects {
        Some(effects) => result.with_effects(effects.clone()),
        None => result,
    }
}
