//! `pickup <item>`

use crate::core::{ActionIntent, CharacterState, EffectId, EngineResult, GameState};
use crate::effects::{ActionEffects, ItemGrant};
use crate::objects::{fuzzy_find, Containers};
use crate::scene::{visible_objects, SceneContext};

use super::params::{NormalizedCommandInput, ParameterContract, ParameterSpec};
use super::resolution::ResolutionResult;
use super::{perception_of, CommandContext};

pub(super) const CONTRACT: ParameterContract =
    &[ParameterSpec::required("item", "The object to pick up")];

pub(super) fn execute(intent: ActionIntent, input: &NormalizedCommandInput) -> EngineResult<ActionIntent> {
    Ok(intent.with_item(input.required_text("pickup", "item")?))
}

pub(super) fn resolve(
    state: &GameState,
    actor: &CharacterState,
    intent: &ActionIntent,
    scene: &SceneContext,
    ctx: &CommandContext<'_>,
) -> ResolutionResult {
    let Some(query) = intent.item_id.as_deref() else {
        return ResolutionResult::failure("Pick up what?");
    };

    let perception = perception_of(actor, ctx.config);
    let Some(item) = fuzzy_find(visible_objects(state, &scene.id, perception), query) else {
        return ResolutionResult::failure(format!("You don't see any {query} here."));
    };
    let name = item.display_name();

    if !item.removable {
        return ResolutionResult::failure(format!("The {name} cannot be picked up."));
    }

    let containers = Containers::new(&state.objects, ctx.config);
    let weight = containers.weight_of(item);
    let carried = containers.carried_weight(actor);
    let capacity = containers.carrying_capacity(actor);
    if carried + weight > capacity {
        tracing::debug!(item = %item.id, weight, carried, capacity, "pickup over capacity");
        return ResolutionResult::failure(format!(
            "The {name} is too heavy to carry. You can carry {capacity:.1} and already hold {carried:.1}."
        ));
    }

    let narrative = if item.is_container() {
        format!("You pick up the {name}.")
    } else {
        match containers.find_container(actor, item) {
            Some(holder) => format!("You pick up the {name} with your {}.", holder.display_name()),
            None => return ResolutionResult::failure("Your hands are full."),
        }
    };

    let carry_effects: Vec<EffectId> = containers
        .subtree(item)
        .into_iter()
        .flat_map(|o| o.carry_effects.iter().cloned())
        .collect();

    ResolutionResult::success(narrative).with_effects(ActionEffects {
        add_items: vec![ItemGrant::new(item.id.clone(), item.quantity)],
        remove_scene_objects: vec![item.id.clone()],
        add_effects: carry_effects,
        ..ActionEffects::default()
    })
}
