//! `transfer <item> <container> [slot]`

use crate::core::{ActionIntent, CharacterState, EngineResult, GameState};
use crate::effects::{ActionEffects, TransferSpec};
use crate::objects::{fuzzy_find, Containers, Holder};

use super::params::{NormalizedCommandInput, ParameterContract, ParameterSpec};
use super::resolution::ResolutionResult;
use super::CommandContext;

pub(super) const CONTRACT: ParameterContract = &[
    ParameterSpec::required("item", "The carried object to move"),
    ParameterSpec::required("container", "The carried container to put it in"),
    ParameterSpec::optional("slot", "A named slot of the container"),
];

pub(super) fn execute(intent: ActionIntent, input: &NormalizedCommandInput) -> EngineResult<ActionIntent> {
    let intent = intent
        .with_item(input.required_text("transfer", "item")?)
        .with_target(input.required_text("transfer", "container")?);
    Ok(match input.optional_text("transfer", "slot")? {
        Some(slot) => intent.with_slot(slot),
        None => intent,
    })
}

pub(super) fn resolve(
    state: &GameState,
    actor: &CharacterState,
    intent: &ActionIntent,
    ctx: &CommandContext<'_>,
) -> ResolutionResult {
    let (Some(item_query), Some(target_query)) = (intent.item_id.as_deref(), intent.target_id.as_deref()) else {
        return ResolutionResult::failure("Put what where?");
    };

    let containers = Containers::new(&state.objects, ctx.config);
    let Some(item) = fuzzy_find(containers.carried(actor), item_query) else {
        return ResolutionResult::failure(format!("You aren't carrying any {item_query}."));
    };
    if !item.removable {
        return ResolutionResult::failure(format!("You can't move the {}.", item.display_name()));
    }
    let Some(destination) = containers.find_container_fuzzy(actor, target_query) else {
        return ResolutionResult::failure(format!("You don't have a {target_query} to put it in."));
    };

    let slot = intent.slot_id.as_deref();
    let plan = match containers.plan_transfer(actor, item, destination, slot) {
        Ok(plan) => plan,
        Err(err) => return ResolutionResult::failure(err.to_string()),
    };
    let from_container_id = match plan.from {
        Holder::Container { container, .. } => Some(container),
        Holder::TopLevel => None,
    };

    let narrative = match slot {
        Some(slot) => format!(
            "You put the {} in the {slot} slot of the {}.",
            item.display_name(),
            destination.display_name()
        ),
        None => format!("You put the {} in the {}.", item.display_name(), destination.display_name()),
    };

    ResolutionResult::success(narrative).with_effects(ActionEffects::new().with_transfer(TransferSpec {
        item_id: item.id.clone(),
        from_container_id,
        to_container_id: destination.id.clone(),
        slot_id: slot.map(str::to_string),
    }))
}
