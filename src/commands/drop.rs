//! `drop <item>`

use rustc_hash::FxHashSet;

use crate::core::{ActionIntent, CharacterState, EffectId, EngineResult, GameState};
use crate::effects::{ActionEffects, ItemGrant};
use crate::objects::{fuzzy_find, Containers};

use super::params::{NormalizedCommandInput, ParameterContract, ParameterSpec};
use super::resolution::ResolutionResult;
use super::CommandContext;

pub(super) const CONTRACT: ParameterContract =
    &[ParameterSpec::required("item", "The carried object to drop")];

pub(super) fn execute(intent: ActionIntent, input: &NormalizedCommandInput) -> EngineResult<ActionIntent> {
    Ok(intent.with_item(input.required_text("drop", "item")?))
}

pub(super) fn resolve(
    state: &GameState,
    actor: &CharacterState,
    intent: &ActionIntent,
    ctx: &CommandContext<'_>,
) -> ResolutionResult {
    let Some(query) = intent.item_id.as_deref() else {
        return ResolutionResult::failure("Drop what?");
    };

    let containers = Containers::new(&state.objects, ctx.config);
    let Some(item) = fuzzy_find(containers.carried(actor), query) else {
        return ResolutionResult::failure(format!("You aren't carrying any {query}."));
    };
    let name = item.display_name();
    if !item.removable {
        return ResolutionResult::failure(format!("You can't drop the {name}."));
    }

    // Effects granted by the dropped subtree go with it, unless something
    // still carried grants them too.
    let dropped = containers.subtree(item);
    let still_granted: FxHashSet<&EffectId> = containers
        .carried(actor)
        .into_iter()
        .filter(|o| !dropped.iter().any(|d| d.id == o.id))
        .flat_map(|o| o.carry_effects.iter())
        .collect();
    let mut seen = FxHashSet::default();
    let carry_effects: Vec<EffectId> = dropped
        .iter()
        .flat_map(|o| o.carry_effects.iter())
        .filter(|e| !still_granted.contains(e) && seen.insert(*e))
        .cloned()
        .collect();

    ResolutionResult::success(format!("You drop the {name}.")).with_effects(ActionEffects {
        remove_items: vec![ItemGrant::new(item.id.clone(), item.quantity)],
        add_scene_objects: vec![item.id.clone()],
        remove_effects: carry_effects,
        ..ActionEffects::default()
    })
}
