//! `items`

use rustc_hash::FxHashSet;

use crate::core::{CharacterState, GameState, ObjectId};
use crate::effects::ActionEffects;
use crate::objects::Containers;

use super::resolution::ResolutionResult;
use super::CommandContext;

pub(super) fn resolve(state: &GameState, actor: &CharacterState, ctx: &CommandContext<'_>) -> ResolutionResult {
    let containers = Containers::new(&state.objects, ctx.config);

    let mut lines = vec![format!(
        "You are carrying {:.1} of {:.1}:",
        containers.carried_weight(actor),
        containers.carrying_capacity(actor)
    )];
    let mut visited = FxHashSet::default();
    for entry in &actor.inventory {
        render(&containers, &entry.id, 0, &mut lines, &mut visited);
    }

    ResolutionResult::success(lines.join("\n")).with_effects(ActionEffects {
        list_inventory: true,
        ..ActionEffects::default()
    })
}

fn render(
    containers: &Containers<'_>,
    id: &ObjectId,
    depth: usize,
    lines: &mut Vec<String>,
    visited: &mut FxHashSet<ObjectId>,
) {
    if !visited.insert(id.clone()) {
        return;
    }
    let Some(object) = containers.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    let mut line = format!("{indent}- {}", object.display_name());
    if object.quantity > 1 {
        line.push_str(&format!(" x{}", object.quantity));
    }
    line.push_str(&format!(" ({:.1})", containers.weight_of(object)));
    if let Some(max) = object.max_items {
        line.push_str(&format!(" [{}/{} items]", object.contains.len(), max));
    }
    lines.push(line);

    for child in &object.contains {
        render(containers, child, depth + 1, lines, visited);
    }
    for slot in &object.slots {
        if let Some(occupant) = &slot.occupant {
            let name = containers.get(occupant).map_or(occupant.as_str(), |o| o.display_name());
            lines.push(format!("{indent}  [{}: {}]", slot.id, name));
            visited.insert(occupant.clone());
        }
    }
}
