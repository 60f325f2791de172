//! `stats`

use im::OrdSet;

use crate::core::{CharacterState, GameState};
use crate::objects::Containers;

use super::resolution::ResolutionResult;
use super::CommandContext;

pub(super) fn resolve(state: &GameState, actor: &CharacterState, ctx: &CommandContext<'_>) -> ResolutionResult {
    let keys: OrdSet<&String> = actor
        .stats
        .iter()
        .chain(actor.base_stats.iter())
        .map(|(k, _)| k)
        .collect();

    let mut lines = vec![format!("{}:", actor.name)];
    for key in keys {
        let current = actor.stats.get(key);
        let base = actor.base_stats.get(key);
        if current == base {
            lines.push(format!("- {key}: {current}"));
        } else {
            lines.push(format!("- {key}: {current} (base {base})"));
        }
    }

    let containers = Containers::new(&state.objects, ctx.config);
    lines.push(format!(
        "Carrying {:.1} of {:.1}.",
        containers.carried_weight(actor),
        containers.carrying_capacity(actor)
    ));
    ResolutionResult::success(lines.join("\n"))
}
