//! `effects`

use crate::core::CharacterState;

use super::resolution::ResolutionResult;

pub(super) fn resolve(actor: &CharacterState) -> ResolutionResult {
    if actor.effects.is_empty() {
        return ResolutionResult::success("You are not under any effects.");
    }

    let mut lines = vec!["Active effects:".to_string()];
    for effect in &actor.effects {
        let name = if effect.name.is_empty() { effect.id.as_str() } else { &effect.name };
        let remaining = match effect.remaining {
            None => "permanent".to_string(),
            Some(1) => "1 turn left".to_string(),
            Some(n) => format!("{n} turns left"),
        };
        lines.push(format!("- {name} ({remaining})"));
    }
    ResolutionResult::success(lines.join("\n"))
}
