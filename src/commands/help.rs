//! `help`

use super::resolution::ResolutionResult;
use super::CommandContext;

pub(super) fn resolve(ctx: &CommandContext<'_>) -> ResolutionResult {
    let mut lines = vec!["Commands:".to_string()];
    for command in ctx.registry.iter() {
        let mut usage = command.id().to_string();
        for param in command.parameter_contract() {
            if param.required {
                usage.push_str(&format!(" <{}>", param.name));
            } else {
                usage.push_str(&format!(" [{}]", param.name));
            }
        }
        lines.push(format!("- {usage}: {}", command.summary()));
    }
    ResolutionResult::success(lines.join("\n"))
}
