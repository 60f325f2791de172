//! Command registry.
//!
//! Built explicitly and handed to the turn processor; there is no global
//! registry. Lookup is a linear scan, which is fine for a handful of verbs.

use crate::core::{ActionIntent, CharacterId, EngineError, EngineResult};
use crate::scene::SceneContext;

use super::params::NormalizedCommandInput;
use super::Command;

/// Registry of available commands, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in verb.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for command in Command::ALL {
            registry.register(command);
        }
        registry
    }

    /// Register a command. Returns false if it was already registered.
    pub fn register(&mut self, command: Command) -> bool {
        if self.contains(command.id()) {
            return false;
        }
        self.commands.push(command);
        true
    }

    /// Get a command by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Command> {
        self.commands.iter().copied().find(|c| c.id() == id)
    }

    /// Check if a command id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Find the command that handles an intent.
    ///
    /// Matches on the verb first, then on `choice_id`.
    #[must_use]
    pub fn find_command(&self, intent: &ActionIntent) -> Option<Command> {
        self.commands
            .iter()
            .copied()
            .find(|c| c.matches_intent(intent))
            .or_else(|| intent.choice_id.as_deref().and_then(|id| self.get(id)))
    }

    /// Look up `input.command_id` and build its intent.
    pub fn execute(
        &self,
        actor: &CharacterId,
        input: &NormalizedCommandInput,
        scene: &SceneContext,
    ) -> EngineResult<ActionIntent> {
        let command = self
            .get(&input.command_id)
            .ok_or_else(|| EngineError::UnknownCommand(input.command_id.clone()))?;
        command.execute(actor, input, scene)
    }

    /// Iterate over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.commands.iter().copied()
    }

    /// Get the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = CommandRegistry::standard();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.get("look"), Some(Command::Look));
        assert!(registry.contains("transfer"));
        assert!(!registry.contains("dance"));
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register(Command::Look));
        assert!(!registry.register(Command::Look));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_find_command() {
        let registry = CommandRegistry::standard();
        assert_eq!(
            registry.find_command(&ActionIntent::new("hero", "drop")),
            Some(Command::Drop)
        );
        assert_eq!(
            registry.find_command(&ActionIntent::new("hero", "choose").with_choice("help")),
            Some(Command::Help)
        );
        assert_eq!(registry.find_command(&ActionIntent::new("hero", "dance")), None);
    }

    #[test]
    fn test_subset_registry() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::Look);
        assert_eq!(registry.find_command(&ActionIntent::new("hero", "pickup")), None);
    }

    #[test]
    fn test_execute_unknown() {
        let registry = CommandRegistry::standard();
        let scene = SceneContext::new("hall", "");
        let err = registry
            .execute(&"hero".into(), &NormalizedCommandInput::new("dance"), &scene)
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownCommand("dance".into()));
    }
}
