//! Engine errors.
//!
//! Only contract violations and structural inconsistencies are errors.
//! Anything a player can cause (wrong target, full container, too heavy)
//! is an `Outcome::Failure` resolution instead, and never reaches this type.

use thiserror::Error;

use super::ids::{CharacterId, EffectId, ObjectId, SceneId};

/// Severity level of an engine error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// A producing layer (parser, command `execute`, content) broke its
    /// contract with the engine.
    Contract,

    /// State disagreed with an earlier validation inside the same turn.
    /// The turn is aborted and the prior state stays authoritative.
    Inconsistency,

    /// The state cannot be used at all (e.g. a snapshot failed to decode).
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable label for this severity.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Inconsistency => "inconsistency",
            Self::Fatal => "fatal",
        }
    }
}

/// Error raised by the engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    #[error("scene context is stale: context is for {context}, state is in {state}")]
    StaleSceneContext { context: SceneId, state: SceneId },

    #[error("no command registered for '{0}'")]
    UnknownCommand(String),

    #[error("command '{command}' requires parameter '{parameter}'")]
    MissingParameter {
        command: &'static str,
        parameter: &'static str,
    },

    #[error("command '{command}' got an invalid value for '{parameter}'")]
    InvalidParameter {
        command: &'static str,
        parameter: &'static str,
    },

    #[error("{0} not found")]
    CharacterNotFound(CharacterId),

    #[error("{0} not found in object arena")]
    ObjectNotFound(ObjectId),

    #[error("container {0} vanished during the turn")]
    ContainerNotFound(ObjectId),

    #[error("{0} has no definition")]
    UnknownEffect(EffectId),

    #[error("inconsistent state: {0}")]
    Inconsistent(String),

    #[error("the game has ended")]
    GameOver,

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Create an inconsistency error.
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::Inconsistent(msg.into())
    }

    /// Classify this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Inconsistent(_) => ErrorSeverity::Inconsistency,
            Self::Snapshot(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Contract,
        }
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::MissingParameter {
            command: "pickup",
            parameter: "item",
        };
        assert_eq!(err.to_string(), "command 'pickup' requires parameter 'item'");

        let err = EngineError::StaleSceneContext {
            context: SceneId::new("a"),
            state: SceneId::new("b"),
        };
        assert!(err.to_string().contains("Scene(a)"));
    }

    #[test]
    fn test_severity() {
        assert_eq!(
            EngineError::inconsistent("x").severity(),
            ErrorSeverity::Inconsistency
        );
        assert_eq!(
            EngineError::UnknownCommand("dance".into()).severity(),
            ErrorSeverity::Contract
        );
        assert_eq!(EngineError::Snapshot("eof".into()).severity().as_str(), "fatal");
    }
}
