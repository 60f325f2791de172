//! Command parameters.
//!
//! The parsing layer (pattern matcher or classifier) turns raw player text
//! into a `NormalizedCommandInput`: a command id plus named parameters.
//! Each command publishes a `ParameterContract` describing what it expects,
//! and re-validates it in `execute`.
//!
//! ## ParamValue Types
//!
//! - `Text`: object, exit and container references
//! - `Int`: counts
//! - `Bool`: switches
//! - `TextList`: multi-word or multi-object references

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// A parameter value produced by the parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Text(String),
    TextList(Vec<String>),
}

impl ParamValue {
    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as list if this is a TextList value.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

/// Kind of value a parameter takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Int,
    Bool,
}

/// One parameter in a command's contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParameterSpec {
    /// A required text parameter.
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Text,
            required: true,
            description,
        }
    }

    /// An optional text parameter.
    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Text,
            required: false,
            description,
        }
    }
}

/// The parameters a command expects.
pub type ParameterContract = &'static [ParameterSpec];

/// Parser output handed to `Command::execute`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCommandInput {
    pub command_id: String,

    #[serde(default)]
    pub parameters: FxHashMap<String, ParamValue>,

    /// Raw player text, kept for the action history.
    #[serde(default)]
    pub original_input: Option<String>,
}

impl NormalizedCommandInput {
    /// Create an input with no parameters.
    pub fn new(command_id: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            parameters: FxHashMap::default(),
            original_input: None,
        }
    }

    /// Add a parameter (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_original_input(mut self, input: impl Into<String>) -> Self {
        self.original_input = Some(input.into());
        self
    }

    /// Read an optional text parameter.
    ///
    /// Present-but-wrong-type and blank values are contract violations.
    pub fn optional_text(&self, command: &'static str, parameter: &'static str) -> EngineResult<Option<String>> {
        match self.parameters.get(parameter) {
            None => Ok(None),
            Some(value) => match value.as_text().map(str::trim) {
                Some(text) if !text.is_empty() => Ok(Some(text.to_string())),
                _ => Err(EngineError::InvalidParameter { command, parameter }),
            },
        }
    }

    /// Read a required text parameter.
    pub fn required_text(&self, command: &'static str, parameter: &'static str) -> EngineResult<String> {
        self.optional_text(command, parameter)?
            .ok_or(EngineError::MissingParameter { command, parameter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        let input = NormalizedCommandInput::new("pickup").with("item", "sword");
        assert_eq!(input.required_text("pickup", "item").unwrap(), "sword");
        assert_eq!(
            input.required_text("pickup", "target"),
            Err(EngineError::MissingParameter { command: "pickup", parameter: "target" })
        );
    }

    #[test]
    fn test_wrong_type_and_blank_are_invalid() {
        let input = NormalizedCommandInput::new("pickup").with("item", 3_i64).with("target", "  ");
        assert!(matches!(
            input.optional_text("pickup", "item"),
            Err(EngineError::InvalidParameter { .. })
        ));
        assert!(matches!(
            input.optional_text("pickup", "target"),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_untagged_deserialize() {
        let input: NormalizedCommandInput = serde_json::from_str(
            r#"{"command_id": "transfer", "parameters": {"item": "sword", "count": 2, "quiet": true}}"#,
        )
        .unwrap();
        assert_eq!(input.parameters["item"].as_text(), Some("sword"));
        assert_eq!(input.parameters["count"].as_int(), Some(2));
        assert_eq!(input.parameters["quiet"].as_bool(), Some(true));
    }
}
