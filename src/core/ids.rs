//! String identifiers for content and runtime entities.
//!
//! Content is authored with human-readable ids (`"sword"`, `"left-hand"`,
//! `"forest-path"`), so every id is a thin newtype over `String`. The
//! newtypes keep an object id from being passed where a scene id is
//! expected, and serialize transparently as plain strings.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of an object in the object arena.
    ObjectId,
    "Object"
);

string_id!(
    /// Identifier of a character (player or NPC).
    CharacterId,
    "Character"
);

string_id!(
    /// Identifier of a scene.
    SceneId,
    "Scene"
);

string_id!(
    /// Identifier of an effect definition.
    EffectId,
    "Effect"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", ObjectId::new("sword")), "Object(sword)");
        assert_eq!(format!("{}", SceneId::new("cave")), "Scene(cave)");
    }

    #[test]
    fn test_id_from_str() {
        let a: CharacterId = "hero".into();
        let b = CharacterId::new(String::from("hero"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hero");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = EffectId::new("poison");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"poison\"");

        let back: EffectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
