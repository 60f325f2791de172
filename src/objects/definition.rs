//! Object definitions - the things a world is made of.
//!
//! Objects live in the `GameState` object arena keyed by `ObjectId`.
//! Containers never embed their children; `contains` and slot occupants
//! are id references into the same arena, so a sword has exactly one
//! definition no matter whether it lies in a scene, sits in a hand, or
//! is strapped into a backpack slot.

use im::OrdSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EffectId, ObjectId};
use crate::effects::ActionEffects;

/// Trait marking an object as a container.
pub const CONTAINER_TRAIT: &str = "container";

/// Physical size of an object or the interior size of a container.
///
/// Fit checks treat each axis independently and additively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    /// Create dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }

    /// Axis-wise sum.
    #[must_use]
    pub fn plus(self, other: Dimensions) -> Dimensions {
        Dimensions {
            width: self.width + other.width,
            height: self.height + other.height,
            depth: self.depth + other.depth,
        }
    }

    /// True if every axis of `self` is within `limit`.
    #[must_use]
    pub fn fits_within(self, limit: Dimensions) -> bool {
        self.width <= limit.width && self.height <= limit.height && self.depth <= limit.depth
    }
}

/// A named, single-occupant capacity point inside a container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot name, unique within its container (`"ring"`, `"strap"`).
    pub id: String,

    /// The object currently held in this slot.
    #[serde(default)]
    pub occupant: Option<ObjectId>,

    /// Maximum weight the slot accepts. `None` for unlimited.
    #[serde(default)]
    pub max_weight: Option<f64>,

    /// Maximum size the slot accepts. `None` for unlimited.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

impl Slot {
    /// Create an empty, unbounded slot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            occupant: None,
            max_weight: None,
            dimensions: None,
        }
    }

    /// Set the weight limit (builder pattern).
    #[must_use]
    pub fn with_max_weight(mut self, max: f64) -> Self {
        self.max_weight = Some(max);
        self
    }

    /// Set the size limit (builder pattern).
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Check if the slot is free.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Static and dynamic data for one object.
///
/// ## Example
///
/// ```
/// use taleforge::objects::{ObjectDefinition, Slot};
///
/// let pack = ObjectDefinition::container("backpack", "A leather backpack.")
///     .with_weight(1.0)
///     .with_max_items(3)
///     .with_slot(Slot::new("strap"));
///
/// assert!(pack.is_container());
/// assert_eq!(pack.max_items, Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub id: ObjectId,

    /// Display name. Falls back to the id when empty.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Weight of a single unit.
    #[serde(default)]
    pub weight: f64,

    /// Minimum perception needed to notice this object.
    #[serde(default)]
    pub perception: i64,

    #[serde(default = "default_removable")]
    pub removable: bool,

    #[serde(default)]
    pub traits: OrdSet<String>,

    /// Added to the carrier's stats while carried.
    #[serde(default)]
    pub stat_modifiers: FxHashMap<String, i64>,

    /// Character effects granted while carried.
    #[serde(default)]
    pub carry_effects: Vec<EffectId>,

    /// Applied when the object is examined.
    #[serde(default)]
    pub view_effects: Option<ActionEffects>,

    /// Applied when the object is visible on entering its scene.
    #[serde(default)]
    pub proximity_effect: Option<ActionEffects>,

    /// General storage, in arrival order.
    #[serde(default)]
    pub contains: Vec<ObjectId>,

    #[serde(default)]
    pub slots: SmallVec<[Slot; 5]>,

    #[serde(default)]
    pub max_weight: Option<f64>,

    #[serde(default)]
    pub max_items: Option<usize>,

    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

fn default_quantity() -> u32 {
    1
}

fn default_removable() -> bool {
    true
}

impl ObjectDefinition {
    /// Create a plain, removable object.
    pub fn new(id: impl Into<ObjectId>, description: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_string(),
            id,
            description: description.into(),
            quantity: 1,
            weight: 0.0,
            perception: 0,
            removable: true,
            traits: OrdSet::new(),
            stat_modifiers: FxHashMap::default(),
            carry_effects: Vec::new(),
            view_effects: None,
            proximity_effect: None,
            contains: Vec::new(),
            slots: SmallVec::new(),
            max_weight: None,
            max_items: None,
            dimensions: None,
        }
    }

    /// Create an object carrying the container trait.
    pub fn container(id: impl Into<ObjectId>, description: impl Into<String>) -> Self {
        Self::new(id, description).with_trait(CONTAINER_TRAIT)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_perception(mut self, threshold: i64) -> Self {
        self.perception = threshold;
        self
    }

    /// Mark as fixed in place.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.removable = false;
        self
    }

    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_stat_modifier(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.stat_modifiers.insert(stat.into(), delta);
        self
    }

    #[must_use]
    pub fn with_carry_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.carry_effects.push(effect.into());
        self
    }

    #[must_use]
    pub fn with_view_effects(mut self, effects: ActionEffects) -> Self {
        self.view_effects = Some(effects);
        self
    }

    #[must_use]
    pub fn with_proximity_effect(mut self, effects: ActionEffects) -> Self {
        self.proximity_effect = Some(effects);
        self
    }

    /// Place a child id in general storage. The child must also be in the arena.
    #[must_use]
    pub fn holding(mut self, child: impl Into<ObjectId>) -> Self {
        self.contains.push(child.into());
        self
    }

    #[must_use]
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    #[must_use]
    pub fn with_max_weight(mut self, max: f64) -> Self {
        self.max_weight = Some(max);
        self
    }

    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Check for the container trait.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.traits.contains(CONTAINER_TRAIT)
    }

    /// Check for a trait.
    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    /// Name used in narration.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Weight of this object alone (unit weight * quantity), ignoring contents.
    #[must_use]
    pub fn own_weight(&self) -> f64 {
        self.weight * f64::from(self.quantity)
    }

    /// Get a slot by name.
    #[must_use]
    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    /// Get a mutable slot by name.
    pub fn slot_mut(&mut self, slot_id: &str) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.id == slot_id)
    }

    /// Ids directly held by this object: general storage, then slot occupants.
    pub fn children(&self) -> impl Iterator<Item = &ObjectId> {
        self.contains
            .iter()
            .chain(self.slots.iter().filter_map(|s| s.occupant.as_ref()))
    }

    /// Detach a direct child from general storage or a slot.
    ///
    /// Returns true if the child was found.
    pub fn detach(&mut self, child: &ObjectId) -> bool {
        if let Some(pos) = self.contains.iter().position(|c| c == child) {
            self.contains.remove(pos);
            return true;
        }
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.occupant.as_ref() == Some(child))
        {
            slot.occupant = None;
            return true;
        }
        false
    }
}
