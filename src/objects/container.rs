//! Container and inventory model.
//!
//! `Containers` is a read-only view over the object arena that answers
//! every capacity question the commands and effect handlers ask:
//!
//! - recursive weight (general storage and slot occupants)
//! - general-storage fit (`max_items`, `max_weight`, additive dimensions)
//! - slot fit (one occupant, the slot's own weight and size limits)
//! - auto-routing of picked-up items into the first container with room
//! - fuzzy container resolution over everything a character carries
//! - reachability ("is X somewhere inside Y"), used as the self-nesting guard
//! - effective strength and carrying capacity
//!
//! Rejections are returned as `FitError`, whose messages are player-facing.

use im::HashMap as ImHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use super::definition::{Dimensions, ObjectDefinition};
use super::lookup::fuzzy_find;
use crate::core::{CharacterState, EngineConfig, ObjectId};

/// Why an object does not fit.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FitError {
    #[error("The {0} is not a container.")]
    NotAContainer(String),

    #[error("The {0} is full.")]
    TooManyItems(String),

    #[error("The {0} cannot hold that much weight.")]
    TooHeavy(String),

    #[error("That will not fit in the {0}.")]
    TooLarge(String),

    #[error("The {container} has no {slot} slot.")]
    NoSuchSlot { container: String, slot: String },

    #[error("The {slot} slot of the {container} is already in use.")]
    SlotOccupied { container: String, slot: String },

    #[error("You cannot put something inside itself.")]
    SelfNesting,

    #[error("You aren't carrying the {0}.")]
    NotCarried(String),

    #[error("The {0} is already there.")]
    AlreadyThere(String),
}

/// Where a carried object currently sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Holder {
    /// Directly in the character's inventory list.
    TopLevel,

    /// Inside a container, in general storage (`slot: None`) or a named slot.
    Container {
        container: ObjectId,
        slot: Option<String>,
    },
}

/// A validated transfer: the arena as it looks once the item has moved.
#[derive(Clone, Debug)]
pub struct TransferPlan {
    /// Arena after the move. Commit it to apply the transfer.
    pub objects: ImHashMap<ObjectId, ObjectDefinition>,

    /// Where the item was before the move.
    pub from: Holder,
}

/// Read-only container queries over an object arena.
#[derive(Clone, Copy)]
pub struct Containers<'a> {
    objects: &'a ImHashMap<ObjectId, ObjectDefinition>,
    config: &'a EngineConfig,
}

impl<'a> Containers<'a> {
    /// Create a view over `objects`.
    pub fn new(objects: &'a ImHashMap<ObjectId, ObjectDefinition>, config: &'a EngineConfig) -> Self {
        Self { objects, config }
    }

    /// Resolve an id through the arena.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&'a ObjectDefinition> {
        self.objects.get(id)
    }

    // === Weight ===

    /// Total weight of an object: its own units plus everything inside it.
    #[must_use]
    pub fn weight_of(&self, object: &ObjectDefinition) -> f64 {
        let mut visited = FxHashSet::default();
        self.weight_inner(object, &mut visited)
    }

    fn weight_inner(&self, object: &ObjectDefinition, visited: &mut FxHashSet<ObjectId>) -> f64 {
        if !visited.insert(object.id.clone()) {
            tracing::warn!(object = %object.id, "cycle in object tree while weighing");
            return 0.0;
        }
        let mut total = object.own_weight();
        for child in object.children() {
            if let Some(child) = self.objects.get(child) {
                total += self.weight_inner(child, visited);
            }
        }
        total
    }

    /// Weight of an id, zero if it is not in the arena.
    #[must_use]
    pub fn weight_of_id(&self, id: &ObjectId) -> f64 {
        self.get(id).map_or(0.0, |o| self.weight_of(o))
    }

    /// Combined weight of everything in a container's general storage.
    #[must_use]
    pub fn storage_weight(&self, container: &ObjectDefinition) -> f64 {
        container.contains.iter().map(|id| self.weight_of_id(id)).sum()
    }

    /// Combined weight of a container's slot occupants.
    #[must_use]
    pub fn slot_weight(&self, container: &ObjectDefinition) -> f64 {
        container
            .slots
            .iter()
            .filter_map(|s| s.occupant.as_ref())
            .map(|id| self.weight_of_id(id))
            .sum()
    }

    // === Fit ===

    /// Check whether `item` fits in the general storage of `container`.
    ///
    /// Dimensions are summed per axis across existing items plus the new
    /// item and compared with the container's own dimensions.
    pub fn can_fit(&self, item: &ObjectDefinition, container: &ObjectDefinition) -> Result<(), FitError> {
        let name = container.display_name().to_string();
        if !container.is_container() {
            return Err(FitError::NotAContainer(name));
        }

        if let Some(max_items) = container.max_items {
            if container.contains.len() >= max_items {
                tracing::trace!(container = %container.id, max_items, "rejected: item count");
                return Err(FitError::TooManyItems(name));
            }
        }

        if let Some(max_weight) = container.max_weight {
            let total = self.storage_weight(container) + self.weight_of(item) + self.slot_weight(container);
            if total > max_weight {
                tracing::trace!(container = %container.id, total, max_weight, "rejected: weight");
                return Err(FitError::TooHeavy(name));
            }
        }

        if let (Some(limit), Some(size)) = (container.dimensions, item.dimensions) {
            let used = container
                .contains
                .iter()
                .filter_map(|id| self.get(id))
                .filter_map(|o| o.dimensions)
                .fold(Dimensions::default(), Dimensions::plus);
            if !used.plus(size).fits_within(limit) {
                tracing::trace!(container = %container.id, "rejected: dimensions");
                return Err(FitError::TooLarge(name));
            }
        }

        Ok(())
    }

    /// Check whether `item` fits in the named slot of `container`.
    pub fn can_fit_slot(
        &self,
        item: &ObjectDefinition,
        container: &ObjectDefinition,
        slot_id: &str,
    ) -> Result<(), FitError> {
        let name = container.display_name().to_string();
        if !container.is_container() {
            return Err(FitError::NotAContainer(name));
        }
        let slot = container.slot(slot_id).ok_or_else(|| FitError::NoSuchSlot {
            container: name.clone(),
            slot: slot_id.to_string(),
        })?;

        if !slot.is_empty() {
            return Err(FitError::SlotOccupied {
                container: name,
                slot: slot_id.to_string(),
            });
        }
        if let Some(max_weight) = slot.max_weight {
            if self.weight_of(item) > max_weight {
                return Err(FitError::TooHeavy(name));
            }
        }
        if let (Some(limit), Some(size)) = (slot.dimensions, item.dimensions) {
            if !size.fits_within(limit) {
                return Err(FitError::TooLarge(name));
            }
        }
        Ok(())
    }

    // === Tree queries ===

    /// Check if `needle` is anywhere below `root` (not counting `root` itself).
    #[must_use]
    pub fn contains_descendant(&self, root: &ObjectDefinition, needle: &ObjectId) -> bool {
        let mut stack: Vec<&ObjectId> = root.children().collect();
        let mut visited = FxHashSet::default();
        while let Some(id) = stack.pop() {
            if id == needle {
                return true;
            }
            if !visited.insert(id.clone()) {
                continue;
            }
            if let Some(child) = self.get(id) {
                stack.extend(child.children());
            }
        }
        false
    }

    /// Guard run before every transfer: moving `item` into `destination`
    /// must not place an object inside itself.
    pub fn check_nesting(&self, item: &ObjectDefinition, destination: &ObjectId) -> Result<(), FitError> {
        if item.id == *destination || self.contains_descendant(item, destination) {
            return Err(FitError::SelfNesting);
        }
        Ok(())
    }

    /// Every object a character carries, depth-first in inventory order.
    #[must_use]
    pub fn carried(&self, character: &CharacterState) -> Vec<&'a ObjectDefinition> {
        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        for entry in &character.inventory {
            self.collect(&entry.id, &mut out, &mut visited);
        }
        out
    }

    fn collect(
        &self,
        id: &ObjectId,
        out: &mut Vec<&'a ObjectDefinition>,
        visited: &mut FxHashSet<ObjectId>,
    ) {
        if !visited.insert(id.clone()) {
            return;
        }
        let Some(object) = self.get(id) else {
            return;
        };
        out.push(object);
        for child in object.children() {
            self.collect(child, out, visited);
        }
    }

    /// Every container a character carries, depth-first in inventory order.
    #[must_use]
    pub fn carried_containers(&self, character: &CharacterState) -> Vec<&'a ObjectDefinition> {
        self.carried(character)
            .into_iter()
            .filter(|o| o.is_container())
            .collect()
    }

    /// Check whether a character carries an object anywhere.
    #[must_use]
    pub fn is_carried(&self, character: &CharacterState, id: &ObjectId) -> bool {
        self.carried(character).iter().any(|o| &o.id == id)
    }

    /// Locate a carried object.
    #[must_use]
    pub fn holder_of(&self, character: &CharacterState, id: &ObjectId) -> Option<Holder> {
        if character.entry(id).is_some() {
            return Some(Holder::TopLevel);
        }
        self.carried_containers(character).into_iter().find_map(|c| {
            if c.contains.contains(id) {
                return Some(Holder::Container {
                    container: c.id.clone(),
                    slot: None,
                });
            }
            c.slots
                .iter()
                .find(|s| s.occupant.as_ref() == Some(id))
                .map(|s| Holder::Container {
                    container: c.id.clone(),
                    slot: Some(s.id.clone()),
                })
        })
    }

    /// `root` and every object below it, depth-first.
    #[must_use]
    pub fn subtree(&self, root: &'a ObjectDefinition) -> Vec<&'a ObjectDefinition> {
        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect(&root.id, &mut out, &mut visited);
        out
    }

    // === Transfers ===

    /// Validate moving a carried item into `destination` and compute the result.
    ///
    /// The item is detached from its current holder on a scratch copy of the
    /// arena before the fit check runs, so moving between storage and a slot
    /// of the same container does not count the item twice. Nothing is
    /// written until the caller commits `TransferPlan::objects`.
    ///
    /// General storage keeps arrival order: the item is appended, not put
    /// back where it once was.
    pub fn plan_transfer(
        &self,
        character: &CharacterState,
        item: &ObjectDefinition,
        destination: &ObjectDefinition,
        slot: Option<&str>,
    ) -> Result<TransferPlan, FitError> {
        let from = self
            .holder_of(character, &item.id)
            .ok_or_else(|| FitError::NotCarried(item.display_name().to_string()))?;
        if !self.is_carried(character, &destination.id) {
            return Err(FitError::NotCarried(destination.display_name().to_string()));
        }
        if !destination.is_container() {
            return Err(FitError::NotAContainer(destination.display_name().to_string()));
        }
        self.check_nesting(item, &destination.id)?;

        if let Holder::Container { container, slot: current } = &from {
            if *container == destination.id && current.as_deref() == slot {
                return Err(FitError::AlreadyThere(item.display_name().to_string()));
            }
        }

        let mut objects = self.objects.clone();
        if let Holder::Container { container, .. } = &from {
            if let Some(holder) = objects.get_mut(container) {
                holder.detach(&item.id);
            }
        }

        let scratch = Containers::new(&objects, self.config);
        let Some(target) = scratch.get(&destination.id) else {
            return Err(FitError::NotCarried(destination.display_name().to_string()));
        };
        match slot {
            Some(slot_id) => scratch.can_fit_slot(item, target, slot_id)?,
            None => scratch.can_fit(item, target)?,
        }

        if let Some(target) = objects.get_mut(&destination.id) {
            match slot {
                Some(slot_id) => {
                    if let Some(s) = target.slot_mut(slot_id) {
                        s.occupant = Some(item.id.clone());
                    }
                }
                None => target.contains.push(item.id.clone()),
            }
        }

        Ok(TransferPlan { objects, from })
    }

    // === Routing and lookup ===

    /// First top-level container, in inventory order, whose general
    /// storage can take `item`.
    #[must_use]
    pub fn find_container(&self, character: &CharacterState, item: &ObjectDefinition) -> Option<&'a ObjectDefinition> {
        character
            .inventory
            .iter()
            .filter_map(|e| self.get(&e.id))
            .filter(|c| c.is_container() && c.id != item.id)
            .find(|c| self.can_fit(item, c).is_ok())
    }

    /// Resolve a loose container reference against everything the character carries.
    #[must_use]
    pub fn find_container_fuzzy(&self, character: &CharacterState, query: &str) -> Option<&'a ObjectDefinition> {
        fuzzy_find(self.carried_containers(character), query)
    }

    // === Strength ===

    /// Base strength plus every `strength_<N>` trait on carried objects.
    #[must_use]
    pub fn effective_strength(&self, character: &CharacterState) -> i64 {
        let base = character.base_stats.get(&self.config.strength_stat);
        let prefix = self.config.strength_trait_prefix.as_str();
        let bonus: i64 = self
            .carried(character)
            .iter()
            .flat_map(|o| o.traits.iter())
            .filter_map(|t| t.strip_prefix(prefix))
            .filter_map(|n| n.parse::<i64>().ok())
            .sum();
        base + bonus
    }

    /// Maximum total weight the character can carry.
    #[must_use]
    pub fn carrying_capacity(&self, character: &CharacterState) -> f64 {
        (self.effective_strength(character) * self.config.carry_multiplier) as f64
    }

    /// Total weight currently carried.
    #[must_use]
    pub fn carried_weight(&self, character: &CharacterState) -> f64 {
        character
            .inventory
            .iter()
            .map(|e| self.weight_of_id(&e.id))
            .sum()
    }
}
