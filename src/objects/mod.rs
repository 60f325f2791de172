//! Objects and the container model.
//!
//! - `ObjectDefinition`: an object in the arena (items, containers, hands)
//! - `Slot` / `Dimensions`: capacity building blocks
//! - `Containers`: recursive weight, fit and reachability queries
//! - `fuzzy_find`: loose name matching used by commands

mod definition;
mod container;
mod lookup;

pub use definition::{Dimensions, ObjectDefinition, Slot, CONTAINER_TRAIT};
pub use container::{Containers, FitError, Holder, TransferPlan};
pub use lookup::{fuzzy_find, normalize};
