//! Inventory, transfer and scene-object handlers.
//!
//! These run after the character-level handlers and before the scene
//! handlers. `InventoryHandler` runs before `SceneObjectsHandler` so an
//! object picked up in this turn is already owned when it leaves the scene.

use crate::core::{EngineError, EngineResult, InventoryEntry, ObjectId};
use crate::objects::Holder;

use super::context::EffectContext;
use super::handler::EffectHandler;

/// Set an arena object's quantity and mirror it on a top-level entry.
fn sync_quantity(ctx: &mut EffectContext<'_>, id: &ObjectId, quantity: u32) -> EngineResult<()> {
    ctx.state
        .object_mut(id)
        .ok_or_else(|| EngineError::ObjectNotFound(id.clone()))?
        .quantity = quantity;
    for entry in ctx.character.inventory.iter_mut() {
        if &entry.id == id {
            entry.quantity = quantity;
        }
    }
    Ok(())
}

/// Adds and removes items.
///
/// Added objects already carried stack onto the carried object. Other
/// non-container objects go into the first top-level container that fits
/// them, falling back to a top-level entry; containers always go top-level.
/// Removing fewer units than the object has decrements it, otherwise the
/// object is detached from wherever it is held. Detached objects stay in
/// the arena.
#[derive(Debug, Default)]
pub struct InventoryHandler;

impl InventoryHandler {
    fn add(ctx: &mut EffectContext<'_>, id: &ObjectId, quantity: u32) -> EngineResult<()> {
        let (carried, current) = {
            let item = ctx.state.require_object(id)?;
            (ctx.containers().is_carried(&ctx.character, id), item.quantity)
        };

        if carried {
            tracing::debug!(item = %id, quantity, "stacking onto carried object");
            return sync_quantity(ctx, id, current.saturating_add(quantity));
        }
        sync_quantity(ctx, id, quantity)?;

        let route = {
            let containers = ctx.containers();
            let item = ctx.state.require_object(id)?;
            if item.is_container() {
                None
            } else {
                containers
                    .find_container(&ctx.character, item)
                    .map(|c| c.id.clone())
            }
        };

        match route {
            Some(container) => {
                tracing::debug!(item = %id, container = %container, "routed into container");
                ctx.state
                    .object_mut(&container)
                    .ok_or_else(|| EngineError::ContainerNotFound(container.clone()))?
                    .contains
                    .push(id.clone());
            }
            None => {
                tracing::debug!(item = %id, "added as top-level entry");
                ctx.character
                    .inventory
                    .push_back(InventoryEntry::new(id.clone(), quantity));
            }
        }
        Ok(())
    }

    fn remove(ctx: &mut EffectContext<'_>, id: &ObjectId, quantity: u32) -> EngineResult<()> {
        let current = ctx.state.require_object(id)?.quantity;
        let holder = ctx
            .containers()
            .holder_of(&ctx.character, id)
            .ok_or_else(|| {
                tracing::warn!(item = %id, character = %ctx.character.id, "remove of uncarried item");
                EngineError::inconsistent(format!("{id} is not carried by {}", ctx.character.id))
            })?;

        if quantity < current {
            return sync_quantity(ctx, id, current - quantity);
        }

        match holder {
            Holder::TopLevel => {
                ctx.character.remove_entry(id);
            }
            Holder::Container { container, .. } => {
                ctx.state
                    .object_mut(&container)
                    .ok_or_else(|| EngineError::ContainerNotFound(container.clone()))?
                    .detach(id);
            }
        }
        Ok(())
    }
}

impl EffectHandler for InventoryHandler {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        !ctx.effects.add_items.is_empty() || !ctx.effects.remove_items.is_empty()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        let effects = ctx.effects;
        for grant in &effects.add_items {
            Self::add(ctx, &grant.id, grant.quantity)?;
        }
        for grant in &effects.remove_items {
            Self::remove(ctx, &grant.id, grant.quantity)?;
        }
        Ok(())
    }
}

/// Moves one carried item into a container or slot.
///
/// The fit is validated again against the working state and applied in the
/// same step, so nothing earlier in the pipeline can invalidate it between
/// check and write. A transfer that no longer fits aborts the turn.
#[derive(Debug, Default)]
pub struct TransferItemHandler;

impl EffectHandler for TransferItemHandler {
    fn name(&self) -> &'static str {
        "transfer_item"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        ctx.effects.transfer_item.is_some()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        let Some(spec) = ctx.effects.transfer_item.as_ref() else {
            return Ok(());
        };

        let plan = {
            let item = ctx.state.require_object(&spec.item_id)?;
            let destination = ctx
                .state
                .object(&spec.to_container_id)
                .ok_or_else(|| EngineError::ContainerNotFound(spec.to_container_id.clone()))?;
            ctx.containers()
                .plan_transfer(&ctx.character, item, destination, spec.slot_id.as_deref())
                .map_err(|err| {
                    tracing::warn!(item = %spec.item_id, %err, "validated transfer no longer fits");
                    EngineError::inconsistent(format!("transfer of {}: {err}", spec.item_id))
                })?
        };

        if let Some(expected) = &spec.from_container_id {
            let matches = matches!(&plan.from, Holder::Container { container, .. } if container == expected);
            if !matches {
                tracing::warn!(item = %spec.item_id, expected = %expected, "item moved before transfer");
                return Err(EngineError::inconsistent(format!(
                    "{} is no longer in {expected}",
                    spec.item_id
                )));
            }
        }

        ctx.state.objects = plan.objects;
        if plan.from == Holder::TopLevel {
            ctx.character.remove_entry(&spec.item_id);
        }
        Ok(())
    }
}

/// Keeps the current scene's object list in sync with pickups and drops.
#[derive(Debug, Default)]
pub struct SceneObjectsHandler;

impl EffectHandler for SceneObjectsHandler {
    fn name(&self) -> &'static str {
        "scene_objects"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        !ctx.effects.add_scene_objects.is_empty() || !ctx.effects.remove_scene_objects.is_empty()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        let scene = ctx.state.current_scene_id.clone();

        for id in &ctx.effects.remove_scene_objects {
            let list = ctx.state.scene_objects.entry(scene.clone()).or_default();
            match list.iter().position(|o| o == id) {
                Some(pos) => {
                    list.remove(pos);
                }
                None => {
                    tracing::warn!(object = %id, scene = %scene, "object left the scene before removal");
                    return Err(EngineError::inconsistent(format!("{id} is not in {scene}")));
                }
            }
        }

        for id in &ctx.effects.add_scene_objects {
            ctx.state.require_object(id)?;
            if !ctx.state.is_in_scene(&scene, id) {
                ctx.state
                    .scene_objects
                    .entry(scene.clone())
                    .or_default()
                    .push_back(id.clone());
            }
        }
        Ok(())
    }
}
