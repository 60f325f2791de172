//! Scene handlers. Driven by the resolution's `next_scene`, not by the diff.

use crate::commands::NextScene;
use crate::core::EngineResult;

use super::context::EffectContext;
use super::handler::EffectHandler;

/// Records the destination scene as visited.
#[derive(Debug, Default)]
pub struct VisitedScenesHandler;

impl EffectHandler for VisitedScenesHandler {
    fn name(&self) -> &'static str {
        "visited_scenes"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        ctx.result.destination().is_some()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        if let Some(scene) = ctx.result.destination() {
            ctx.state.world.visited_scenes.insert(scene.clone());
        }
        Ok(())
    }
}

/// Moves the game to the next scene, or ends it. Always runs last.
#[derive(Debug, Default)]
pub struct SceneTransitionHandler;

impl EffectHandler for SceneTransitionHandler {
    fn name(&self) -> &'static str {
        "scene_transition"
    }

    fn should_apply(&self, ctx: &EffectContext<'_>) -> bool {
        ctx.result.next_scene.is_some()
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> EngineResult<()> {
        match &ctx.result.next_scene {
            Some(NextScene::Scene(scene)) => {
                tracing::debug!(from = %ctx.state.current_scene_id, to = %scene, "scene transition");
                ctx.state.current_scene_id = scene.clone();
            }
            Some(NextScene::GameEnd) => {
                tracing::debug!("game over");
                ctx.state.world.game_over = true;
            }
            None => {}
        }
        Ok(())
    }
}
