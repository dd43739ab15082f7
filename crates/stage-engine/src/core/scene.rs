use crate::core::context::StageContext;
use crate::core::tree::RenderTree;
use crate::error::StageError;
use crate::renderer::traits::DrawTarget;

/// Lifecycle phase of a scene, driven only by the scene stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Uninitialized,
    Initialized,
    Loaded,
    Paused,
    Disposed,
}

impl ScenePhase {
    /// Whether `load_content` has succeeded and `unload_content` is owed.
    pub fn has_content(self) -> bool {
        matches!(self, ScenePhase::Loaded | ScenePhase::Paused)
    }
}

/// One application state on the scene stack.
///
/// A scene owns a [`RenderTree`]; the default `update`, `draw` and `dispose`
/// forward to it. Hooks are called by the stack only, each at most once per
/// transition:
///
/// - `initialize` then `load_content` when the scene becomes active,
/// - `pause` / `resume` when covered and uncovered,
/// - `unload_content` then `dispose` when removed.
pub trait Scene: 'static {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn tree(&self) -> &RenderTree;
    fn tree_mut(&mut self) -> &mut RenderTree;

    fn initialize(&mut self, _ctx: &mut StageContext) {}

    fn load_content(&mut self, _ctx: &mut StageContext) -> Result<(), StageError> {
        Ok(())
    }

    fn update(&mut self, dt: f32, _ctx: &mut StageContext) {
        self.tree_mut().update(dt);
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        self.tree().draw(target);
    }

    fn unload_content(&mut self, _ctx: &mut StageContext) {}

    fn pause(&mut self, _ctx: &mut StageContext) {}

    fn resume(&mut self, _ctx: &mut StageContext) {}

    /// Release everything the scene owns. Called exactly once.
    fn dispose(&mut self) {
        self.tree_mut().dispose();
    }
}
