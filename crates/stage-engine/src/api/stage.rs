use crate::api::config::StageConfig;
use crate::assets::store::AssetStore;
use crate::core::context::StageContext;
use crate::core::scene::Scene;
use crate::core::stack::SceneStack;
use crate::error::StageError;
use crate::renderer::traits::{DrawTarget, Graphics};

/// A scene stack together with the context its scenes run against.
///
/// This is the host-facing entry point: one `update` per fixed tick, one
/// `draw` per frame, and `is_running` to decide when to stop.
pub struct Stage {
    scenes: SceneStack,
    ctx: StageContext,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        Self {
            scenes: SceneStack::new(),
            ctx: StageContext::new(config),
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.ctx.config
    }

    pub fn context(&self) -> &StageContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut StageContext {
        &mut self.ctx
    }

    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.ctx.assets
    }

    pub fn scenes(&self) -> &SceneStack {
        &self.scenes
    }

    pub fn goto(&mut self, scene: impl Scene) -> Result<(), StageError> {
        let activated = self.scenes.goto(Box::new(scene), &mut self.ctx);
        self.settle(activated)
    }

    pub fn push(&mut self, scene: impl Scene) -> Result<(), StageError> {
        let activated = self.scenes.push(Box::new(scene), &mut self.ctx);
        self.settle(activated)
    }

    pub fn pop(&mut self) -> Result<(), StageError> {
        self.scenes.pop(&mut self.ctx);
        self.scenes.apply_pending(&mut self.ctx)
    }

    /// Advance the active scene by one fixed step.
    pub fn update(&mut self, dt: f32) -> Result<(), StageError> {
        self.scenes.update(dt, &mut self.ctx)
    }

    pub fn draw(&self, graphics: &mut dyn Graphics) {
        let mut target = DrawTarget::new(graphics);
        self.scenes.draw(&mut target);
    }

    /// False once the stack has emptied or exit was requested.
    pub fn is_running(&self) -> bool {
        !self.ctx.exit_requested()
    }

    pub fn shutdown(&mut self) {
        self.scenes.shutdown(&mut self.ctx);
    }

    /// Apply transitions queued by the hooks that just ran, even when
    /// activation failed. The activation error wins over later ones.
    fn settle(&mut self, activated: Result<(), StageError>) -> Result<(), StageError> {
        let pending = self.scenes.apply_pending(&mut self.ctx);
        activated.and(pending)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}
