use crate::core::context::{SceneCommand, StageContext};
use crate::core::scene::{Scene, ScenePhase};
use crate::error::StageError;
use crate::renderer::traits::DrawTarget;

struct SceneSlot {
    scene: Box<dyn Scene>,
    phase: ScenePhase,
}

impl SceneSlot {
    fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            phase: ScenePhase::Uninitialized,
        }
    }

    fn activate(&mut self, ctx: &mut StageContext) -> Result<(), StageError> {
        self.scene.initialize(ctx);
        self.phase = ScenePhase::Initialized;
        if let Err(err) = self.scene.load_content(ctx) {
            log::warn!("scene `{}` failed to load: {err}", self.scene.name());
            return Err(err);
        }
        self.phase = ScenePhase::Loaded;
        log::debug!("scene `{}` loaded", self.scene.name());
        Ok(())
    }

    fn teardown(&mut self, ctx: &mut StageContext) {
        if self.phase.has_content() {
            self.scene.unload_content(ctx);
        }
        self.release();
    }

    fn release(&mut self) {
        if self.phase == ScenePhase::Disposed {
            return;
        }
        self.scene.dispose();
        self.phase = ScenePhase::Disposed;
        log::debug!("scene `{}` disposed", self.scene.name());
    }
}

/// Ordered stack of scenes. Only the top scene is updated and drawn, and
/// only once its content has loaded.
pub struct SceneStack {
    slots: Vec<SceneSlot>,
}

impl SceneStack {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn top_phase(&self) -> Option<ScenePhase> {
        self.slots.last().map(|s| s.phase)
    }

    pub fn top_name(&self) -> Option<&'static str> {
        self.slots.last().map(|s| s.scene.name())
    }

    /// Phases from the bottom of the stack to the top.
    pub fn phases(&self) -> impl Iterator<Item = ScenePhase> + '_ {
        self.slots.iter().map(|s| s.phase)
    }

    /// Unload and dispose every scene, top first, then make `scene` the
    /// only one.
    pub fn goto(&mut self, scene: Box<dyn Scene>, ctx: &mut StageContext) -> Result<(), StageError> {
        log::debug!("goto `{}` over {} scenes", scene.name(), self.slots.len());
        self.clear(ctx);
        self.activate(scene, ctx)
    }

    /// Pause the active scene and cover it with `scene`.
    pub fn push(&mut self, scene: Box<dyn Scene>, ctx: &mut StageContext) -> Result<(), StageError> {
        if let Some(top) = self.slots.last_mut() {
            if top.phase == ScenePhase::Loaded {
                top.scene.pause(ctx);
                top.phase = ScenePhase::Paused;
                log::debug!("scene `{}` paused", top.scene.name());
            }
        }
        self.activate(scene, ctx)
    }

    /// Remove the active scene and resume the one below. Emptying the stack
    /// requests exit; popping an empty stack does nothing.
    pub fn pop(&mut self, ctx: &mut StageContext) {
        let Some(mut slot) = self.slots.pop() else {
            log::warn!("pop on an empty scene stack ignored");
            return;
        };
        slot.teardown(ctx);
        match self.slots.last_mut() {
            Some(top) if top.phase == ScenePhase::Paused => {
                top.scene.resume(ctx);
                top.phase = ScenePhase::Loaded;
                log::debug!("scene `{}` resumed", top.scene.name());
            }
            Some(_) => {}
            None => ctx.request_exit(),
        }
    }

    /// Update the active scene, then apply any transitions it requested.
    pub fn update(&mut self, dt: f32, ctx: &mut StageContext) -> Result<(), StageError> {
        if let Some(top) = self.slots.last_mut() {
            if top.phase == ScenePhase::Loaded {
                top.scene.update(dt, ctx);
            }
        }
        self.apply_pending(ctx)
    }

    /// Apply queued transitions in request order, including any queued by
    /// the hooks they trigger. Every command is applied; the first load
    /// error is returned.
    pub fn apply_pending(&mut self, ctx: &mut StageContext) -> Result<(), StageError> {
        let mut result = Ok(());
        while ctx.has_pending() {
            for command in ctx.take_commands() {
                let applied = match command {
                    SceneCommand::Goto(scene) => self.goto(scene, ctx),
                    SceneCommand::Push(scene) => self.push(scene, ctx),
                    SceneCommand::Pop => {
                        self.pop(ctx);
                        Ok(())
                    }
                };
                if let Err(err) = applied {
                    if result.is_ok() {
                        result = Err(err);
                    }
                }
            }
        }
        result
    }

    pub fn draw(&self, target: &mut DrawTarget<'_>) {
        if let Some(top) = self.slots.last() {
            if top.phase == ScenePhase::Loaded {
                top.scene.draw(target);
            }
        }
    }

    /// Unload and dispose everything, top first, and request exit.
    /// Transitions still queued are discarded.
    pub fn shutdown(&mut self, ctx: &mut StageContext) {
        let dropped = ctx.take_commands().len();
        if dropped > 0 {
            log::debug!("shutdown discarding {dropped} queued transitions");
        }
        self.clear(ctx);
        ctx.request_exit();
    }

    fn activate(&mut self, scene: Box<dyn Scene>, ctx: &mut StageContext) -> Result<(), StageError> {
        let mut slot = SceneSlot::new(scene);
        let result = slot.activate(ctx);
        self.slots.push(slot);
        result
    }

    fn clear(&mut self, ctx: &mut StageContext) {
        while let Some(mut slot) = self.slots.pop() {
            slot.teardown(ctx);
        }
    }
}

impl Default for SceneStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneStack {
    fn drop(&mut self) {
        for slot in self.slots.iter_mut().rev() {
            slot.release();
        }
    }
}
