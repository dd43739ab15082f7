use std::fmt;

use crate::api::config::StageConfig;
use crate::assets::store::AssetStore;
use crate::core::scene::Scene;

/// Stack transition requested from inside a scene hook.
pub enum SceneCommand {
    Goto(Box<dyn Scene>),
    Push(Box<dyn Scene>),
    Pop,
}

impl fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneCommand::Goto(scene) => write!(f, "Goto({})", scene.name()),
            SceneCommand::Push(scene) => write!(f, "Push({})", scene.name()),
            SceneCommand::Pop => f.write_str("Pop"),
        }
    }
}

/// Mutable state shared with every scene hook.
///
/// Transitions requested here are queued and applied by the scene stack
/// after the current pass returns, in request order.
pub struct StageContext {
    pub config: StageConfig,
    pub assets: AssetStore,
    commands: Vec<SceneCommand>,
    exit_requested: bool,
}

impl StageContext {
    pub fn new(config: StageConfig) -> Self {
        let assets = AssetStore::new(config.content_root.clone());
        Self {
            config,
            assets,
            commands: Vec::new(),
            exit_requested: false,
        }
    }

    /// Replace the whole stack with `scene`.
    pub fn goto(&mut self, scene: impl Scene) {
        self.commands.push(SceneCommand::Goto(Box::new(scene)));
    }

    /// Cover the active scene with `scene`.
    pub fn push(&mut self, scene: impl Scene) {
        self.commands.push(SceneCommand::Push(Box::new(scene)));
    }

    /// Remove the active scene.
    pub fn pop(&mut self) {
        self.commands.push(SceneCommand::Pop);
    }

    /// Ask the host to terminate after the current frame.
    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("exit requested");
        }
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn has_pending(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Drain queued transitions in request order.
    pub fn take_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for StageContext {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}
