//! Two-scene demo used by the `stage-demo` binary.
//!
//! The title scene walks a hero, plays a one-shot wave after half a second
//! and opens the pause scene when the wave completes. The pause scene closes
//! itself shortly after, and the title then pops itself, emptying the stack.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use glam::Vec2;
use stage_engine::{
    AnimatedSprite, AnimationPlayer, Area2D, AssetError, CompletionHandler, Container, Iconset,
    NodeId, RenderNode, RenderTree, Scene, SpriteSheet, SpriteSheetDescriptor, StageContext,
    StageError,
};

const HERO_SHEET: &str = r#"{
    "texture": "hero",
    "texture_size": { "width": 128, "height": 64 },
    "frame_size": { "width": 16, "height": 16 },
    "animations": {
        "walk": { "row": 1, "column": 0, "frame_count": 4, "frame_rate": 8, "loop": true },
        "wave": { "row": 2, "column": 0, "frame_count": 3, "frame_rate": 10 }
    },
    "frames": { "idle": { "x": 0, "y": 0 } }
}"#;

const WAVE_AFTER: f32 = 0.5;
const PAUSE_FOR: f32 = 0.25;

pub struct TitleScene {
    tree: RenderTree,
    hero: Option<NodeId>,
    elapsed: f32,
    wave_started: bool,
    waved: Rc<Cell<bool>>,
    resumed: bool,
}

impl TitleScene {
    pub fn new() -> Self {
        Self {
            tree: RenderTree::new(),
            hero: None,
            elapsed: 0.0,
            wave_started: false,
            waved: Rc::new(Cell::new(false)),
            resumed: false,
        }
    }

    fn start_wave(&mut self) {
        self.wave_started = true;
        let Some(hero) = self.hero.and_then(|id| self.tree.get_mut::<AnimatedSprite>(id)) else {
            return;
        };
        let waved = Rc::clone(&self.waved);
        let handler: CompletionHandler = Rc::new(move |player: &mut AnimationPlayer| {
            waved.set(true);
            if let Err(err) = player.play("walk") {
                log::warn!("hero cannot walk again: {err}");
            }
        });
        hero.on_completed(&handler);
        if let Err(err) = hero.play("wave") {
            log::warn!("hero cannot wave: {err}");
        }
    }
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn tree(&self) -> &RenderTree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    fn load_content(&mut self, ctx: &mut StageContext) -> Result<(), StageError> {
        let desc = SpriteSheetDescriptor::from_json(HERO_SHEET).map_err(|source| AssetError::Json {
            path: PathBuf::from("hero.json"),
            source,
        })?;
        let sheet = SpriteSheet::from_descriptor(&mut ctx.assets, desc)?;
        let mut hero = sheet.animated_sprite("idle", ctx.config.subscribe_policy)?;
        hero.set_position(Vec2::new(64.0, 48.0));
        hero.play("walk")?;
        self.hero = Some(self.tree.add_child(hero));
        Ok(())
    }

    fn update(&mut self, dt: f32, ctx: &mut StageContext) {
        self.tree.update(dt);
        if self.resumed {
            ctx.pop();
            return;
        }
        self.elapsed += dt;
        if !self.wave_started && self.elapsed >= WAVE_AFTER {
            self.start_wave();
        }
        if self.waved.replace(false) {
            ctx.push(PauseScene::new());
        }
    }

    fn resume(&mut self, _ctx: &mut StageContext) {
        self.resumed = true;
    }

    fn unload_content(&mut self, ctx: &mut StageContext) {
        self.tree.dispose();
        ctx.assets.release("hero");
    }
}

pub struct PauseScene {
    tree: RenderTree,
    elapsed: f32,
}

impl PauseScene {
    pub fn new() -> Self {
        Self {
            tree: RenderTree::new(),
            elapsed: 0.0,
        }
    }
}

impl Default for PauseScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PauseScene {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn tree(&self) -> &RenderTree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    fn load_content(&mut self, ctx: &mut StageContext) -> Result<(), StageError> {
        let icons = ctx.assets.register_texture("icons", Area2D::new(96, 64));
        let mut panel = Container::new().with_position(Vec2::new(32.0, 32.0));
        for (slot, index) in [1u32, 4].into_iter().enumerate() {
            let mut icon = Iconset::new(icons.clone(), Area2D::splat(32));
            icon.set_index(index);
            icon.set_position(Vec2::new(slot as f32 * 40.0, 0.0));
            panel.children_mut().add_child(icon);
        }
        self.tree.add_child(panel);
        Ok(())
    }

    fn update(&mut self, dt: f32, ctx: &mut StageContext) {
        self.tree.update(dt);
        self.elapsed += dt;
        if self.elapsed >= PAUSE_FOR {
            ctx.pop();
        }
    }

    fn unload_content(&mut self, ctx: &mut StageContext) {
        self.tree.dispose();
        ctx.assets.release("icons");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_engine::Stage;

    #[test]
    fn title_loads_a_walking_hero() {
        let mut stage = Stage::default();
        stage.goto(TitleScene::new()).unwrap();
        assert_eq!(stage.assets_mut().users("hero"), Some(1));
        stage.shutdown();
        assert_eq!(stage.assets_mut().users("hero"), None);
    }

    #[test]
    fn pause_scene_closes_itself() {
        let mut stage = Stage::default();
        stage.goto(PauseScene::new()).unwrap();
        let mut updates = 0;
        while stage.is_running() && updates < 100 {
            stage.update(1.0 / 60.0).unwrap();
            updates += 1;
        }
        assert!(!stage.is_running());
        assert!((15..=16).contains(&updates), "{updates}");
    }
}
