use glam::{Vec2, Vec3};

use crate::components::registry::{Component, ComponentRegistry};
use crate::core::area::Area2D;
use crate::core::node::RenderNode;
use crate::renderer::traits::DrawTarget;

/// Render node assembled from components.
///
/// Holds at most one component per capability. Moving the object pushes
/// the new position into every component.
pub struct GameObject {
    /// Identifier for lookups.
    pub id: String,
    /// Group identifier shared by related objects.
    pub group: String,
    enabled: bool,
    /// x, y = position; z = depth, pushed into components as layer depth.
    transform: Vec3,
    pivot: Vec2,
    size: Area2D,
    destroyed: bool,
    components: ComponentRegistry,
}

impl GameObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: String::new(),
            enabled: true,
            transform: Vec3::ZERO,
            pivot: Vec2::ZERO,
            size: Area2D::ZERO,
            destroyed: false,
            components: ComponentRegistry::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_size(mut self, size: Area2D) -> Self {
        self.size = size;
        self
    }

    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    // -- Components --

    /// Attach a component at the object's current position and depth.
    /// Returns the instance it replaced, undisposed.
    pub fn add_component<C: Component>(&mut self, mut component: C) -> Option<Box<dyn Component>> {
        component.owner_moved(self.transform.truncate());
        component.owner_depth_changed(self.transform.z);
        self.components.add(component)
    }

    pub fn component<C: Component>(&self) -> Option<&C> {
        self.components.get::<C>()
    }

    pub fn component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components.get_mut::<C>()
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    // -- Transform --

    pub fn transform(&self) -> Vec3 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Vec3) {
        self.transform = transform;
        self.refresh_components();
    }

    pub fn depth(&self) -> f32 {
        self.transform.z
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.transform.z = depth;
        self.refresh_components();
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// Clamped to [0, 1] on both axes.
    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot.clamp(Vec2::ZERO, Vec2::ONE);
        self.refresh_components();
    }

    pub fn set_size(&mut self, size: Area2D) {
        self.size = size;
    }

    // -- Lifetime --

    /// Flag for removal by the owning tree after its current update.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn refresh_components(&mut self) {
        self.components.owner_moved(self.transform.truncate());
        self.components.owner_depth_changed(self.transform.z);
    }
}

impl RenderNode for GameObject {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn position(&self) -> Vec2 {
        self.transform.truncate()
    }

    fn set_position(&mut self, position: Vec2) {
        self.transform = position.extend(self.transform.z);
        self.refresh_components();
    }

    fn size(&self) -> Area2D {
        self.size
    }

    fn update(&mut self, dt: f32) {
        self.components.update(dt);
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        self.components.draw(target);
    }

    fn dispose(&mut self) {
        if !self.components.is_empty() {
            log::debug!("game object `{}` disposing {} components", self.id, self.components.len());
        }
        self.components.dispose();
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
