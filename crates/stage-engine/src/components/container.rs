use glam::Vec2;

use crate::core::area::Area2D;
use crate::core::node::RenderNode;
use crate::core::tree::RenderTree;
use crate::renderer::traits::DrawTarget;

/// Render node that groups other nodes.
///
/// Children are positioned relative to the container, disabling the
/// container hides and freezes the whole group, and disposing it disposes
/// every descendant.
pub struct Container {
    position: Vec2,
    enabled: bool,
    destroyed: bool,
    children: RenderTree,
}

impl Container {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            enabled: true,
            destroyed: false,
            children: RenderTree::new(),
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn children(&self) -> &RenderTree {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut RenderTree {
        &mut self.children
    }

    /// Flag for removal by the parent tree after its current update.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderNode for Container {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Extent from the container origin to the far edge of its enabled children.
    fn size(&self) -> Area2D {
        self.children
            .iter()
            .filter(|child| child.enabled())
            .fold(Area2D::ZERO, |acc, child| {
                let far = child.position() + child.size().to_vec2();
                Area2D::new(acc.width.max(far.x as i32), acc.height.max(far.y as i32))
            })
    }

    fn update(&mut self, dt: f32) {
        self.children.update(dt);
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        target.with_offset(self.position, |t| self.children.draw_nodes(t));
    }

    fn dispose(&mut self) {
        self.children.dispose();
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::tests::{new_log, Marker};
    use crate::renderer::instance::RenderBuffer;

    #[test]
    fn disabled_container_hides_subtree() {
        let log = new_log();
        let mut inner = Container::new();
        inner.children_mut().add_child(Marker::new("leaf", &log));

        let mut tree = RenderTree::new();
        let id = tree.add_child(inner);
        tree.update(0.1);
        tree.get_mut::<Container>(id).unwrap().set_enabled(false);
        tree.update(0.1);

        let mut buffer = RenderBuffer::new();
        tree.draw(&mut DrawTarget::new(&mut buffer));
        assert_eq!(*log.borrow(), vec!["update leaf"]);
    }

    #[test]
    fn nested_containers_share_one_batch() {
        let log = new_log();
        let mut inner = Container::new();
        inner.children_mut().add_child(Marker::new("deep", &log));
        let mut outer = Container::new();
        outer.children_mut().add_child(inner);
        outer.children_mut().add_child(Marker::new("shallow", &log));

        let mut tree = RenderTree::new();
        tree.add_child(outer);
        let mut buffer = RenderBuffer::new();
        tree.draw(&mut DrawTarget::new(&mut buffer));

        assert_eq!(buffer.batch_count(), 1);
        assert_eq!(*log.borrow(), vec!["draw deep", "draw shallow"]);
    }

    #[test]
    fn dispose_reaches_every_descendant_once() {
        let log = new_log();
        let mut inner = Container::new();
        inner.children_mut().add_child(Marker::new("a", &log));
        inner.children_mut().add_child(Marker::new("b", &log));
        let mut outer = Container::new();
        outer.children_mut().add_child(inner);
        outer.children_mut().add_child(Marker::new("c", &log));

        let mut tree = RenderTree::new();
        tree.add_child(outer);
        tree.dispose();
        tree.dispose();
        assert_eq!(*log.borrow(), vec!["dispose a", "dispose b", "dispose c"]);
    }

    #[test]
    fn size_spans_enabled_children() {
        let log = new_log();
        let mut container = Container::new();
        let mut marker = Marker::new("a", &log);
        marker.position = Vec2::new(20.0, 5.0);
        container.children_mut().add_child(marker);
        let mut hidden = Marker::new("b", &log).disabled();
        hidden.position = Vec2::new(500.0, 500.0);
        container.children_mut().add_child(hidden);

        assert_eq!(container.size(), Area2D::new(30, 15));
    }

    #[test]
    fn children_draw_relative_to_container() {
        use crate::assets::store::AssetStore;
        use crate::components::sprite::Sprite;

        let mut store = AssetStore::default();
        let texture = store.register_texture("dot", Area2D::splat(4));
        let mut container = Container::new().with_position(Vec2::new(100.0, 50.0));
        container
            .children_mut()
            .add_child(Sprite::new(texture).with_position(Vec2::new(3.0, 4.0)));

        let mut tree = RenderTree::new();
        tree.add_child(container);
        let mut buffer = RenderBuffer::new();
        tree.draw(&mut DrawTarget::new(&mut buffer));

        let inst = buffer.instances[0];
        assert_eq!((inst.x, inst.y), (103.0, 54.0));
    }
}
