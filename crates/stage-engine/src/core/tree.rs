use crate::api::types::NodeId;
use crate::core::node::{AsAny, RenderNode};
use crate::renderer::traits::DrawTarget;

struct Child {
    id: NodeId,
    node: Box<dyn RenderNode>,
}

/// Ordered, owning list of render nodes.
///
/// Insertion order is traversal order. Disabled nodes are skipped by
/// update and draw, which also skips everything they contain.
pub struct RenderTree {
    children: Vec<Child>,
    next_id: u32,
}

impl RenderTree {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a node. The returned id is only valid for this tree.
    pub fn add_child<N: RenderNode>(&mut self, node: N) -> NodeId {
        self.add_boxed(Box::new(node))
    }

    pub fn add_boxed(&mut self, node: Box<dyn RenderNode>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.children.push(Child { id, node });
        id
    }

    /// Detach and dispose a node. Returns false if `id` is not a child.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(idx) = self.children.iter().position(|c| c.id == id) else {
            return false;
        };
        let mut child = self.children.remove(idx);
        child.node.dispose();
        true
    }

    /// Detach a node without disposing it, handing ownership back.
    pub fn take(&mut self, id: NodeId) -> Option<Box<dyn RenderNode>> {
        let idx = self.children.iter().position(|c| c.id == id)?;
        Some(self.children.remove(idx).node)
    }

    pub fn node(&self, id: NodeId) -> Option<&dyn RenderNode> {
        self.children
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn RenderNode> {
        match self.children.iter_mut().find(|c| c.id == id) {
            Some(c) => Some(c.node.as_mut()),
            None => None,
        }
    }

    /// Typed access to a child.
    pub fn get<N: RenderNode>(&self, id: NodeId) -> Option<&N> {
        self.node(id)?.as_any().downcast_ref::<N>()
    }

    pub fn get_mut<N: RenderNode>(&mut self, id: NodeId) -> Option<&mut N> {
        self.node_mut(id)?.as_any_mut().downcast_mut::<N>()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.children.iter().any(|c| c.id == id)
    }

    /// Child ids in traversal order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().map(|c| c.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RenderNode> {
        self.children.iter().map(|c| c.node.as_ref())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Update enabled children in order, then drop any that flagged
    /// themselves destroyed.
    pub fn update(&mut self, dt: f32) {
        for child in self.children.iter_mut().filter(|c| c.node.enabled()) {
            child.node.update(dt);
        }
        self.prune_destroyed();
    }

    /// Draw enabled children inside one batch scope. Empty trees open no batch.
    pub fn draw(&self, target: &mut DrawTarget<'_>) {
        if self.children.is_empty() {
            return;
        }
        target.begin_batch();
        self.draw_nodes(target);
        target.end_batch();
    }

    /// Draw enabled children into the caller's open batch.
    pub fn draw_nodes(&self, target: &mut DrawTarget<'_>) {
        for child in self.children.iter().filter(|c| c.node.enabled()) {
            child.node.draw(target);
        }
    }

    /// Dispose every child once, in order, and empty the tree. Calling
    /// again disposes nothing.
    pub fn dispose(&mut self) {
        if !self.children.is_empty() {
            log::debug!("disposing render tree with {} children", self.children.len());
        }
        for mut child in self.children.drain(..) {
            child.node.dispose();
        }
    }

    fn prune_destroyed(&mut self) {
        if !self.children.iter().any(|c| c.node.is_destroyed()) {
            return;
        }
        let mut kept = Vec::with_capacity(self.children.len());
        for mut child in self.children.drain(..) {
            if child.node.is_destroyed() {
                child.node.dispose();
            } else {
                kept.push(child);
            }
        }
        self.children = kept;
    }
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::area::Area2D;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every hook call into a shared log.
    pub(crate) struct Marker {
        pub name: &'static str,
        pub enabled: bool,
        pub position: Vec2,
        pub destroyed: bool,
        pub disposed: bool,
        pub log: Rc<RefCell<Vec<String>>>,
    }

    impl Marker {
        pub fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                enabled: true,
                position: Vec2::ZERO,
                destroyed: false,
                disposed: false,
                log: Rc::clone(log),
            }
        }

        pub fn disabled(mut self) -> Self {
            self.enabled = false;
            self
        }
    }

    impl RenderNode for Marker {
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
        fn size(&self) -> Area2D {
            Area2D::splat(10)
        }
        fn update(&mut self, _dt: f32) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }
        fn draw(&self, _target: &mut DrawTarget<'_>) {
            self.log.borrow_mut().push(format!("draw {}", self.name));
        }
        fn dispose(&mut self) {
            if self.disposed {
                return;
            }
            self.disposed = true;
            self.log.borrow_mut().push(format!("dispose {}", self.name));
        }
        fn is_destroyed(&self) -> bool {
            self.destroyed
        }
    }

    pub(crate) fn new_log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn update_skips_disabled_in_insertion_order() {
        let log = new_log();
        let mut tree = RenderTree::new();
        tree.add_child(Marker::new("a", &log));
        tree.add_child(Marker::new("b", &log).disabled());
        tree.add_child(Marker::new("c", &log));

        tree.update(0.016);
        assert_eq!(*log.borrow(), vec!["update a", "update c"]);
    }

    #[test]
    fn draw_wraps_one_batch() {
        use crate::renderer::instance::RenderBuffer;

        let log = new_log();
        let mut tree = RenderTree::new();
        tree.add_child(Marker::new("a", &log));
        tree.add_child(Marker::new("b", &log).disabled());

        let mut buffer = RenderBuffer::new();
        tree.draw(&mut DrawTarget::new(&mut buffer));
        assert_eq!(buffer.batch_count(), 1);
        assert_eq!(*log.borrow(), vec!["draw a"]);

        let empty = RenderTree::new();
        let mut buffer = RenderBuffer::new();
        empty.draw(&mut DrawTarget::new(&mut buffer));
        assert_eq!(buffer.batch_count(), 0);
    }

    #[test]
    fn dispose_cascades_once() {
        let log = new_log();
        let mut tree = RenderTree::new();
        tree.add_child(Marker::new("a", &log));
        tree.add_child(Marker::new("b", &log));
        tree.dispose();
        tree.dispose();
        assert_eq!(*log.borrow(), vec!["dispose a", "dispose b"]);
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_detaches_and_disposes() {
        let log = new_log();
        let mut tree = RenderTree::new();
        let a = tree.add_child(Marker::new("a", &log));
        tree.add_child(Marker::new("b", &log));

        assert!(tree.remove(a));
        assert!(!tree.remove(a));
        tree.update(0.016);
        assert_eq!(*log.borrow(), vec!["dispose a", "update b"]);
    }

    #[test]
    fn destroyed_nodes_are_pruned_after_update() {
        let log = new_log();
        let mut tree = RenderTree::new();
        let a = tree.add_child(Marker::new("a", &log));
        tree.add_child(Marker::new("b", &log));

        tree.get_mut::<Marker>(a).unwrap().destroyed = true;
        tree.update(0.016);
        assert!(!tree.contains(a));
        assert_eq!(tree.len(), 1);
        assert_eq!(*log.borrow(), vec!["update a", "update b", "dispose a"]);
    }

    #[test]
    fn typed_access_and_take() {
        let log = new_log();
        let mut tree = RenderTree::new();
        let a = tree.add_child(Marker::new("a", &log));
        assert_eq!(tree.get::<Marker>(a).unwrap().name, "a");
        tree.node_mut(a).unwrap().set_position(Vec2::new(3.0, 4.0));
        assert_eq!(tree.node(a).unwrap().position(), Vec2::new(3.0, 4.0));

        let taken = tree.take(a).unwrap();
        assert!(tree.is_empty());
        assert!(log.borrow().is_empty());
        assert!(taken.enabled());
    }
}
