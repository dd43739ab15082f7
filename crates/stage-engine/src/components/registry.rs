//! Per-node component storage keyed by capability tag.

use std::any::{type_name, TypeId};
use std::fmt;

use glam::Vec2;

use crate::core::node::AsAny;
use crate::renderer::traits::DrawTarget;

/// A capability attached to an owning node (usually a
/// [`GameObject`](crate::components::game_object::GameObject)).
///
/// Components never reference their owner. The owner pushes geometry in
/// through [`Component::owner_moved`].
pub trait Component: AsAny {
    fn enabled(&self) -> bool {
        true
    }

    fn update(&mut self, _dt: f32) {}

    fn draw(&self, _target: &mut DrawTarget<'_>) {}

    fn dispose(&mut self) {}

    /// The owning node moved to `position`.
    fn owner_moved(&mut self, _position: Vec2) {}

    /// The owning node's depth changed.
    fn owner_depth_changed(&mut self, _depth: f32) {}
}

/// Compile-time capability identifier: one per component type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTag {
    id: TypeId,
    name: &'static str,
}

impl ComponentTag {
    pub fn of<C: Component>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentTag({})", self.name)
    }
}

struct Slot {
    tag: ComponentTag,
    component: Box<dyn Component>,
}

/// Tag → component mapping in attachment order. At most one instance per tag.
#[derive(Default)]
pub struct ComponentRegistry {
    slots: Vec<Slot>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `component` under its tag.
    ///
    /// An existing instance with the same tag is replaced in place, keeping
    /// its attachment position, and handed back undisposed.
    pub fn add<C: Component>(&mut self, component: C) -> Option<Box<dyn Component>> {
        let tag = ComponentTag::of::<C>();
        let boxed: Box<dyn Component> = Box::new(component);
        match self.slots.iter_mut().find(|s| s.tag == tag) {
            Some(slot) => {
                log::debug!("replacing component {}", tag.name());
                Some(std::mem::replace(&mut slot.component, boxed))
            }
            None => {
                self.slots.push(Slot { tag, component: boxed });
                None
            }
        }
    }

    /// The instance attached under `C`'s tag, if any.
    pub fn get<C: Component>(&self) -> Option<&C> {
        let tag = ComponentTag::of::<C>();
        self.slots
            .iter()
            .find(|s| s.tag == tag)
            .and_then(|s| (*s.component).as_any().downcast_ref::<C>())
    }

    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        let tag = ComponentTag::of::<C>();
        self.slots
            .iter_mut()
            .find(|s| s.tag == tag)
            .and_then(|s| (*s.component).as_any_mut().downcast_mut::<C>())
    }

    pub fn contains<C: Component>(&self) -> bool {
        self.contains_tag(ComponentTag::of::<C>())
    }

    pub fn contains_tag(&self, tag: ComponentTag) -> bool {
        self.slots.iter().any(|s| s.tag == tag)
    }

    /// Detach without disposing.
    pub fn remove<C: Component>(&mut self) -> Option<Box<dyn Component>> {
        let tag = ComponentTag::of::<C>();
        let idx = self.slots.iter().position(|s| s.tag == tag)?;
        Some(self.slots.remove(idx).component)
    }

    /// Tags in attachment order.
    pub fn tags(&self) -> impl Iterator<Item = ComponentTag> + '_ {
        self.slots.iter().map(|s| s.tag)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn update(&mut self, dt: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.component.enabled()) {
            slot.component.update(dt);
        }
    }

    pub fn draw(&self, target: &mut DrawTarget<'_>) {
        for slot in self.slots.iter().filter(|s| s.component.enabled()) {
            slot.component.draw(target);
        }
    }

    pub fn owner_moved(&mut self, position: Vec2) {
        for slot in &mut self.slots {
            slot.component.owner_moved(position);
        }
    }

    pub fn owner_depth_changed(&mut self, depth: f32) {
        for slot in &mut self.slots {
            slot.component.owner_depth_changed(depth);
        }
    }

    /// Dispose every component once and detach them all.
    pub fn dispose(&mut self) {
        for mut slot in self.slots.drain(..) {
            slot.component.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Health {
        hp: u32,
    }
    impl Component for Health {}

    struct Recorder {
        name: &'static str,
        enabled: bool,
        last_pos: Vec2,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                enabled: true,
                last_pos: Vec2::ZERO,
                log: Rc::clone(log),
            }
        }
    }

    impl Component for Recorder {
        fn enabled(&self) -> bool {
            self.enabled
        }
        fn update(&mut self, _dt: f32) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }
        fn dispose(&mut self) {
            self.log.borrow_mut().push(format!("dispose {}", self.name));
        }
        fn owner_moved(&mut self, position: Vec2) {
            self.last_pos = position;
        }
    }

    struct Marker;
    impl Component for Marker {
        fn update(&mut self, _dt: f32) {}
    }

    #[test]
    fn missing_component_is_none() {
        let reg = ComponentRegistry::new();
        assert!(reg.get::<Health>().is_none());
        assert!(!reg.contains::<Health>());
    }

    #[test]
    fn re_adding_overwrites_in_place() {
        let mut reg = ComponentRegistry::new();
        assert!(reg.add(Health { hp: 10 }).is_none());
        reg.add(Marker);
        let old = reg.add(Health { hp: 99 }).expect("previous instance returned");
        assert_eq!((*old).as_any().downcast_ref::<Health>().unwrap().hp, 10);

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get::<Health>().unwrap().hp, 99);
        let tags: Vec<_> = reg.tags().collect();
        assert_eq!(tags, vec![ComponentTag::of::<Health>(), ComponentTag::of::<Marker>()]);
    }

    #[test]
    fn update_skips_disabled_components() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reg = ComponentRegistry::new();
        reg.add(Recorder::new("rec", &log));
        reg.update(0.1);
        reg.get_mut::<Recorder>().unwrap().enabled = false;
        reg.update(0.1);
        assert_eq!(*log.borrow(), vec!["update rec"]);
    }

    #[test]
    fn owner_moves_propagate_and_dispose_empties() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reg = ComponentRegistry::new();
        reg.add(Recorder::new("rec", &log));
        reg.owner_moved(Vec2::new(5.0, 6.0));
        assert_eq!(reg.get::<Recorder>().unwrap().last_pos, Vec2::new(5.0, 6.0));

        reg.dispose();
        reg.dispose();
        assert!(reg.is_empty());
        assert_eq!(*log.borrow(), vec!["dispose rec"]);
    }

    #[test]
    fn remove_detaches_without_dispose() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reg = ComponentRegistry::new();
        reg.add(Recorder::new("rec", &log));
        assert!(reg.remove::<Recorder>().is_some());
        assert!(reg.remove::<Recorder>().is_none());
        assert!(log.borrow().is_empty());
    }
}
