use crate::{Listener, Scope, ViewEvent};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Live listener registrations, reference counted per listener.
#[derive(Debug, Default)]
struct Registry {
    listeners: BTreeMap<Listener, usize>,
}

/// Routes raw events to whichever view holds a live subscription for them.
///
/// Canvas-scoped listeners only receive events while the cursor hovers the
/// canvas; document and window listeners receive everything. Lives on the UI
/// thread only.
#[derive(Debug, Default)]
pub struct InputRouter {
    registry: Rc<RefCell<Registry>>,
    hovering: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the guard is dropped.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        *self
            .registry
            .borrow_mut()
            .listeners
            .entry(listener)
            .or_insert(0) += 1;
        tracing::trace!(?listener, "listener added");
        Subscription {
            listener,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Register every listener a view needs.
    pub fn subscribe_all(&self) -> Vec<Subscription> {
        Listener::ALL.iter().map(|&l| self.subscribe(l)).collect()
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.registry
            .borrow()
            .listeners
            .get(&listener)
            .is_some_and(|&n| n > 0)
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Record whether the cursor is over the canvas.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Whether `event` should be delivered.
    pub fn route(&self, event: &ViewEvent) -> bool {
        let listener = event.listener();
        if !self.is_listening(listener) {
            return false;
        }
        match listener.scope() {
            Scope::Canvas => self.hovering,
            Scope::Document | Scope::Window => true,
        }
    }
}

/// Guard for one registered listener. Dropping it unregisters the listener.
#[derive(Debug)]
#[must_use = "dropping a subscription unregisters the listener"]
pub struct Subscription {
    listener: Listener,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn listener(&self) -> Listener {
        self.listener
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        if let Some(count) = registry.listeners.get_mut(&self.listener) {
            *count -= 1;
            if *count == 0 {
                registry.listeners.remove(&self.listener);
            }
        }
        tracing::trace!(listener = ?self.listener, "listener removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WheelDelta;
    use glam::Vec2;

    #[test]
    fn nothing_routes_without_subscriptions() {
        let mut router = InputRouter::new();
        router.set_hovering(true);
        assert!(!router.route(&ViewEvent::PointerUp));
        assert!(!router.route(&ViewEvent::PointerDown(Vec2::ZERO)));
    }

    #[test]
    fn dropping_guard_unregisters() {
        let router = InputRouter::new();
        let sub = router.subscribe(Listener::PointerUp);
        assert!(router.route(&ViewEvent::PointerUp));
        drop(sub);
        assert!(!router.route(&ViewEvent::PointerUp));
        assert_eq!(router.listener_count(), 0);
    }

    #[test]
    fn canvas_scope_requires_hover() {
        let mut router = InputRouter::new();
        let _subs = router.subscribe_all();
        let wheel = ViewEvent::Wheel(WheelDelta::Standard(1.0));
        let down = ViewEvent::PointerDown(Vec2::ZERO);

        assert!(!router.route(&wheel));
        assert!(!router.route(&down));
        // Document and window listeners ignore hover.
        assert!(router.route(&ViewEvent::PointerMove(Vec2::ZERO)));
        assert!(router.route(&ViewEvent::PointerUp));
        assert!(router.route(&ViewEvent::Resize {
            width: 1,
            height: 1
        }));

        router.set_hovering(true);
        assert!(router.route(&wheel));
        assert!(router.route(&down));
    }

    #[test]
    fn overlapping_subscriptions_are_counted() {
        let router = InputRouter::new();
        let a = router.subscribe(Listener::Resize);
        let b = router.subscribe(Listener::Resize);
        drop(a);
        assert!(router.is_listening(Listener::Resize));
        drop(b);
        assert!(!router.is_listening(Listener::Resize));
    }

    #[test]
    fn guard_outliving_router_is_harmless() {
        let router = InputRouter::new();
        let sub = router.subscribe(Listener::Wheel);
        drop(router);
        assert_eq!(sub.listener(), Listener::Wheel);
        drop(sub);
    }

    #[test]
    fn subscribe_all_covers_every_listener() {
        let router = InputRouter::new();
        let subs = router.subscribe_all();
        assert_eq!(subs.len(), 5);
        for l in Listener::ALL {
            assert!(router.is_listening(l));
        }
    }
}
