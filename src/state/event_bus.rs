//! Event Bus - Per-tree publish/subscribe registry.
//!
//! Subscribers register a callback for an event type and get back a
//! [`SubscriptionId`] that removes it later. Publishing runs every current
//! subscriber of that type synchronously, to completion, before returning.
//!
//! The bus is a cheap `Clone` handle over shared state. Callbacks may
//! subscribe, unsubscribe or publish again while being dispatched: the
//! subscriber list is snapshotted before any callback runs.
//!
//! Fan-out order among subscribers of the same type is not part of the
//! contract.
//!
//! # Example
//!
//! ```ignore
//! use ember_ui::state::event_bus::{EventBus, Event, WINDOW_RESIZE_EVENT};
//!
//! let bus = EventBus::new();
//! let id = bus.subscribe(WINDOW_RESIZE_EVENT, |event| {
//!     if let Event::WindowResize(resize) = event {
//!         println!("{:?} -> {:?}", resize.old_size, resize.new_size);
//!     }
//! });
//!
//! bus.unsubscribe(id);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use taffy::Size;

use super::keyboard::KeyAction;

// =============================================================================
// EVENTS
// =============================================================================

/// Published once per frame with that frame's aggregated key state.
pub const KEY_ACTION_EVENT: &str = "gui:keyaction";

/// Published once per frame in which the viewport changed size.
pub const WINDOW_RESIZE_EVENT: &str = "gui:window-resize";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowResize {
    pub old_size: Size<f32>,
    pub new_size: Size<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    KeyAction(KeyAction),
    WindowResize(WindowResize),
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

pub type EventCallback = Rc<dyn Fn(&Event)>;

// =============================================================================
// REGISTRY
// =============================================================================

struct Registry {
    callbacks: HashMap<String, BTreeMap<SubscriptionId, EventCallback>>,
    next_id: u64,
}

impl Registry {
    fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[derive(Clone)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Register `callback` for `event_type`.
    pub fn subscribe<F>(&self, event_type: &str, callback: F) -> SubscriptionId
    where
        F: Fn(&Event) + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id();
        reg.callbacks
            .entry(event_type.to_string())
            .or_default()
            .insert(id, Rc::new(callback));
        tracing::trace!(event_type, id = id.0, "subscribed");
        id
    }

    /// Run every subscriber of `event_type` with `event`.
    ///
    /// # Returns
    ///
    /// The number of callbacks that ran.
    pub fn publish(&self, event_type: &str, event: &Event) -> usize {
        let callbacks: Vec<EventCallback> = {
            let reg = self.registry.borrow();
            match reg.callbacks.get(event_type) {
                Some(callbacks) => callbacks.values().cloned().collect(),
                None => return 0,
            }
        };

        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Remove a subscription.
    ///
    /// # Returns
    ///
    /// True if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut reg = self.registry.borrow_mut();
        let mut removed = false;
        reg.callbacks.retain(|_, callbacks| {
            removed |= callbacks.remove(&id).is_some();
            !callbacks.is_empty()
        });
        removed
    }

    /// Number of live subscriptions for `event_type`.
    pub fn subscriber_count(&self, event_type: &str) -> usize {
        self.registry
            .borrow()
            .callbacks
            .get(event_type)
            .map_or(0, BTreeMap::len)
    }
}
