//! Viewport publish/subscribe with handle-scoped lifetimes.
//!
//! Subscriptions release themselves when their handle drops, so pane
//! teardown cannot leave a dangling callback behind.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::domain::PaneViewport;

pub type ViewportHandler = Box<dyn FnMut(&PaneViewport)>;

struct RegistryInner {
    next_id: u64,
    entries: Vec<(u64, ViewportHandler)>,
}

pub struct ViewportRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

/// Keeps one subscription alive. Dropping it unsubscribes.
pub struct SubscriptionHandle {
    id: u64,
    inner: Weak<RefCell<RegistryInner>>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Default for ViewportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportRegistry {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, handler: ViewportHandler) -> SubscriptionHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, handler));

        SubscriptionHandle {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Invoke every live handler with the viewport.
    /// Handlers must not subscribe/unsubscribe from inside the callback.
    pub fn broadcast(&self, viewport: &PaneViewport) {
        let mut inner = self.inner.borrow_mut();
        for (_, handler) in inner.entries.iter_mut() {
            handler(viewport);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}
