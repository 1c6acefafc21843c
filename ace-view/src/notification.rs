//! Per-thread notification center for editor events.
//!
//! Observers register for a notification name, optionally narrowed to one
//! sender, and are called synchronously when a matching notification is
//! posted. Observers may post or (un)register while being called.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Posted by a view after its text changed.
pub const TEXT_DID_END_EDITING: &str = "ACETextDidEndEditingNotification";

/// Identifies the view that posted a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// A process-unique id for a new view.
    #[must_use]
    pub fn next() -> Self {
        thread_local! {
            static NEXT: Cell<u64> = const { Cell::new(1) };
        }
        NEXT.with(|next| {
            let id = next.get();
            next.set(id + 1);
            Self(id)
        })
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub name: String,
    pub sender: ViewId,
}

impl Notification {
    #[must_use]
    pub fn new(name: &str, sender: ViewId) -> Self {
        Self { name: name.to_string(), sender }
    }
}

/// Returned by [`NotificationCenter::add_observer`]; removes the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(u64);

struct Registration {
    token: ObserverToken,
    name: String,
    sender: Option<ViewId>,
    observer: Rc<dyn Fn(&Notification)>,
}

#[derive(Default)]
struct Registry {
    registrations: Vec<Registration>,
    next_token: u64,
}

/// A list of observers. Clones share the list.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    registry: Rc<RefCell<Registry>>,
}

impl NotificationCenter {
    /// A private center, separate from [`shared`](Self::shared).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current thread's default center.
    #[must_use]
    pub fn shared() -> Self {
        thread_local! {
            static SHARED: NotificationCenter = NotificationCenter::new();
        }
        SHARED.with(Clone::clone)
    }

    /// Calls `observer` for every `name` notification, from `sender` only
    /// when one is given.
    pub fn add_observer(
        &self,
        name: &str,
        sender: Option<ViewId>,
        observer: impl Fn(&Notification) + 'static,
    ) -> ObserverToken {
        let mut registry = self.registry.borrow_mut();
        registry.next_token += 1;
        let token = ObserverToken(registry.next_token);
        registry.registrations.push(Registration {
            token,
            name: name.to_string(),
            sender,
            observer: Rc::new(observer),
        });
        token
    }

    pub fn remove_observer(&self, token: ObserverToken) {
        self.registry.borrow_mut().registrations.retain(|registration| registration.token != token);
    }

    /// Delivers `notification` to the matching observers, in registration
    /// order.
    pub fn post(&self, notification: &Notification) {
        let observers: Vec<_> = self
            .registry
            .borrow()
            .registrations
            .iter()
            .filter(|registration| {
                registration.name == notification.name
                    && registration.sender.is_none_or(|sender| sender == notification.sender)
            })
            .map(|registration| Rc::clone(&registration.observer))
            .collect();
        log::trace!("posting {} from {} to {} observers", notification.name, notification.sender, observers.len());
        for observer in observers {
            observer(notification);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.registry.borrow().registrations.len()
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter").field("observers", &self.observer_count()).finish()
    }
}
