//! Test doubles for exercising bindings without a host tree.
//!
//! [`StubElement`] records the native listeners a view installs and can fire
//! synthetic events at them; [`StubTarget`] answers selector matches from an
//! explicit allow-list (anything else, malformed selectors included, simply
//! never matches). Public so downstream crates can test their own bindings
//! the same way this crate tests itself.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Element, Event, EventListener, EventTarget};

/// Event target that matches exactly the selectors it was built with.
#[derive(Debug)]
pub struct StubTarget {
    selectors: Vec<String>,
}

impl StubTarget {
    /// Target matching every selector in `selectors`.
    #[must_use]
    pub fn matching(selectors: &[&str]) -> Rc<Self> {
        Rc::new(Self {
            selectors: selectors.iter().map(|s| (*s).to_string()).collect(),
        })
    }

    /// Target matching nothing at all.
    #[must_use]
    pub fn inert() -> Rc<Self> {
        Self::matching(&[])
    }
}

impl EventTarget for StubTarget {
    fn matches(&self, selector: &str) -> bool {
        self.selectors.iter().any(|known| known == selector)
    }
}

/// Element double that records listener registrations.
pub struct StubElement {
    tag_name: String,
    listeners: RefCell<Vec<(String, EventListener)>>,
}

impl StubElement {
    /// Element with the given tag name. An empty tag name builds a stub that
    /// fails view validation, for exercising the error path.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Number of native listeners currently installed for `event_type`.
    #[must_use]
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(listener_type, _)| listener_type == event_type)
            .count()
    }

    /// Total number of native listeners currently installed.
    #[must_use]
    pub fn total_listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Fire a synthetic event of `event_type` originating from `target`,
    /// invoking every listener installed for that type.
    pub fn fire(&self, event_type: &str, target: Rc<dyn EventTarget>) {
        let event = Event::new(event_type, target);
        self.dispatch_event(&event);
    }

    /// Dispatch a prebuilt event to the listeners of its type.
    pub fn dispatch_event(&self, event: &Event) {
        // Clone out of the registration list first: listeners may add or
        // remove listeners while running.
        let to_fire: Vec<EventListener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(listener_type, _)| listener_type == event.event_type())
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in to_fire {
            listener(event);
        }
    }
}

impl Element for StubElement {
    fn tag_name(&self) -> &str {
        &self.tag_name
    }

    fn add_event_listener(&self, event_type: &str, listener: EventListener) {
        self.listeners
            .borrow_mut()
            .push((event_type.to_string(), listener));
    }

    fn remove_event_listener(&self, event_type: &str, listener: &EventListener) {
        self.listeners.borrow_mut().retain(|(listener_type, known)| {
            !(listener_type == event_type && Rc::ptr_eq(known, listener))
        });
    }
}

impl std::fmt::Debug for StubElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubElement")
            .field("tag_name", &self.tag_name)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
