//! Host element tree contracts.
//!
//! The binding layer never owns a real document: it talks to whatever host
//! tree the embedder provides through two small traits. [`Element`] is the
//! subtree root a [`View`](crate::view::View) attaches native listeners to;
//! [`EventTarget`] is anything an event can originate from and answers
//! selector-match queries.
//!
//! Listener identity is `Rc` allocation identity: removing a listener means
//! passing back the same [`EventListener`] handle that was added, the way a
//! host DOM removes a listener by function reference.

use std::fmt;
use std::rc::Rc;

/// A native event listener installed on an [`Element`].
pub type EventListener = Rc<dyn Fn(&Event)>;

/// Something an event can originate from.
pub trait EventTarget {
    /// Whether this target matches a CSS-style selector.
    ///
    /// Implementations must answer `false` for selectors they cannot parse;
    /// an unmatched or malformed selector is normal, never an error.
    fn matches(&self, selector: &str) -> bool;
}

/// The root element of a bound subtree.
pub trait Element {
    /// Tag name of the element (`"DIV"`, `"BUTTON"`, …). A real element
    /// always has one; construction validation rejects empty tag names.
    fn tag_name(&self) -> &str;

    /// Install a native listener for `event_type`.
    fn add_event_listener(&self, event_type: &str, listener: EventListener);

    /// Remove a previously installed listener, identified by allocation
    /// (`Rc::ptr_eq`). Unknown listeners are ignored.
    fn remove_event_listener(&self, event_type: &str, listener: &EventListener);
}

/// A native event in flight: its type plus the target it originated from.
#[derive(Clone)]
pub struct Event {
    event_type: String,
    target: Rc<dyn EventTarget>,
}

impl Event {
    /// Create an event of `event_type` originating from `target`.
    pub fn new(event_type: impl Into<String>, target: Rc<dyn EventTarget>) -> Self {
        Self {
            event_type: event_type.into(),
            target,
        }
    }

    /// The event type this event was fired as.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The target the event originated from.
    #[must_use]
    pub fn target(&self) -> &dyn EventTarget {
        self.target.as_ref()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}
