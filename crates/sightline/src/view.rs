//! The `View`: one element subtree bound to one observable container.
//!
//! Construction wires two things and nothing else: a change-detector
//! subscription on the container, and (lazily, as [`View::delegate`] is
//! called) at most one native listener per event type on the element.
//! Everything after that is bookkeeping shared between the `View` and the
//! closures it installed.
//!
//! # Invariants
//!
//! 1. One native listener per event type, installed on first delegation of
//!    that type and only re-installed after [`View::undelegate_all`].
//! 2. A (event type, selector) pair registers once; later registrations for
//!    the same pair are no-ops and the original callback is retained.
//! 3. The snapshot compared against is the state observed at the previous
//!    container notification (or at construction for the first one), and is
//!    replaced unconditionally after every pass.
//! 4. No registry borrow is held while a user callback runs.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Invalid construction options | [`ConfigurationError`], no partial `View` |
//! | Event target matches no selector | nothing fires (normal) |
//! | Listened path does not resolve | callback sees `None` on that side |
//! | `undelegate_all` with nothing delegated | no-op |

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use sightline_core::{Value, get_path, shallow_equal};

use crate::dom::{Element, Event, EventListener};
use crate::error::ConfigurationError;
use crate::store::{ChangeListener, Dispatch, StoreHandle};

/// Callback for a delegated event: receives the container's dispatch handle
/// and the native event.
pub type DelegateCallback = Rc<dyn Fn(&Dispatch, &Event)>;

/// Callback for a state change at a listened path: receives the value before
/// and after the transition. `None` means the path did not resolve on that
/// side (distinct from a present `Value::Null`).
pub type ChangeCallback = Rc<dyn Fn(Option<&Value>, Option<&Value>)>;

/// Per event type, the delegated (selector, callback) pairs in registration
/// order.
type ActionRegistry = AHashMap<String, Vec<(String, DelegateCallback)>>;

/// Per path, the change callbacks in registration order.
type ListenerRegistry = AHashMap<String, Vec<ChangeCallback>>;

/// Construction options for a [`View`].
///
/// Both fields are required; [`View::new`] reports whichever is missing or
/// malformed via [`ConfigurationError`].
#[derive(Default)]
pub struct ViewConfig {
    /// Root element of the bound subtree.
    pub element: Option<Rc<dyn Element>>,
    /// Handle to the observable state container.
    pub store: Option<StoreHandle>,
}

impl ViewConfig {
    /// Options with both collaborators supplied.
    pub fn new(element: Rc<dyn Element>, store: StoreHandle) -> Self {
        Self {
            element: Some(element),
            store: Some(store),
        }
    }
}

/// Binds a DOM-like subtree to an observable state container.
///
/// See the [crate docs](crate) for the overall model. A `View` owns its
/// registries exclusively; it is single-threaded by contract and all
/// callbacks run synchronously inside the event dispatch or container
/// notification that triggered them.
pub struct View {
    element: Rc<dyn Element>,
    store: StoreHandle,
    dispatch: Dispatch,
    actions: Rc<RefCell<ActionRegistry>>,
    listeners: Rc<RefCell<ListenerRegistry>>,
    /// Native listeners this view installed, one entry per event type.
    /// Private bookkeeping; never exposed.
    attached: RefCell<Vec<(String, EventListener)>>,
}

impl View {
    /// Build a view over `config.element` bound to `config.store`.
    ///
    /// Validation order: the element must be present and element-like (a
    /// non-empty tag name), the store must be present, and the store must
    /// expose both dispatch and subscribe. On success one change-detector
    /// subscription is created on the container; it persists for the life of
    /// the container; there is no automatic unsubscription.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] naming the offending option.
    pub fn new(config: ViewConfig) -> Result<Self, ConfigurationError> {
        let ViewConfig { element, store } = config;

        let element = match element {
            Some(element) if !element.tag_name().is_empty() => element,
            _ => return Err(ConfigurationError::InvalidElement),
        };
        let store = store.ok_or(ConfigurationError::MissingStore)?;
        let Some((dispatch, subscribe)) = store.observable_parts() else {
            return Err(ConfigurationError::IncompatibleStore);
        };

        let listeners: Rc<RefCell<ListenerRegistry>> =
            Rc::new(RefCell::new(ListenerRegistry::default()));

        // The detector captures the state observed right now; the first
        // notification compares against construction-time state.
        let detector = change_detector(store.state_fn(), Rc::clone(&listeners), store.state());
        // The returned unsubscriber is intentionally discarded: releasing the
        // subscription is outside this view's lifecycle contract.
        let _ = subscribe(detector);

        Ok(Self {
            element,
            store,
            dispatch,
            actions: Rc::new(RefCell::new(ActionRegistry::default())),
            listeners,
            attached: RefCell::new(Vec::new()),
        })
    }

    /// Root element this view is bound to.
    #[must_use]
    pub fn element(&self) -> &Rc<dyn Element> {
        &self.element
    }

    /// Handle to the bound container.
    #[must_use]
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Register `callback` for events of `event_type` whose target matches
    /// `selector`.
    ///
    /// The first delegation of an event type installs the native listener;
    /// later ones reuse it. Re-registering an existing (event type, selector)
    /// pair is a no-op and the original callback is retained.
    pub fn delegate(
        &self,
        event_type: &str,
        selector: &str,
        callback: impl Fn(&Dispatch, &Event) + 'static,
    ) {
        {
            let mut actions = self.actions.borrow_mut();
            let entries = actions.entry(event_type.to_string()).or_default();
            if entries.iter().any(|(existing, _)| existing == selector) {
                return;
            }
            entries.push((selector.to_string(), Rc::new(callback)));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(event_type, selector, "registered delegated handler");

        self.ensure_actionable(event_type);
    }

    /// Remove every native listener this view installed and forget all
    /// delegations. Idempotent; [`View::delegate`] works again afterwards,
    /// reinstalling native listeners lazily.
    pub fn undelegate_all(&self) {
        let attached: Vec<(String, EventListener)> =
            self.attached.borrow_mut().drain(..).collect();
        for (event_type, listener) in &attached {
            self.element.remove_event_listener(event_type, listener);
        }
        self.actions.borrow_mut().clear();

        #[cfg(feature = "tracing")]
        tracing::debug!(removed = attached.len(), "undelegated all event listeners");
    }

    /// Register `callback` to run when the value at dot-delimited `path`
    /// changes between container notifications.
    ///
    /// Multiple callbacks per path are permitted (duplicates included) and
    /// fire in registration order.
    pub fn listen(&self, path: &str, callback: impl Fn(Option<&Value>, Option<&Value>) + 'static) {
        self.listeners
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push(Rc::new(callback));

        #[cfg(feature = "tracing")]
        tracing::trace!(path, "registered state change listener");
    }

    /// Whether a native listener is currently installed for `event_type`.
    #[must_use]
    pub fn is_actionable(&self, event_type: &str) -> bool {
        self.attached
            .borrow()
            .iter()
            .any(|(attached_type, _)| attached_type == event_type)
    }

    /// Whether a callback is registered for the (event type, selector) pair.
    #[must_use]
    pub fn has_delegation(&self, event_type: &str, selector: &str) -> bool {
        self.actions
            .borrow()
            .get(event_type)
            .is_some_and(|entries| entries.iter().any(|(existing, _)| existing == selector))
    }

    /// Number of change callbacks registered for `path`.
    #[must_use]
    pub fn listener_count(&self, path: &str) -> usize {
        self.listeners
            .borrow()
            .get(path)
            .map_or(0, Vec::len)
    }

    /// Install the native listener for `event_type` unless one is already
    /// attached.
    fn ensure_actionable(&self, event_type: &str) {
        let mut attached = self.attached.borrow_mut();
        if attached
            .iter()
            .any(|(attached_type, _)| attached_type == event_type)
        {
            return;
        }

        let listener = self.event_listener(event_type);
        self.element
            .add_event_listener(event_type, Rc::clone(&listener));
        attached.push((event_type.to_string(), listener));

        #[cfg(feature = "tracing")]
        tracing::debug!(event_type, "installed native event listener");
    }

    /// The single native listener for `event_type`: scans the registered
    /// (selector, callback) pairs and fires every one whose selector matches
    /// the event target, in registration order.
    fn event_listener(&self, event_type: &str) -> EventListener {
        let actions = Rc::clone(&self.actions);
        let dispatch = self.dispatch.clone();
        let event_type = event_type.to_string();

        Rc::new(move |event: &Event| {
            // Clone the entry list out of the registry so callbacks can
            // re-enter `delegate` without hitting an active borrow.
            let entries: Vec<(String, DelegateCallback)> =
                match actions.borrow().get(&event_type) {
                    Some(entries) => entries.clone(),
                    None => return,
                };

            let target = event.target();
            for (selector, callback) in &entries {
                if target.matches(selector) {
                    callback(&dispatch, event);
                }
            }
        })
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("tag_name", &self.element.tag_name())
            .field("actionable", &self.attached.borrow().len())
            .field("listened_paths", &self.listeners.borrow().len())
            .finish()
    }
}

/// Build the container subscription that performs change detection.
///
/// Each notification reads the new state, resolves every listened path in
/// both the retained snapshot and the new state, fires callbacks for paths
/// whose values are not shallow-equal, and finally replaces the snapshot
/// unconditionally, even when nothing changed.
fn change_detector(
    get_state: Rc<dyn Fn() -> Value>,
    listeners: Rc<RefCell<ListenerRegistry>>,
    initial: Value,
) -> ChangeListener {
    let snapshot = RefCell::new(initial);

    Rc::new(move || {
        let next = get_state();
        let previous = snapshot.borrow().clone();

        // Snapshot the registry so callbacks can call `listen` re-entrantly.
        let registered: Vec<(String, Vec<ChangeCallback>)> = listeners
            .borrow()
            .iter()
            .map(|(path, callbacks)| (path.clone(), callbacks.clone()))
            .collect();

        for (path, callbacks) in &registered {
            let old_value = get_path(&previous, path);
            let new_value = get_path(&next, path);

            if !resolved_equal(old_value, new_value) {
                #[cfg(feature = "tracing")]
                tracing::trace!(path = %path, "state changed at listened path");

                for callback in callbacks {
                    callback(old_value, new_value);
                }
            }
        }

        *snapshot.borrow_mut() = next;
    })
}

/// Shallow equality lifted over resolution results: two unresolved sides are
/// equal, an unresolved side never equals a resolved one.
fn resolved_equal(old: Option<&Value>, new: Option<&Value>) -> bool {
    match (old, new) {
        (None, None) => true,
        (Some(a), Some(b)) => shallow_equal(a, b),
        _ => false,
    }
}
