//! Observable state container contracts.
//!
//! A [`View`](crate::view::View) does not own its container; it binds to one
//! that lives elsewhere. Two shapes are supported:
//!
//! - [`Store`]: the trait a Rust container implements directly. Its contract:
//!   `get_state` returns the current state synchronously, `dispatch` submits
//!   an action, and `subscribe` registers a listener that is invoked
//!   synchronously after every state transition, returning an [`Unsubscribe`].
//! - [`StoreHandle`]: a duck-typed bundle of those entry points as closures,
//!   for containers that cannot implement the trait (scripting hosts, FFI).
//!   `dispatch` and `subscribe` are optional members; construction-time
//!   validation rejects handles that lack them.
//!
//! [`MemoryStore`] is the reference container: reducer-driven, fully
//! synchronous, suitable for tests and for embedders that do not bring their
//! own.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use sightline_core::Value;

/// Callback invoked after every state transition of a container.
pub type ChangeListener = Rc<dyn Fn()>;

/// Tears down a subscription when invoked. Dropping it without invoking
/// leaves the subscription in place.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// Cloneable handle to a container's dispatch entry point.
///
/// This is what delegated event callbacks receive: enough to submit actions,
/// nothing else.
#[derive(Clone)]
pub struct Dispatch(Rc<dyn Fn(Value)>);

impl Dispatch {
    /// Wrap a dispatch function.
    pub fn new(dispatch: impl Fn(Value) + 'static) -> Self {
        Self(Rc::new(dispatch))
    }

    /// Submit an action to the container.
    pub fn call(&self, action: Value) {
        (self.0)(action);
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch").finish_non_exhaustive()
    }
}

/// A synchronous observable state container.
pub trait Store {
    /// Current state snapshot.
    fn get_state(&self) -> Value;

    /// Submit an action. Listeners registered through [`Store::subscribe`]
    /// run synchronously before this returns.
    fn dispatch(&self, action: Value);

    /// Register a listener for state transitions. The returned
    /// [`Unsubscribe`] removes it when invoked.
    fn subscribe(&self, listener: ChangeListener) -> Unsubscribe;
}

/// Duck-typed bundle of entry points to an external container.
///
/// `get_state` is always present (a handle is useless without it) while
/// `dispatch` and `subscribe` are optional members, mirroring the shape check
/// a dynamic host would perform. [`View::new`](crate::view::View::new)
/// rejects handles where either is absent.
#[derive(Clone)]
pub struct StoreHandle {
    get_state: Rc<dyn Fn() -> Value>,
    dispatch: Option<Dispatch>,
    subscribe: Option<Rc<dyn Fn(ChangeListener) -> Unsubscribe>>,
}

impl StoreHandle {
    /// Handle with every entry point populated.
    pub fn new(
        get_state: impl Fn() -> Value + 'static,
        dispatch: Dispatch,
        subscribe: impl Fn(ChangeListener) -> Unsubscribe + 'static,
    ) -> Self {
        Self {
            get_state: Rc::new(get_state),
            dispatch: Some(dispatch),
            subscribe: Some(Rc::new(subscribe)),
        }
    }

    /// Handle that can only read state. It fails view validation; it exists
    /// to represent containers that are not observable.
    pub fn read_only(get_state: impl Fn() -> Value + 'static) -> Self {
        Self {
            get_state: Rc::new(get_state),
            dispatch: None,
            subscribe: None,
        }
    }

    /// Bridge a [`Store`] trait object into a fully-populated handle.
    #[must_use]
    pub fn from_store(store: Rc<dyn Store>) -> Self {
        let for_state = Rc::clone(&store);
        let for_dispatch = Rc::clone(&store);
        let for_subscribe = store;
        Self {
            get_state: Rc::new(move || for_state.get_state()),
            dispatch: Some(Dispatch::new(move |action| for_dispatch.dispatch(action))),
            subscribe: Some(Rc::new(move |listener| for_subscribe.subscribe(listener))),
        }
    }

    /// Whether both `dispatch` and `subscribe` are present.
    #[must_use]
    pub fn is_observable(&self) -> bool {
        self.dispatch.is_some() && self.subscribe.is_some()
    }

    /// Current container state.
    #[must_use]
    pub fn state(&self) -> Value {
        (self.get_state)()
    }

    pub(crate) fn state_fn(&self) -> Rc<dyn Fn() -> Value> {
        Rc::clone(&self.get_state)
    }

    /// Dispatch and subscribe entry points, when both are present.
    pub(crate) fn observable_parts(
        &self,
    ) -> Option<(Dispatch, Rc<dyn Fn(ChangeListener) -> Unsubscribe>)> {
        match (&self.dispatch, &self.subscribe) {
            (Some(dispatch), Some(subscribe)) => Some((dispatch.clone(), Rc::clone(subscribe))),
            _ => None,
        }
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("dispatch", &self.dispatch.is_some())
            .field("subscribe", &self.subscribe.is_some())
            .finish()
    }
}

/// Reducer applied by [`MemoryStore`]: previous state plus action, next state.
pub type Reducer = Box<dyn Fn(&Value, &Value) -> Value>;

/// Minimal reducer-driven observable container.
///
/// Fully synchronous: `dispatch` runs the reducer, replaces the state, and
/// notifies listeners in subscription order before returning.
pub struct MemoryStore {
    state: RefCell<Value>,
    reducer: Reducer,
    listeners: Rc<RefCell<Vec<(u64, ChangeListener)>>>,
    next_listener_id: Cell<u64>,
}

impl MemoryStore {
    /// Create a container with `initial` state and `reducer`.
    pub fn new(initial: Value, reducer: impl Fn(&Value, &Value) -> Value + 'static) -> Self {
        Self {
            state: RefCell::new(initial),
            reducer: Box::new(reducer),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
        }
    }

    /// A [`StoreHandle`] over this container.
    #[must_use]
    pub fn handle(self: &Rc<Self>) -> StoreHandle {
        StoreHandle::from_store(Rc::clone(self) as Rc<dyn Store>)
    }
}

impl Store for MemoryStore {
    fn get_state(&self) -> Value {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: Value) {
        let next = {
            let current = self.state.borrow();
            (self.reducer)(&current, &action)
        };
        *self.state.borrow_mut() = next;

        // Snapshot the listener list so listeners may subscribe/unsubscribe
        // re-entrantly without poisoning the borrow.
        let to_notify: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in to_notify {
            listener();
        }
    }

    fn subscribe(&self, listener: ChangeListener) -> Unsubscribe {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let listeners = Rc::clone(&self.listeners);
        Box::new(move || {
            listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != id);
        })
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("state", &self.state.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::value;

    fn counter_store() -> MemoryStore {
        MemoryStore::new(value!({ "count": 0 }), |state, action| {
            let current = state.get("count").and_then(Value::as_number).unwrap_or(0.0);
            let step = action.get("step").and_then(Value::as_number).unwrap_or(0.0);
            value!({ "count": (current + step) })
        })
    }

    #[test]
    fn dispatch_runs_reducer_synchronously() {
        let store = counter_store();
        store.dispatch(value!({ "step": 2 }));
        store.dispatch(value!({ "step": 3 }));
        assert_eq!(store.get_state().get("count"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn listeners_fire_after_every_transition() {
        let store = counter_store();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let _unsub = store.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        store.dispatch(value!({ "step": 1 }));
        store.dispatch(value!({ "step": 1 }));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn unsubscribe_removes_the_listener() {
        let store = counter_store();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let unsub = store.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        store.dispatch(value!({ "step": 1 }));
        unsub();
        store.dispatch(value!({ "step": 1 }));
        assert_eq!(seen.get(), 1, "listener must not fire after unsubscribe");
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let store = counter_store();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            let _unsub = store.subscribe(Rc::new(move || order.borrow_mut().push(tag)));
        }
        store.dispatch(value!({ "step": 1 }));
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn handle_bridges_all_entry_points() {
        let store = Rc::new(counter_store());
        let handle = store.handle();
        assert!(handle.is_observable());

        let (dispatch, _subscribe) = handle.observable_parts().unwrap();
        dispatch.call(value!({ "step": 4 }));
        assert_eq!(handle.state().get("count"), Some(&Value::Number(4.0)));
    }

    #[test]
    fn read_only_handles_are_not_observable() {
        let handle = StoreHandle::read_only(|| value!({}));
        assert!(!handle.is_observable());
        assert_eq!(handle.state(), value!({}));
    }
}
