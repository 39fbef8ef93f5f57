#![forbid(unsafe_code)]

//! Selector-delegated events and store-change bindings for host element trees.
//!
//! Sightline connects one element subtree to one external observable state
//! container. It does exactly two things:
//!
//! - [`View::delegate`]: route events fired inside the subtree to handlers
//!   registered per (event type, selector) pair, installing at most one
//!   native listener per event type.
//! - [`View::listen`]: run callbacks when the value at a dot-delimited path
//!   of container state changes between notifications, compared shallowly
//!   against the previously observed snapshot.
//!
//! It renders nothing, owns no reducer logic, and schedules nothing: every
//! callback runs synchronously inside the event dispatch or the container
//! notification that triggered it.
//!
//! # Architecture
//!
//! The two external collaborators are abstracted at the seam:
//!
//! - [`Element`] / [`EventTarget`] describe the host tree: an element that
//!   can attach and detach native listeners, and targets that answer
//!   selector-match queries.
//! - [`StoreHandle`] is a duck-typed bundle of entry points to the container
//!   (`get_state` / `dispatch` / `subscribe`). Containers implementing the
//!   [`Store`] trait bridge in via [`StoreHandle::from_store`]; anything else
//!   (FFI, scripting hosts) can populate a handle by closure.
//!
//! Registries and the retained state snapshot are `Rc<RefCell<…>>` shared
//! between the [`View`] and the closures it installs; the crate is
//! single-threaded by contract.
//!
//! # Invariants
//!
//! 1. At most one native listener is attached per event type, no matter how
//!    many selectors are delegated under it.
//! 2. Re-registering an existing (event type, selector) pair keeps the
//!    original callback.
//! 3. Change detection always compares against the state observed at the
//!    previous notification (or at construction, for the first one), and
//!    replaces the snapshot unconditionally after every pass.
//! 4. Registry borrows are released before user callbacks run, so callbacks
//!    may re-enter [`View::delegate`] and [`View::listen`].

pub mod dom;
pub mod error;
pub mod store;
pub mod testing;
pub mod view;

pub use dom::{Element, Event, EventListener, EventTarget};
pub use error::ConfigurationError;
pub use sightline_core::{
    Value, get_path, get_path_or, same_number, same_value, shallow_equal, value,
};
pub use store::{ChangeListener, Dispatch, MemoryStore, Store, StoreHandle, Unsubscribe};
pub use view::{ChangeCallback, DelegateCallback, View, ViewConfig};
