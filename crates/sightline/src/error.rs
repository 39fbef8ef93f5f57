//! Construction-time errors.
//!
//! The only fallible operation in the crate is building a [`View`]; every
//! later operation either completes or silently does nothing (unmatched
//! selectors and unresolved paths are normal, not errors).
//!
//! [`View`]: crate::view::View

/// Why a [`View`](crate::view::View) could not be constructed.
///
/// All three failures are fatal and synchronous; a `View` is never returned
/// partially built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The `element` option was absent or does not look like an element
    /// (no tag name).
    InvalidElement,
    /// The `store` option was absent.
    MissingStore,
    /// The `store` option is present but does not expose both `dispatch`
    /// and `subscribe`.
    IncompatibleStore,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidElement => write!(f, "`element` must be an element"),
            Self::MissingStore => write!(f, "`store` must be provided"),
            Self::IncompatibleStore => {
                write!(f, "`store` must be an observable store with dispatch and subscribe")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
