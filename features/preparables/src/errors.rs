use thiserror::Error;

use crate::types::{DynError, Tag};

/// Errors aborting a [crate::Preparer::prepare] call
#[derive(Error, Debug)]
pub enum PrepareError {
    /// No resolver is registered for the requirement's tag
    #[error("No resolver registered for '{tag}', required by '{key}'")]
    UnresolvedType { tag: Tag, key: String },
    /// The resolver failed - nothing was cached
    #[error("Resolver for '{tag}' failed on '{key}' - error: {error}")]
    ResolveFailed {
        tag: Tag,
        key: String,
        #[source]
        error: ResolveError,
    },
    /// The preparable rejected a value
    #[error("Injecting '{key}' failed - error: {error}")]
    Inject {
        key: String,
        #[source]
        error: InjectError,
    },
}

/// Errors while resolving a single requirement
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The resolver was handed a requirement of a type it does not handle.
    ///
    /// Happens when two requirement types declare the same tag.
    #[error("Resolver for '{tag}' expected a '{expected}' requirement")]
    RequirementMismatch { tag: Tag, expected: &'static str },
    /// Error returned by the resolver itself
    #[error("{0}")]
    Failed(DynError),
}

/// Errors a [crate::Preparable] reports on injection
#[derive(Error, Debug)]
pub enum InjectError {
    /// The key was never declared
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
    #[error("Expected a value of type '{expected}' but got '{actual}'")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// Generic error during injection
    #[error("Error during injection: {0}")]
    Other(DynError),
}

/// Errors when registering resolvers
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    #[error("A resolver for '{0}' is already registered")]
    AlreadyRegistered(Tag),
}
