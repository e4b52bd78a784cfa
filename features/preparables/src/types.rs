use std::{any::Any, fmt::Debug, sync::Arc};

use crate::errors::InjectError;

/// All boxed errors must be Send + Sync
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything which can be resolved and injected.
///
/// Resolved values may be cached and handed to several preparables, possibly on
/// different threads, so they need to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Registered name of a requirement variant
///
/// Resolvers are looked up by tag, so two requirement types must never share one.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tag(&'static str);
impl Tag {
    pub const fn new(name: &'static str) -> Self {
        Tag(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}
impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// A resolved value, type erased
///
/// Cloning is cheap - all clones share the same value.
#[derive(Clone)]
pub struct Resolved {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync + 'static>,
}
impl Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Resolved").field(&self.type_name).finish()
    }
}

impl Resolved {
    pub fn new<T: Injectable>(value: T) -> Self {
        Resolved {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Name of the type held by this value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Injectable>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrows the value if it is a `T`
    pub fn downcast_ref<T: Injectable>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns a shared handle to the value
    ///
    /// Fails with [InjectError::TypeMismatch] if the value is not a `T`.
    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, InjectError> {
        Arc::downcast::<T>(self.value.clone()).map_err(|_| InjectError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            actual: self.type_name,
        })
    }

    /// Returns a copy of the value - for small values like numbers or strings
    pub fn get<T: Injectable + Clone>(&self) -> Result<T, InjectError> {
        self.downcast_ref::<T>()
            .cloned()
            .ok_or(InjectError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                actual: self.type_name,
            })
    }

    /// True if both values share the same allocation
    pub fn ptr_eq(&self, other: &Resolved) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}
