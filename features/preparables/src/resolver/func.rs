use std::marker::PhantomData;

use crate::{
    requirement::Requirement,
    resolver::Resolver,
    types::{DynError, Injectable},
};

/// A [Resolver] backed by a closure, see [resolver_fn]
pub struct FnResolver<R, T, E, F> {
    function: F,
    _types: PhantomData<fn(&R) -> Result<T, E>>,
}

/// Turns a closure into a resolver
///
/// ```
/// use preparables::{resolver_fn, Preparer, Requirement, Tag};
///
/// struct Double(String, u32);
/// impl Requirement for Double {
///     const TAG: Tag = Tag::new("double");
///     fn key(&self) -> &str {
///         &self.0
///     }
/// }
///
/// let preparer = Preparer::builder()
///     .add_resolver(resolver_fn(|r: &Double| Ok::<_, std::convert::Infallible>(r.1 * 2)))
///     .build()
///     .unwrap();
/// assert!(preparer.registry().contains(Tag::new("double")));
/// ```
pub fn resolver_fn<R, T, E, F>(function: F) -> FnResolver<R, T, E, F>
where
    R: Requirement,
    T: Injectable,
    E: Into<DynError> + 'static,
    F: Fn(&R) -> Result<T, E> + Send + Sync + 'static,
{
    FnResolver {
        function,
        _types: PhantomData,
    }
}

impl<R, T, E, F> Resolver for FnResolver<R, T, E, F>
where
    R: Requirement,
    T: Injectable,
    E: Into<DynError> + 'static,
    F: Fn(&R) -> Result<T, E> + Send + Sync + 'static,
{
    type Requirement = R;
    type Output = T;

    fn resolve(&self, requirement: &R) -> Result<T, impl Into<DynError>> {
        (self.function)(requirement)
    }
}
