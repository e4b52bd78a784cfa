use std::any::type_name;

use crate::{
    errors::ResolveError,
    requirement::{DynRequirement, Requirement},
    types::{DynError, Injectable, Resolved, Tag},
};

pub mod func;

/// Resolves one requirement variant
///
/// A resolver for a cacheable requirement is called at most once per cache key
/// and [crate::Preparer], so it must not rely on being called for every preparable.
pub trait Resolver: Send + Sync + 'static {
    /// The requirement variant this resolver handles
    type Requirement: Requirement;
    /// The resolved value, injected as a [Resolved]
    type Output: Injectable;

    /// Produces the value for the given requirement
    fn resolve(
        &self,
        requirement: &Self::Requirement,
    ) -> Result<Self::Output, impl Into<DynError>>;
}

/// Wrapper Trait for resolvers, resolving type erased requirements
pub trait DynResolver: Send + Sync {
    /// Tag of the requirement variant handled
    fn tag(&self) -> Tag;

    /// Name of the concrete requirement type handled
    fn requirement_type(&self) -> &'static str;

    /// Downcasts the requirement and forwards it to the specific resolver
    fn resolve(&self, requirement: &dyn DynRequirement) -> Result<Resolved, ResolveError>;
}
// Impl DynResolver for any Resolver
impl<SpecificResolver: Resolver> DynResolver for SpecificResolver {
    fn tag(&self) -> Tag {
        <SpecificResolver::Requirement as Requirement>::TAG
    }

    fn requirement_type(&self) -> &'static str {
        type_name::<SpecificResolver::Requirement>()
    }

    fn resolve(&self, requirement: &dyn DynRequirement) -> Result<Resolved, ResolveError> {
        let Some(requirement) = requirement
            .as_any()
            .downcast_ref::<SpecificResolver::Requirement>()
        else {
            return Err(ResolveError::RequirementMismatch {
                tag: requirement.tag(),
                expected: type_name::<SpecificResolver::Requirement>(),
            });
        };

        // Forward the call to the specific implementation
        <SpecificResolver as Resolver>::resolve(self, requirement)
            .map(Resolved::new)
            .map_err(|e| ResolveError::Failed(e.into()))
    }
}
