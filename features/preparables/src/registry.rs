use std::{collections::BTreeMap, fmt::Debug};

use crate::{
    errors::RegistryError,
    resolver::{DynResolver, Resolver},
    types::Tag,
};

/// A registry of all resolvers.
///
/// Resolvers are registered and retrieved by the [Tag] of the requirement they handle.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: BTreeMap<Tag, Box<dyn DynResolver>>,
}
impl Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (tag, resolver) in &self.resolvers {
            map.entry(&tag.as_str(), &resolver.requirement_type());
        }
        map.finish()
    }
}

impl ResolverRegistry {
    /// Initializes an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolver to the registry.
    ///
    /// If a resolver for the same tag is already registered, it will return a
    /// [`RegistryError`] and keep the existing one
    pub fn add_resolver<R: Resolver>(&mut self, resolver: R) -> Result<&mut Self, RegistryError> {
        self.add_dyn(Box::new(resolver))
    }

    /// Can optionally add a resolver to the registry.
    ///
    /// If the resolver provided is `Some(R)`, it will be the same as calling [`ResolverRegistry::add_resolver`]
    /// If the resolver provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_resolver<R: Resolver>(
        &mut self,
        resolver: Option<R>,
    ) -> Result<&mut Self, RegistryError> {
        match resolver {
            Some(r) => self.add_resolver(r),
            None => Ok(self),
        }
    }

    pub(crate) fn add_dyn(
        &mut self,
        resolver: Box<dyn DynResolver>,
    ) -> Result<&mut Self, RegistryError> {
        let tag = resolver.tag();
        if self.resolvers.contains_key(&tag) {
            return Err(RegistryError::AlreadyRegistered(tag));
        }

        tracing::debug!(
            "Registered resolver for {} ({})",
            tag,
            resolver.requirement_type()
        );
        self.resolvers.insert(tag, resolver);
        Ok(self)
    }

    /// Retrieve the resolver for the given tag
    pub fn get(&self, tag: Tag) -> Option<&dyn DynResolver> {
        self.resolvers.get(&tag).map(Box::as_ref)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.resolvers.contains_key(&tag)
    }

    /// All registered tags, in order
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.resolvers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}
