use crate::{
    config::{CachePolicy, PreparerConfig},
    errors::RegistryError,
    preparer::Preparer,
    registry::ResolverRegistry,
    resolver::Resolver,
};

/// Collects resolvers and configuration for a [Preparer]
///
/// Registration errors are kept and returned by [PreparerBuilder::build],
/// so registrations can be chained.
pub struct PreparerBuilder {
    registry: ResolverRegistry,
    config: PreparerConfig,
    /// First failed registration
    error: Option<RegistryError>,
}
impl Default for PreparerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PreparerBuilder {
    pub fn new() -> Self {
        PreparerBuilder {
            registry: ResolverRegistry::new(),
            config: PreparerConfig::default(),
            error: None,
        }
    }
}
impl PreparerBuilder {
    pub fn add_resolver<R: Resolver>(mut self, resolver: R) -> Self {
        if let Err(e) = self.registry.add_resolver(resolver) {
            tracing::error!("{}", e);
            self.error.get_or_insert(e);
        }
        self
    }

    pub fn with_config(mut self, config: PreparerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn caching(mut self, caching: CachePolicy) -> Self {
        self.config.caching = caching;
        self
    }

    pub fn build(self) -> Result<Preparer, RegistryError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Preparer::with_config(self.registry, self.config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::{requirement::Requirement, resolver::func::resolver_fn, types::Tag};

    struct Flag;
    impl Requirement for Flag {
        const TAG: Tag = Tag::new("flag");
        fn key(&self) -> &str {
            "flag"
        }
    }

    #[test]
    fn defaults_to_caching() {
        let preparer = PreparerBuilder::default().build().unwrap();

        assert_eq!(preparer.config().caching, CachePolicy::Enabled);
    }

    #[test]
    fn takes_config() {
        let preparer = Preparer::builder()
            .with_config(PreparerConfig::default().caching(CachePolicy::Disabled))
            .add_resolver(resolver_fn(|_: &Flag| Ok::<_, Infallible>(true)))
            .build()
            .unwrap();

        assert!(!preparer.config().caches());
        assert!(preparer.registry().contains(Tag::new("flag")));
    }

    #[test]
    fn keeps_first_registration_error() {
        let result = Preparer::builder()
            .add_resolver(resolver_fn(|_: &Flag| Ok::<_, Infallible>(true)))
            .add_resolver(resolver_fn(|_: &Flag| Ok::<_, Infallible>(false)))
            .add_resolver(resolver_fn(|_: &Flag| Ok::<_, Infallible>(false)))
            .build();

        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(tag)) if tag == Tag::new("flag")));
    }
}
