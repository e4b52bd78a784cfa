use std::{collections::HashSet, fmt::Debug, ops::AddAssign};

use crate::{
    builder::PreparerBuilder,
    cache::{CacheKey, Lookup, ResolveCache},
    config::PreparerConfig,
    errors::PrepareError,
    prefills::Prefills,
    preparable::Preparable,
    registry::ResolverRegistry,
    requirement::DynRequirement,
    types::Resolved,
};

/// Where the injected values of a prepare call came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Batches pulled from the preparable
    pub batches: usize,
    /// Values taken from caller or requirement prefills
    pub prefilled: usize,
    /// Values taken from the cache
    pub cache_hits: usize,
    /// Resolver calls
    pub resolved: usize,
}
impl PrepareReport {
    /// Number of values injected
    pub fn injected(&self) -> usize {
        self.prefilled + self.cache_hits + self.resolved
    }
}
impl AddAssign for PrepareReport {
    fn add_assign(&mut self, rhs: Self) {
        self.batches += rhs.batches;
        self.prefilled += rhs.prefilled;
        self.cache_hits += rhs.cache_hits;
        self.resolved += rhs.resolved;
    }
}

/// Resolves the requirements of [Preparable]s and injects the results
///
/// Values of cacheable requirements are kept for the lifetime of the preparer,
/// so each cache key is resolved at most once - also when preparing from several threads.
pub struct Preparer {
    registry: ResolverRegistry,
    config: PreparerConfig,
    cache: ResolveCache,
}
impl Debug for Preparer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preparer")
            .field("resolvers", &self.registry)
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Preparer {
    pub fn new(registry: ResolverRegistry) -> Self {
        Self::with_config(registry, PreparerConfig::default())
    }

    pub fn with_config(registry: ResolverRegistry, config: PreparerConfig) -> Self {
        tracing::debug!(
            "Creating preparer with {} resolvers, caching {:?}",
            registry.len(),
            config.caching
        );
        Preparer {
            registry,
            config,
            cache: ResolveCache::default(),
        }
    }

    pub fn builder() -> PreparerBuilder {
        PreparerBuilder::new()
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PreparerConfig {
        &self.config
    }

    /// Number of values currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Forgets all cached values, cacheable requirements are resolved again afterwards
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Prepares the preparable without prefills
    pub fn prepare<P: Preparable + ?Sized>(
        &self,
        preparable: &mut P,
    ) -> Result<PrepareReport, PrepareError> {
        self.prepare_with(preparable, &Prefills::default())
    }

    /// Resolves all requirements the preparable declares and injects them
    ///
    /// Each requirement is satisfied from, in order:
    /// 1. the caller's prefills
    /// 2. the requirement's own prefills
    /// 3. the cache, if the requirement is cacheable
    /// 4. the resolver registered for its tag
    ///
    /// Stops at the first error. Values injected up to then stay injected.
    pub fn prepare_with<P: Preparable + ?Sized>(
        &self,
        preparable: &mut P,
        prefills: &Prefills,
    ) -> Result<PrepareReport, PrepareError> {
        let mut report = PrepareReport::default();
        let mut used_prefills = HashSet::new();

        for batch in preparable.collect() {
            report.batches += 1;
            tracing::debug!(
                "Preparing batch {} with {} requirements",
                report.batches,
                batch.len()
            );

            for requirement in &batch {
                let key = requirement.key();
                let value = match prefills.get_key_value(key) {
                    Some((prefilled_key, value)) => {
                        tracing::trace!("{} is prefilled", key);
                        used_prefills.insert(prefilled_key);
                        report.prefilled += 1;
                        value.clone()
                    }
                    None => self.resolve(&**requirement, &mut report)?,
                };

                preparable
                    .inject(key, value)
                    .map_err(|error| PrepareError::Inject {
                        key: key.to_string(),
                        error,
                    })?;
            }
        }

        for unused in prefills.keys().filter(|key| !used_prefills.contains(*key)) {
            tracing::trace!("Prefill {} was not required", unused);
        }

        tracing::debug!(
            "Prepared {} values in {} batches [prefilled: {}, cached: {}, resolved: {}]",
            report.injected(),
            report.batches,
            report.prefilled,
            report.cache_hits,
            report.resolved
        );
        Ok(report)
    }

    /// Prepares every preparable in order, sharing prefills and cache
    ///
    /// Returns the summed report, or the first error.
    pub fn prepare_all<'a, P, I>(
        &self,
        preparables: I,
        prefills: &Prefills,
    ) -> Result<PrepareReport, PrepareError>
    where
        P: Preparable + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut P>,
    {
        let mut total = PrepareReport::default();
        for preparable in preparables {
            total += self.prepare_with(preparable, prefills)?;
        }
        Ok(total)
    }

    /// Resolves a requirement which has no caller prefill
    fn resolve(
        &self,
        requirement: &dyn DynRequirement,
        report: &mut PrepareReport,
    ) -> Result<Resolved, PrepareError> {
        let key = requirement.key();
        let tag = requirement.tag();

        if let Some(value) = requirement.prefills().and_then(|p| p.get(key)) {
            tracing::trace!("{} is prefilled by its requirement", key);
            report.prefilled += 1;
            return Ok(value.clone());
        }

        let Some(resolver) = self.registry.get(tag) else {
            tracing::error!("No resolver registered for {}, required by {}", tag, key);
            return Err(PrepareError::UnresolvedType {
                tag,
                key: key.to_string(),
            });
        };

        let run_resolver = || {
            tracing::trace!("Resolving {} with {}", key, tag);
            resolver
                .resolve(requirement)
                .map_err(|error| PrepareError::ResolveFailed {
                    tag,
                    key: key.to_string(),
                    error,
                })
        };

        if !requirement.is_cacheable() || !self.config.caches() {
            report.resolved += 1;
            return run_resolver();
        }

        let cache_key = CacheKey {
            tag,
            key: requirement.cache_key().to_string(),
        };
        match self.cache.get_or_try_resolve(cache_key, run_resolver)? {
            Lookup::Hit(value) => {
                tracing::trace!("{} found in cache", key);
                report.cache_hits += 1;
                Ok(value)
            }
            Lookup::Resolved(value) => {
                report.resolved += 1;
                Ok(value)
            }
        }
    }
}
