/// Whether resolved values of cacheable requirements are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Cacheable requirements are resolved once per cache key
    #[default]
    Enabled,
    /// Every requirement is resolved on every call
    Disabled,
}

/// Configuration of a [crate::Preparer]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparerConfig {
    pub caching: CachePolicy,
}

impl PreparerConfig {
    pub fn caching(mut self, caching: CachePolicy) -> Self {
        self.caching = caching;
        self
    }

    pub fn caches(&self) -> bool {
        self.caching == CachePolicy::Enabled
    }
}
