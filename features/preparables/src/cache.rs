use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use crate::types::{Resolved, Tag};

/// Cache entries are namespaced by tag, so variants sharing a cache key never collide
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) struct CacheKey {
    pub tag: Tag,
    pub key: String,
}

/// Where a cached lookup got its value from
pub(crate) enum Lookup {
    /// The value was already cached
    Hit(Resolved),
    /// The value was resolved by this call and is now cached
    Resolved(Resolved),
}

/// Empty while the first resolve is running
type Slot = Arc<Mutex<Option<Resolved>>>;

/// Cache of resolved values, living as long as its [crate::Preparer]
///
/// Every key owns its own slot. The map lock is only held to find the slot,
/// the slot lock is held while resolving, so concurrent lookups of the same
/// key wait for the first resolve instead of resolving again.
///
/// Lock order is slot before map, never the other way around.
#[derive(Default)]
pub(crate) struct ResolveCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
    /// Filled slots still in the map, readable without touching any slot
    filled: AtomicUsize,
}

impl ResolveCache {
    /// Returns the cached value, or resolves and caches it
    ///
    /// Errors are returned as is. The slot of a failed resolve is dropped,
    /// so failing keys do not accumulate.
    pub fn get_or_try_resolve<E>(
        &self,
        key: CacheKey,
        resolve: impl FnOnce() -> Result<Resolved, E>,
    ) -> Result<Lookup, E> {
        loop {
            let slot = lock(&self.slots).entry(key.clone()).or_default().clone();
            let mut value = lock(&slot);
            if let Some(cached) = value.as_ref() {
                return Ok(Lookup::Hit(cached.clone()));
            }

            // Dropped by a failed resolve or clear while we waited - start over
            if !self.is_current(&key, &slot) {
                continue;
            }

            return match resolve() {
                Ok(resolved) => {
                    *value = Some(resolved.clone());
                    // Under the map lock, so clear cannot reset the count in between
                    let slots = lock(&self.slots);
                    if Self::holds(&slots, &key, &slot) {
                        self.filled.fetch_add(1, Ordering::SeqCst);
                    }
                    Ok(Lookup::Resolved(resolved))
                }
                Err(e) => {
                    let mut slots = lock(&self.slots);
                    if Self::holds(&slots, &key, &slot) {
                        slots.remove(&key);
                    }
                    Err(e)
                }
            };
        }
    }

    /// Number of cached values
    ///
    /// Never waits for a running resolve.
    pub fn len(&self) -> usize {
        self.filled.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        let mut slots = lock(&self.slots);
        slots.clear();
        self.filled.store(0, Ordering::SeqCst);
    }

    fn is_current(&self, key: &CacheKey, slot: &Slot) -> bool {
        Self::holds(&lock(&self.slots), key, slot)
    }

    fn holds(slots: &HashMap<CacheKey, Slot>, key: &CacheKey, slot: &Slot) -> bool {
        slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        lock(&self.slots).len()
    }
}

// A panicking resolver must not disable the cache for everyone else
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
