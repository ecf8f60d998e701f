//! Access-ordered LRU map.

use lru::LruCache;
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Fixed-capacity map with least-recently-accessed eviction.
///
/// Both levels of the server-side view store are built from this: the logical
/// map capped at `number_of_logical_views`, and each nested actual map capped
/// at `number_of_views`. Dropping a logical entry drops its whole actual map,
/// which is exactly the "evicting a lineage invalidates every snapshot under
/// it" rule.
pub struct ViewCache<K: Hash + Eq, V> {
    inner: LruCache<K, V>,
}

impl<K: Hash + Eq, V> ViewCache<K, V> {
    /// Creates a cache bounded at `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            inner: LruCache::new(cap),
        }
    }

    /// Looks up `key`, marking the entry most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Mutable lookup; also counts as access.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get_mut(key)
    }

    /// Membership test without touching recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(key)
    }

    /// Inserts `key`, evicting the least-recently-accessed entry on
    /// overflow. Returns the evicted entry, or `None` when the insert
    /// replaced the same key or fit within capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        let inserted = key.clone();
        match self.inner.push(key, value) {
            Some((old_key, old_value)) if old_key != inserted => Some((old_key, old_value)),
            _ => None,
        }
    }

    pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.pop(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }
}
