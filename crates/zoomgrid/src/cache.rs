//! Overlay cache
//!
//! Bounded map from resource key to the overlay built for it. Eviction
//! is FIFO by insertion: a hit does not refresh an entry, so the oldest
//! inserted key always goes first.

use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;

/// Bounded FIFO cache of overlay handles
#[derive(Debug, Clone)]
pub struct OverlayCache<T> {
    entries: HashMap<String, T>,
    /// Keys in insertion order, oldest at the front
    order: VecDeque<String>,
    capacity: usize,
}

impl<T: Clone> OverlayCache<T> {
    /// Create an empty cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Return the entry for `key`, building it with `factory` on a miss.
    /// An entry evicted to make room is dropped.
    pub fn get_or_create(&mut self, key: &str, factory: impl FnOnce() -> T) -> T {
        match self.try_get_or_create(key, || Ok::<_, Infallible>(factory())) {
            Ok((value, _evicted)) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_create`](Self::get_or_create) that
    /// also hands back the entry evicted to make room, so the caller can
    /// release whatever it owns. A failing factory leaves the cache
    /// untouched.
    pub fn try_get_or_create<E>(
        &mut self,
        key: &str,
        factory: impl FnOnce() -> Result<T, E>,
    ) -> Result<(T, Option<T>), E> {
        if let Some(value) = self.entries.get(key) {
            tracing::trace!("Overlay cache hit for {}", key);
            return Ok((value.clone(), None));
        }

        let value = factory()?;
        self.entries.insert(key.to_string(), value.clone());
        self.order.push_back(key.to_string());
        tracing::debug!("Cached overlay for {} ({}/{})", key, self.entries.len(), self.capacity);

        let evicted = if self.entries.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        };
        Ok((value, evicted))
    }

    fn evict_oldest(&mut self) -> Option<T> {
        let old = self.order.pop_front()?;
        tracing::debug!("Evicted overlay for {}", old);
        self.entries.remove(&old)
    }

    /// Peek at an entry without creating it
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from oldest to newest insertion
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Cached values, in no particular order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_hit_returns_same_value_without_factory() {
        let mut cache = OverlayCache::new(4);
        let calls = Cell::new(0);
        let make = |v: u32| {
            calls.set(calls.get() + 1);
            v
        };

        assert_eq!(cache.get_or_create("a", || make(1)), 1);
        assert_eq!(cache.get_or_create("a", || make(2)), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_hit_is_identical_object() {
        let mut cache = OverlayCache::new(2);
        let first = cache.get_or_create("a", || Rc::new(String::from("overlay")));
        let second = cache.get_or_create("a", || Rc::new(String::from("overlay")));
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_fifo_eviction_ignores_hits() {
        let mut cache = OverlayCache::new(2);
        cache.get_or_create("A", || 1);
        cache.get_or_create("B", || 2);
        cache.get_or_create("A", || 99);
        cache.get_or_create("C", || 3);

        // A was inserted first; hitting it again does not save it
        assert!(!cache.contains("A"));
        assert!(cache.contains("B"));
        assert!(cache.contains("C"));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["B", "C"]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut cache = OverlayCache::new(3);
        for i in 0..50u32 {
            let key = format!("img{}.jpg", (i * 7) % 11);
            cache.get_or_create(&key, || i);
            assert!(cache.len() <= cache.capacity());
            assert_eq!(cache.keys().count(), cache.len());
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_evicted_key_is_rebuilt() {
        let mut cache = OverlayCache::new(1);
        assert_eq!(cache.get_or_create("A", || 1), 1);
        assert_eq!(cache.get_or_create("B", || 2), 2);
        assert_eq!(cache.get_or_create("A", || 3), 3);
        assert_eq!(cache.get("A"), Some(&3));
    }

    #[test]
    fn test_zero_capacity_still_returns_value() {
        let mut cache = OverlayCache::new(0);
        assert_eq!(cache.get_or_create("A", || 7), 7);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_hands_back_oldest_value() {
        let mut cache = OverlayCache::new(2);
        let build = |v: u32| Ok::<_, Infallible>(v);

        assert_eq!(cache.try_get_or_create("A", || build(1)), Ok((1, None)));
        assert_eq!(cache.try_get_or_create("B", || build(2)), Ok((2, None)));
        assert_eq!(cache.try_get_or_create("A", || build(9)), Ok((1, None)));
        assert_eq!(cache.try_get_or_create("C", || build(3)), Ok((3, Some(1))));

        let mut values: Vec<u32> = cache.values().copied().collect();
        values.sort();
        assert_eq!(values, vec![2, 3]);
    }

    #[test]
    fn test_zero_capacity_evicts_the_new_value() {
        let mut cache = OverlayCache::new(0);
        assert_eq!(cache.try_get_or_create("A", || Ok::<_, Infallible>(7)), Ok((7, Some(7))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_factory_leaves_cache_untouched() {
        let mut cache: OverlayCache<u32> = OverlayCache::new(2);
        let result = cache.try_get_or_create("A", || Err("clone failed"));

        assert_eq!(result, Err("clone failed"));
        assert!(cache.is_empty());
        assert_eq!(cache.keys().count(), 0);
    }
}
