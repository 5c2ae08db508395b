//! Query cache keyed by a fixed query identifier.
//!
//! Survives form mounts so a remount can skip the network.

use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Categories,
}

#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, Arc<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: QueryKey) -> Option<Arc<T>> {
        self.entries.get(&key).cloned()
    }

    /// Store a fresh result, replacing any previous one
    pub fn insert(&mut self, key: QueryKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entries.insert(key, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_insert_shares_value() {
        let mut cache = QueryCache::new();
        assert!(cache.get(QueryKey::Categories).is_none());

        let stored = cache.insert(QueryKey::Categories, vec!["Hiking".to_string()]);
        let fetched = cache.get(QueryKey::Categories).unwrap();

        assert!(Arc::ptr_eq(&stored, &fetched));
    }

    #[test]
    fn test_insert_replaces() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::Categories, 1);
        cache.insert(QueryKey::Categories, 2);

        assert_eq!(*cache.get(QueryKey::Categories).unwrap(), 2);
    }
}
