//! Associative containers keyed by a caller-supplied 32-bit hash.
//!
//! The pathfinder needs open/closed membership and parent pointers for
//! coordinate values. Both containers here index purely on the key
//! produced by [`GridKey::key`] and perform no collision resolution:
//! two logically distinct values with equal keys alias silently, so the
//! key must be injective over the coordinates actually in play (see
//! the packing precondition on [`crate::Point`]).

use core::marker::PhantomData;

use hashbrown::{HashMap, HashSet};

/// Capability of producing a 32-bit lookup key
pub trait GridKey {
    fn key(&self) -> u32;
}

/// Map keyed by [`GridKey::key`], with an optional default for misses
#[derive(Debug, Clone)]
pub struct KeyMap<K: GridKey, V> {
    entries: HashMap<u32, V>,
    default: Option<V>,
    _key: PhantomData<K>,
}

impl<K: GridKey, V> KeyMap<K, V> {
    /// Create an empty map with no default value
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            default: None,
            _key: PhantomData,
        }
    }

    /// Create an empty map whose `get` yields `default` on a miss
    pub fn with_default(default: V) -> Self {
        Self {
            entries: HashMap::new(),
            default: Some(default),
            _key: PhantomData,
        }
    }

    /// Look up a key, falling back to the configured default
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(&key.key()).or(self.default.as_ref())
    }

    /// Store a value, returning the previous one if present
    pub fn insert(&mut self, key: &K, value: V) -> Option<V> {
        self.entries.insert(key.key(), value)
    }

    /// Check whether a key is stored (the default does not count)
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(&key.key())
    }

    /// Remove a stored value
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(&key.key())
    }

    /// Drop all stored entries, keeping the configured default
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: GridKey, V> Default for KeyMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Set keyed by [`GridKey::key`]
#[derive(Debug, Clone, Default)]
pub struct KeySet<K: GridKey> {
    entries: HashSet<u32>,
    _key: PhantomData<K>,
}

impl<K: GridKey> KeySet<K> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            entries: HashSet::new(),
            _key: PhantomData,
        }
    }

    /// Add a value; returns false if it was already present
    pub fn insert(&mut self, value: &K) -> bool {
        self.entries.insert(value.key())
    }

    /// Membership test
    pub fn contains(&self, value: &K) -> bool {
        self.entries.contains(&value.key())
    }

    /// Remove a value; returns false if it was absent
    pub fn remove(&mut self, value: &K) -> bool {
        self.entries.remove(&value.key())
    }

    /// Drop all members
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
