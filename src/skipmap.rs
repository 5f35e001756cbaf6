//! `SkipMap` stores key-value pairs, with the keys being unique and always
//! sorted.
//!
//! Conceptually, a skip list resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has links to nodes further down the list, allowing
//! the search to effectively skip ahead. Insertion, removal and lookup are all
//! `O(log(n))` on average.

mod iter;
mod node;

use std::{cmp::Ordering, fmt, hash, hash::Hash, ops};

pub use self::iter::Iter;
use self::node::{Nodes, SkipNode};
use crate::{
    arena::Ptr,
    comparator::{Comparator, Natural},
    error::MapError,
    level_generator::{Geometric, LevelGenerator},
    sorted_map::{IntoIter, SortedMap},
};

/// Number of levels used by [`SkipMap::new`].
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Promotion probability used by [`SkipMap::new`].
pub const DEFAULT_PROBABILITY: f64 = 0.5;

// ////////////////////////////////////////////////////////////////////////////
// SkipMap
// ////////////////////////////////////////////////////////////////////////////

/// The skipmap provides a way of storing element pairs such that the keys are
/// always sorted whilst at the same time providing an efficient way to access,
/// insert and remove nodes.
///
/// Keys are ordered by the comparator `C` (the natural [`Ord`] ordering by
/// default) and are unique: inserting a key that is already present is an
/// error. The height of each new node is drawn from the level generator `G`,
/// which is owned by the map.
///
/// Note that mutable references to keys are not available at all as this could
/// result in a node being left out of the proper ordering.
///
/// # Examples
///
/// ```
/// use sortedmap::{SkipMap, SortedMap};
///
/// let mut map = SkipMap::new();
/// map.insert(2, "World").unwrap();
/// map.insert(1, "Hello").unwrap();
/// assert_eq!(map.len(), 2);
/// assert!(map.values().copied().eq(["Hello", "World"]));
/// ```
#[derive(Clone)]
pub struct SkipMap<K, V, C = Natural, G = Geometric> {
    nodes: Nodes<K, V>,
    /// Forward links of the header at each active level. Its length is the
    /// current number of levels in use; the topmost link is never empty.
    head: Vec<Option<Ptr>>,
    /// The last node of the level-0 chain.
    tail: Option<Ptr>,
    comparator: C,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K: Ord, V> SkipMap<K, V> {
    /// Create a new skipmap with the default number of 16 levels and a
    /// promotion probability of one half.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap: SkipMap<i64, String> = SkipMap::new();
    /// assert_eq!(skipmap.max_level(), 16);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Constructs a new, empty skipmap with the optimal number of levels for
    /// the intended capacity.  Specifically, it uses `floor(log2(capacity))`
    /// number of levels, ensuring that only *a few* nodes occupy the highest
    /// level.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap = SkipMap::with_capacity(100);
    /// skipmap.extend((0..100).map(|x| (x, x)));
    /// assert_eq!(skipmap.max_level(), 6);
    /// ```
    #[inline]
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "The level count of a usize capacity is always between 1 and 63"
    )]
    pub fn with_capacity(capacity: usize) -> Self {
        let levels = capacity.checked_ilog2().unwrap_or(0).max(1);
        let mut map = Self::with_options(levels as usize, DEFAULT_PROBABILITY, Natural)
            .expect("level count derived from a capacity is valid");
        map.nodes = Nodes::with_capacity(capacity);
        map
    }
}

impl<K, V, C> SkipMap<K, V, C> {
    /// Create a new skipmap ordered by `comparator`, with 16 levels and a
    /// promotion probability of one half.
    #[inline]
    #[expect(
        clippy::expect_used,
        reason = "The default level count and probability are always valid"
    )]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_generator(
            Geometric::new(DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY)
                .expect("default level generator is valid"),
            comparator,
        )
    }

    /// Create a new skipmap with `max_level` levels, in which a node reaching
    /// some level also reaches the next one with probability `probability`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfRange`] if `max_level` is zero or does not
    /// fit in an `i32`, or if `probability` is not strictly between 0 and 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::{Natural, SkipMap};
    ///
    /// let skipmap = SkipMap::<u8, u8>::with_options(8, 0.25, Natural).unwrap();
    /// assert_eq!(skipmap.max_level(), 8);
    /// assert_eq!(skipmap.probability(), 0.25);
    ///
    /// assert!(SkipMap::<u8, u8>::with_options(0, 0.5, Natural).is_err());
    /// assert!(SkipMap::<u8, u8>::with_options(8, 1.0, Natural).is_err());
    /// ```
    #[inline]
    pub fn with_options(max_level: usize, probability: f64, comparator: C) -> Result<Self, MapError> {
        let generator = Geometric::new(max_level, probability)?;
        Ok(Self::with_generator(generator, comparator))
    }

    /// The probability that a node reaching some level also reaches the next.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.level_generator.probability()
    }
}

impl<K, V, C, G: LevelGenerator> SkipMap<K, V, C, G> {
    /// Create a new skipmap drawing node heights from `generator`.
    ///
    /// This is how a reproducible list is built:
    ///
    /// ```
    /// use sortedmap::{Natural, SkipMap, level_generator::Geometric};
    ///
    /// let generator = Geometric::with_seed(16, 0.5, 0x1234_abcd).unwrap();
    /// let mut skipmap = SkipMap::with_generator(generator, Natural);
    /// skipmap.insert("key", "value").unwrap();
    /// ```
    #[inline]
    pub fn with_generator(generator: G, comparator: C) -> Self {
        tracing::debug!(max_level = generator.total(), "creating skip map");
        Self {
            nodes: Nodes::new(),
            head: Vec::with_capacity(generator.total()),
            tail: None,
            comparator,
            level_generator: generator,
        }
    }

    /// The maximum number of levels a node can reach.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.level_generator.total()
    }
}

impl<K, V, C, G> SkipMap<K, V, C, G> {
    /// Clears the skipmap, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// skipmap.clear();
    /// assert!(skipmap.is_empty());
    /// assert_eq!(skipmap.current_level(), 0);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len(), "clearing skip map");
        self.nodes.clear();
        self.head.clear();
        self.tail = None;
    }

    /// Returns the number of elements in the skipmap.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the skipmap contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.head.is_empty());
        self.nodes.is_empty()
    }

    /// Number of levels currently in use: the height of the tallest node, or
    /// zero when the skipmap is empty.
    #[inline]
    pub fn current_level(&self) -> usize {
        self.head.len()
    }

    /// The comparator ordering the keys.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] if the skipmap has no entries.
    #[inline]
    pub fn min(&self) -> Result<(&K, &V), MapError> {
        let first = self.head.first().copied().flatten().ok_or(MapError::Empty)?;
        Ok(self.nodes[first].entry())
    }

    /// The entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] if the skipmap has no entries.
    #[inline]
    pub fn max(&self) -> Result<(&K, &V), MapError> {
        let last = self.tail.ok_or(MapError::Empty)?;
        Ok(self.nodes[last].entry())
    }

    /// Creates an iterator over the entries of the skipmap, in ascending key
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).rev().map(|x| (x, x)));
    /// for (k, v) in skipmap.iter() {
    ///     println!("Key: {}, Value: {}", k, v);
    /// }
    /// assert!(skipmap.iter().map(|(k, _)| *k).eq(0..10));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(
            &self.nodes,
            self.head.first().copied().flatten(),
            self.tail,
            self.len(),
        )
    }

    /// Creates an iterator over the entries of the skipmap, in ascending key
    /// order.
    ///
    /// This is the same order as [`iter`][SkipMap::iter]; it is offered under
    /// this name for callers that want the ordering to be explicit.
    #[inline]
    pub fn sorted_iter(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// The node following `node` at `level`, where `None` stands for the
    /// header.
    fn next_at(&self, node: Option<Ptr>, level: usize) -> Option<Ptr> {
        match node {
            None => self.head.get(level).copied().flatten(),
            Some(ptr) => self.nodes[ptr].forward[level],
        }
    }

    fn set_next_at(&mut self, node: Option<Ptr>, level: usize, next: Option<Ptr>) {
        match node {
            None => self.head[level] = next,
            Some(ptr) => self.nodes[ptr].forward[level] = next,
        }
    }
}

impl<K, V, C: Comparator<K>, G: LevelGenerator> SkipMap<K, V, C, G> {
    /// Insert the element into the skipmap.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DuplicateKey`] if an entry with an equal key is
    /// already present; the skipmap is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::{MapError, SkipMap};
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.insert(1, "Hello").unwrap();
    /// assert_eq!(skipmap.insert(1, "World"), Err(MapError::DuplicateKey));
    /// assert_eq!(skipmap.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), MapError> {
        let mut update = self.find_predecessors(&key);
        let prev = update.first().copied().flatten();
        if let Some(next) = self.next_at(prev, 0) {
            if self.comparator.compare(&self.nodes[next].key, &key) == Ordering::Equal {
                return Err(MapError::DuplicateKey);
            }
        }

        let height = self.level_generator.level() + 1;
        if height > self.head.len() {
            tracing::trace!(from = self.head.len(), to = height, "growing skip map levels");
            self.head.resize(height, None);
            update.resize(height, None);
        }

        let ptr = self.nodes.insert(SkipNode::new(key, value, height));
        for (level, &before) in update.iter().enumerate().take(height) {
            let after = self.next_at(before, level);
            self.nodes[ptr].forward[level] = after;
            self.set_next_at(before, level, Some(ptr));
        }

        self.nodes[ptr].prev = prev;
        match self.nodes[ptr].forward[0] {
            Some(next) => self.nodes[next].prev = Some(ptr),
            None => self.tail = Some(ptr),
        }
        Ok(())
    }

    /// Removes the entry with the given key, returning whether it was
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert!(skipmap.remove(&4));
    /// assert!(!skipmap.remove(&4));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let update = self.find_predecessors(key);
        let Some(target) = self.next_at(update.first().copied().flatten(), 0) else {
            return false;
        };
        if self.comparator.compare(&self.nodes[target].key, key) != Ordering::Equal {
            return false;
        }

        let node = self.nodes.remove(target);
        for (level, &after) in node.forward.iter().enumerate() {
            self.set_next_at(update[level], level, after);
        }
        match node.forward[0] {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        let before = self.head.len();
        while matches!(self.head.last(), Some(None)) {
            self.head.pop();
        }
        if self.head.len() != before {
            tracing::trace!(from = before, to = self.head.len(), "shrinking skip map levels");
        }
        true
    }
}

impl<K, V, C: Comparator<K>, G> SkipMap<K, V, C, G> {
    /// Provides a reference to the value associated with `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// assert!(skipmap.get(&0).is_none());
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.get(&0), Some(&0));
    /// assert!(skipmap.get(&10).is_none());
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|ptr| &self.nodes[ptr].value)
    }

    /// Provides a mutable reference to the value associated with `key`.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let ptr = self.find(key)?;
        Some(&mut self.nodes[ptr].value)
    }

    /// Returns true if an entry with the given key is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SkipMap;
    ///
    /// let mut skipmap = SkipMap::new();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert!(skipmap.contains_key(&4));
    /// assert!(!skipmap.contains_key(&15));
    /// ```
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<K, V, C: Comparator<K>, G> SkipMap<K, V, C, G> {
    /// Find the node holding `key`, descending from the top level.
    fn find(&self, key: &K) -> Option<Ptr> {
        let mut current = None;
        for level in (0..self.head.len()).rev() {
            while let Some(next) = self.next_at(current, level) {
                match self.comparator.compare(&self.nodes[next].key, key) {
                    Ordering::Less => current = Some(next),
                    Ordering::Equal => return Some(next),
                    Ordering::Greater => break,
                }
            }
        }
        None
    }

    /// For each active level, the last node whose key is less than `key`
    /// (`None` standing for the header).
    fn find_predecessors(&self, key: &K) -> Vec<Option<Ptr>> {
        let mut update = vec![None; self.head.len()];
        let mut current = None;
        for level in (0..self.head.len()).rev() {
            while let Some(next) = self.next_at(current, level) {
                if self.comparator.compare(&self.nodes[next].key, key) == Ordering::Less {
                    current = Some(next);
                } else {
                    break;
                }
            }
            update[level] = current;
        }
        update
    }

    /// Checks the integrity of the skipmap.
    #[cfg(test)]
    fn check(&self) {
        use std::collections::HashSet;

        assert_ne!(self.head.last(), Some(&None), "empty top level");

        let mut below: Option<HashSet<Ptr>> = None;
        for level in 0..self.head.len() {
            let mut chain = HashSet::new();
            let mut prev: Option<Ptr> = None;
            let mut current = self.head[level];
            while let Some(ptr) = current {
                let node = &self.nodes[ptr];
                assert!(node.height() > level, "node {ptr} linked above its height");
                if let Some(p) = prev {
                    assert_eq!(
                        self.comparator.compare(&self.nodes[p].key, &node.key),
                        Ordering::Less,
                        "level {level} is not strictly ordered"
                    );
                }
                if level == 0 {
                    assert_eq!(node.prev, prev, "broken back link at {ptr}");
                }
                chain.insert(ptr);
                prev = current;
                current = node.forward[level];
            }
            if level == 0 {
                assert_eq!(chain.len(), self.len());
                assert_eq!(prev, self.tail);
            }
            if let Some(below) = &below {
                assert!(chain.is_subset(below), "level {level} is not a subset");
            }
            below = Some(chain);
        }
        if self.head.is_empty() {
            assert_eq!(self.len(), 0);
            assert_eq!(self.tail, None);
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V, C: Comparator<K>, G: LevelGenerator> SortedMap<K, V> for SkipMap<K, V, C, G> {
    type Comparator = C;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn insert(&mut self, key: K, value: V) -> Result<(), MapError> {
        Self::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> bool {
        Self::remove(self, key)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        Self::get_mut(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn clear(&mut self) {
        Self::clear(self);
    }

    #[inline]
    fn min(&self) -> Result<(&K, &V), MapError> {
        Self::min(self)
    }

    #[inline]
    fn max(&self) -> Result<(&K, &V), MapError> {
        Self::max(self)
    }

    #[inline]
    fn comparator(&self) -> &C {
        Self::comparator(self)
    }

    #[inline]
    fn iter(&self) -> Iter<'_, K, V> {
        Self::iter(self)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }
}

impl<K, V, C: Comparator<K> + Default> Default for SkipMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

/// This implementation of `PartialEq` only checks that the *entries* are
/// equal; it does not check for equivalence of other features (such as the
/// ordering function and the node levels).
impl<K: PartialEq, V: PartialEq, C, G> PartialEq for SkipMap<K, V, C, G> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C, G> Eq for SkipMap<K, V, C, G> {}

impl<K: Hash, V: Hash, C, G> Hash for SkipMap<K, V, C, G> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

/// Entries whose key is already present are skipped.
impl<K, V, C: Comparator<K>, G: LevelGenerator> Extend<(K, V)> for SkipMap<K, V, C, G> {
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            let _ = self.insert(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for SkipMap<K, V, C> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut skipmap = Self::default();
        skipmap.extend(iter);
        skipmap
    }
}

impl<K, V, C: Comparator<K>, G> ops::Index<&K> for SkipMap<K, V, C, G> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the skipmap.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not present in map")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, G> fmt::Debug for SkipMap<K, V, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C, G> fmt::Display for SkipMap<K, V, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        write!(f, "]")
    }
}

impl<K, V, C, G> IntoIterator for SkipMap<K, V, C, G> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.len());
        let mut current = self.head.first().copied().flatten();
        while let Some(ptr) = current {
            let node = self.nodes.remove(ptr);
            current = node.forward[0];
            entries.push((node.key, node.value));
        }
        IntoIter::new(entries)
    }
}

impl<'a, K, V, C, G> IntoIterator for &'a SkipMap<K, V, C, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
