//! The contract shared by every sorted map of this crate.
//!
//! [`RedBlackMap`][crate::RedBlackMap] and [`SkipMap`][crate::SkipMap] are
//! interchangeable implementations of [`SortedMap`]: code written against the
//! trait behaves identically with either.

use std::{cmp::Ordering, iter::FusedIterator, mem, vec};

use crate::{comparator::Comparator, error::MapError, visitor::Visitor};

/// A map whose keys are unique and always enumerated in ascending order.
///
/// Keys are ordered by the map's [`Comparator`]. Unlike
/// [`BTreeMap`][std::collections::BTreeMap], inserting a key that is already
/// present is an error rather than a replacement: use
/// [`set`][SortedMap::set] to replace the value of an existing entry.
///
/// # Examples
///
/// ```
/// use sortedmap::{MapError, RedBlackMap, SkipMap, SortedMap};
///
/// fn fill<M: SortedMap<i32, &'static str>>(map: &mut M) -> Result<(), MapError> {
///     map.insert(2, "two")?;
///     map.insert(1, "one")?;
///     assert_eq!(map.insert(1, "uno"), Err(MapError::DuplicateKey));
///     map.set(&1, "uno")?;
///     Ok(())
/// }
///
/// let mut tree = RedBlackMap::new();
/// let mut list = SkipMap::new();
/// fill(&mut tree).unwrap();
/// fill(&mut list).unwrap();
/// assert!(tree.iter().eq(list.iter()));
/// assert_eq!(tree.min(), Ok((&1, &"uno")));
/// ```
pub trait SortedMap<K, V> {
    /// The ordering used by the map.
    type Comparator: Comparator<K>;

    /// Iterator over the entries in ascending key order.
    type Iter<'a>: DoubleEndedIterator<Item = (&'a K, &'a V)> + ExactSizeIterator
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DuplicateKey`] if an entry with an equal key is
    /// already present; the map is left unchanged.
    fn insert(&mut self, key: K, value: V) -> Result<(), MapError>;

    /// Remove the entry with the given key, returning whether it was present.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns a reference to the value associated with `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value associated with `key`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Number of entries in the map.
    fn len(&self) -> usize;

    /// Remove every entry.
    fn clear(&mut self);

    /// The entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] if the map has no entries.
    fn min(&self) -> Result<(&K, &V), MapError>;

    /// The entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] if the map has no entries.
    fn max(&self) -> Result<(&K, &V), MapError>;

    /// The comparator ordering the keys.
    fn comparator(&self) -> &Self::Comparator;

    /// Iterate over the entries in ascending key order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns `true` if the map has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if an entry with the given key is present.
    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert an entry given as a pair.
    ///
    /// # Errors
    ///
    /// Same as [`insert`][SortedMap::insert].
    #[inline]
    fn insert_entry(&mut self, (key, value): (K, V)) -> Result<(), MapError> {
        self.insert(key, value)
    }

    /// Returns `true` if the map contains exactly this key and value.
    #[inline]
    fn contains_entry(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.get(key) == Some(value)
    }

    /// Remove the entry only if both its key and value match.
    fn remove_entry(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.contains_entry(key, value) && self.remove(key)
    }

    /// The value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the key is absent.
    #[inline]
    fn value(&self, key: &K) -> Result<&V, MapError> {
        self.get(key).ok_or(MapError::KeyNotFound)
    }

    /// Replace the value of an existing entry, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] if the key is absent; no entry is
    /// created.
    #[inline]
    fn set(&mut self, key: &K, value: V) -> Result<V, MapError> {
        self.get_mut(key)
            .map(|slot| mem::replace(slot, value))
            .ok_or(MapError::KeyNotFound)
    }

    /// Iterate over the keys in ascending order.
    #[inline]
    fn keys(&self) -> Keys<Self::Iter<'_>> {
        Keys(self.iter())
    }

    /// Iterate over the values in ascending key order.
    #[inline]
    fn values(&self) -> Values<Self::Iter<'_>> {
        Values(self.iter())
    }

    /// Clone every entry into `dest`, in ascending order, starting at index
    /// `start`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DestinationTooSmall`] if `dest` does not have
    /// `len()` slots from `start` onwards; `dest` is left untouched.
    fn copy_to(&self, dest: &mut [(K, V)], start: usize) -> Result<(), MapError>
    where
        K: Clone,
        V: Clone,
    {
        let needed = self.len();
        let available = dest.len().saturating_sub(start);
        if start > dest.len() || needed > available {
            return Err(MapError::DestinationTooSmall { needed, available });
        }
        for (slot, (k, v)) in dest.iter_mut().skip(start).zip(self.iter()) {
            *slot = (k.clone(), v.clone());
        }
        Ok(())
    }

    /// Feed every entry to `visitor` in ascending order, stopping early once
    /// the visitor is complete.
    fn accept<Vis>(&self, visitor: &mut Vis)
    where
        Vis: Visitor<K, V> + ?Sized,
    {
        for (k, v) in self.iter() {
            if visitor.is_complete() {
                break;
            }
            visitor.visit(k, v);
        }
    }

    /// Orders two maps by their number of entries only.
    ///
    /// Maps of equal size compare [`Equal`][Ordering::Equal] whatever their
    /// contents; this is not a lexicographic comparison.
    #[inline]
    fn size_order<M>(&self, other: &M) -> Ordering
    where
        M: SortedMap<K, V> + ?Sized,
    {
        self.len().cmp(&other.len())
    }

    /// Always `false`: the maps grow without bound.
    #[inline]
    fn is_full(&self) -> bool {
        false
    }

    /// Always `false`: entries can be inserted and removed.
    #[inline]
    fn is_fixed_size(&self) -> bool {
        false
    }

    /// Always `false`: the maps are mutable.
    #[inline]
    fn is_read_only(&self) -> bool {
        false
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Iterator over a map's keys.
#[derive(Debug, Clone)]
pub struct Keys<I>(I);

impl<'a, K: 'a, V: 'a, I> Iterator for Keys<I>
where
    I: Iterator<Item = (&'a K, &'a V)>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|x| x.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, I> DoubleEndedIterator for Keys<I>
where
    I: DoubleEndedIterator<Item = (&'a K, &'a V)>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|x| x.0)
    }
}

impl<'a, K: 'a, V: 'a, I> ExactSizeIterator for Keys<I> where
    I: ExactSizeIterator<Item = (&'a K, &'a V)>
{
}

impl<'a, K: 'a, V: 'a, I> FusedIterator for Keys<I> where I: FusedIterator<Item = (&'a K, &'a V)> {}

/// Iterator over a map's values.
#[derive(Debug, Clone)]
pub struct Values<I>(I);

impl<'a, K: 'a, V: 'a, I> Iterator for Values<I>
where
    I: Iterator<Item = (&'a K, &'a V)>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|x| x.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, I> DoubleEndedIterator for Values<I>
where
    I: DoubleEndedIterator<Item = (&'a K, &'a V)>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|x| x.1)
    }
}

impl<'a, K: 'a, V: 'a, I> ExactSizeIterator for Values<I> where
    I: ExactSizeIterator<Item = (&'a K, &'a V)>
{
}

impl<'a, K: 'a, V: 'a, I> FusedIterator for Values<I> where
    I: FusedIterator<Item = (&'a K, &'a V)>
{
}

/// An owning iterator over the entries of a map, in ascending key order.
#[derive(Debug, Clone)]
pub struct IntoIter<K, V>(vec::IntoIter<(K, V)>);

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: Vec<(K, V)>) -> Self {
        Self(entries.into_iter())
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
