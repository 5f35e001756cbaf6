//! Visitors receive the entries of a map one at a time.
//!
//! A visitor is handed to [`SortedMap::accept`][crate::SortedMap::accept],
//! which feeds it every entry in ascending key order until the map is
//! exhausted or the visitor reports that it is complete.

use std::ops::ControlFlow;

/// A sink receiving one entry at a time during a traversal.
pub trait Visitor<K, V> {
    /// Receive the next entry.
    fn visit(&mut self, key: &K, value: &V);

    /// Returns `true` once the visitor does not need any further entries.
    ///
    /// This is checked before every call to [`visit`][Visitor::visit].
    #[must_use]
    fn is_complete(&self) -> bool {
        false
    }
}

/// Counts the entries it is given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingVisitor {
    count: usize,
}

impl CountingVisitor {
    /// Create a visitor with a count of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of entries visited so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<K, V> Visitor<K, V> for CountingVisitor {
    fn visit(&mut self, _key: &K, _value: &V) {
        self.count += 1;
    }
}

/// Clones every entry it is given, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingVisitor<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for TrackingVisitor<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> TrackingVisitor<K, V> {
    /// Create a visitor that has not tracked anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries visited so far.
    #[must_use]
    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Consume the visitor, returning the tracked entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: Clone, V: Clone> Visitor<K, V> for TrackingVisitor<K, V> {
    fn visit(&mut self, key: &K, value: &V) {
        self.entries.push((key.clone(), value.clone()));
    }
}

/// Clones every key it is given, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTrackingVisitor<K> {
    keys: Vec<K>,
}

impl<K> Default for KeyTrackingVisitor<K> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<K> KeyTrackingVisitor<K> {
    /// Create a visitor that has not tracked anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The keys visited so far.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

impl<K: Clone, V> Visitor<K, V> for KeyTrackingVisitor<K> {
    fn visit(&mut self, key: &K, _value: &V) {
        self.keys.push(key.clone());
    }
}

/// Clones every value it is given, in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTrackingVisitor<V> {
    values: Vec<V>,
}

impl<V> Default for ValueTrackingVisitor<V> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<V> ValueTrackingVisitor<V> {
    /// Create a visitor that has not tracked anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The values visited so far.
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<K, V: Clone> Visitor<K, V> for ValueTrackingVisitor<V> {
    fn visit(&mut self, _key: &K, value: &V) {
        self.values.push(value.clone());
    }
}

/// Adapts a closure into a [`Visitor`].
///
/// Returning [`ControlFlow::Break`] from the closure completes the visitor;
/// no further entries are delivered.
///
/// ```
/// use std::ops::ControlFlow;
///
/// use sortedmap::{FnVisitor, RedBlackMap, SortedMap};
///
/// let map: RedBlackMap<_, _> = (0..10).map(|x| (x, x * x)).collect();
/// let mut seen = Vec::new();
/// map.accept(&mut FnVisitor::new(|k: &i32, v: &i32| {
///     seen.push(*v);
///     if *k == 3 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// }));
/// assert_eq!(seen, [0, 1, 4, 9]);
/// ```
#[derive(Debug)]
pub struct FnVisitor<F> {
    f: F,
    complete: bool,
}

impl<F> FnVisitor<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f, complete: false }
    }
}

impl<K, V, F> Visitor<K, V> for FnVisitor<F>
where
    F: FnMut(&K, &V) -> ControlFlow<()>,
{
    fn visit(&mut self, key: &K, value: &V) {
        if (self.f)(key, value).is_break() {
            self.complete = true;
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use pretty_assertions::assert_eq;

    use super::{
        CountingVisitor, FnVisitor, KeyTrackingVisitor, TrackingVisitor, ValueTrackingVisitor,
        Visitor,
    };

    fn feed<Vis: Visitor<i32, &'static str>>(visitor: &mut Vis) {
        for (k, v) in [(1, "a"), (2, "b"), (3, "c")] {
            if visitor.is_complete() {
                break;
            }
            visitor.visit(&k, &v);
        }
    }

    #[test]
    fn counting() {
        let mut visitor = CountingVisitor::new();
        feed(&mut visitor);
        assert_eq!(visitor.count(), 3);
    }

    #[test]
    fn tracking() {
        let mut entries = TrackingVisitor::new();
        let mut keys = KeyTrackingVisitor::new();
        let mut values = ValueTrackingVisitor::new();
        feed(&mut entries);
        feed(&mut keys);
        feed(&mut values);
        assert_eq!(entries.entries(), [(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(keys.keys(), [1, 2, 3]);
        assert_eq!(values.values(), ["a", "b", "c"]);
    }

    #[test]
    fn closure_breaks() {
        let mut count = 0;
        let mut visitor = FnVisitor::new(|_: &i32, _: &&str| {
            count += 1;
            if count == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        feed(&mut visitor);
        assert!(Visitor::<i32, &str>::is_complete(&visitor));
        drop(visitor);
        assert_eq!(count, 2);
    }
}
