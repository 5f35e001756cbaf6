//! A sorted map backed by a red-black tree.
//!
//! Every node is colored red or black and the tree maintains:
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from a node down to an absent child crosses the same number
//!    of black nodes (the black height).
//!
//! Together these bound the height of the tree by `2 log2(n + 1)`, so
//! insertion, removal and lookup are all `O(log(n))` in the worst case.

mod iter;
mod node;

use std::{cmp::Ordering, fmt, hash, hash::Hash, mem, ops};

pub use self::iter::{Iter, LevelOrder, Postorder, Preorder};
use self::node::{Color, Node, Nodes, is_red, maximum, minimum};
use crate::{
    arena::Ptr,
    comparator::{Comparator, Natural},
    error::MapError,
    sorted_map::{IntoIter, SortedMap},
};

// ////////////////////////////////////////////////////////////////////////////
// RedBlackMap
// ////////////////////////////////////////////////////////////////////////////

/// A sorted map backed by a red-black tree.
///
/// Keys are kept sorted by the comparator `C` (the natural [`Ord`] ordering
/// by default) and are unique: inserting a key that is already present is an
/// error.
///
/// Nodes are stored in an arena and linked by handles, with a parent link on
/// each node used to walk back up the tree while rebalancing.
///
/// # Examples
///
/// ```
/// use sortedmap::{RedBlackMap, SortedMap};
///
/// let mut map = RedBlackMap::new();
/// map.insert(3, "c").unwrap();
/// map.insert(1, "a").unwrap();
/// map.insert(2, "b").unwrap();
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get(&2), Some(&"b"));
/// assert!(map.keys().copied().eq([1, 2, 3]));
/// ```
#[derive(Clone)]
pub struct RedBlackMap<K, V, C = Natural> {
    nodes: Nodes<K, V>,
    root: Option<Ptr>,
    comparator: C,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K: Ord, V> RedBlackMap<K, V> {
    /// Create an empty map ordered by the keys' [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::RedBlackMap;
    ///
    /// let map: RedBlackMap<i64, String> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    /// Create an empty map ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::{RedBlackMap, SortedMap};
    ///
    /// let mut map = RedBlackMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// map.extend([(1, ()), (3, ()), (2, ())]);
    /// assert!(map.keys().copied().eq([3, 2, 1]));
    /// ```
    #[inline]
    pub fn with_comparator(comparator: C) -> Self {
        tracing::debug!("creating red-black map");
        Self {
            nodes: Nodes::new(),
            root: None,
            comparator,
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_none());
        self.root.is_none()
    }

    /// Removes every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::RedBlackMap;
    ///
    /// let mut map: RedBlackMap<_, _> = (0..10).map(|x| (x, x)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len(), "clearing red-black map");
        self.nodes.clear();
        self.root = None;
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
    /// Returns [`MapError::Empty`] if the map has no entries.
    #[inline]
    pub fn min(&self) -> Result<(&K, &V), MapError> {
        let root = self.root.ok_or(MapError::Empty)?;
        Ok(self.nodes[minimum(&self.nodes, root)].entry())
    }

    /// The entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] if the map has no entries.
    #[inline]
    pub fn max(&self) -> Result<(&K, &V), MapError> {
        let root = self.root.ok_or(MapError::Empty)?;
        Ok(self.nodes[maximum(&self.nodes, root)].entry())
    }

    /// Iterate over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::RedBlackMap;
    ///
    /// let map: RedBlackMap<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let first = self.root.map(|root| minimum(&self.nodes, root));
        let last = self.root.map(|root| maximum(&self.nodes, root));
        Iter::new(&self.nodes, first, last, self.len())
    }

    /// Iterate over the entries in ascending key order.
    ///
    /// This is the same order as [`iter`][RedBlackMap::iter]; it is offered
    /// under this name for callers that want the ordering to be explicit.
    #[inline]
    pub fn sorted_iter(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Visit every node before its subtrees, starting at the root.
    #[inline]
    pub fn iter_preorder(&self) -> Preorder<'_, K, V> {
        Preorder::new(&self.nodes, self.root)
    }

    /// Visit both subtrees of every node before the node itself.
    #[inline]
    pub fn iter_postorder(&self) -> Postorder<'_, K, V> {
        Postorder::new(&self.nodes, self.root)
    }

    /// Visit the nodes breadth-first, from the root downwards.
    #[inline]
    pub fn iter_level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder::new(&self.nodes, self.root)
    }

    /// Number of nodes on the longest root-to-leaf path; zero when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Ptr, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((ptr, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[ptr];
            stack.extend(node.left.map(|p| (p, depth + 1)));
            stack.extend(node.right.map(|p| (p, depth + 1)));
        }
        height
    }

    /// Number of black nodes on any root-to-leaf path; zero when empty.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(ptr) = current {
            if self.nodes[ptr].color == Color::Black {
                height += 1;
            }
            current = self.nodes[ptr].left;
        }
        height
    }
}

impl<K, V, C: Comparator<K>> RedBlackMap<K, V, C> {
    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DuplicateKey`] if an entry with an equal key is
    /// already present; the map is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::{MapError, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(5, "a"), Ok(()));
    /// assert_eq!(map.insert(5, "b"), Err(MapError::DuplicateKey));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), MapError> {
        let mut parent = None;
        let mut ordering = Ordering::Equal;
        let mut current = self.root;
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            ordering = self.comparator.compare(&key, &node.key);
            parent = Some(ptr);
            current = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Err(MapError::DuplicateKey),
            };
        }

        let ptr = self.nodes.insert(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(ptr),
            Some(p) if ordering == Ordering::Less => self.nodes[p].left = Some(ptr),
            Some(p) => self.nodes[p].right = Some(ptr),
        }
        self.insert_fixup(ptr);
        Ok(())
    }

    /// Remove the entry with the given key, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::RedBlackMap;
    ///
    /// let mut map: RedBlackMap<_, _> = (0..10).map(|x| (x, x)).collect();
    /// assert!(map.remove(&4));
    /// assert!(!map.remove(&4));
    /// assert_eq!(map.len(), 9);
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        match self.find(key) {
            Some(ptr) => {
                self.remove_node(ptr);
                true
            }
            None => false,
        }
    }

    /// Returns a reference to the value associated with `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|ptr| &self.nodes[ptr].value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    ///
    /// The key itself cannot be modified as it must remain in order.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let ptr = self.find(key)?;
        Some(&mut self.nodes[ptr].value)
    }

    /// Returns `true` if an entry with the given key is present.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<K, V, C: Comparator<K>> RedBlackMap<K, V, C> {
    /// Find the node holding `key`.
    fn find(&self, key: &K) -> Option<Ptr> {
        let mut current = self.root;
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            current = match self.comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(ptr),
            };
        }
        None
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    fn parent(&self, ptr: Ptr) -> Option<Ptr> {
        self.nodes[ptr].parent
    }

    /// Make `new` take the place of `old` as a child of `parent`.
    fn replace_child(&mut self, parent: Option<Ptr>, old: Ptr, new: Option<Ptr>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = &mut self.nodes[p];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// Rotate the subtree rooted at `x` to the left; its right child takes
    /// its place.
    fn rotate_left(&mut self, x: Ptr) {
        tracing::trace!(pivot = %x, "rotate left");
        let Some(y) = self.nodes[x].right else {
            unreachable!("rotate_left requires a right child")
        };
        let middle = self.nodes[y].left;
        self.nodes[x].right = middle;
        if let Some(m) = middle {
            self.nodes[m].parent = Some(x);
        }
        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// Rotate the subtree rooted at `x` to the right; its left child takes
    /// its place.
    fn rotate_right(&mut self, x: Ptr) {
        tracing::trace!(pivot = %x, "rotate right");
        let Some(y) = self.nodes[x].left else {
            unreachable!("rotate_right requires a left child")
        };
        let middle = self.nodes[y].right;
        self.nodes[x].left = middle;
        if let Some(m) = middle {
            self.nodes[m].parent = Some(x);
        }
        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// Restore the red-black properties after inserting the red node `z`.
    fn insert_fixup(&mut self, mut z: Ptr) {
        while let Some(p) = self.parent(z) {
            if self.nodes[p].color == Color::Black {
                break;
            }
            // A red node is never the root, so `p` has a parent.
            let Some(g) = self.parent(p) else {
                unreachable!("red node {p} has no parent")
            };
            let parent_is_left = self.nodes[g].left == Some(p);
            let uncle = if parent_is_left {
                self.nodes[g].right
            } else {
                self.nodes[g].left
            };

            if let Some(u) = uncle.filter(|&u| self.nodes[u].color == Color::Red) {
                self.nodes[p].color = Color::Black;
                self.nodes[u].color = Color::Black;
                self.nodes[g].color = Color::Red;
                z = g;
                continue;
            }

            // Black uncle: straighten a triangle into a line, then rotate the
            // grandparent.
            let mut top = p;
            if parent_is_left {
                if self.nodes[p].right == Some(z) {
                    self.rotate_left(p);
                    top = z;
                }
                self.rotate_right(g);
            } else {
                if self.nodes[p].left == Some(z) {
                    self.rotate_right(p);
                    top = z;
                }
                self.rotate_left(g);
            }
            self.nodes[top].color = Color::Black;
            self.nodes[g].color = Color::Red;
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Unlink the node `z` from the tree and return its entry.
    fn remove_node(&mut self, z: Ptr) -> (K, V) {
        // A node with two children exchanges its entry with its in-order
        // successor, which has no left child, and that node is removed
        // instead.
        let target = match (self.nodes[z].left, self.nodes[z].right) {
            (Some(_), Some(right)) => {
                let successor = minimum(&self.nodes, right);
                let (a, b) = self.nodes.pair_mut(z, successor);
                mem::swap(&mut a.key, &mut b.key);
                mem::swap(&mut a.value, &mut b.value);
                successor
            }
            _ => z,
        };

        let child = self.nodes[target].left.or(self.nodes[target].right);
        let parent = self.parent(target);
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        self.replace_child(parent, target, child);

        let removed = self.nodes.remove(target);
        if removed.color == Color::Black {
            self.remove_fixup(child, parent);
        }
        (removed.key, removed.value)
    }

    /// Restore the red-black properties after removing a black node.
    ///
    /// `x` carries the extra black and `parent` is its parent; `x` may be
    /// absent, which is why the parent is tracked separately.
    fn remove_fixup(&mut self, mut x: Option<Ptr>, mut parent: Option<Ptr>) {
        while x != self.root && !is_red(&self.nodes, x) {
            let Some(p) = parent else { break };
            let x_is_left = self.nodes[p].left == x;

            // The sibling exists: the removed black node left the other
            // side with a black height of at least one.
            let Some(mut w) = self.sibling(p, x_is_left) else {
                unreachable!("double-black node under {p} has no sibling")
            };

            if self.nodes[w].color == Color::Red {
                self.nodes[w].color = Color::Black;
                self.nodes[p].color = Color::Red;
                if x_is_left {
                    self.rotate_left(p);
                } else {
                    self.rotate_right(p);
                }
                let Some(next) = self.sibling(p, x_is_left) else {
                    unreachable!("rotation under {p} removed the sibling")
                };
                w = next;
            }

            let (near, far) = if x_is_left {
                (self.nodes[w].left, self.nodes[w].right)
            } else {
                (self.nodes[w].right, self.nodes[w].left)
            };

            if !is_red(&self.nodes, near) && !is_red(&self.nodes, far) {
                self.nodes[w].color = Color::Red;
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if !is_red(&self.nodes, far) {
                // The near nephew is red; rotate it into the sibling's place.
                if let Some(n) = near {
                    self.nodes[n].color = Color::Black;
                }
                self.nodes[w].color = Color::Red;
                if x_is_left {
                    self.rotate_right(w);
                } else {
                    self.rotate_left(w);
                }
                let Some(next) = self.sibling(p, x_is_left) else {
                    unreachable!("rotation under {p} removed the sibling")
                };
                w = next;
            }

            self.nodes[w].color = self.nodes[p].color;
            self.nodes[p].color = Color::Black;
            let far = if x_is_left {
                self.nodes[w].right
            } else {
                self.nodes[w].left
            };
            if let Some(f) = far {
                self.nodes[f].color = Color::Black;
            }
            if x_is_left {
                self.rotate_left(p);
            } else {
                self.rotate_right(p);
            }
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.nodes[x].color = Color::Black;
        }
    }

    fn sibling(&self, parent: Ptr, of_left: bool) -> Option<Ptr> {
        if of_left {
            self.nodes[parent].right
        } else {
            self.nodes[parent].left
        }
    }

    /// Checks the integrity of the tree, returning its black height.
    #[cfg(test)]
    fn check(&self) -> usize
    where
        C: Comparator<K>,
    {
        fn walk<K, V, C: Comparator<K>>(
            map: &RedBlackMap<K, V, C>,
            ptr: Option<Ptr>,
            parent: Option<Ptr>,
            count: &mut usize,
        ) -> usize {
            let Some(ptr) = ptr else { return 0 };
            *count += 1;
            let node = &map.nodes[ptr];
            assert_eq!(node.parent, parent, "broken parent link at {ptr}");
            if node.color == Color::Red {
                assert!(!is_red(&map.nodes, node.left), "red-red violation at {ptr}");
                assert!(!is_red(&map.nodes, node.right), "red-red violation at {ptr}");
            }
            if let Some(left) = node.left {
                assert_eq!(
                    map.comparator.compare(&map.nodes[left].key, &node.key),
                    Ordering::Less
                );
            }
            if let Some(right) = node.right {
                assert_eq!(
                    map.comparator.compare(&map.nodes[right].key, &node.key),
                    Ordering::Greater
                );
            }
            let left = walk(map, node.left, Some(ptr), count);
            let right = walk(map, node.right, Some(ptr), count);
            assert_eq!(left, right, "black height mismatch at {ptr}");
            left + usize::from(node.color == Color::Black)
        }

        assert!(!is_red(&self.nodes, self.root), "red root");
        let mut count = 0;
        let black_height = walk(self, self.root, None, &mut count);
        assert_eq!(count, self.len());

        let keys: Vec<&K> = self.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), self.len());
        for pair in keys.windows(2) {
            assert_eq!(self.comparator.compare(pair[0], pair[1]), Ordering::Less);
        }
        black_height
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V, C: Comparator<K>> SortedMap<K, V> for RedBlackMap<K, V, C> {
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

impl<K, V, C: Default> Default for RedBlackMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

/// Two maps are equal when they hold equal entries in the same order; the
/// comparators and the shapes of the trees are not compared.
impl<K: PartialEq, V: PartialEq, C> PartialEq for RedBlackMap<K, V, C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RedBlackMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for RedBlackMap<K, V, C> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

/// Entries whose key is already present are skipped.
impl<K, V, C: Comparator<K>> Extend<(K, V)> for RedBlackMap<K, V, C> {
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            let _ = self.insert(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RedBlackMap<K, V, C> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> ops::Index<&K> for RedBlackMap<K, V, C> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not present in map")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RedBlackMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for RedBlackMap<K, V, C> {
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

impl<K, V, C> IntoIterator for RedBlackMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let order: Vec<Ptr> = {
            let mut order = Vec::with_capacity(self.len());
            let mut current = self.root.map(|root| minimum(&self.nodes, root));
            while let Some(ptr) = current {
                order.push(ptr);
                current = node::successor(&self.nodes, ptr);
            }
            order
        };
        let entries = order
            .into_iter()
            .map(|ptr| {
                let node = self.nodes.remove(ptr);
                (node.key, node.value)
            })
            .collect();
        IntoIter::new(entries)
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
