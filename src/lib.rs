//! Sorted maps are a way of storing key-value pairs such that the keys are
//! unique and always kept in order, while entries can be efficiently accessed,
//! inserted and removed, all in `O(log(n))`.
//!
//! This crate provides two interchangeable engines behind the [`SortedMap`]
//! trait:
//!
//! - [`RedBlackMap`], a self-balancing binary search tree. Every operation is
//!   `O(log(n))` in the worst case.
//! - [`SkipMap`], a skip list, which is `O(log(n))` on average. Conceptually, a
//!   skip list resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has links to nodes further down the list, allowing the
//! search to effectively skip ahead.
//!
//! Both maps are ordered by a [`Comparator`], which defaults to the natural
//! [`Ord`] ordering of the keys. A custom comparator **must** be well-behaved.
//! Specifically, given some ordering function `f(a, b)`, it must satisfy the
//! following properties:
//!
//! - Be well defined: `f(a, b)` should always return the same value
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less` and
//!   `f(a, b) == Equal == f(b, a)`.
//! - Be transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then
//!   `f(a, c) == Greater`.
//!
//! **Failure to satisfy these properties results in entries that cannot be
//! found or removed.** It never results in memory unsafety.
//!
//! # Examples
//!
//! ```
//! use sortedmap::{MapError, RedBlackMap, SkipMap, SortedMap};
//!
//! fn fill<M: SortedMap<u32, &'static str>>(map: &mut M) -> Result<(), MapError> {
//!     map.insert(3, "three")?;
//!     map.insert(1, "one")?;
//!     map.insert(2, "two")?;
//!     Ok(())
//! }
//!
//! let mut tree = RedBlackMap::new();
//! let mut list = SkipMap::new();
//! fill(&mut tree).unwrap();
//! fill(&mut list).unwrap();
//! assert!(tree.iter().eq(list.iter()));
//! assert_eq!(tree.min(), Ok((&1, &"one")));
//! ```

mod arena;
pub mod comparator;
pub mod error;
pub mod level_generator;
pub mod red_black;
pub mod skipmap;
pub mod sorted_map;
pub mod visitor;

pub use crate::{
    comparator::{Comparator, Natural, Reverse},
    error::MapError,
    level_generator::{Geometric, LevelGenerator, geometric::GeometricError},
    red_black::RedBlackMap,
    skipmap::SkipMap,
    sorted_map::{IntoIter, Keys, SortedMap, Values},
    visitor::{
        CountingVisitor, FnVisitor, KeyTrackingVisitor, TrackingVisitor, ValueTrackingVisitor,
        Visitor,
    },
};
