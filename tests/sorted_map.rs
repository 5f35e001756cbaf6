//! The map contract, run against both engines through the [`SortedMap`] trait.

use std::{cmp::Ordering, collections::BTreeMap};

use anyhow::Result;
use pretty_assertions::assert_eq;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use sortedmap::{
    CountingVisitor, FnVisitor, MapError, RedBlackMap, SkipMap, SortedMap, TrackingVisitor,
};

const SCENARIO: [i32; 6] = [4, 6, 2, 5, 19, 1];

fn fill<M: SortedMap<i32, String>>(map: &mut M, keys: &[i32]) -> Result<()> {
    for &key in keys {
        map.insert(key, key.to_string())?;
    }
    Ok(())
}

fn entries<M: SortedMap<i32, String>>(map: &M) -> Vec<(i32, String)> {
    map.iter().map(|(k, v)| (*k, v.clone())).collect()
}

fn scenario_insert<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    fill(&mut map, &SCENARIO)?;
    assert_eq!(map.len(), 6);
    assert_eq!(
        entries(&map),
        [1, 2, 4, 5, 6, 19].map(|k| (k, k.to_string())).to_vec()
    );
    assert_eq!(map.min()?, (&1, &"1".to_owned()));
    assert_eq!(map.max()?, (&19, &"19".to_owned()));
    Ok(())
}

fn scenario_remove<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    fill(&mut map, &SCENARIO)?;
    assert!(map.remove(&4));
    assert_eq!(map.len(), 5);
    assert!(!map.contains_key(&4));
    assert!(!map.remove(&20));
    assert_eq!(map.len(), 5);
    Ok(())
}

fn duplicate_key<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    map.insert(5, "a".to_owned())?;
    assert_eq!(map.insert(5, "a".to_owned()), Err(MapError::DuplicateKey));
    assert_eq!(map.len(), 1);
    assert_eq!(map.value(&5)?, "a");
    Ok(())
}

fn round_trip<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    let mut keys: Vec<i32> = (-200..200).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(0x1234_abcd));
    fill(&mut map, &keys)?;

    for &key in &keys {
        assert!(map.contains_key(&key));
        assert_eq!(map.get(&key), Some(&key.to_string()));
    }
    let (min, _) = map.min()?;
    let (max, _) = map.max()?;
    assert_eq!((*min, *max), (-200, 199));
    assert!(map.keys().all(|k| min <= k && k <= max));

    for (i, &key) in keys.iter().enumerate() {
        assert!(map.remove(&key));
        assert_eq!(map.get(&key), None);
        assert_eq!(map.len(), keys.len() - i - 1);
        for &other in &keys[i + 1..] {
            if other % 37 == 0 {
                assert!(map.contains_key(&other));
            }
        }
    }
    assert!(map.is_empty());
    Ok(())
}

fn interleaved<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0xdead_beef);
    let mut expected = BTreeMap::new();

    for _ in 0..3000 {
        let key = rng.random_range(0..100);
        if rng.random_bool(0.55) {
            let inserted = map.insert(key, key.to_string()).is_ok();
            assert_eq!(inserted, expected.insert(key, key.to_string()).is_none());
        } else {
            assert_eq!(map.remove(&key), expected.remove(&key).is_some());
        }
        assert_eq!(map.len(), expected.len());
    }
    assert!(map.iter().eq(expected.iter()));
    assert!(map.iter().rev().eq(expected.iter().rev()));
    assert_eq!(map.min().ok(), expected.first_key_value());
    assert_eq!(map.max().ok(), expected.last_key_value());
    Ok(())
}

fn ascending<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    let mut keys: Vec<i32> = (0..300).map(|x| x * 7 % 1000).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(7));
    fill(&mut map, &keys)?;

    assert_eq!(map.iter().len(), map.len());
    assert_eq!(map.iter().count(), map.len());
    assert!(map.keys().zip(map.keys().skip(1)).all(|(a, b)| a < b));
    assert!(map.keys().rev().zip(map.keys().rev().skip(1)).all(|(a, b)| a > b));
    Ok(())
}

fn clear<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.min(), Err(MapError::Empty));
    assert_eq!(map.max(), Err(MapError::Empty));

    fill(&mut map, &SCENARIO)?;
    map.clear();
    assert!(map.is_empty());
    assert!(map.iter().next().is_none());
    fill(&mut map, &SCENARIO)?;
    assert_eq!(map.len(), 6);
    Ok(())
}

fn entry_helpers<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    fill(&mut map, &SCENARIO)?;
    map.insert_entry((3, "3".to_owned()))?;
    assert!(map.contains_entry(&3, &"3".to_owned()));
    assert!(!map.contains_entry(&3, &"three".to_owned()));
    assert!(!map.remove_entry(&3, &"three".to_owned()));
    assert!(map.remove_entry(&3, &"3".to_owned()));
    assert!(!map.contains_key(&3));

    assert_eq!(map.set(&6, "six".to_owned())?, "6");
    assert_eq!(map.value(&6)?, "six");
    assert_eq!(map.set(&7, "seven".to_owned()), Err(MapError::KeyNotFound));
    assert!(!map.contains_key(&7));

    assert!(!map.is_full());
    assert!(!map.is_fixed_size());
    assert!(!map.is_read_only());
    Ok(())
}

fn copy_to<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    fill(&mut map, &SCENARIO)?;
    let mut dest = vec![(0, String::new()); 8];
    map.copy_to(&mut dest, 2)?;
    assert_eq!(dest[..2], [(0, String::new()), (0, String::new())]);
    assert_eq!(dest[2..], entries(&map)[..]);

    let mut small = vec![(0, String::new()); 8];
    assert_eq!(
        map.copy_to(&mut small, 3),
        Err(MapError::DestinationTooSmall {
            needed: 6,
            available: 5
        })
    );
    assert!(small.iter().all(|(k, _)| *k == 0));
    assert!(map.copy_to(&mut small, 9).is_err());
    Ok(())
}

fn visitors<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    fill(&mut map, &SCENARIO)?;

    let mut counting = CountingVisitor::new();
    map.accept(&mut counting);
    assert_eq!(counting.count(), 6);

    let mut tracking = TrackingVisitor::new();
    map.accept(&mut tracking);
    assert_eq!(tracking.into_entries(), entries(&map));

    let mut seen = Vec::new();
    let mut until_five = FnVisitor::new(|k: &i32, _: &String| {
        seen.push(*k);
        if *k >= 5 {
            std::ops::ControlFlow::Break(())
        } else {
            std::ops::ControlFlow::Continue(())
        }
    });
    map.accept(&mut until_five);
    assert_eq!(seen, [1, 2, 4, 5]);
    Ok(())
}

fn size_order<M: SortedMap<i32, String>>(mut map: M) -> Result<()> {
    let mut tree = RedBlackMap::new();
    let mut list = SkipMap::new();
    fill(&mut tree, &[100, 200, 300])?;
    fill(&mut list, &[1, 2, 3, 4, 5, 6])?;

    fill(&mut map, &SCENARIO)?;
    assert_eq!(map.size_order(&tree), Ordering::Greater);
    assert_eq!(map.size_order(&list), Ordering::Equal);
    map.clear();
    assert_eq!(map.size_order(&tree), Ordering::Less);
    Ok(())
}

macro_rules! contract {
    ($name:ident, $new:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn scenario_insert() -> Result<()> {
                super::scenario_insert($new)
            }

            #[test]
            fn scenario_remove() -> Result<()> {
                super::scenario_remove($new)
            }

            #[test]
            fn duplicate_key() -> Result<()> {
                super::duplicate_key($new)
            }

            #[test]
            fn round_trip() -> Result<()> {
                super::round_trip($new)
            }

            #[test]
            fn interleaved() -> Result<()> {
                super::interleaved($new)
            }

            #[test]
            fn ascending() -> Result<()> {
                super::ascending($new)
            }

            #[test]
            fn clear() -> Result<()> {
                super::clear($new)
            }

            #[test]
            fn entry_helpers() -> Result<()> {
                super::entry_helpers($new)
            }

            #[test]
            fn copy_to() -> Result<()> {
                super::copy_to($new)
            }

            #[test]
            fn visitors() -> Result<()> {
                super::visitors($new)
            }

            #[test]
            fn size_order() -> Result<()> {
                super::size_order($new)
            }
        }
    };
}

contract!(red_black, RedBlackMap::<i32, String>::new());
contract!(skip_list, SkipMap::<i32, String>::new());
contract!(
    skip_list_sparse,
    SkipMap::<i32, String, _>::with_options(4, 0.25, sortedmap::Natural)
        .map_err(anyhow::Error::from)?
);

#[test]
fn engines_agree() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut keys: Vec<i32> = (0..1000).collect();
    keys.shuffle(&mut rng);

    let mut tree = RedBlackMap::new();
    let mut list = SkipMap::new();
    fill(&mut tree, &keys)?;
    fill(&mut list, &keys)?;
    for key in keys.iter().filter(|k| *k % 3 == 0) {
        assert_eq!(tree.remove(key), list.remove(key));
    }
    assert_eq!(tree.len(), list.len());
    assert!(tree.iter().eq(list.iter()));
    assert_eq!(tree.min()?, list.min()?);
    assert_eq!(tree.max()?, list.max()?);
    Ok(())
}

#[test]
fn invalid_skip_list_options() {
    assert!(matches!(
        SkipMap::<i32, String>::with_options(0, 0.5, sortedmap::Natural),
        Err(MapError::OutOfRange(_))
    ));
    for p in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
        assert!(matches!(
            SkipMap::<i32, String>::with_options(16, p, sortedmap::Natural),
            Err(MapError::OutOfRange(_))
        ));
    }
}
