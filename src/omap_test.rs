use arbitrary::{self, unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeMap;

#[test]
fn test_omap() {
    let seed: u128 = random();
    // let seed: u128 = 197582876559945180918999591639253259379;
    println!("test_omap {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    let mut index: OMap<u8, u64> = OMap::new();
    let mut btmap: BTreeMap<u8, u64> = BTreeMap::new();

    let mut counts = [0_usize; 21];

    for _i in 0..100_000 {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op = uns.arbitrary().unwrap();
        // println!("op -- {:?}", op);
        match op {
            Op::Len => {
                counts[0] += 1;
                assert_eq!(index.len(), btmap.len());
            }
            Op::IsEmpty => {
                counts[1] += 1;
                assert_eq!(index.is_empty(), btmap.is_empty());
            }
            Op::Set(key, val) => {
                counts[2] += 1;
                match (index.set(key, val), btmap.insert(key, val)) {
                    (None, None) => (),
                    (Some(v), Some(r)) => assert_eq!(v, r, "for key {}", key),
                    (None, Some(_)) => panic!("set no key {} in omap", key),
                    (Some(_), None) => panic!("set no key {} in btree", key),
                }
            }
            Op::Remove(key) => {
                counts[3] += 1;
                match (index.remove(&key), btmap.remove(&key)) {
                    (None, None) => (),
                    (Some(v), Some(r)) => assert_eq!(v, r, "for key {}", key),
                    (None, Some(_)) => panic!("remove no key {} in omap", key),
                    (Some(_), None) => panic!("remove no key {} in btree", key),
                }
            }
            Op::RemoveMin => {
                counts[4] += 1;
                let a = index.remove_min();
                let b = match btmap.iter().next().map(|(key, _)| *key) {
                    Some(key) => btmap.remove(&key).map(|value| (key, value)),
                    None => None,
                };
                assert_eq!(a, b);
            }
            Op::RemoveMax => {
                counts[5] += 1;
                let a = index.remove_max();
                let b = match btmap.iter().next_back().map(|(key, _)| *key) {
                    Some(key) => btmap.remove(&key).map(|value| (key, value)),
                    None => None,
                };
                assert_eq!(a, b);
            }
            Op::Validate => {
                counts[6] += 1;
                index.validate().unwrap();
            }
            Op::Get(key) => {
                counts[7] += 1;
                assert_eq!(index.get(&key), btmap.get(&key), "for key {}", key);
            }
            Op::Min => {
                counts[8] += 1;
                assert_eq!(index.min(), btmap.iter().next());
            }
            Op::Max => {
                counts[9] += 1;
                assert_eq!(index.max(), btmap.iter().next_back());
            }
            Op::Floor(key) => {
                counts[10] += 1;
                let r = btmap.range(..=key).next_back().map(|(k, _)| k);
                assert_eq!(index.floor(&key), r, "floor {}", key);
            }
            Op::Ceiling(key) => {
                counts[11] += 1;
                let r = btmap.range(key..).next().map(|(k, _)| k);
                assert_eq!(index.ceiling(&key), r, "ceiling {}", key);
            }
            Op::Predecessor(key) => {
                counts[12] += 1;
                let r = btmap.range(..key).next_back().map(|(k, _)| k);
                assert_eq!(index.predecessor(&key), r, "predecessor {}", key);
            }
            Op::Successor(key) => {
                counts[13] += 1;
                let r = btmap
                    .range((Bound::Excluded(key), Bound::Unbounded))
                    .next()
                    .map(|(k, _)| k);
                assert_eq!(index.successor(&key), r, "successor {}", key);
            }
            Op::Rank(key) => {
                counts[14] += 1;
                assert_eq!(index.rank(&key), btmap.range(..key).count(), "rank {}", key);
            }
            Op::Select(rank) => {
                counts[15] += 1;
                let rank = rank % (btmap.len() + 1);
                assert_eq!(index.select(rank), btmap.iter().nth(rank), "select {}", rank);
            }
            Op::Iter => {
                counts[16] += 1;
                let a: Vec<(u8, u64)> = index.iter().map(|(k, v)| (*k, *v)).collect();
                let b: Vec<(u8, u64)> = btmap.iter().map(|(k, v)| (*k, *v)).collect();
                assert_eq!(a, b);
            }
            Op::Range((l, h)) if asc_range(&l, &h) => {
                counts[17] += 1;
                let r = (Bound::from(l), Bound::from(h));
                let a: Vec<(u8, u64)> = index.range(r).map(|(k, v)| (*k, *v)).collect();
                let b: Vec<(u8, u64)> = btmap.range(r).map(|(k, v)| (*k, *v)).collect();
                assert_eq!(a, b, "range {:?}", r);
            }
            Op::Range((l, h)) => {
                counts[17] += 1;
                let r = (Bound::from(l), Bound::from(h));
                let a: Vec<(u8, u64)> = index.range(r).map(|(k, v)| (*k, *v)).collect();
                assert_eq!(a.len(), 0, "range {:?}", r);
            }
            Op::Reverse((l, h)) if asc_range(&l, &h) => {
                counts[18] += 1;
                let r = (Bound::from(l), Bound::from(h));
                let a: Vec<(u8, u64)> = index.reverse(r).map(|(k, v)| (*k, *v)).collect();
                let b: Vec<(u8, u64)> =
                    btmap.range(r).rev().map(|(k, v)| (*k, *v)).collect();
                assert_eq!(a, b, "reverse {:?}", r);
            }
            Op::Reverse((l, h)) => {
                counts[18] += 1;
                let r = (Bound::from(l), Bound::from(h));
                let a: Vec<(u8, u64)> = index.reverse(r).map(|(k, v)| (*k, *v)).collect();
                assert_eq!(a.len(), 0, "reverse {:?}", r);
            }
            Op::RangeLen((l, h)) if asc_range(&l, &h) => {
                counts[19] += 1;
                let r = (Bound::from(l), Bound::from(h));
                assert_eq!(index.range_len(r), btmap.range(r).count(), "range_len {:?}", r);
            }
            Op::RangeLen((l, h)) => {
                counts[19] += 1;
                let r = (Bound::from(l), Bound::from(h));
                assert_eq!(index.range_len(r), 0, "range_len {:?}", r);
            }
            Op::Extend(items) => {
                counts[20] += 1;
                index.extend(items.clone());
                btmap.extend(items.clone())
            }
        }
    }

    let a: Vec<(u8, u64)> = index.iter().map(|(k, v)| (*k, *v)).collect();
    let b: Vec<(u8, u64)> = btmap.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(a, b);
    index.validate().unwrap();

    println!("counts {:?} len:{}/{}", counts, index.len(), btmap.len());
}

#[test]
fn test_empty_index() {
    let mut index: OMap<u8, u8> = OMap::new();

    assert_eq!(index.len(), 0);
    assert_eq!(index.is_empty(), true);
    assert_eq!(index.get(&1), None);
    assert_eq!(index.min(), None);
    assert_eq!(index.max(), None);
    assert_eq!(index.floor(&1), None);
    assert_eq!(index.ceiling(&1), None);
    assert_eq!(index.predecessor(&1), None);
    assert_eq!(index.successor(&1), None);
    assert_eq!(index.rank(&1), 0);
    assert_eq!(index.select(0), None);
    assert_eq!(index.remove(&1), None);
    assert_eq!(index.remove_min(), None);
    assert_eq!(index.remove_max(), None);
    assert_eq!(index.iter().count(), 0);
    assert_eq!(index.range::<u8, _>(..).count(), 0);
    assert_eq!(index.reverse::<_, u8>(..).count(), 0);
    index.validate().unwrap();
}

#[test]
fn test_from_sorted() {
    let mut index: OMap<u32, u32> = OMap::from_sorted((0..10_000).map(|key| (key, key)));
    index.validate().unwrap();

    assert_eq!(index.len(), 10_000);
    assert_eq!(index.select(0), Some((&0, &0)));
    assert_eq!(index.select(9_999), Some((&9_999, &9_999)));
    assert_eq!(index.select(10_000), None);
    assert_eq!(index.rank(&5_000), 5_000);

    assert_eq!(index.remove_min(), Some((0, 0)));
    assert_eq!(index.remove_max(), Some((9_999, 9_999)));
    assert_eq!(index.len(), 9_998);
    assert_eq!(index.get(&0), None);
    assert_eq!(index.get(&9_999), None);
    index.validate().unwrap();
}

#[test]
fn test_from_sorted_sizes() {
    // exercise every shape around the full/partial bottom-level seam
    for n in 0..200_u32 {
        let index: OMap<u32, u32> = OMap::from_sorted((0..n).map(|key| (key, key)));
        index.validate().unwrap();
        assert_eq!(index.len(), n as usize);

        let keys: Vec<u32> = index.iter().map(|(key, _)| *key).collect();
        let want: Vec<u32> = (0..n).collect();
        assert_eq!(keys, want, "for n {}", n);
    }
}

#[test]
fn test_bulk_matches_incremental() {
    let bulk: OMap<u32, u32> = OMap::from_sorted((0..1_000).map(|key| (key, key * 2)));

    let mut incr: OMap<u32, u32> = OMap::new();
    for key in 0..1_000 {
        incr.set(key, key * 2);
    }

    let a: Vec<(u32, u32)> = bulk.iter().map(|(k, v)| (*k, *v)).collect();
    let b: Vec<(u32, u32)> = incr.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(a, b);
}

#[test]
fn test_stored_key_queries() {
    let seed: u128 = random();
    println!("test_stored_key_queries {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    let mut index: OMap<u16, u64> = OMap::new();
    for _i in 0..1_000 {
        index.set(rng.gen(), rng.gen());
    }

    let min = *index.min().unwrap().0;
    for (key, _) in index.iter() {
        assert_eq!(index.floor(key), Some(key));
        assert_eq!(index.ceiling(key), Some(key));

        let rank = index.rank(key);
        assert_eq!(index.select(rank).map(|(k, _)| k), Some(key));
        assert_eq!(index.range_len(min..=*key), rank + 1);
    }
}

#[test]
fn test_predecessor_successor() {
    let n = 1_000_u32;
    let index: OMap<u32, u64> = OMap::from_sorted((0..n).map(|key| (key, 1)));

    let lo = *index.min().unwrap().0;
    let hi = *index.max().unwrap().0;
    for (i, (key, value)) in index.iter().enumerate() {
        let i = i as u32;
        assert_eq!(*key, i);
        assert_eq!(*value, 1);
        match *key == lo {
            true => assert_eq!(index.predecessor(key), None),
            false => assert_eq!(index.predecessor(key), Some(&(i - 1))),
        }
        match *key == hi {
            true => assert_eq!(index.successor(key), None),
            false => assert_eq!(index.successor(key), Some(&(i + 1))),
        }
    }
}

#[test]
fn test_alternate_remove() {
    let mut index: OMap<u32, u32> = OMap::from_sorted((0..1_000).map(|key| (key, key)));

    let mut get_min = true;
    while !index.is_empty() {
        let key = match get_min {
            true => *index.min().unwrap().0,
            false => *index.max().unwrap().0,
        };
        assert_eq!(index.remove(&key), Some(key));
        assert_eq!(index.get(&key), None, "key {} still present", key);
        get_min = !get_min;
    }
}

#[test]
fn test_alternate_minmax_drain() {
    let mut index: OMap<u32, u32> = OMap::from_sorted((0..1_000).map(|key| (key, key)));

    let (mut lo, mut hi) = (0, 999);
    let mut get_min = true;
    while !index.is_empty() {
        match get_min {
            true => {
                assert_eq!(index.remove_min(), Some((lo, lo)));
                assert_eq!(index.get(&lo), None);
                lo += 1;
            }
            false => {
                assert_eq!(index.remove_max(), Some((hi, hi)));
                assert_eq!(index.get(&hi), None);
                hi -= 1;
            }
        }
        get_min = !get_min;
    }
    assert_eq!(index.remove_min(), None);
    assert_eq!(index.remove_max(), None);
}

#[derive(Debug, Arbitrary)]
enum Op<K, V> {
    Len,
    IsEmpty,
    Set(K, V),
    Remove(K),
    RemoveMin,
    RemoveMax,
    Validate,
    Get(K),
    Min,
    Max,
    Floor(K),
    Ceiling(K),
    Predecessor(K),
    Successor(K),
    Rank(K),
    Select(usize),
    Iter,
    Range((Limit<K>, Limit<K>)),
    Reverse((Limit<K>, Limit<K>)),
    RangeLen((Limit<K>, Limit<K>)),
    Extend(Vec<(K, V)>),
}

#[derive(Debug, Arbitrary, Eq, PartialEq)]
enum Limit<T> {
    Unbounded,
    Included(T),
    Excluded(T),
}

fn asc_range<T: PartialOrd>(from: &Limit<T>, to: &Limit<T>) -> bool {
    match (from, to) {
        (Limit::Unbounded, _) => true,
        (_, Limit::Unbounded) => true,
        (Limit::Included(a), Limit::Included(b)) => a <= b,
        (Limit::Included(a), Limit::Excluded(b)) => a <= b,
        (Limit::Excluded(a), Limit::Included(b)) => a <= b,
        (Limit::Excluded(a), Limit::Excluded(b)) => b > a,
    }
}

impl<T> From<Limit<T>> for Bound<T> {
    fn from(limit: Limit<T>) -> Self {
        match limit {
            Limit::Unbounded => Bound::Unbounded,
            Limit::Included(v) => Bound::Included(v),
            Limit::Excluded(v) => Bound::Excluded(v),
        }
    }
}
