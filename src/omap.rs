//! Module provide ordered-map implemented by [OMap] type.
//!
//! OMap is implemented using [left-leaning-red-black][wiki-llrb].
//!
//! - Each entry in OMap instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - CRUD operations, via set(), get(), remove() api.
//! - Ordered queries, via min(), max(), floor(), ceiling(),
//!   predecessor(), successor() api.
//! - Order statistics, via rank() and select() api.
//! - Full table scan, to iterate over all entries.
//! - Range scan, to iterate between a ``low`` and ``high``.
//! - Reverse iteration.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! [OMap] instance and its API uses Rust's ownership model and borrow
//! semantics to ensure thread safe operation.
//!
//! CRUD operations on [OMap] instance:
//! ```
//! use ostable::OMap;
//!
//! let mut index: OMap<String,String> = OMap::new();
//!
//! index.set("key1".to_string(), "value1".to_string());
//! index.set("key2".to_string(), "value2".to_string());
//! index.set("key2".to_string(), "value3".to_string());
//!
//! let n = index.len();
//! assert_eq!(n, 2);
//!
//! let value = index.get("key1").unwrap();
//! assert_eq!(value, "value1");
//! let value = index.get("key2").unwrap();
//! assert_eq!(value, "value3");
//!
//! let old_value = index.remove("key1").unwrap();
//! assert_eq!(old_value, "value1".to_string());
//! ```
//!
//! Range scan:
//! ```
//! use ostable::OMap;
//! use std::ops::Bound;
//!
//! let mut index: OMap<String,String> = OMap::new();
//!
//! index.set("key1".to_string(), "value1".to_string());
//! index.set("key2".to_string(), "value2".to_string());
//! index.set("key3".to_string(), "value3".to_string());
//!
//! let low = Bound::Excluded("key1");
//! let high = Bound::Excluded("key2");
//! let item = index.range::<str, _>((low, high)).next();
//! assert_eq!(item, None);
//!
//! let low = Bound::Excluded("key1");
//! let high = Bound::Excluded("key3");
//! let item = index.range::<str, _>((low, high)).next();
//! assert_eq!(item, Some((&"key2".to_string(), &"value2".to_string())));
//! ```
//!
//! Order statistics:
//! ```
//! use ostable::OMap;
//!
//! let index: OMap<u32,u64> = OMap::from_sorted((0..100).map(|key| (key, 1)));
//! assert_eq!(index.rank(&40), 40);
//! assert_eq!(index.select(40), Some((&40, &1)));
//! assert_eq!(index.range_len(&10..&20), 10);
//! ```
//!
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

use std::{
    borrow::Borrow,
    iter::FromIterator,
    ops::{Bound, RangeBounds},
};

use crate::{
    llrb::{self, is_black, is_red, Node},
    Error, Result,
};

pub use crate::llrb::{Iter, Range, Reverse};

/// OMap manage a single instance of an in-memory ordered-map using
/// [left-leaning-red-black][llrb] tree, with every node counting the
/// entries under it.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct OMap<K, V> {
    root: Option<Box<Node<K, V>>>,
}

impl<K, V> Default for OMap<K, V> {
    fn default() -> Self {
        OMap::new()
    }
}

impl<K, V> OMap<K, V> {
    /// Create an empty instance of OMap.
    pub fn new() -> OMap<K, V> {
        OMap { root: None }
    }

    /// Create an instance of OMap loaded with `entries`, which must
    /// supply unique keys in ascending order. Takes linear time with
    /// zero key comparisons.
    pub fn from_sorted<I>(entries: I) -> OMap<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: Ord,
    {
        let mut iter = entries.into_iter();
        let fence = iter.len();
        let root = llrb::build_sorted(&mut iter, fence, 1).map(|mut root| {
            root.set_black();
            root
        });

        let index = OMap { root };
        index.debug_validate();
        index
    }
}

/// Maintenance API.
impl<K, V> OMap<K, V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        llrb::size(self.root.as_deref())
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * Root node is always black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * No red link is a right-child link.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    /// * Make sure cached subtree sizes add up.
    /// * Tree height is within the red-black bound for its size.
    pub fn validate(&self) -> Result<()>
    where
        K: Ord,
    {
        let root = self.root.as_deref();
        if is_red(root) {
            return err_at!(Fatal, msg: "root is red");
        }
        llrb::validate_tree(root, is_red(root), 0 /*n_blacks*/)?;

        let (height, n) = (llrb::height(root), self.len());
        let max_height = 2.0 * (((n + 1) as f64).log2());
        if (height.saturating_sub(1) as f64) > max_height {
            return err_at!(Fatal, msg: "height {} exceeds bound for {} entries", height, n);
        }
        Ok(())
    }

    // Full structural self-check after a mutation, debug builds only.
    fn debug_validate(&self)
    where
        K: Ord,
    {
        #[cfg(debug_assertions)]
        if let Err(err) = self.validate() {
            panic!("{}", err)
        }
    }
}

/// Write operations.
impl<K, V> OMap<K, V> {
    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn set(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let (mut root, old_value) = llrb::set(self.root.take(), key, value);
        root.set_black();
        self.root = Some(root);
        self.debug_validate();
        old_value
    }

    /// Remove key from this instance and return its value. If key is
    /// not present, then remove is effectively a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        if let Some(root) = self.root.as_mut() {
            if is_black(root.as_left_ref()) && is_black(root.as_right_ref()) {
                root.set_red();
            }
        }

        let (root, old_entry) = llrb::delete(self.root.take(), key);
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.set_black();
        }

        self.debug_validate();
        old_entry.map(|(_, value)| value)
    }

    /// Remove the smallest key and return the {key, value} entry.
    /// No-op on an empty index.
    pub fn remove_min(&mut self) -> Option<(K, V)>
    where
        K: Ord,
    {
        if let Some(root) = self.root.as_mut() {
            if is_black(root.as_left_ref()) && is_black(root.as_right_ref()) {
                root.set_red();
            }
        }

        let (root, detached) = llrb::delete_min(self.root.take());
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.set_black();
        }

        self.debug_validate();
        detached.map(|node| (node.key, node.value))
    }

    /// Remove the largest key and return the {key, value} entry.
    /// No-op on an empty index.
    pub fn remove_max(&mut self) -> Option<(K, V)>
    where
        K: Ord,
    {
        if let Some(root) = self.root.as_mut() {
            if is_black(root.as_left_ref()) && is_black(root.as_right_ref()) {
                root.set_red();
            }
        }

        let (root, detached) = llrb::delete_max(self.root.take());
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.set_black();
        }

        self.debug_validate();
        detached.map(|node| (node.key, node.value))
    }
}

/// Read operations.
impl<K, V> OMap<K, V> {
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        llrb::get(self.root.as_deref(), key)
    }

    /// Check whether key is present in this instance.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Return the smallest key, along with its value.
    pub fn min(&self) -> Option<(&K, &V)> {
        llrb::min(self.root.as_deref())
    }

    /// Return the largest key, along with its value.
    pub fn max(&self) -> Option<(&K, &V)> {
        llrb::max(self.root.as_deref())
    }

    /// Return the largest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        llrb::floor(self.root.as_deref(), key)
    }

    /// Return the smallest key greater than or equal to `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        llrb::ceiling(self.root.as_deref(), key)
    }

    /// Return the largest key strictly less than `key`.
    pub fn predecessor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        llrb::predecessor(self.root.as_deref(), key)
    }

    /// Return the smallest key strictly greater than `key`.
    pub fn successor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        llrb::successor(self.root.as_deref(), key)
    }
}

/// Order statistics.
impl<K, V> OMap<K, V> {
    /// Return the number of keys strictly less than `key`.
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        llrb::rank(self.root.as_deref(), key)
    }

    /// Return the entry with exactly `rank` smaller keys stored, or
    /// None if `rank` is not within `0..len()`. Inverse of [OMap::rank]
    /// over valid ranks.
    pub fn select(&self, rank: usize) -> Option<(&K, &V)> {
        if rank >= self.len() {
            return None;
        }
        llrb::select(self.root.as_deref(), rank)
    }

    /// Return the number of entries within `range`, derived from rank
    /// arithmetic without touching the entries. An inverted range
    /// counts zero.
    pub fn range_len<Q, R>(&self, range: R) -> usize
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        let lo = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(low) => self.rank(low),
            Bound::Excluded(low) => self.rank(low) + usize::from(self.contains_key(low)),
        };
        let hi = match range.end_bound() {
            Bound::Unbounded => self.len(),
            Bound::Included(high) => self.rank(high) + usize::from(self.contains_key(high)),
            Bound::Excluded(high) => self.rank(high),
        };
        hi.saturating_sub(lo)
    }
}

/// Iteration.
impl<K, V> OMap<K, V> {
    /// Return an iterator over all entries in this instance, in
    /// ascending key order.
    pub fn iter(&self) -> Iter<K, V> {
        llrb::iter(self.root.as_deref())
    }

    /// Range over all entries from low to high, in ascending order.
    pub fn range<Q, R>(&self, range: R) -> Range<K, V, R, Q>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        llrb::range(self.root.as_deref(), range)
    }

    /// Reverse range over all entries from high to low, in descending
    /// order.
    pub fn reverse<R, Q>(&self, range: R) -> Reverse<K, V, R, Q>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        llrb::reverse(self.root.as_deref(), range)
    }
}

impl<K, V> Extend<(K, V)> for OMap<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        iter.into_iter().for_each(|(key, value)| {
            self.set(key, value);
        });
    }
}

impl<K, V> FromIterator<(K, V)> for OMap<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> OMap<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut index = OMap::new();
        index.extend(iter);
        index
    }
}

impl<'a, K, V> IntoIterator for &'a OMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "omap_test.rs"]
mod omap_test;
