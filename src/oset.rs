//! Module provide ordered-set implemented by [OSet] type.
//!
//! OSet is a thin facade over [OMap] with unit values; the balancing
//! engine, order statistics and scan machinery are shared, not
//! duplicated.
//!
//! Membership and ordered queries:
//! ```
//! use ostable::OSet;
//!
//! let mut index: OSet<u64> = OSet::new();
//!
//! index.insert(10);
//! index.insert(20);
//! index.insert(30);
//!
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.contains(&20), true);
//! assert_eq!(index.floor(&25), Some(&20));
//! assert_eq!(index.rank(&30), 2);
//! assert_eq!(index.select(0), Some(&10));
//!
//! assert_eq!(index.remove(&20), true);
//! assert_eq!(index.remove(&20), false);
//! ```
//!
//! Set algebra:
//! ```
//! use ostable::OSet;
//!
//! let a: OSet<u32> = (0..6).collect();
//! let b: OSet<u32> = (3..9).collect();
//!
//! let i: Vec<u32> = a.intersection(&b).iter().cloned().collect();
//! assert_eq!(i, vec![3, 4, 5]);
//!
//! let u: Vec<u32> = a.union(&b).iter().cloned().collect();
//! assert_eq!(u, (0..9).collect::<Vec<u32>>());
//!
//! assert!(a.intersection(&b).is_subset(&a));
//! ```

use std::{
    borrow::Borrow,
    iter::FromIterator,
    ops::RangeBounds,
};

use crate::{llrb, omap::OMap, Result};

/// OSet manage a single instance of an in-memory ordered-set using
/// [left-leaning-red-black][llrb] tree, sharing its engine with
/// [OMap].
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct OSet<T> {
    map: OMap<T, ()>,
}

impl<T> Default for OSet<T> {
    fn default() -> Self {
        OSet::new()
    }
}

impl<T> OSet<T> {
    /// Create an empty instance of OSet.
    pub fn new() -> OSet<T> {
        OSet { map: OMap::new() }
    }

    /// Create an instance of OSet loaded with `values`, which must be
    /// unique and in ascending order. Takes linear time with zero
    /// comparisons.
    pub fn from_sorted<I>(values: I) -> OSet<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
        T: Ord,
    {
        let entries = values.into_iter().map(|value| (value, ()));
        OSet {
            map: OMap::from_sorted(entries),
        }
    }
}

/// Maintenance API.
impl<T> OSet<T> {
    /// Return number of values in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Validate the underlying LLRB tree, refer [OMap::validate].
    pub fn validate(&self) -> Result<()>
    where
        T: Ord,
    {
        self.map.validate()
    }
}

/// Write operations.
impl<T> OSet<T> {
    /// Add value to this instance. Return whether the value was newly
    /// inserted.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        self.map.set(value, ()).is_none()
    }

    /// Remove value from this instance. Return whether the value was
    /// present; removing an absent value is a no-op.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.map.remove(value).is_some()
    }

    /// Remove and return the smallest value. No-op on an empty index.
    pub fn remove_min(&mut self) -> Option<T>
    where
        T: Ord,
    {
        self.map.remove_min().map(|(value, _)| value)
    }

    /// Remove and return the largest value. No-op on an empty index.
    pub fn remove_max(&mut self) -> Option<T>
    where
        T: Ord,
    {
        self.map.remove_max().map(|(value, _)| value)
    }
}

/// Read operations.
impl<T> OSet<T> {
    /// Check whether value is present in this instance.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(value)
    }

    /// Return the smallest value.
    pub fn min(&self) -> Option<&T> {
        self.map.min().map(|(value, _)| value)
    }

    /// Return the largest value.
    pub fn max(&self) -> Option<&T> {
        self.map.max().map(|(value, _)| value)
    }

    /// Return the largest value less than or equal to `value`.
    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.floor(value)
    }

    /// Return the smallest value greater than or equal to `value`.
    pub fn ceiling<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.ceiling(value)
    }

    /// Return the largest value strictly less than `value`.
    pub fn predecessor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.predecessor(value)
    }

    /// Return the smallest value strictly greater than `value`.
    pub fn successor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.successor(value)
    }

    /// Return the number of values strictly less than `value`.
    pub fn rank<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.rank(value)
    }

    /// Return the value with exactly `rank` smaller values stored, or
    /// None if `rank` is not within `0..len()`.
    pub fn select(&self, rank: usize) -> Option<&T> {
        self.map.select(rank).map(|(value, _)| value)
    }

    /// Return the number of values within `range`, without touching
    /// the values.
    pub fn range_len<Q, R>(&self, range: R) -> usize
    where
        T: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        self.map.range_len(range)
    }
}

/// Set algebra.
impl<T> OSet<T> {
    /// Check whether every value of this set is contained in `other`.
    /// Sets larger than `other` fail the size test straight away.
    pub fn is_subset(&self, other: &OSet<T>) -> bool
    where
        T: Ord,
    {
        self.len() <= other.len() && self.iter().all(|value| other.contains(value))
    }

    /// Return a new set with the values common to `self` and `other`.
    /// The smaller set is scanned, the larger set probed for
    /// membership.
    pub fn intersection(&self, other: &OSet<T>) -> OSet<T>
    where
        T: Clone + Ord,
    {
        let (small, large) = match self.len() <= other.len() {
            true => (self, other),
            false => (other, self),
        };
        small.iter().filter(|value| large.contains(*value)).cloned().collect()
    }

    /// Return a new set with the values of both `self` and `other`.
    /// The larger set is copied and the smaller set folded into the
    /// copy.
    pub fn union(&self, other: &OSet<T>) -> OSet<T>
    where
        T: Clone + Ord,
    {
        let (small, large) = match self.len() <= other.len() {
            true => (self, other),
            false => (other, self),
        };
        let mut union = large.clone();
        union.extend(small.iter().cloned());
        union
    }
}

/// Iteration.
impl<T> OSet<T> {
    /// Return an iterator over all values in this instance, in
    /// ascending order.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            inner: self.map.iter(),
        }
    }

    /// Range over all values from low to high, in ascending order.
    pub fn range<Q, R>(&self, range: R) -> Range<T, R, Q>
    where
        T: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        Range {
            inner: self.map.range(range),
        }
    }

    /// Reverse range over all values from high to low, in descending
    /// order.
    pub fn reverse<R, Q>(&self, range: R) -> Reverse<T, R, Q>
    where
        T: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        Reverse {
            inner: self.map.reverse(range),
        }
    }
}

impl<T> Extend<T> for OSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(|value| {
            self.insert(value);
        });
    }
}

impl<T> FromIterator<T> for OSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> OSet<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut index = OSet::new();
        index.extend(iter);
        index
    }
}

impl<'a, T> IntoIterator for &'a OSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator type, to do full table scan in ascending order.
pub struct Iter<'a, T> {
    inner: llrb::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, _)| value)
    }
}

/// Iterator type, to do range scan between a _lower-bound_ and
/// _higher-bound_, in ascending order.
pub struct Range<'a, T, R, Q>
where
    Q: ?Sized,
{
    inner: llrb::Range<'a, T, (), R, Q>,
}

impl<'a, T, R, Q> Iterator for Range<'a, T, R, Q>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, _)| value)
    }
}

/// Iterator type, to do range scan between a _higher-bound_ and
/// _lower-bound_, in descending order.
pub struct Reverse<'a, T, R, Q>
where
    Q: ?Sized,
{
    inner: llrb::Reverse<'a, T, (), R, Q>,
}

impl<'a, T, R, Q> Iterator for Reverse<'a, T, R, Q>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, _)| value)
    }
}

#[cfg(test)]
#[path = "oset_test.rs"]
mod oset_test;
