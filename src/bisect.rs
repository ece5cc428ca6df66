//! Module provide binary searches over presorted slices.
//!
//! Keys must be in ascending order. Slices may hold duplicate keys;
//! [first] and [last] pick out the boundaries of a run of equal keys,
//! while [index_of] stops on whichever match the probe sequence hits.
//! Each function makes `1 + ceil(lg N)` comparisons in the worst case,
//! where N is the number of keys searched.
//!
//! ```
//! use ostable::bisect;
//!
//! let keys = [10, 20, 20, 30];
//! assert_eq!(bisect::first(&keys, &20), Some(1));
//! assert_eq!(bisect::last(&keys, &20), Some(2));
//! assert_eq!(bisect::floor(&keys, &25), Some(2));
//! assert_eq!(bisect::ceiling(&keys, &25), Some(3));
//! ```

use std::cmp::Ordering;

/// Return a position of `key` in `keys`, or None if there is no such
/// key. With duplicate keys any matching position may come back.
pub fn index_of<T>(keys: &[T], key: &T) -> Option<usize>
where
    T: Ord,
{
    let (mut lo, mut hi) = (0, keys.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match key.cmp(&keys[mid]) {
            Ordering::Less => hi = mid,
            Ordering::Greater => lo = mid + 1,
            Ordering::Equal => return Some(mid),
        }
    }
    None
}

/// Return the first position of `key` in `keys`, or None if there is
/// no such key.
pub fn first<T>(keys: &[T], key: &T) -> Option<usize>
where
    T: Ord,
{
    let (mut lo, mut hi) = (0, keys.len());
    let mut champ = None;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match key.cmp(&keys[mid]) {
            Ordering::Less => hi = mid,
            Ordering::Greater => lo = mid + 1,
            Ordering::Equal => {
                // store the match, restart search on the lower half
                champ = Some(mid);
                hi = mid;
            }
        }
    }
    champ
}

/// Return the last position of `key` in `keys`, or None if there is
/// no such key.
pub fn last<T>(keys: &[T], key: &T) -> Option<usize>
where
    T: Ord,
{
    let (mut lo, mut hi) = (0, keys.len());
    let mut champ = None;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match key.cmp(&keys[mid]) {
            Ordering::Less => hi = mid,
            Ordering::Greater => lo = mid + 1,
            Ordering::Equal => {
                // store the match, restart search on the upper half
                champ = Some(mid);
                lo = mid + 1;
            }
        }
    }
    champ
}

/// Return the position of the largest key less than or equal to `key`,
/// or None if there is no such key.
pub fn floor<T>(keys: &[T], key: &T) -> Option<usize>
where
    T: Ord,
{
    let (mut lo, mut hi) = (0, keys.len());
    let mut champ = None;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match key.cmp(&keys[mid]) {
            Ordering::Less => hi = mid,
            Ordering::Greater => {
                champ = Some(mid);
                lo = mid + 1;
            }
            Ordering::Equal => return Some(mid),
        }
    }
    champ
}

/// Return the position of the smallest key greater than or equal to
/// `key`, or None if there is no such key.
pub fn ceiling<T>(keys: &[T], key: &T) -> Option<usize>
where
    T: Ord,
{
    let (mut lo, mut hi) = (0, keys.len());
    let mut champ = None;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match key.cmp(&keys[mid]) {
            Ordering::Less => {
                champ = Some(mid);
                hi = mid;
            }
            Ordering::Greater => lo = mid + 1,
            Ordering::Equal => return Some(mid),
        }
    }
    champ
}

#[cfg(test)]
#[path = "bisect_test.rs"]
mod bisect_test;
