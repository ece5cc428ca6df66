//! Module implement the tree engine shared by [OMap][crate::OMap] and
//! [OSet][crate::OSet].
//!
//! There is exactly one copy of the balancing algorithm, generic over
//! the payload type; the set variant instantiates it with `()` values.
//! Nodes cache the number of entries in their subtree, which is what
//! makes rank/select and range counting logarithmic.
//!
//! Mutating operations recurse along the search path and return the
//! possibly new subtree root; recursion depth is bounded by the tree
//! height, which the red-black invariants keep below `2*log2(n+1)`.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    marker,
    ops::{Bound, DerefMut, RangeBounds},
};

use crate::{Error, Result};

/// Node corresponds to a single entry in the tree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) black: bool,                    // store: black or red
    pub(crate) size: usize,                    // store: count of entries in this subtree
    pub(crate) left: Option<Box<Node<K, V>>>,  // store: left child
    pub(crate) right: Option<Box<Node<K, V>>>, // store: right child
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, black: bool) -> Node<K, V> {
        Node {
            key,
            value,
            black,
            size: 1,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn as_left_ref(&self) -> Option<&Node<K, V>> {
        self.left.as_ref().map(AsRef::as_ref)
    }

    #[inline]
    pub(crate) fn as_right_ref(&self) -> Option<&Node<K, V>> {
        self.right.as_ref().map(AsRef::as_ref)
    }

    #[inline]
    fn update_size(&mut self) {
        self.size = size(self.as_left_ref()) + 1 + size(self.as_right_ref());
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    fn is_black(&self) -> bool {
        self.black
    }
}

pub(crate) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

pub(crate) fn is_black<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(true, |node| node.is_black())
}

/// Count of entries in the subtree rooted at `node`.
pub(crate) fn size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.size)
}

//--------- rotation routines for 2-3 algorithm ----------------

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    (r)                 (r)  \
//            /       \                 /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_black(node.as_right_ref()) {
        panic!("rotate_left(): rotating a black link ? call the programmer");
    }
    let mut x = node.right.take().unwrap();
    node.right = x.left.take();
    x.black = node.black;
    node.set_red();
    x.size = node.size;
    node.update_size();
    x.left = Some(node);
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//            (r)   \                   (r)  \
//           /       \                 /      \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_black(node.as_left_ref()) {
        panic!("rotate_right(): rotating a black link ? call the programmer")
    }
    let mut x = node.left.take().unwrap();
    node.left = x.right.take();
    x.black = node.black;
    node.set_red();
    x.size = node.size;
    node.update_size();
    x.right = Some(node);
    x
}

//        (x)                   (!x)
//         |                     |
//        node                  node
//        / \                   / \
//      (y) (z)              (!y) (!z)
//     /      \              /      \
//   left    right         left    right
//
fn flip<K, V>(node: &mut Node<K, V>) {
    if let Some(left) = node.left.as_mut() {
        left.toggle_link();
    }
    if let Some(right) = node.right.as_mut() {
        right.toggle_link();
    }
    node.toggle_link();
}

// Bottom-up fixup, restores the left-leaning invariants after at most
// one local violation per level and refreshes the cached subtree size.
// Every mutating recursion calls this on the unwind.
fn balance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(node.as_right_ref()) && is_black(node.as_left_ref()) {
        node = rotate_left(node);
    }

    let left = node.as_left_ref();
    if is_red(left) && is_red(left.unwrap().as_left_ref()) {
        node = rotate_right(node);
    }

    if is_red(node.as_left_ref()) && is_red(node.as_right_ref()) {
        flip(node.deref_mut());
    }

    node.update_size();
    node
}

// Move a red link to the left, by coloring node.left or one of its
// children red. Precondition: node is red, node.left and
// node.left.left are black.
fn move_red_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip(node.deref_mut());
    if is_red(node.right.as_ref().unwrap().as_left_ref()) {
        node.right = Some(rotate_right(node.right.take().unwrap()));
        node = rotate_left(node);
        flip(node.deref_mut());
    }
    node
}

// Mirror image of move_red_left. By the left-leaning asymmetry there
// is no second rotation on the right arm.
fn move_red_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip(node.deref_mut());
    if is_red(node.left.as_ref().unwrap().as_left_ref()) {
        node = rotate_right(node);
        flip(node.deref_mut());
    }
    node
}

//--------- write paths ----------------

pub(crate) type Upsert<K, V> = (Box<Node<K, V>>, Option<V>);
pub(crate) type Delete<K, V> = (Option<Box<Node<K, V>>>, Option<(K, V)>);
pub(crate) type Delmin<K, V> = (Option<Box<Node<K, V>>>, Option<Node<K, V>>);

// Insert or update. New nodes enter the tree red, at a leaf position;
// an existing key gets its value swapped in place and the old value is
// carried up.
pub(crate) fn set<K, V>(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Upsert<K, V>
where
    K: Ord,
{
    let mut node = match node {
        Some(node) => node,
        None => return (Box::new(Node::new(key, value, false /*black*/)), None),
    };

    match node.key.cmp(&key) {
        Ordering::Greater => {
            let (left, old_value) = set(node.left.take(), key, value);
            node.left = Some(left);
            (balance(node), old_value)
        }
        Ordering::Less => {
            let (right, old_value) = set(node.right.take(), key, value);
            node.right = Some(right);
            (balance(node), old_value)
        }
        Ordering::Equal => {
            let old_value = std::mem::replace(&mut node.value, value);
            (balance(node), Some(old_value))
        }
    }
}

// Delete the smallest entry under `node`, returning the detached node
// by value. The detached node is always a leaf, the move-red descent
// guarantees it.
pub(crate) fn delete_min<K, V>(node: Option<Box<Node<K, V>>>) -> Delmin<K, V> {
    let mut node = match node {
        None => return (None, None),
        Some(node) => node,
    };
    if node.left.is_none() {
        return (None, Some(*node));
    }

    let left = node.as_left_ref();
    if !is_red(left) && !is_red(left.unwrap().as_left_ref()) {
        node = move_red_left(node);
    }

    let (left, detached) = delete_min(node.left.take());
    node.left = left;
    (Some(balance(node)), detached)
}

// Mirror of delete_min, with the extra rotate_right step whenever the
// left link is red.
pub(crate) fn delete_max<K, V>(node: Option<Box<Node<K, V>>>) -> Delmin<K, V> {
    let mut node = match node {
        None => return (None, None),
        Some(node) => node,
    };

    if is_red(node.as_left_ref()) {
        node = rotate_right(node);
    } else {
        if node.right.is_none() {
            return (None, Some(*node));
        }
        let right = node.as_right_ref();
        if !is_red(right) && !is_red(right.unwrap().as_left_ref()) {
            node = move_red_right(node);
        }
    }

    let (right, detached) = delete_max(node.right.take());
    node.right = right;
    (Some(balance(node)), detached)
}

// Delete `key` under `node`. An absent key falls through without
// structural change and returns None for the entry. Deleting an
// internal key splices the subtree minimum of the right child into the
// removed node's place; the replacement keeps the removed node's
// color, black balance depends on it.
pub(crate) fn delete<K, V, Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Delete<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = match node {
        None => return (None, None),
        Some(node) => node,
    };

    if node.key.borrow().gt(key) {
        if node.left.is_none() {
            return (Some(balance(node)), None);
        }
        let left = node.as_left_ref();
        if !is_red(left) && !is_red(left.unwrap().as_left_ref()) {
            node = move_red_left(node);
        }
        let (left, old_entry) = delete(node.left.take(), key);
        node.left = left;
        return (Some(balance(node)), old_entry);
    }

    if is_red(node.as_left_ref()) {
        node = rotate_right(node);
    } else {
        if node.right.is_none() {
            return match node.key.borrow().cmp(key) {
                Ordering::Equal => {
                    let node = *node;
                    (None, Some((node.key, node.value)))
                }
                _ => (Some(balance(node)), None),
            };
        }
        let right = node.as_right_ref();
        if !is_red(right) && !is_red(right.unwrap().as_left_ref()) {
            node = move_red_right(node);
        }
        if node.key.borrow().eq(key) {
            let (right, detached) = delete_min(node.right.take());
            let mut succ = match detached {
                Some(succ) => Box::new(succ),
                None => panic!("delete(): fatal logic, call the programmer"),
            };
            succ.left = node.left.take();
            succ.right = right;
            succ.black = node.black; // color should not change
            let node = *node;
            return (Some(balance(succ)), Some((node.key, node.value)));
        }
    }

    let (right, old_entry) = delete(node.right.take(), key);
    node.right = right;
    (Some(balance(node)), old_entry)
}

//--------- read paths ----------------

pub(crate) fn get<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(nref) = node {
        node = match nref.key.borrow().cmp(key) {
            Ordering::Less => nref.as_right_ref(),
            Ordering::Greater => nref.as_left_ref(),
            Ordering::Equal => return Some(&nref.value),
        };
    }
    None
}

pub(crate) fn min<'a, K, V>(mut node: Option<&'a Node<K, V>>) -> Option<(&'a K, &'a V)> {
    let mut entry = None;
    while let Some(nref) = node {
        entry = Some((&nref.key, &nref.value));
        node = nref.as_left_ref();
    }
    entry
}

pub(crate) fn max<'a, K, V>(mut node: Option<&'a Node<K, V>>) -> Option<(&'a K, &'a V)> {
    let mut entry = None;
    while let Some(nref) = node {
        entry = Some((&nref.key, &nref.value));
        node = nref.as_right_ref();
    }
    entry
}

// Largest key less than or equal to `key`.
pub(crate) fn floor<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut champ = None;
    while let Some(nref) = node {
        node = match nref.key.borrow().cmp(key) {
            Ordering::Greater => nref.as_left_ref(),
            Ordering::Less => {
                champ = Some(&nref.key);
                nref.as_right_ref()
            }
            Ordering::Equal => return Some(&nref.key),
        };
    }
    champ
}

// Smallest key greater than or equal to `key`.
pub(crate) fn ceiling<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut champ = None;
    while let Some(nref) = node {
        node = match nref.key.borrow().cmp(key) {
            Ordering::Less => nref.as_right_ref(),
            Ordering::Greater => {
                champ = Some(&nref.key);
                nref.as_left_ref()
            }
            Ordering::Equal => return Some(&nref.key),
        };
    }
    champ
}

// Identical to floor, except the descent goes left on an equal key.
pub(crate) fn predecessor<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut champ = None;
    while let Some(nref) = node {
        node = match nref.key.borrow().cmp(key) {
            Ordering::Less => {
                champ = Some(&nref.key);
                nref.as_right_ref()
            }
            _ => nref.as_left_ref(),
        };
    }
    champ
}

// Identical to ceiling, except the descent goes right on an equal key.
pub(crate) fn successor<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut champ = None;
    while let Some(nref) = node {
        node = match nref.key.borrow().cmp(key) {
            Ordering::Greater => {
                champ = Some(&nref.key);
                nref.as_left_ref()
            }
            _ => nref.as_right_ref(),
        };
    }
    champ
}

//--------- order statistics ----------------

// Count of keys strictly less than `key`, accumulated from left
// subtree sizes along the descent.
pub(crate) fn rank<K, V, Q>(mut node: Option<&Node<K, V>>, key: &Q) -> usize
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut rank = 0;
    while let Some(nref) = node {
        match nref.key.borrow().cmp(key) {
            Ordering::Greater => node = nref.as_left_ref(),
            Ordering::Less => {
                rank += size(nref.as_left_ref()) + 1;
                node = nref.as_right_ref();
            }
            Ordering::Equal => {
                rank += size(nref.as_left_ref());
                break;
            }
        }
    }
    rank
}

// Inverse of rank. Caller must bound-check `rank` against the tree
// size; within bounds the descent always lands on an entry.
pub(crate) fn select<'a, K, V>(
    root: Option<&'a Node<K, V>>,
    mut rank: usize,
) -> Option<(&'a K, &'a V)> {
    let mut node = root?;
    loop {
        let len_left = size(node.as_left_ref());
        match rank.cmp(&len_left) {
            Ordering::Less => node = node.as_left_ref()?,
            Ordering::Greater => {
                rank -= len_left + 1;
                node = node.as_right_ref()?;
            }
            Ordering::Equal => break Some((&node.key, &node.value)),
        }
    }
}

//--------- bulk construction ----------------

// Build a tree from the next `fence` entries of a presorted sequence,
// without comparing keys. Nodes are addressed as in a complete binary
// heap, root at 1 and children at 2i and 2i+1; the in-order descent
// consumes the sequence left subtree first. A node is created red
// exactly when its heap index falls on the bottom level, and the only
// possible double-red, at the seam between the full levels and the
// partial bottom level, is repaired by a local flip.
pub(crate) fn build_sorted<K, V, I>(
    iter: &mut I,
    fence: usize,
    index: usize,
) -> Option<Box<Node<K, V>>>
where
    I: Iterator<Item = (K, V)>,
{
    if fence < index {
        return None;
    }

    let left = build_sorted(iter, fence, index * 2);
    let (key, value) = match iter.next() {
        Some(entry) => entry,
        None => panic!("build_sorted(): entries shorter than promised ? call the programmer"),
    };
    let on_bottom = index >= bottom_level(fence);
    let mut node = Box::new(Node::new(key, value, !on_bottom /*black*/));
    node.left = left;
    node.right = build_sorted(iter, fence, index * 2 + 1);

    if is_red(node.as_left_ref()) && is_red(node.as_right_ref()) {
        flip(node.deref_mut());
    }
    node.update_size();
    Some(node)
}

// First heap index of the bottom level of a complete tree holding
// `fence` nodes; `fence` must be non-zero.
fn bottom_level(fence: usize) -> usize {
    1 << (usize::BITS - 1 - fence.leading_zeros())
}

//--------- integrity checks ----------------

// Walk the whole tree checking sort order, left-leaning reds, no
// consecutive reds, perfect black balance and cached-size consistency.
// Returns the black count along the left-most path.
pub(crate) fn validate_tree<K, V>(
    node: Option<&Node<K, V>>,
    fromred: bool,
    mut n_blacks: usize,
) -> Result<usize>
where
    K: Ord,
{
    let node = match node {
        Some(node) => node,
        None => return Ok(n_blacks),
    };

    let red = is_red(Some(node));
    if fromred && red {
        return err_at!(Fatal, msg: "consecutive reds");
    }
    if is_red(node.as_right_ref()) {
        return err_at!(Fatal, msg: "right-leaning red link");
    }
    if node.size != size(node.as_left_ref()) + 1 + size(node.as_right_ref()) {
        return err_at!(Fatal, msg: "inconsistent subtree size");
    }

    if !red {
        n_blacks += 1;
    }

    let (left, right) = (node.as_left_ref(), node.as_right_ref());
    let lblacks = validate_tree(left, red, n_blacks)?;
    let rblacks = validate_tree(right, red, n_blacks)?;
    if lblacks != rblacks {
        return err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks);
    }

    if let Some(left) = left {
        if left.key.ge(&node.key) {
            return err_at!(Fatal, msg: "sort order violation on left");
        }
    }
    if let Some(right) = right {
        if right.key.le(&node.key) {
            return err_at!(Fatal, msg: "sort order violation on right");
        }
    }

    Ok(lblacks)
}

// Count of nodes along the longest root-to-leaf path.
pub(crate) fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    match node {
        None => 0,
        Some(node) => 1 + height(node.as_left_ref()).max(height(node.as_right_ref())),
    }
}

//--------- iteration ----------------

pub(crate) fn iter<K, V>(root: Option<&Node<K, V>>) -> Iter<K, V> {
    let mut paths = Vec::default();
    build_iter(IFlag::Left, root, &mut paths);
    Iter { paths }
}

pub(crate) fn range<'a, K, V, R, Q>(
    root: Option<&'a Node<K, V>>,
    range: R,
) -> Range<'a, K, V, R, Q>
where
    K: Borrow<Q>,
    R: RangeBounds<Q>,
    Q: Ord + ?Sized,
{
    let mut paths = Vec::default();
    match range.start_bound() {
        Bound::Unbounded => build_iter(IFlag::Left, root, &mut paths),
        Bound::Included(low) => find_start(root, low, true, &mut paths),
        Bound::Excluded(low) => find_start(root, low, false, &mut paths),
    };
    let iter = Iter { paths };

    Range {
        range,
        iter,
        fin: false,
        high: marker::PhantomData,
    }
}

pub(crate) fn reverse<'a, K, V, R, Q>(
    root: Option<&'a Node<K, V>>,
    range: R,
) -> Reverse<'a, K, V, R, Q>
where
    K: Borrow<Q>,
    R: RangeBounds<Q>,
    Q: Ord + ?Sized,
{
    let mut paths = Vec::default();
    match range.end_bound() {
        Bound::Unbounded => build_iter(IFlag::Right, root, &mut paths),
        Bound::Included(high) => find_end(root, high, true, &mut paths),
        Bound::Excluded(high) => find_end(root, high, false, &mut paths),
    };
    let iter = Rev { paths };

    Reverse {
        range,
        iter,
        fin: false,
        low: marker::PhantomData,
    }
}

/// Iterator type, to do full table scan in ascending order.
pub struct Iter<'a, K, V> {
    paths: Vec<Fragment<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Left => {
                    path.flag = IFlag::Center;
                    let node: &'a Node<K, V> = path.node;
                    break Some((&node.key, &node.value));
                }
                IFlag::Center => {
                    path.flag = IFlag::Right;
                    let node: &'a Node<K, V> = path.node;
                    build_iter(IFlag::Left, node.as_right_ref(), &mut self.paths)
                }
                IFlag::Right => {
                    self.paths.pop();
                }
            }
        }
    }
}

// Descending counterpart to [Iter], driven by the same fragment stack
// with the state transitions mirrored.
struct Rev<'a, K, V> {
    paths: Vec<Fragment<'a, K, V>>,
}

impl<'a, K, V> Iterator for Rev<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Right => {
                    path.flag = IFlag::Center;
                    let node: &'a Node<K, V> = path.node;
                    break Some((&node.key, &node.value));
                }
                IFlag::Center => {
                    path.flag = IFlag::Left;
                    let node: &'a Node<K, V> = path.node;
                    build_iter(IFlag::Right, node.as_left_ref(), &mut self.paths)
                }
                IFlag::Left => {
                    self.paths.pop();
                }
            }
        }
    }
}

/// Iterator type, to do range scan between a _lower-bound_ and
/// _higher-bound_, in ascending order.
pub struct Range<'a, K, V, R, Q>
where
    Q: ?Sized,
{
    range: R,
    iter: Iter<'a, K, V>,
    fin: bool,
    high: marker::PhantomData<Q>,
}

impl<'a, K, V, R, Q> Iterator for Range<'a, K, V, R, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.fin {
            false => {
                let (key, value) = self.iter.next()?;
                match self.range.end_bound() {
                    Bound::Included(high) if key.borrow().le(high) => Some((key, value)),
                    Bound::Excluded(high) if key.borrow().lt(high) => Some((key, value)),
                    Bound::Unbounded => Some((key, value)),
                    Bound::Included(_) | Bound::Excluded(_) => {
                        self.fin = true;
                        None
                    }
                }
            }
            true => None,
        }
    }
}

/// Iterator type, to do range scan between a _higher-bound_ and
/// _lower-bound_, in descending order.
pub struct Reverse<'a, K, V, R, Q>
where
    Q: ?Sized,
{
    range: R,
    iter: Rev<'a, K, V>,
    fin: bool,
    low: marker::PhantomData<Q>,
}

impl<'a, K, V, R, Q> Iterator for Reverse<'a, K, V, R, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.fin {
            false => {
                let (key, value) = self.iter.next()?;
                match self.range.start_bound() {
                    Bound::Included(low) if key.borrow().ge(low) => Some((key, value)),
                    Bound::Excluded(low) if key.borrow().gt(low) => Some((key, value)),
                    Bound::Unbounded => Some((key, value)),
                    Bound::Included(_) | Bound::Excluded(_) => {
                        self.fin = true;
                        None
                    }
                }
            }
            true => None,
        }
    }
}

#[derive(Copy, Clone)]
enum IFlag {
    Left,
    Center,
    Right,
}

struct Fragment<'a, K, V> {
    flag: IFlag,
    node: &'a Node<K, V>,
}

fn build_iter<'a, K, V>(
    flag: IFlag,
    node: Option<&'a Node<K, V>>,
    paths: &mut Vec<Fragment<'a, K, V>>,
) {
    if let Some(node) = node {
        let item = Fragment { flag, node };
        let node = match flag {
            IFlag::Left => node.as_left_ref(),
            IFlag::Right => node.as_right_ref(),
            IFlag::Center => unreachable!(),
        };
        paths.push(item);
        build_iter(flag, node, paths)
    }
}

fn find_start<'a, K, V, Q>(
    node: Option<&'a Node<K, V>>,
    low: &Q,
    incl: bool,
    paths: &mut Vec<Fragment<'a, K, V>>,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    if let Some(node) = node {
        let left = node.as_left_ref();
        let right = node.as_right_ref();

        let cmp = node.key.borrow().cmp(low);

        let flag = match cmp {
            Ordering::Less => IFlag::Right,
            Ordering::Equal if incl => IFlag::Left,
            Ordering::Equal => IFlag::Center,
            Ordering::Greater => IFlag::Left,
        };
        paths.push(Fragment { flag, node });

        match cmp {
            Ordering::Equal => (),
            Ordering::Less => find_start(right, low, incl, paths),
            Ordering::Greater => find_start(left, low, incl, paths),
        }
    }
}

fn find_end<'a, K, V, Q>(
    node: Option<&'a Node<K, V>>,
    high: &Q,
    incl: bool,
    paths: &mut Vec<Fragment<'a, K, V>>,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    if let Some(node) = node {
        let left = node.as_left_ref();
        let right = node.as_right_ref();

        let cmp = node.key.borrow().cmp(high);

        let flag = match cmp {
            Ordering::Less => IFlag::Right,
            Ordering::Equal if incl => IFlag::Right,
            Ordering::Equal => IFlag::Center,
            Ordering::Greater => IFlag::Left,
        };
        paths.push(Fragment { flag, node });

        match cmp {
            Ordering::Equal => (),
            Ordering::Less => find_end(right, high, incl, paths),
            Ordering::Greater => find_end(left, high, incl, paths),
        }
    }
}
