use std::cmp::Ordering;
use std::fmt;

use crate::error::RbError;
use crate::types::{Color, NodeRef, RbNode, Side};

fn default_comparator<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Red-black tree holding a set of unique elements.
///
/// Insertion and removal each make a single top-down pass, recoloring and
/// rotating on the way down so that no fix-up walk back towards the root is
/// needed. Nodes are kept in a dense arena and addressed by `u32` index.
pub struct RbTree<T, C = fn(&T, &T) -> Ordering>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub(crate) arena: Vec<RbNode<T>>,
    pub(crate) root: Option<u32>,
    pub(crate) len: usize,
    pub(crate) rotations: usize,
    pub(crate) mod_count: u64,
    pub(crate) comparator: C,
}

impl<T> RbTree<T, fn(&T, &T) -> Ordering>
where
    T: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }
}

impl<T> Default for RbTree<T, fn(&T, &T) -> Ordering>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> RbTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
            rotations: 0,
            mod_count: 0,
            comparator,
        }
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Edge count of the longest root-to-leaf path; `-1` when empty.
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    fn height_of(&self, node: Option<u32>) -> i32 {
        node.map_or(-1, |i| {
            let n = &self.arena[i as usize];
            1 + self.height_of(n.l).max(self.height_of(n.r))
        })
    }

    /// Total rotations performed over the lifetime of the tree.
    pub fn rotation_count(&self) -> usize {
        self.rotations
    }

    /// Counter bumped on every structural change; traversals compare against it.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|i| NodeRef::new(&self.arena, i))
    }

    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &T) -> Option<&T> {
        self.find(key).map(|i| &self.arena[i as usize].k)
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&T> {
        self.extreme(Side::Left)
    }

    /// Largest element.
    pub fn last(&self) -> Option<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&T> {
        let mut curr = self.root?;
        while let Some(next) = self.child(curr, side) {
            curr = next;
        }
        Some(&self.arena[curr as usize].k)
    }

    /// Drops every element. The rotation counter is cumulative and survives.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.mod_count += 1;
    }

    /// Ascending snapshot of the elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub(crate) fn find(&self, key: &T) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            match self.cmp(key, i) {
                Ordering::Equal => return Some(i),
                ord => curr = self.child(i, Side::toward(ord)),
            }
        }
        None
    }

    #[inline]
    pub(crate) fn cmp(&self, key: &T, node: u32) -> Ordering {
        (self.comparator)(key, &self.arena[node as usize].k)
    }

    /// Rejects keys the comparator cannot place, before any mutation.
    pub(crate) fn check_key(&self, key: &T) -> Result<(), RbError> {
        if (self.comparator)(key, key) == Ordering::Equal {
            Ok(())
        } else {
            log::warn!("rejecting key that does not compare equal to itself");
            Err(RbError::InvalidKey)
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, node: Option<u32>) -> bool {
        node.is_some_and(|i| self.arena[i as usize].is_red())
    }

    #[inline]
    pub(crate) fn child(&self, node: u32, side: Side) -> Option<u32> {
        self.arena[node as usize].child(side)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, node: u32, side: Side, v: Option<u32>) {
        self.arena[node as usize].set_child(side, v);
    }

    #[inline]
    pub(crate) fn set_color(&mut self, node: u32, color: Color) {
        self.arena[node as usize].color = color;
    }

    /// Side of `parent` that holds `child`, decided by index identity.
    #[inline]
    pub(crate) fn side_of(&self, parent: u32, child: u32) -> Side {
        if self.arena[parent as usize].l == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points the slot that held `old` at `new`. A `None` parent is the root slot.
    pub(crate) fn replace_child(&mut self, parent: Option<u32>, old: u32, new: Option<u32>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(p, old);
                self.set_child(p, side, new);
            }
        }
    }

    /// `n`'s right child takes its place and `n` becomes that child's left
    /// child. The two nodes exchange colors. Returns the new subtree root;
    /// the caller re-attaches it.
    pub(crate) fn rotate_left(&mut self, n: u32) -> u32 {
        let x = self.arena[n as usize]
            .r
            .expect("rotate_left requires right child");
        let xl = self.arena[x as usize].l;
        self.arena[n as usize].r = xl;
        self.arena[x as usize].l = Some(n);
        self.exchange_colors(n, x);
        self.rotations += 1;
        log::trace!("rotate left at node {n}, node {x} moves up");
        x
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    pub(crate) fn rotate_right(&mut self, n: u32) -> u32 {
        let x = self.arena[n as usize]
            .l
            .expect("rotate_right requires left child");
        let xr = self.arena[x as usize].r;
        self.arena[n as usize].l = xr;
        self.arena[x as usize].r = Some(n);
        self.exchange_colors(n, x);
        self.rotations += 1;
        log::trace!("rotate right at node {n}, node {x} moves up");
        x
    }

    /// Rotates `n` down towards `side`; its child on the opposite side moves up.
    #[inline]
    pub(crate) fn rotate(&mut self, n: u32, side: Side) -> u32 {
        match side {
            Side::Left => self.rotate_left(n),
            Side::Right => self.rotate_right(n),
        }
    }

    fn exchange_colors(&mut self, a: u32, b: u32) {
        let ca = self.arena[a as usize].color;
        let cb = self.arena[b as usize].color;
        self.set_color(a, cb);
        self.set_color(b, ca);
    }

    pub(crate) fn alloc(&mut self, k: T, color: Color) -> u32 {
        let mut node = RbNode::new(k);
        node.color = color;
        self.arena.push(node);
        (self.arena.len() - 1) as u32
    }

    /// Takes an already unlinked node out of the arena.
    ///
    /// The last arena node is moved into the freed slot and its incoming link
    /// is repointed, so the caller must treat the former last index as now
    /// living at `idx`.
    pub(crate) fn release(&mut self, idx: u32) -> RbNode<T> {
        let last = (self.arena.len() - 1) as u32;
        let node = self.arena.swap_remove(idx as usize);
        if idx != last {
            self.relink(last, idx);
        }
        node
    }

    /// Repoints the link to a node moved from index `from` to index `to`,
    /// locating its parent by descending with the node's own key.
    fn relink(&mut self, from: u32, to: u32) {
        if self.root == Some(from) {
            self.root = Some(to);
            return;
        }
        let mut curr = self.root.expect("relocated node belongs to a non-empty tree");
        loop {
            let side = Side::toward(self.cmp(&self.arena[to as usize].k, curr));
            let next = self
                .child(curr, side)
                .expect("relocated node is reachable by its key");
            if next == from {
                self.set_child(curr, side, Some(to));
                return;
            }
            curr = next;
        }
    }
}

impl<T, C> fmt::Debug for RbTree<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
