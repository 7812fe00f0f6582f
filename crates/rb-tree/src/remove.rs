//! Top-down removal.
//!
//! The descent keeps one invariant: before moving past a node `q`, either
//! `q` or the child about to be entered is red. A black `q` with a black
//! next child is repaired first, using one of the [`Repair`] cases. The
//! descent always ends at a node with at most one child, which can then be
//! spliced out without creating a black-height deficiency.
//!
//! A key held by a node with two children is not unlinked there. Descent
//! carries on to the in-order predecessor, which is spliced out instead and
//! whose element replaces the removed one.

use std::cmp::Ordering;

use crate::error::RbError;
use crate::tree::RbTree;
use crate::types::{Color, Side};

/// Local restructuring applied at a black node before descending past it.
///
/// `side` is the side of `parent` holding the current node; the sibling is
/// on the opposite side. The near nephew is the sibling's child on `side`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Repair {
    /// The current node's other child is red. Rotate it up so the current
    /// node turns red, moving down `toward` the descent.
    SiblingRed { toward: Side },
    /// Both nephews are black. Recolor parent black, node and sibling red.
    Borrow { parent: u32, sibling: u32 },
    /// Far nephew red. Single rotation of the parent towards the node.
    RotateFar { parent: u32, sibling: u32, side: Side },
    /// Near nephew red. Double rotation bringing the nephew to the top.
    RotateNear { parent: u32, sibling: u32, side: Side },
}

impl<T, C> RbTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Removes `key`. Returns `Ok(false)` if it is absent, in which case the
    /// tree is not touched at all.
    pub fn remove(&mut self, key: &T) -> Result<bool, RbError> {
        Ok(self.take(key)?.is_some())
    }

    /// Removes `key` and returns the element that was stored for it.
    pub fn take(&mut self, key: &T) -> Result<Option<T>, RbError> {
        self.check_key(key)?;
        if !self.contains(key) {
            log::debug!("remove skipped: key not present");
            return Ok(None);
        }

        let root = self.root.expect("lookup succeeded on a non-empty tree");
        let mut path = Vec::new();
        let mut hit = None;
        let q = self.remove_at(key, root, &mut path, &mut hit);
        let hit = hit.expect("descent passes through the located key");
        let element = self.splice(q, path.last().copied(), hit);

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
        self.len -= 1;
        self.mod_count += 1;
        Ok(Some(element))
    }

    /// Visits `q`, whose ancestors from the root down are `path`, and returns
    /// the node where descent stops.
    fn remove_at(
        &mut self,
        key: &T,
        q: u32,
        path: &mut Vec<u32>,
        hit: &mut Option<u32>,
    ) -> u32 {
        let ord = self.cmp(key, q);
        if ord == Ordering::Equal {
            *hit = Some(q);
        }
        let dir = Side::toward(ord);
        if let Some(repair) = self.classify(q, dir, path.last().copied()) {
            self.apply(q, repair, path);
        }
        match self.child(q, dir) {
            Some(next) => {
                path.push(q);
                self.remove_at(key, next, path, hit)
            }
            None => q,
        }
    }

    /// Picks the repair needed at `q` before descending towards `dir`, if any.
    ///
    /// No repair is needed when `q` or its `dir` child is red. The root has
    /// no sibling to borrow from and is left alone; the black-height of the
    /// whole tree may then drop by one, which is harmless.
    pub(crate) fn classify(&self, q: u32, dir: Side, parent: Option<u32>) -> Option<Repair> {
        if self.is_red(Some(q)) || self.is_red(self.child(q, dir)) {
            return None;
        }
        if self.is_red(self.child(q, dir.opposite())) {
            return Some(Repair::SiblingRed { toward: dir });
        }

        let parent = parent?;
        let side = self.side_of(parent, q);
        let sibling = self
            .child(parent, side.opposite())
            .expect("black non-root node has a sibling");
        let near = self.child(sibling, side);
        let far = self.child(sibling, side.opposite());

        Some(if self.is_red(near) {
            Repair::RotateNear {
                parent,
                sibling,
                side,
            }
        } else if self.is_red(far) {
            Repair::RotateFar {
                parent,
                sibling,
                side,
            }
        } else {
            Repair::Borrow { parent, sibling }
        })
    }

    /// Applies `repair` at `q`, leaving `q` red. `path` is rewritten so that
    /// it still lists the ancestors of `q`.
    pub(crate) fn apply(&mut self, q: u32, repair: Repair, path: &mut Vec<u32>) {
        match repair {
            Repair::SiblingRed { toward } => {
                let top = self.rotate(q, toward);
                self.replace_child(path.last().copied(), q, Some(top));
                path.push(top);
            }
            Repair::Borrow { parent, sibling } => {
                self.set_color(parent, Color::Black);
                self.set_color(sibling, Color::Red);
                self.set_color(q, Color::Red);
            }
            Repair::RotateFar {
                parent,
                sibling: _,
                side,
            } => {
                let top = self.rotate(parent, side);
                self.lift(q, parent, top, path);
            }
            Repair::RotateNear {
                parent,
                sibling,
                side,
            } => {
                let nephew = self.rotate(sibling, side.opposite());
                self.replace_child(Some(parent), sibling, Some(nephew));
                let top = self.rotate(parent, side);
                self.lift(q, parent, top, path);
            }
        }
    }

    /// Finishes a rotation of `parent` that brought `top` above it.
    fn lift(&mut self, q: u32, parent: u32, top: u32, path: &mut Vec<u32>) {
        let grand = path.len().checked_sub(2).map(|i| path[i]);
        self.replace_child(grand, parent, Some(top));

        self.set_color(q, Color::Red);
        self.set_color(top, Color::Red);
        let node = &self.arena[top as usize];
        for child in [node.l, node.r].into_iter().flatten() {
            self.set_color(child, Color::Black);
        }

        path.pop();
        path.push(top);
        path.push(parent);
    }

    /// Unlinks `q` (at most one child) from `parent` and moves its element
    /// into `hit` when they differ. Returns the removed element.
    fn splice(&mut self, q: u32, parent: Option<u32>, hit: u32) -> T {
        let node = &self.arena[q as usize];
        let child = node.l.or(node.r);
        self.replace_child(parent, q, child);
        if let Some(child) = child {
            self.set_color(child, Color::Black);
        }

        let last = (self.arena.len() - 1) as u32;
        let removed = self.release(q);
        if hit == q {
            return removed.k;
        }
        let hit = if hit == last { q } else { hit };
        std::mem::replace(&mut self.arena[hit as usize].k, removed.k)
    }
}
