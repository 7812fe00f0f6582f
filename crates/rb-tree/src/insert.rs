//! Top-down insertion.
//!
//! A single descent from the root. At every visited node a black node with
//! two red children is color-flipped, and a red-red pair created by that
//! flip (or by attaching the new red leaf) is repaired at once by rotating
//! around the grandparent. When the new leaf is attached nothing above it
//! needs fixing, apart from re-blackening the root.

use std::cmp::Ordering;

use crate::error::RbError;
use crate::tree::RbTree;
use crate::types::{Color, Side};

impl<T, C> RbTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Inserts `key`. Returns `Ok(false)` and leaves the element set unchanged
    /// if an equal key is already present.
    ///
    /// Color flips applied on the way down before a duplicate is detected
    /// are kept; the tree is still a valid red-black tree afterwards.
    pub fn insert(&mut self, key: T) -> Result<bool, RbError> {
        self.check_key(&key)?;

        let Some(root) = self.root else {
            let n = self.alloc(key, Color::Black);
            self.root = Some(n);
            self.len = 1;
            self.mod_count += 1;
            return Ok(true);
        };

        let rotations = self.rotations;
        let mut path = Vec::new();
        let inserted = self.insert_at(key, root, &mut path);

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
        if inserted {
            self.len += 1;
        } else {
            log::debug!("insert skipped: key already present");
        }
        if inserted || rotations != self.rotations {
            self.mod_count += 1;
        }
        Ok(inserted)
    }

    /// Visits `q`, whose ancestors from the root down are `path`.
    fn insert_at(&mut self, key: T, q: u32, path: &mut Vec<u32>) -> bool {
        self.color_flip(q);
        self.fix_red_red(q, path);

        let ord = self.cmp(&key, q);
        if ord == Ordering::Equal {
            return false;
        }
        let side = Side::toward(ord);
        path.push(q);
        match self.child(q, side) {
            Some(next) => self.insert_at(key, next, path),
            None => {
                let n = self.alloc(key, Color::Red);
                self.set_child(q, side, Some(n));
                self.fix_red_red(n, path);
                true
            }
        }
    }

    /// Recolors `q` red and both its children black if both children are red.
    pub(crate) fn color_flip(&mut self, q: u32) -> bool {
        let node = &self.arena[q as usize];
        let (l, r) = (node.l, node.r);
        if !(self.is_red(l) && self.is_red(r)) {
            return false;
        }
        self.set_color(q, Color::Red);
        for child in [l, r].into_iter().flatten() {
            self.set_color(child, Color::Black);
        }
        true
    }

    /// Resolves a red `q` under a red parent by rotating at the grandparent.
    ///
    /// `path` ends with `q`'s parent. On return it again lists the true
    /// ancestors of `q`, which may have moved up one or two levels.
    fn fix_red_red(&mut self, q: u32, path: &mut Vec<u32>) {
        let Some(&p) = path.last() else {
            return;
        };
        if !(self.is_red(Some(q)) && self.is_red(Some(p))) {
            return;
        }

        // The root is black whenever one of its children is red, so a red
        // parent always has a parent of its own.
        let depth = path.len();
        let g = depth
            .checked_sub(2)
            .map(|i| path[i])
            .expect("red parent has a grandparent");
        let gg = depth.checked_sub(3).map(|i| path[i]);

        let p_side = self.side_of(g, p);
        let q_side = self.side_of(p, q);

        path.truncate(depth - 2);
        if p_side == q_side {
            let top = self.rotate(g, p_side.opposite());
            self.replace_child(gg, g, Some(top));
            path.push(top);
        } else {
            let mid = self.rotate(p, p_side);
            self.replace_child(Some(g), p, Some(mid));
            let top = self.rotate(g, p_side.opposite());
            self.replace_child(gg, g, Some(top));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> RbTree<i32> {
        let mut tree = RbTree::new();
        for &k in keys {
            assert_eq!(tree.insert(k), Ok(true));
            tree.assert_valid().unwrap();
        }
        tree
    }

    #[test]
    fn first_insert_makes_black_root() {
        let tree = tree_of(&[42]);
        let root = tree.root().unwrap();
        assert_eq!(root.element(), &42);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn outer_grandchild_single_rotation() {
        let tree = tree_of(&[1, 2, 3]);
        let root = tree.root().unwrap();
        assert_eq!(root.element(), &2);
        assert_eq!(root.left().unwrap().color(), Color::Red);
        assert_eq!(root.right().unwrap().color(), Color::Red);
        assert_eq!(tree.rotation_count(), 1);
    }

    #[test]
    fn inner_grandchild_double_rotation() {
        let tree = tree_of(&[3, 1, 2]);
        let root = tree.root().unwrap();
        assert_eq!(root.element(), &2);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(root.left().unwrap().element(), &1);
        assert_eq!(root.right().unwrap().element(), &3);
        assert_eq!(tree.rotation_count(), 2);
    }

    #[test]
    fn color_flip_on_the_way_down() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.insert(4), Ok(true));
        let root = tree.root().unwrap();
        assert_eq!(root.color(), Color::Black);
        assert_eq!(root.left().unwrap().color(), Color::Black);
        assert_eq!(root.right().unwrap().color(), Color::Black);
        assert_eq!(root.right().unwrap().right().unwrap().color(), Color::Red);
        assert_eq!(tree.rotation_count(), 0);
    }

    #[test]
    fn duplicate_keeps_flip_but_not_size() {
        let mut tree = tree_of(&[2, 1, 3]);
        let mods = tree.mod_count();
        assert_eq!(tree.insert(3), Ok(false));

        // The root flip happened before the duplicate was found.
        let root = tree.root().unwrap();
        assert_eq!(root.left().unwrap().color(), Color::Black);
        assert_eq!(root.right().unwrap().color(), Color::Black);
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.mod_count(), mods);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn red_red_repair_keeps_path_in_sync() {
        let mut tree = RbTree::new();
        for k in 0..64 {
            tree.insert(k).unwrap();
            tree.insert(200 - k).unwrap();
            tree.assert_valid().unwrap();
        }
        assert_eq!(tree.size(), 128);
    }

    #[test]
    fn invalid_key_leaves_tree_untouched() {
        let mut tree = RbTree::new();
        tree.insert(1.0).unwrap();
        assert_eq!(tree.insert(f64::NAN), Err(RbError::InvalidKey));
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.mod_count(), 1);
    }
}
