use std::cmp::Ordering;

use crate::error::RbError;
use crate::tree::RbTree;
use crate::types::RbNode;

/// Checks every red-black invariant of `tree`.
///
/// Returns the black-height of the root (0 for an empty tree).
pub fn assert_red_black_tree<T, C>(tree: &RbTree<T, C>) -> Result<usize, RbError>
where
    C: Fn(&T, &T) -> Ordering,
{
    if tree.arena.len() != tree.len {
        return Err(RbError::InvariantViolation("Arena size differs from size counter"));
    }
    let Some(root) = tree.root else {
        return if tree.len == 0 {
            Ok(0)
        } else {
            Err(RbError::InvariantViolation("Empty tree has non-zero size"))
        };
    };
    if tree.arena[root as usize].is_red() {
        return Err(RbError::InvariantViolation("Root is not black"));
    }

    fn black_height<T>(
        arena: &[RbNode<T>],
        node: Option<u32>,
        seen: &mut usize,
    ) -> Result<usize, RbError> {
        let Some(node) = node else {
            return Ok(0);
        };
        *seen += 1;
        if *seen > arena.len() {
            return Err(RbError::InvariantViolation("Node reachable twice"));
        }

        let n = &arena[node as usize];
        if n.is_red() {
            if n.l.is_some_and(|i| arena[i as usize].is_red()) {
                return Err(RbError::InvariantViolation("Red node has red left child"));
            }
            if n.r.is_some_and(|i| arena[i as usize].is_red()) {
                return Err(RbError::InvariantViolation("Red node has red right child"));
            }
        }

        let lh = black_height(arena, n.l, seen)?;
        let rh = black_height(arena, n.r, seen)?;
        if lh != rh {
            return Err(RbError::InvariantViolation("Black height mismatch"));
        }
        Ok(lh + usize::from(n.is_black()))
    }

    let mut seen = 0;
    let height = black_height(&tree.arena, Some(root), &mut seen)?;
    if seen != tree.len {
        return Err(RbError::InvariantViolation("Reachable nodes differ from size counter"));
    }

    let mut prev: Option<&T> = None;
    for curr in tree.iter() {
        if let Some(prev) = prev {
            if (tree.comparator)(prev, curr) != Ordering::Less {
                return Err(RbError::InvariantViolation("Node order violated"));
            }
        }
        prev = Some(curr);
    }

    Ok(height)
}

impl<T, C> RbTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn assert_valid(&self) -> Result<(), RbError> {
        assert_red_black_tree(self).map(|_| ())
    }
}
