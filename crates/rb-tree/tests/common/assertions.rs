#![allow(dead_code)]

use std::cmp::Ordering;
use std::fmt::Debug;

use rb_tree::{Color, NodeRef, RbTree};

/// Walks the tree through [`NodeRef`]s only and panics on the first broken
/// invariant. Returns the black-height of the root.
pub fn check_tree<T, C>(tree: &RbTree<T, C>) -> usize
where
    T: PartialOrd + Debug,
    C: Fn(&T, &T) -> Ordering,
{
    let Some(root) = tree.root() else {
        assert_eq!(tree.size(), 0, "empty tree reports non-zero size");
        return 0;
    };
    assert_eq!(root.color(), Color::Black, "root must be black");

    let mut count = 0;
    let height = walk(root, None, None, &mut count);
    assert_eq!(count, tree.size(), "size counter drifted from node count");
    height
}

fn walk<T>(node: NodeRef<'_, T>, lo: Option<&T>, hi: Option<&T>, count: &mut usize) -> usize
where
    T: PartialOrd + Debug,
{
    *count += 1;
    let k = node.element();
    if let Some(lo) = lo {
        assert!(lo < k, "{k:?} is not above its lower bound {lo:?}");
    }
    if let Some(hi) = hi {
        assert!(k < hi, "{k:?} is not below its upper bound {hi:?}");
    }
    if node.color() == Color::Red {
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert_eq!(
                child.color(),
                Color::Black,
                "red node {k:?} has red child {:?}",
                child.element()
            );
        }
    }

    let lh = node.left().map_or(0, |l| walk(l, lo, Some(k), count));
    let rh = node.right().map_or(0, |r| walk(r, Some(k), hi, count));
    assert_eq!(lh, rh, "black height mismatch under {k:?}");
    lh + usize::from(node.color() == Color::Black)
}

/// Red-black height bound: nodes on the longest path <= 2 * log2(n + 1).
pub fn assert_height_bound<T, C>(tree: &RbTree<T, C>)
where
    C: Fn(&T, &T) -> Ordering,
{
    let levels = (tree.height() + 1) as f64;
    let bound = 2.0 * ((tree.size() + 1) as f64).log2();
    assert!(
        levels <= bound + 1e-9,
        "height {} exceeds bound for size {}",
        tree.height(),
        tree.size()
    );
}

/// Full check after every step, in the style of the matrix tests.
pub fn check_all<T, C>(tree: &RbTree<T, C>)
where
    T: PartialOrd + Debug,
    C: Fn(&T, &T) -> Ordering,
{
    if let Err(err) = tree.assert_valid() {
        panic!("invalid red-black tree: {err}");
    }
    check_tree(tree);
    assert_height_bound(tree);
}
