//! Explicit-stack traversals.
//!
//! [`Traversal`] is a detached cursor: it does not borrow the tree, so the
//! tree may be mutated while it is alive. Every step checks the tree's
//! modification counter against the value seen at creation and fails with
//! [`RbError::ConcurrentModification`] on a mismatch. [`Iter`] wraps a
//! cursor together with a shared borrow of the tree, which rules out
//! mutation statically.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::error::RbError;
use crate::tree::RbTree;
use crate::types::{NodeRef, RbNode};

/// Visiting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Order {
    /// Node before its left then right subtree.
    PreOrder,
    /// Ascending element order.
    #[default]
    InOrder,
}

/// Fail-fast cursor over the nodes of one tree.
///
/// Must be advanced with the same tree it was created from.
#[derive(Clone, Debug)]
pub struct Traversal {
    order: Order,
    stack: Vec<u32>,
    expected_mod_count: u64,
}

impl Traversal {
    fn new<T>(arena: &[RbNode<T>], root: Option<u32>, order: Order, mod_count: u64) -> Self {
        let mut traversal = Self {
            order,
            stack: Vec::new(),
            expected_mod_count: mod_count,
        };
        match order {
            Order::PreOrder => traversal.stack.extend(root),
            Order::InOrder => traversal.push_left_spine(arena, root),
        }
        traversal
    }

    fn push_left_spine<T>(&mut self, arena: &[RbNode<T>], mut node: Option<u32>) {
        while let Some(i) = node {
            self.stack.push(i);
            node = arena[i as usize].l;
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Whether another node remains, as of the tree state at creation.
    pub fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Yields the next node.
    ///
    /// # Errors
    ///
    /// [`RbError::ConcurrentModification`] if `tree` changed since this
    /// traversal was created; [`RbError::IteratorExhausted`] once every node
    /// has been yielded.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, T, C>(&mut self, tree: &'a RbTree<T, C>) -> Result<NodeRef<'a, T>, RbError>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        if tree.mod_count != self.expected_mod_count {
            log::debug!(
                "traversal invalidated: mod count {} != {}",
                tree.mod_count,
                self.expected_mod_count
            );
            return Err(RbError::ConcurrentModification);
        }
        let i = self.stack.pop().ok_or(RbError::IteratorExhausted)?;
        let node = &tree.arena[i as usize];
        match self.order {
            Order::PreOrder => {
                self.stack.extend(node.r);
                self.stack.extend(node.l);
            }
            Order::InOrder => self.push_left_spine(&tree.arena, node.r),
        }
        Ok(NodeRef::new(&tree.arena, i))
    }
}

/// Borrowing iterator over elements.
pub struct Iter<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    tree: &'a RbTree<T, C>,
    cursor: Traversal,
    remaining: usize,
}

impl<'a, T, C> Iterator for Iter<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor.next(self.tree).ok()?;
        self.remaining -= 1;
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> where C: Fn(&T, &T) -> Ordering {}

impl<T, C> FusedIterator for Iter<'_, T, C> where C: Fn(&T, &T) -> Ordering {}

impl<T, C> RbTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Detached fail-fast cursor; see [`Traversal`].
    pub fn traversal(&self, order: Order) -> Traversal {
        Traversal::new(&self.arena, self.root, order, self.mod_count)
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        self.iter_order(Order::InOrder)
    }

    pub fn iter_order(&self, order: Order) -> Iter<'_, T, C> {
        Iter {
            tree: self,
            cursor: self.traversal(order),
            remaining: self.len,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RbTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
