//! Node layout and read-only node views.
//!
//! Nodes live in a [`Vec`]-backed arena owned by [`RbTree`](crate::RbTree).
//! Child links are `Option<u32>` indices into that arena. There is no parent
//! link: ancestor context is carried through descent as an explicit path.

use std::cmp::Ordering;
use std::fmt;

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Direction of descent for a key that compared `ord` against a node.
    ///
    /// `Equal` maps to `Left`: once the target is located, descent continues
    /// towards its in-order predecessor.
    #[inline]
    pub fn toward(ord: Ordering) -> Self {
        if ord == Ordering::Greater {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// Arena node.
#[derive(Clone, Debug)]
pub struct RbNode<T> {
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: T,
    pub color: Color,
}

impl<T> RbNode<T> {
    /// New nodes start red with no children.
    pub fn new(k: T) -> Self {
        Self {
            l: None,
            r: None,
            k,
            color: Color::Red,
        }
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l,
            Side::Right => self.r,
        }
    }

    #[inline]
    pub fn set_child(&mut self, side: Side, v: Option<u32>) {
        match side {
            Side::Left => self.l = v,
            Side::Right => self.r = v,
        }
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

/// Borrowed view of one node of a tree.
///
/// Lets callers walk the shape (element, color, children) without access to
/// the arena itself.
pub struct NodeRef<'a, T> {
    arena: &'a [RbNode<T>],
    idx: u32,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("element", self.element())
            .field("color", &self.color())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(arena: &'a [RbNode<T>], idx: u32) -> Self {
        Self { arena, idx }
    }

    #[inline]
    fn node(&self) -> &'a RbNode<T> {
        &self.arena[self.idx as usize]
    }

    pub fn element(&self) -> &'a T {
        &self.node().k
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node().l.map(|i| NodeRef::new(self.arena, i))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node().r.map(|i| NodeRef::new(self.arena, i))
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a, T>> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }
}
