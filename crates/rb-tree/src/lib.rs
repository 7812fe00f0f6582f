//! Top-down red-black tree.
//!
//! An ordered set whose insert and remove each rebalance during a single
//! descent from the root: color flips and rotations are applied on the way
//! down, so no node needs a parent link and no fix-up walk runs afterwards.
//!
//! Nodes are stored in a [`Vec`]-backed arena and linked by `Option<u32>`
//! indices. The caller supplies the total order as a three-way comparator.
//!
//! ```
//! use rb_tree::RbTree;
//!
//! let mut tree = RbTree::new();
//! for k in [10, 5, 20, 3, 7, 15, 25] {
//!     assert_eq!(tree.insert(k), Ok(true));
//! }
//! assert_eq!(tree.insert(7), Ok(false));
//! assert_eq!(tree.remove(&10), Ok(true));
//! assert_eq!(tree.to_vec(), vec![3, 5, 7, 15, 20, 25]);
//! tree.assert_valid().unwrap();
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`RbNode`], [`Color`], [`Side`], [`NodeRef`] |
//! | `tree` | [`RbTree`] state, lookups, rotation primitives |
//! | `insert` | top-down insertion |
//! | `remove` | top-down removal and its repair cases |
//! | [`iter`] | fail-fast [`Traversal`] cursor and borrowing [`Iter`] |
//! | [`validate`] | invariant checker |

pub mod error;
mod insert;
pub mod iter;
mod remove;
mod tree;
pub mod types;
pub mod validate;

pub use error::RbError;
pub use iter::{Iter, Order, Traversal};
pub use tree::RbTree;
pub use types::{Color, NodeRef, RbNode, Side};
pub use validate::assert_red_black_tree;
