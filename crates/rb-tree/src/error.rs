use thiserror::Error;

/// Errors surfaced by tree operations and traversals.
///
/// A duplicate insert and a missing key on removal are not errors; they are
/// reported as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RbError {
    /// The key does not compare equal to itself under the tree's order
    /// (for example `f64::NAN` with the default comparator).
    #[error("key is not ordered by the tree comparator")]
    InvalidKey,
    /// The tree changed after the traversal was created.
    #[error("tree was modified during traversal")]
    ConcurrentModification,
    /// `next` was called on a finished traversal.
    #[error("traversal has no more elements")]
    IteratorExhausted,
    #[error("red-black invariant violated: {0}")]
    InvariantViolation(&'static str),
}
