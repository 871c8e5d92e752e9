//! Cooperative cancellation: a one-method trait, implemented on `()` for
//! callers who never need it.

/// Checked between candidate-pair attempts and between Dijkstra
/// expansions; observing `true` aborts the decode with
/// [`crate::error::DecodeError::Cancelled`].
pub trait CancellationToken {
    fn is_cancelled(&self) -> bool;
}

impl CancellationToken for () {
    fn is_cancelled(&self) -> bool {
        false
    }
}
