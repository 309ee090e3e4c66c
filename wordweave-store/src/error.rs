//! Persistence errors.

use thiserror::Error;

/// Errors from store operations.
///
/// A conditional-put precondition failure is deliberately not an error
/// variant here — [`crate::Store::store_result`] treats it as an idempotent
/// success per §7's "persistence conflict" taxonomy entry and only logs it.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A query or write failed for a reason other than a duplicate write.
    #[error("persistence fault: {0}")]
    Fault(String),

    /// The result to store was missing a field the write requires.
    #[error("incomplete result, missing field: {0}")]
    IncompleteResult(String),
}
