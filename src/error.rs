//! Error taxonomy for the sparse array and sparse dictionary.
//!
//! Every failure mode the core can hit is one of these variants; there is
//! no panic path for conditions a caller can trigger from the public API.

use thiserror::Error;

/// Failures that can arise from [`crate::SparseArray`] and [`crate::SparseDict`]
/// operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SparseHashError {
    /// `i >= maximum` on a sparse-array operation, or an index beyond
    /// `GROUP_SIZE` on a group operation.
    #[error("index {index} out of bounds (capacity {capacity})")]
    OutOfBounds {
        /// The index that was rejected.
        index: u32,
        /// The capacity the index was checked against.
        capacity: u32,
    },
    /// `vlen > elem_size` on a sparse-array `set`.
    #[error("value of {len} bytes exceeds element capacity {max}")]
    OversizedElement {
        /// Length of the value that was rejected.
        len: usize,
        /// Maximum element payload size for the array.
        max: usize,
    },
    /// Probe count exceeded `bucket_count`. Unreachable if the load-factor
    /// invariant holds; surfaced defensively.
    #[error("probe sequence exhausted after {probes} probes (table full or corrupt)")]
    TableExhausted {
        /// Number of probes attempted before giving up.
        probes: u32,
    },
    /// An allocation failed (packed buffer growth, group vector allocation,
    /// or rehash).
    #[error("allocation failed")]
    Alloc,
    /// A constructor argument was invalid on its own terms (e.g. a capacity
    /// of zero), independent of any allocation.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SparseHashError>;
