//! `sparsehash`: a memory-efficient associative container library.
//!
//! Two composable layers, lower first:
//!
//! - [`SparseArray`], a group-partitioned, bitmap-indexed packed array that
//!   stores values at integer indices while consuming memory proportional
//!   only to the number of occupied slots.
//! - [`SparseDict`], a byte-string-keyed open-addressed hash table built
//!   entirely on top of a `SparseArray` of bucket records.
//!
//! Not thread-safe, no persistence, no deletion, no iteration order.

mod error;
mod fnv;
mod sparse_array;
mod sparse_array_group;
mod sparse_dict;
mod uunwrap;

pub use error::{Result, SparseHashError};
pub use sparse_array::SparseArray;
pub use sparse_dict::SparseDict;
