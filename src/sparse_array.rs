//! A logical array of capacity `maximum`, partitioned into fixed-size
//! groups so that the cost of an insertion-triggered shift is bounded by a
//! single group's width regardless of how large the array is overall.

use crate::error::{Result, SparseHashError};
use crate::sparse_array_group::{GROUP_SIZE, SparseArrayGroup};

/// A memory-efficient array: backing storage is proportional to the number
/// of occupied indices, not to `maximum`.
#[derive(Debug)]
pub struct SparseArray {
    maximum: u32,
    groups: Vec<SparseArrayGroup>,
}

impl SparseArray {
    /// Creates a new array of capacity `maximum`, where every stored
    /// element must be at most `elem_size` bytes.
    pub fn new(elem_size: usize, maximum: u32) -> Result<Self> {
        if maximum == 0 {
            return Err(SparseHashError::InvalidArgument(
                "maximum must be greater than zero",
            ));
        }
        let num_groups = maximum.div_ceil(GROUP_SIZE) as usize;
        let mut groups = Vec::new();
        groups
            .try_reserve_exact(num_groups)
            .map_err(|_| SparseHashError::Alloc)?;
        groups.extend((0..num_groups).map(|_| SparseArrayGroup::new(elem_size)));
        Ok(Self { maximum, groups })
    }

    /// The logical capacity this array was created with.
    pub(crate) fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Copies `val` into logical index `i`. Fails if `i >= maximum` or
    /// `val.len()` exceeds the array's per-element capacity.
    pub fn set(&mut self, i: u32, val: &[u8]) -> Result<()> {
        if i >= self.maximum {
            return Err(SparseHashError::OutOfBounds {
                index: i,
                capacity: self.maximum,
            });
        }
        let group_idx = (i / GROUP_SIZE) as usize;
        let local = i % GROUP_SIZE;
        self.groups[group_idx].set(local, val)
    }

    /// Returns the bytes stored at logical index `i`, or `None` if the
    /// index is unoccupied or out of bounds.
    pub fn get(&self, i: u32) -> Option<&[u8]> {
        if i >= self.maximum {
            return None;
        }
        let group_idx = (i / GROUP_SIZE) as usize;
        let local = i % GROUP_SIZE;
        self.groups[group_idx].get(local)
    }
}
