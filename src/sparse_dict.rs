//! An open-addressed, byte-string-keyed hash table whose bucket storage is
//! a [`SparseArray`] of fixed-width bucket records.

use std::ptr;

use crate::error::{Result, SparseHashError};
use crate::fnv::fnv1a;
use crate::sparse_array::SparseArray;
use crate::uunwrap::UUnwrap;

const STARTING_CAPACITY: u32 = 32;
const RESIZE_LOAD_FACTOR: f64 = 0.80;

/// A fixed-width, `Copy` record describing a bucket: the key and value are
/// owned heap allocations referenced by raw pointer, so that a bucket can be
/// relocated between the old and new bucket stores during a rehash by
/// copying this struct's bytes, without reallocating the key or value.
#[repr(C)]
#[derive(Clone, Copy)]
struct BucketRecord {
    fingerprint: u64,
    key_len: u32,
    value_len: u32,
    key_ptr: *mut u8,
    value_ptr: *mut u8,
}

impl BucketRecord {
    fn for_insert(fingerprint: u64, key: Box<[u8]>, value: Box<[u8]>) -> Self {
        let key_len = key.len() as u32;
        let value_len = value.len() as u32;
        Self {
            fingerprint,
            key_len,
            value_len,
            key_ptr: Box::into_raw(key).cast::<u8>(),
            value_ptr: Box::into_raw(value).cast::<u8>(),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        // Safety: `self` is a valid, initialized, properly aligned reference
        // to a plain-old-data struct; reading its representation as bytes
        // never reads past its own storage.
        unsafe {
            std::slice::from_raw_parts((self as *const Self).cast::<u8>(), std::mem::size_of::<Self>())
        }
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), std::mem::size_of::<Self>());
        // Safety: `bytes` came from `SparseArray::get` on a slot this module
        // wrote via `as_bytes`, so it holds exactly `std::mem::size_of::<Self>()`
        // bytes of a previously-written `BucketRecord`. The packed buffer
        // backing it is not required to be pointer-aligned, hence the
        // unaligned read.
        unsafe { ptr::read_unaligned(bytes.as_ptr().cast::<Self>()) }
    }

    /// # Safety
    /// `self` must describe a live bucket whose `key_ptr`/`value_ptr` have
    /// not already been reclaimed.
    unsafe fn key_bytes<'a>(&self) -> &'a [u8] {
        unsafe { std::slice::from_raw_parts(self.key_ptr, self.key_len as usize) }
    }

    /// # Safety
    /// `self` must describe a live bucket whose `key_ptr`/`value_ptr` have
    /// not already been reclaimed.
    unsafe fn value_bytes<'a>(&self) -> &'a [u8] {
        unsafe { std::slice::from_raw_parts(self.value_ptr, self.value_len as usize) }
    }

    /// Reclaims the owned key and value buffers this record points at.
    ///
    /// # Safety
    /// Must be called at most once per live bucket; the record must not be
    /// used (other than being discarded) afterward.
    unsafe fn reclaim(&self) {
        unsafe {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                self.key_ptr,
                self.key_len as usize,
            )));
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                self.value_ptr,
                self.value_len as usize,
            )));
        }
    }
}

fn probe(fingerprint: u64, i: u32, bucket_max: u32) -> u32 {
    let i = i as u64;
    let candidate = fingerprint.wrapping_add(i.wrapping_mul(i));
    (candidate & (bucket_max as u64 - 1)) as u32
}

/// A sparse, open-addressed dictionary mapping byte-string keys to
/// byte-string values.
///
/// Quadratic probing resolves collisions over a power-of-two bucket store;
/// the table doubles in size whenever occupancy would reach 80%. No
/// iteration order is promised and there is no delete operation.
pub struct SparseDict {
    bucket_max: u32,
    bucket_count: u32,
    buckets: SparseArray,
}

impl SparseDict {
    /// Creates a dictionary with the default starting capacity of 32
    /// buckets.
    pub fn new() -> Self {
        Self::with_capacity(STARTING_CAPACITY).uunwrap()
    }

    /// Creates a dictionary pre-sized to hold at least `capacity` buckets
    /// before its first rehash (rounded up to the next power of two).
    pub fn with_capacity(capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(SparseHashError::InvalidArgument(
                "capacity must be greater than zero",
            ));
        }
        let bucket_max = capacity.next_power_of_two();
        let buckets = SparseArray::new(std::mem::size_of::<BucketRecord>(), bucket_max)?;
        Ok(Self {
            bucket_max,
            bucket_count: 0,
            buckets,
        })
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.bucket_count as usize
    }

    /// Whether the dictionary holds no keys.
    pub fn is_empty(&self) -> bool {
        self.bucket_count == 0
    }

    /// Current bucket-store capacity (always a power of two).
    pub fn capacity(&self) -> u32 {
        self.bucket_max
    }

    /// Inserts `value` under `key`, overwriting any existing value for the
    /// same key. Updating an existing key does not change [`Self::len`] and
    /// never triggers a rehash.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let fingerprint = fnv1a(key);
        let mut probes: u32 = 0;

        loop {
            let slot = probe(fingerprint, probes, self.bucket_max);
            match self.buckets.get(slot) {
                None => {
                    let record =
                        BucketRecord::for_insert(fingerprint, key.into(), value.into());
                    if let Err(e) = self.buckets.set(slot, record.as_bytes()) {
                        // Safety: `record` was never written into the store, so
                        // nothing else references its buffers.
                        unsafe { record.reclaim() };
                        return Err(e);
                    }
                    break;
                }
                Some(bytes) => {
                    let existing = BucketRecord::from_bytes(bytes);
                    let matches = existing.fingerprint == fingerprint
                        // Safety: `existing` was just read from a live, occupied slot.
                        && unsafe { existing.key_bytes() } == key;
                    if matches {
                        // Safety: `existing` is about to be replaced; nothing else
                        // references its buffers.
                        unsafe { existing.reclaim() };
                        let record =
                            BucketRecord::for_insert(fingerprint, key.into(), value.into());
                        if let Err(e) = self.buckets.set(slot, record.as_bytes()) {
                            // Safety: the old record was already reclaimed above and
                            // the new one was never written into the store.
                            unsafe { record.reclaim() };
                            return Err(e);
                        }
                        // An update, not an insertion: bucket_count and the
                        // rehash check are untouched.
                        return Ok(());
                    }
                }
            }

            probes += 1;
            if probes > self.bucket_count {
                return Err(SparseHashError::TableExhausted { probes });
            }
        }

        self.bucket_count += 1;
        if self.bucket_count as f64 / self.bucket_max as f64 >= RESIZE_LOAD_FACTOR {
            self.rehash_and_grow()?;
        }
        Ok(())
    }

    /// Looks up `key`, returning the stored value bytes if present.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let fingerprint = fnv1a(key);
        let mut probes: u32 = 0;

        loop {
            let slot = probe(fingerprint, probes, self.bucket_max);
            let bytes = self.buckets.get(slot)?;
            let existing = BucketRecord::from_bytes(bytes);
            // Safety: `existing` was just read from a live, occupied slot
            // borrowed from `self`; the returned slice's lifetime is tied to
            // `&self` by this function's signature.
            if existing.fingerprint == fingerprint && unsafe { existing.key_bytes() } == key {
                return Some(unsafe { existing.value_bytes() });
            }

            probes += 1;
            if probes > self.bucket_count {
                return None;
            }
        }
    }

    /// Doubles the bucket store and reinstalls every live bucket at the
    /// probe position its stored fingerprint dictates in the new capacity.
    /// Key/value buffers are moved, not reallocated: the new store's bytes
    /// end up holding the same owning pointers the old store held.
    fn rehash_and_grow(&mut self) -> Result<()> {
        let new_bucket_max = self.bucket_max * 2;
        let mut new_buckets = SparseArray::new(std::mem::size_of::<BucketRecord>(), new_bucket_max)?;

        let mut rehashed = 0;
        for j in 0..self.bucket_max {
            let Some(bytes) = self.buckets.get(j) else {
                continue;
            };
            let record = BucketRecord::from_bytes(bytes);

            let mut probes: u32 = 0;
            loop {
                let slot = probe(record.fingerprint, probes, new_bucket_max);
                if new_buckets.get(slot).is_none() {
                    new_buckets.set(slot, record.as_bytes())?;
                    break;
                }
                probes += 1;
                if probes > self.bucket_count {
                    return Err(SparseHashError::TableExhausted { probes });
                }
            }

            rehashed += 1;
            if rehashed == self.bucket_count {
                break;
            }
        }

        // The old `self.buckets` is dropped here, freeing only its packed
        // byte buffers: the bucket records' key/value allocations now live
        // exclusively in `new_buckets`'s bytes, so nothing is double-freed.
        self.buckets = new_buckets;
        self.bucket_max = new_bucket_max;
        Ok(())
    }
}

impl Default for SparseDict {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SparseDict {
    fn drop(&mut self) {
        for j in 0..self.buckets.maximum() {
            if let Some(bytes) = self.buckets.get(j) {
                let record = BucketRecord::from_bytes(bytes);
                // Safety: each occupied slot is reclaimed exactly once, here,
                // before the sparse array itself is dropped.
                unsafe { record.reclaim() };
            }
        }
    }
}
