//! End-to-end scenarios exercising `SparseArray` and `SparseDict` purely
//! through their public API.

use sparsehash::{SparseArray, SparseDict};

#[test]
fn empty_array_round_trips_nothing() {
    let arr = SparseArray::new(std::mem::size_of::<u64>(), 32).unwrap();
    assert_eq!(arr.get(0), None);
}

#[test]
fn reverse_fill_across_one_group() {
    let mut arr = SparseArray::new(std::mem::size_of::<i32>(), 120).unwrap();
    for i in (0..120).rev() {
        arr.set(i, &i.to_ne_bytes()).unwrap();
        assert_eq!(
            i32::from_ne_bytes(arr.get(i).unwrap().try_into().unwrap()),
            i
        );
    }
}

#[test]
fn forward_fill_across_three_groups() {
    let mut arr = SparseArray::new(std::mem::size_of::<i32>(), 130).unwrap();
    for i in 0..130 {
        arr.set(i, &i.to_ne_bytes()).unwrap();
    }
    for i in 0..130 {
        assert_eq!(
            i32::from_ne_bytes(arr.get(i).unwrap().try_into().unwrap()),
            i
        );
    }
}

#[test]
fn oversize_rejection_leaves_the_slot_untouched() {
    let mut arr = SparseArray::new(std::mem::size_of::<u8>(), 100).unwrap();
    let big = 0x0102030405060708u64.to_ne_bytes();
    assert!(arr.set(0, &big).is_err());
    assert_eq!(arr.get(0), None);
}

#[test]
fn dict_basic_set_and_get() {
    let mut dict = SparseDict::new();
    dict.set(b"key", b"value").unwrap();
    let got = dict.get(b"key").unwrap();
    assert_eq!(got, b"value");
    assert_eq!(got.len(), 5);
}

#[test]
fn dict_at_moderate_scale_keeps_every_key_addressable() {
    let iterations = 50_000;
    let mut dict = SparseDict::new();
    for i in 0..iterations {
        let key = format!("crazy hash{i}");
        let val = format!("value{i}");
        dict.set(key.as_bytes(), val.as_bytes()).unwrap();
        assert_eq!(dict.len(), i + 1);

        let retrieved = dict.get(key.as_bytes()).unwrap();
        assert_eq!(retrieved, val.as_bytes());
    }

    for i in (0..iterations).rev() {
        let key = format!("crazy hash{i}");
        let val = format!("value{i}");
        let retrieved = dict.get(key.as_bytes()).unwrap();
        assert_eq!(retrieved, val.as_bytes());
    }

    assert_eq!(dict.len(), iterations);
}

#[test]
#[ignore = "runs the full 1,000,000-entry scale scenario from the spec; slow under debug builds"]
fn dict_at_full_scale_matches_spec_sizing() {
    let iterations: u32 = 1_000_000;
    let mut dict = SparseDict::new();
    for i in 0..iterations {
        let key = format!("crazy hash{i}");
        let val = format!("value{i}");
        dict.set(key.as_bytes(), val.as_bytes()).unwrap();
    }

    for i in 0..iterations {
        let key = format!("crazy hash{i}");
        let val = format!("value{i}");
        assert_eq!(dict.get(key.as_bytes()).unwrap(), val.as_bytes());
    }

    assert_eq!(dict.len() as u32, iterations);
    // smallest power of two >= 1,000,000 / 0.8 = 1,250,000
    assert_eq!(dict.capacity(), 2u32.pow(21));
}
