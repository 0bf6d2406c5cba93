//! Throughput comparison between `SparseDict` and `hashbrown::HashMap` on
//! random byte-string keys. Not part of the library's public contract.
//! A thin shell exercising the core through its public operations only.

use std::hint::black_box;
use std::time::Instant;

use sparsehash::SparseDict;

fn random_bytes(rng: &mut fastrand::Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.u8(..)).collect()
}

fn bench_sparse_dict(n: usize) {
    let mut rng = fastrand::Rng::with_seed(123);
    let mut dict = SparseDict::new();
    let keys: Vec<Vec<u8>> = (0..n).map(|_| random_bytes(&mut rng, 16)).collect();
    for key in &keys {
        dict.set(key, b"value").unwrap();
    }

    let start = Instant::now();
    const ITERS: usize = 1_000_000;
    let mut found = 0;
    for i in 0..ITERS {
        let key = &keys[i % keys.len()];
        found += dict.get(key).is_some() as usize;
    }
    black_box(found);
    let duration = start.elapsed();
    println!(
        "SparseDict/{n}: {:.2} ns/op",
        duration.as_nanos() as f64 / ITERS as f64
    );
}

fn bench_hashbrown(n: usize) {
    let mut rng = fastrand::Rng::with_seed(123);
    let mut map = hashbrown::HashMap::new();
    let keys: Vec<Vec<u8>> = (0..n).map(|_| random_bytes(&mut rng, 16)).collect();
    for key in &keys {
        map.insert(key.clone(), b"value".to_vec());
    }

    let start = Instant::now();
    const ITERS: usize = 1_000_000;
    let mut found = 0;
    for i in 0..ITERS {
        let key = &keys[i % keys.len()];
        found += map.get(key).is_some() as usize;
    }
    black_box(found);
    let duration = start.elapsed();
    println!(
        "hashbrown::HashMap/{n}: {:.2} ns/op",
        duration.as_nanos() as f64 / ITERS as f64
    );
}

fn main() {
    bench_sparse_dict(1_000_000);
    bench_hashbrown(1_000_000);
}
