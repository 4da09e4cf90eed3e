//! Put-path benchmarks: cold write vs dedup hit

use casket::ContentStore;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_put(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = ContentStore::open(dir.path()).unwrap();

    let mut counter: u64 = 0;
    c.bench_function("put_cold_1k", |b| {
        b.iter(|| {
            counter += 1;
            let mut payload = vec![0x5au8; 1024];
            payload.extend_from_slice(&counter.to_le_bytes());
            store.put_bytes(&payload).unwrap()
        })
    });

    let key = store.put_bytes(b"HelloWorld").unwrap();
    c.bench_function("put_dedup_hit", |b| {
        b.iter(|| {
            let k = store.put_bytes(b"HelloWorld").unwrap();
            assert_eq!(k, key);
        })
    });
}

criterion_group!(benches, bench_put);
criterion_main!(benches);
