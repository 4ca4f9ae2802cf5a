use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use parent_bst::BSTMap;

const SIZES: &[usize] = &[50, 100, 500, 1000, 2000];

// Scatters consecutive indexes so that insertion order does not produce a degenerate tree
//
// Keys are unique: `i * 7919 % 10007` is a bijection on `0..10007`.
fn make_key(i: usize) -> i64 {
    debug_assert!(i < 10007);
    (i * 7919 % 10007) as i64
}

fn build_map(size: usize) -> BSTMap<i64, usize> {
    let mut map = BSTMap::new();
    for i in 0..size {
        // Keys are unique, so this never fails
        let _ = map.insert(make_key(i), i);
    }
    map
}

pub fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("BSTMap", size), size, |b, &size| {
            let map = build_map(size);
            b.iter(|| {
                for i in (0..size).rev() {
                    black_box(map.search(&make_key(i)));
                }
            })
        });
    }
    group.finish();
}

pub fn bench_get_parent(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_parent");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("present", size), size, |b, &size| {
            let map = build_map(size);
            b.iter(|| {
                for i in (0..size).rev() {
                    black_box(map.get_parent(&make_key(i)));
                }
            })
        });
        // A missing key makes the walk visit every node
        group.bench_with_input(BenchmarkId::new("missing", size), size, |b, &size| {
            let map = build_map(size);
            b.iter(|| black_box(map.get_parent(&-1)))
        });
    }
    group.finish();
}

pub fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("BSTMap", size), size, |b, &size| {
            let map = build_map(size);
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for i in 0..size {
                        black_box(map.delete(&make_key(i)).ok());
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches,
    bench_search,
    bench_get_parent,
    bench_delete,
);

criterion_main!(benches);
