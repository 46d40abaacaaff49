use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fixed_rbtree::{CompactNode, ContiguousStorage, FixedRedBlackTree, PlainNode, PoolStorage};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

const SEED: u64 = 42;

type DenseCompact<const N: usize> = FixedRedBlackTree<ContiguousStorage<CompactNode<i32, i32>, N>>;
type PoolCompact<const N: usize> = FixedRedBlackTree<PoolStorage<CompactNode<i32, i32>, N>>;
type PoolPlain<const N: usize> = FixedRedBlackTree<PoolStorage<PlainNode<i32, i32>, N>>;

fn shuffled_keys(size: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut keys: Vec<i32> = (0..size as i32).collect();
    keys.shuffle(&mut rng);
    keys
}

macro_rules! bench_sizes {
    ($group:ident, $size:expr, |$tree:ident| $body:expr) => {{
        $group.bench_with_input(BenchmarkId::new("dense_compact", $size), &$size, |b, _| {
            b.iter(|| {
                let mut $tree: DenseCompact<{ $size }> = DenseCompact::new();
                $body;
                black_box($tree.len())
            })
        });
        $group.bench_with_input(BenchmarkId::new("pool_compact", $size), &$size, |b, _| {
            b.iter(|| {
                let mut $tree: PoolCompact<{ $size }> = PoolCompact::new();
                $body;
                black_box($tree.len())
            })
        });
        $group.bench_with_input(BenchmarkId::new("pool_plain", $size), &$size, |b, _| {
            b.iter(|| {
                let mut $tree: PoolPlain<{ $size }> = PoolPlain::new();
                $body;
                black_box($tree.len())
            })
        });
        $group.bench_with_input(BenchmarkId::new("btreemap", $size), &$size, |b, _| {
            b.iter(|| {
                let mut $tree = BTreeMap::new();
                $body;
                black_box($tree.len())
            })
        });
    }};
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_insertion");
    group.sample_size(30);

    let keys = shuffled_keys(1024);
    bench_sizes!(group, 1024, |tree| for &key in &keys {
        tree.insert(key, key);
    });
    let keys = shuffled_keys(4096);
    bench_sizes!(group, 4096, |tree| for &key in &keys {
        tree.insert(key, key);
    });

    group.finish();
}

fn bench_insert_then_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_then_drain");
    group.sample_size(30);

    let keys = shuffled_keys(1024);
    let mut drain_order = keys.clone();
    drain_order.reverse();
    bench_sizes!(group, 1024, |tree| {
        for &key in &keys {
            tree.insert(key, key);
        }
        for key in &drain_order {
            black_box(tree.remove(key));
        }
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let keys = shuffled_keys(4096);

    let mut dense: DenseCompact<4096> = DenseCompact::new();
    let mut pool: PoolPlain<4096> = PoolPlain::new();
    let mut btree = BTreeMap::new();
    for &key in &keys {
        dense.insert(key, key);
        pool.insert(key, key);
        btree.insert(key, key);
    }

    group.bench_function("dense_compact", |b| {
        b.iter(|| keys.iter().filter_map(|key| dense.get(key)).sum::<i32>())
    });
    group.bench_function("pool_plain", |b| {
        b.iter(|| keys.iter().filter_map(|key| pool.get(key)).sum::<i32>())
    });
    group.bench_function("btreemap", |b| {
        b.iter(|| keys.iter().filter_map(|key| btree.get(key)).sum::<i32>())
    });

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_iteration");
    let dense: DenseCompact<4096> = shuffled_keys(4096).into_iter().map(|k| (k, k)).collect();
    let btree: BTreeMap<i32, i32> = shuffled_keys(4096).into_iter().map(|k| (k, k)).collect();

    group.bench_function("dense_compact", |b| {
        b.iter(|| dense.values().copied().sum::<i32>())
    });
    group.bench_function("btreemap", |b| {
        b.iter(|| btree.values().copied().sum::<i32>())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_insert_then_drain,
    bench_lookup,
    bench_iteration
);
criterion_main!(benches);
