//! Concurrent Cache Benchmarks
//!
//! Measures `ConcurrentLruCache` throughput under read-heavy, write-heavy and
//! mixed workloads as the number of contending threads grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recency_cache::ConcurrentLruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

const CACHE_SIZE: usize = 10_000;
const OPS_PER_THREAD: usize = 1_000;
const THREAD_COUNTS: [usize; 4] = [1, 2, 4, 8];

fn make_cache() -> Arc<ConcurrentLruCache<usize, usize>> {
    let cache = ConcurrentLruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap());
    for i in 0..CACHE_SIZE {
        cache.set(i, i);
    }
    Arc::new(cache)
}

fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");
    let cache = make_cache();

    for threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::new("LRU", threads), &threads, |b, &threads| {
            b.iter(|| run_concurrent_reads(Arc::clone(&cache), threads, OPS_PER_THREAD));
        });
    }

    group.finish();
}

fn concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Writes");
    let cache = make_cache();

    for threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::new("LRU", threads), &threads, |b, &threads| {
            b.iter(|| run_concurrent_writes(Arc::clone(&cache), threads, OPS_PER_THREAD));
        });
    }

    group.finish();
}

fn concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Mixed (80% reads)");
    let cache = make_cache();

    for threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::new("LRU", threads), &threads, |b, &threads| {
            b.iter(|| run_concurrent_mixed(Arc::clone(&cache), threads, OPS_PER_THREAD));
        });
    }

    group.finish();
}

fn run_concurrent_reads(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = (t * ops_per_thread + i) % CACHE_SIZE;
                black_box(cache.get(&key));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_writes(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                // Half the keys miss and force an eviction.
                let key = (t * ops_per_thread + i) % (CACHE_SIZE * 2);
                black_box(cache.set(key, i));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

fn run_concurrent_mixed(
    cache: Arc<ConcurrentLruCache<usize, usize>>,
    num_threads: usize,
    ops_per_thread: usize,
) {
    let mut handles = Vec::with_capacity(num_threads);
    for t in 0..num_threads {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..ops_per_thread {
                let key = (t * ops_per_thread + i) % CACHE_SIZE;
                if i % 5 == 0 {
                    black_box(cache.set(key, i));
                } else {
                    black_box(cache.get(&key));
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

criterion_group!(
    benches,
    concurrent_reads,
    concurrent_writes,
    concurrent_mixed
);
criterion_main!(benches);
