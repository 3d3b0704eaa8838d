//! Concurrent Cache Usage Examples
//!
//! This example demonstrates multi-threaded usage patterns for `ConcurrentLruCache`.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use recency_cache::config::LruCacheConfig;
use recency_cache::metrics::CacheMetrics;
use recency_cache::ConcurrentLruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn lru_config(capacity: usize) -> LruCacheConfig {
    LruCacheConfig::new(NonZeroUsize::new(capacity).unwrap())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Concurrent Cache Usage Examples");
    println!("================================\n");

    basic_concurrent_usage();
    println!();

    zero_copy_get_with();
    println!();

    recency_under_sharing();
    println!();

    throughput_by_thread_count();
}

/// Basic multi-threaded cache usage
fn basic_concurrent_usage() {
    println!("1. Basic Concurrent Usage");
    println!("   -----------------------");

    let cache = Arc::new(ConcurrentLruCache::init(lru_config(1000), None));

    let num_threads = 4;
    let ops_per_thread = 1000;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("thread{}-key{}", thread_id, i);
                    let value = thread_id * 10000 + i;

                    cache.set(key.clone(), value);

                    // Another thread may already have evicted it.
                    if let Some(v) = cache.get(&key) {
                        assert_eq!(v, value);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    println!(
        "   Completed {} operations across {} threads",
        num_threads * ops_per_thread * 2,
        num_threads
    );
    println!(
        "   Final cache size: {} of {} items",
        cache.len(),
        cache.capacity()
    );
}

/// Zero-copy access pattern using get_with()
fn zero_copy_get_with() {
    println!("2. Zero-Copy Access with get_with()");
    println!("   ----------------------------------");

    let cache: ConcurrentLruCache<String, Vec<u8>> =
        ConcurrentLruCache::init(lru_config(100), None);

    cache.set("large_key".to_string(), vec![1u8; 1024]);

    let sum: Option<u64> = cache.get_with("large_key", |data| {
        data.iter().map(|&x| x as u64).sum()
    });
    println!("   Stored 1KB of data in cache");
    println!(
        "   Computed sum without cloning: {}",
        sum.unwrap_or_default()
    );

    cache.get_mut_with("large_key", |data| data.truncate(16));
    let len = cache.get_with("large_key", Vec::len);
    println!("   Truncated in place under the lock, new length: {:?}", len);
}

/// The example trace from the README, run against a shared cache
fn recency_under_sharing() {
    println!("3. Recency Order");
    println!("   --------------");

    let cache = ConcurrentLruCache::init(lru_config(2), None);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.get(&"a");
    let overwrote = cache.set("c", 3);

    println!("   set(c) overwrote an existing key: {}", overwrote);
    println!("   get(a) = {:?}", cache.get(&"a"));
    println!("   get(b) = {:?} (least recently used, evicted)", cache.get(&"b"));
    println!("   get(c) = {:?}", cache.get(&"c"));

    cache.clear();
    println!("   after clear: len = {}", cache.len());
}

/// Throughput of one shared cache as contention grows
fn throughput_by_thread_count() {
    println!("4. Throughput by Thread Count");
    println!("   ---------------------------");

    let ops_per_thread = 50_000;

    for num_threads in [1, 2, 4, 8] {
        let cache: Arc<ConcurrentLruCache<usize, usize>> =
            Arc::new(ConcurrentLruCache::init(lru_config(10_000), None));

        let start = Instant::now();
        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = (t * 7919 + i) % 20_000;
                        if i % 4 == 0 {
                            cache.set(key, i);
                        } else {
                            let _ = cache.get(&key);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        let elapsed = start.elapsed();
        let total = num_threads * ops_per_thread;
        let metrics = cache.metrics();
        println!(
            "   {} threads: {:>10.0} ops/sec, hit rate {:.2}",
            num_threads,
            total as f64 / elapsed.as_secs_f64(),
            metrics.get("hit_rate").copied().unwrap_or_default()
        );
    }
}
