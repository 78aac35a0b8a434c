//! Concurrent Deduplication Example
//!
//! Demonstrates that callers issued while an entry is pending or fresh
//! share one producer invocation and one shared promise.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use memoflight::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = invocations.clone();

    let fetch_user = AsyncCache::new(MemoryStore::new(), move |id: u64| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            // Stand-in for a database or HTTP round trip
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<_, CacheError>(format!("user-{id}"))
        }
    })
    .with_config(CacheConfig::new().ttl_secs(60))
    .with_resolver(|id: &u64| ("users", *id));

    println!("=== Concurrent Dedup Demo ===\n");

    // Three concurrent callers for the same id share one invocation.
    let (a, b, c) = tokio::join!(fetch_user.call(1), fetch_user.call(1), fetch_user.call(1));
    println!("results: {} / {} / {}", a?, b?, c?);
    println!(
        "producer ran {} time(s) for 3 concurrent calls",
        invocations.load(Ordering::SeqCst)
    );

    // A different id resolves to its own slot.
    let other = fetch_user.call(2).await?;
    println!("\nother id: {other}");
    println!(
        "producer ran {} time(s) total",
        invocations.load(Ordering::SeqCst)
    );

    // While fresh, repeated calls keep serving the settled promise.
    let again = fetch_user.call(1).await?;
    println!("\nfresh repeat: {again}");
    println!(
        "producer ran {} time(s) total",
        invocations.load(Ordering::SeqCst)
    );

    Ok(())
}
