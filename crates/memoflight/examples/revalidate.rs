//! Freshness Controls Example
//!
//! Demonstrates TTL expiry, `must_revalidate`, manual seeding, and
//! deletion on a wrapped producer.

use std::time::Duration;

use memoflight::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let quotes = AsyncCache::new(MemoryStore::new(), |symbol: String| async move {
        Ok::<_, CacheError>(format!("{symbol}: 101.25"))
    })
    .with_config(CacheConfig::new().ttl_millis(200).must_revalidate())
    .with_resolver(|symbol: &String| ("quotes", symbol.clone()));

    println!("=== Freshness Demo (TTL=200ms, must_revalidate) ===\n");

    let quote = quotes.call("ACME".to_string()).await?;
    println!("T+0ms: loaded  - {quote}");
    println!("       fresh?  {}", quotes.is_fresh(&"ACME".to_string()));

    tokio::time::sleep(Duration::from_millis(300)).await;

    // Expired: the value exists but must_revalidate withholds it.
    let symbol = "ACME".to_string();
    println!("\nT+300ms: settled? {}", quotes.is_settled(&symbol));
    println!("         fresh?   {}", quotes.is_fresh(&symbol));
    println!("         get()    {:?}", quotes.get(&symbol));

    // Reloading makes the value observable again once settlement lands.
    let quote = quotes.reload(symbol.clone()).await?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    println!("\nafter reload: {quote}");
    println!("get() {:?}", quotes.get(&symbol));

    // Manual seeding overrides the cache without producer work.
    quotes.set(&symbol, "ACME: 99.00 (seeded)".to_string());
    println!("\nafter set: {:?}", quotes.get(&symbol));

    // Deletion empties the slot.
    quotes.delete(&symbol);
    println!("after delete: {:?}", quotes.freshness(&symbol));

    Ok(())
}
