//! In-memory caching using moka
//!
//! Caches single-product reads. Every mutation of a product invalidates its
//! entry. Reads fill the cache through a write-generation check, so a row
//! read before a mutation committed never outlives that mutation's
//! invalidation.

use moka::future::Cache;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::products::Product;

/// Application cache holding product snapshots
#[derive(Clone)]
pub struct AppCache {
    /// Products (product_id -> Product)
    pub products: Cache<i32, Arc<Product>>,
    /// Bumped by every invalidation
    generation: Arc<AtomicU64>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self::with_capacity(1_000)
    }

    /// Products: `capacity` entries, 60 s TTL, 30 s idle
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            products: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(60))
                .time_to_idle(Duration::from_secs(30))
                .build(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            products_size: self.products.entry_count(),
        }
    }

    /// Take before reading a product from the database, pass to
    /// `fill_product` afterwards.
    pub fn read_ticket(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cache a product read from the database under `ticket`.
    ///
    /// If any invalidation ran since the ticket was taken, the row may
    /// predate that write and the entry is dropped again.
    pub async fn fill_product(&self, ticket: u64, product: Arc<Product>) {
        let product_id = product.product_id;
        self.products.insert(product_id, product).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            self.products.invalidate(&product_id).await;
            tracing::debug!("Discarded racing cache fill for product: {}", product_id);
        }
    }

    /// Invalidate a specific product by id
    pub async fn invalidate_product(&self, product_id: i32) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.products.invalidate(&product_id).await;
        tracing::debug!("Cache invalidated for product: {}", product_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub products_size: u64,
}
