//! In-memory cache for the featured-products list.
//!
//! The list is rebuilt whenever an admin toggles a product's featured
//! flag; the TTL bounds staleness from other writes (create, delete).

use chrono::{DateTime, Utc};

use crate::models::catalog::Product;

/// Default TTL for the cached featured list: 60 seconds.
pub const DEFAULT_FEATURED_TTL_MS: i64 = 60_000;

/// A cached snapshot with expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    products: Vec<Product>,
    expires_at: DateTime<Utc>,
}

/// Cache holding the current featured-products snapshot.
#[derive(Debug)]
pub struct FeaturedCache {
    entry: Option<CacheEntry>,
    /// TTL for the cached list (milliseconds).
    pub ttl_ms: i64,
}

impl FeaturedCache {
    /// Create an empty cache with the default TTL.
    pub fn new() -> Self {
        Self {
            entry: None,
            ttl_ms: DEFAULT_FEATURED_TTL_MS,
        }
    }

    /// Get the cached list if it exists and has not expired.
    pub fn get(&self) -> Option<Vec<Product>> {
        self.entry.as_ref().and_then(|entry| {
            if Utc::now() < entry.expires_at {
                Some(entry.products.clone())
            } else {
                None
            }
        })
    }

    /// Replace the cached list.
    pub fn set(&mut self, products: Vec<Product>) {
        let expires_at = Utc::now() + chrono::Duration::milliseconds(self.ttl_ms);
        self.entry = Some(CacheEntry {
            products,
            expires_at,
        });
    }

    /// Drop the cached list.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for FeaturedCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uuid::uuidv7;

    fn product(name: &str) -> Product {
        Product {
            id: uuidv7(),
            name: name.to_string(),
            description: "desc".to_string(),
            price: 9.99,
            image: "/img.png".to_string(),
            category: "misc".to_string(),
            is_featured: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn get_returns_none_when_empty() {
        let cache = FeaturedCache::new();
        assert!(cache.get().is_none());
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut cache = FeaturedCache::new();
        cache.set(vec![product("lamp")]);
        let cached = cache.get().expect("cached list");
        assert_eq!(1, cached.len());
        assert_eq!("lamp", cached[0].name);
    }

    #[test]
    fn set_replaces_the_previous_list() {
        let mut cache = FeaturedCache::new();
        cache.set(vec![product("lamp")]);
        cache.set(vec![product("chair"), product("desk")]);
        let cached = cache.get().expect("cached list");
        assert_eq!(2, cached.len());
    }

    #[test]
    fn invalidate_drops_the_list() {
        let mut cache = FeaturedCache::new();
        cache.set(vec![product("lamp")]);
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn expired_list_returns_none() {
        let mut cache = FeaturedCache::new();
        // Set TTL to 0 so it expires immediately
        cache.ttl_ms = 0;
        cache.set(vec![product("lamp")]);
        assert!(cache.get().is_none());
    }

    #[test]
    fn empty_list_is_still_a_cache_hit() {
        let mut cache = FeaturedCache::new();
        cache.set(Vec::new());
        let cached = cache.get().expect("cached list");
        assert!(cached.is_empty());
    }
}
