//! The shared request cache and the caching wrapper around a `Backend`.
//!
//! The cache is keyed by request shape (`endpoint@{params-json}`) and shared by every read
//! endpoint. It is deliberately opaque to the browsing core: the core never clears it, it only
//! resets its own local accumulator, so a reload after invalidation may well be served from
//! here rather than from the wrapped backend.

use crate::api::{Backend, EMPLOYEES, PAGINATED_TRANSACTIONS, TRANSACTIONS_BY_EMPLOYEE};
use crate::model::{
    Employee, PaginatedRequestParams, PaginatedResponse, RequestByEmployeeParams, Transaction,
};
use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

/// A keyed store for fetched responses. Implementations own their eviction policy; callers only
/// get, set, and invalidate by key prefix.
pub trait RequestCache: Send {
    /// Look up a previously stored response.
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Store a response under `key`, replacing any prior entry.
    fn set(&mut self, key: &str, value: serde_json::Value);

    /// Remove every entry whose key starts with `key_prefix`. Passing an endpoint name drops
    /// all cached responses for that endpoint regardless of parameters.
    fn invalidate(&mut self, key_prefix: &str);
}

/// The default `RequestCache`: a process-wide hash map with no eviction.
#[derive(Default, Debug, Clone)]
pub struct MemoryCache {
    entries: HashMap<String, serde_json::Value>,
}

impl RequestCache for MemoryCache {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: serde_json::Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn invalidate(&mut self, key_prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(key_prefix));
    }
}

/// Wraps a `Backend` so that the three read endpoints consult and populate a `RequestCache`.
/// Approval writes pass straight through and do not touch cached entries, so a cached page can
/// carry a stale `approved` flag until its entry is replaced.
pub struct CachedBackend {
    inner: Box<dyn Backend + Send>,
    cache: Box<dyn RequestCache + Send>,
}

impl CachedBackend {
    pub fn new(inner: Box<dyn Backend + Send>, cache: Box<dyn RequestCache + Send>) -> Self {
        Self { inner, cache }
    }

    /// Look up `key`, deserializing the stored value if present.
    fn lookup<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.cache.get(key) {
            Some(value) => {
                trace!("cache hit for {key}");
                let cached = serde_json::from_value(value)
                    .with_context(|| format!("Corrupt cache entry for '{key}'"))?;
                Ok(Some(cached))
            }
            None => {
                trace!("cache miss for {key}");
                Ok(None)
            }
        }
    }

    /// Store a non-absent fetch result under `key`. Absent results are not cached, so the next
    /// request for the same shape will try the backend again.
    fn store<T>(&mut self, key: &str, fetched: &Option<T>) -> Result<()>
    where
        T: Serialize,
    {
        if let Some(response) = fetched {
            let value = serde_json::to_value(response)
                .with_context(|| format!("Unable to serialize response for '{key}'"))?;
            self.cache.set(key, value);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Backend for CachedBackend {
    async fn fetch_all_employees(&mut self) -> Result<Option<Vec<Employee>>> {
        let key = request_key(EMPLOYEES, &())?;
        if let Some(cached) = self.lookup(&key)? {
            return Ok(Some(cached));
        }
        let fetched = self.inner.fetch_all_employees().await?;
        self.store(&key, &fetched)?;
        Ok(fetched)
    }

    async fn fetch_page(
        &mut self,
        page: Option<u32>,
    ) -> Result<Option<PaginatedResponse<Vec<Transaction>>>> {
        let key = request_key(PAGINATED_TRANSACTIONS, &PaginatedRequestParams { page })?;
        if let Some(cached) = self.lookup(&key)? {
            return Ok(Some(cached));
        }
        let fetched = self.inner.fetch_page(page).await?;
        self.store(&key, &fetched)?;
        Ok(fetched)
    }

    async fn fetch_by_employee(&mut self, employee_id: &str) -> Result<Option<Vec<Transaction>>> {
        let params = RequestByEmployeeParams {
            employee_id: employee_id.to_string(),
        };
        let key = request_key(TRANSACTIONS_BY_EMPLOYEE, &params)?;
        if let Some(cached) = self.lookup(&key)? {
            return Ok(Some(cached));
        }
        let fetched = self.inner.fetch_by_employee(employee_id).await?;
        self.store(&key, &fetched)?;
        Ok(fetched)
    }

    async fn set_approval(&mut self, transaction_id: &str, approved: bool) -> Result<()> {
        // Writes are never cached.
        self.inner.set_approval(transaction_id, approved).await
    }
}

/// Builds the cache key for a request: the endpoint name plus the JSON-serialized parameters,
/// so that the same endpoint with different parameters caches independently.
fn request_key(endpoint: &str, params: &impl Serialize) -> Result<String> {
    let params = serde_json::to_string(params)
        .with_context(|| format!("Unable to serialize params for '{endpoint}'"))?;
    Ok(format!("{endpoint}@{params}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;
    use crate::test::CountingBackend;

    fn cached(inner: Box<dyn Backend + Send>) -> CachedBackend {
        CachedBackend::new(inner, Box::new(MemoryCache::default()))
    }

    #[tokio::test]
    async fn test_repeat_page_fetch_is_served_from_cache() {
        let counting = CountingBackend::new(MemoryBackend::default());
        let counter = counting.counter();
        let mut backend = cached(Box::new(counting));

        let first = backend.fetch_page(None).await.unwrap().unwrap();
        let again = backend.fetch_page(None).await.unwrap().unwrap();
        assert_eq!(first, again);
        assert_eq!(counter.get(), 1);

        // A different page is a different request shape.
        backend.fetch_page(Some(1)).await.unwrap().unwrap();
        assert_eq!(counter.get(), 2);
    }

    #[tokio::test]
    async fn test_employee_requests_cache_independently() {
        let counting = CountingBackend::new(MemoryBackend::default());
        let counter = counting.counter();
        let mut backend = cached(Box::new(counting));

        backend.fetch_by_employee("emp-001").await.unwrap();
        backend.fetch_by_employee("emp-001").await.unwrap();
        backend.fetch_by_employee("emp-002").await.unwrap();
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_invalidate_by_prefix() {
        let mut cache = MemoryCache::default();
        cache.set("paginatedTransactions@{\"page\":null}", serde_json::json!(1));
        cache.set("paginatedTransactions@{\"page\":1}", serde_json::json!(2));
        cache.set("employees@null", serde_json::json!(3));

        cache.invalidate("paginatedTransactions");
        assert!(cache.get("paginatedTransactions@{\"page\":null}").is_none());
        assert!(cache.get("paginatedTransactions@{\"page\":1}").is_none());
        assert!(cache.get("employees@null").is_some());
    }

    #[tokio::test]
    async fn test_approval_write_bypasses_cache() {
        let counting = CountingBackend::new(MemoryBackend::default());
        let counter = counting.counter();
        let mut backend = cached(Box::new(counting));

        backend.set_approval("txn-001", true).await.unwrap();
        // Writes are not counted as reads and nothing was cached.
        assert_eq!(counter.get(), 0);
    }
}
