//! Response cache
//!
//! Read-through memoization over idempotent reads, backed by Redis.
//! Entries are keyed by the operation's identity plus its full query
//! parameter set; the parameter list is sorted before keying, so two
//! calls with the same parameter multiset hit the same entry regardless
//! of order.
//!
//! Invalidation is wholesale: every content or progress mutation bumps a
//! generation counter that prefixes all keys, making every prior entry
//! unreachable at once. Orphaned entries age out through their TTL.
//! Trading false-negative misses for that simplicity is intentional;
//! per-key invalidation would change observable staleness behavior.
//!
//! The cache is never allowed to fail a read: any Redis error degrades
//! to a miss (or a no-op for writes) with a warning.

use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    constants::{CACHE_GENERATION_KEY, CACHE_KEY_PREFIX},
    middleware::Requester,
};

/// Response cache over the shared Redis connection
pub struct CacheService;

impl CacheService {
    /// Canonical cache key for an operation and its query parameters
    ///
    /// Parameter pairs are sorted, so key derivation is order-insensitive
    /// over the parameter multiset. The operation name keeps reads with
    /// identical parameters but different semantics apart. Names and
    /// values are escaped before joining: the key must be injective over
    /// parameter sets, or one set's entry could answer another's read.
    pub fn cache_key(operation: &str, params: &[(String, String)]) -> String {
        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort();

        let mut key = String::from(operation);
        key.push('?');
        for (i, (name, value)) in sorted.iter().enumerate() {
            if i > 0 {
                key.push('&');
            }
            key.push_str(&Self::escape(name));
            key.push('=');
            key.push_str(&Self::escape(value));
        }
        key
    }

    /// Key for a read whose serialization depends on the requester's
    /// visibility
    ///
    /// The scope rides in a `#`-separated section. `#` is escaped inside
    /// parameter components, so a client-supplied `visibility` query
    /// parameter lands in the parameter section and can never collide
    /// with this one.
    pub fn visibility_key(
        operation: &str,
        params: &[(String, String)],
        requester: &Requester,
    ) -> String {
        format!(
            "{}#visibility={}",
            Self::cache_key(operation, params),
            if requester.admin { "admin" } else { "user" }
        )
    }

    /// Key for a read scoped to one requester's own data
    pub fn user_key(operation: &str, params: &[(String, String)], user_id: Option<i32>) -> String {
        format!(
            "{}#user={}",
            Self::cache_key(operation, params),
            user_id.map(|id| id.to_string()).unwrap_or_default()
        )
    }

    /// Percent-escape the characters that structure a cache key
    fn escape(component: &str) -> String {
        let mut escaped = String::with_capacity(component.len());
        for ch in component.chars() {
            match ch {
                '%' | '&' | '=' | '#' => {
                    escaped.push('%');
                    escaped.push_str(&format!("{:02X}", ch as u32));
                }
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Look up a cached response; any failure is a miss
    pub async fn fetch<T: DeserializeOwned>(
        redis: &mut ConnectionManager,
        key: &str,
    ) -> Option<T> {
        let full_key = match Self::versioned_key(redis, key).await {
            Ok(k) => k,
            Err(e) => {
                warn!(error = %e, "Cache generation lookup failed, treating as miss");
                return None;
            }
        };

        let cached: Option<String> = match redis.get(&full_key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %full_key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        cached.and_then(|body| serde_json::from_str(&body).ok())
    }

    /// Store a response under the current generation; failures are no-ops
    pub async fn store<T: Serialize>(
        redis: &mut ConnectionManager,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) {
        let body = match serde_json::to_string(value) {
            Ok(body) => body,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache serialization failed, skipping store");
                return;
            }
        };

        let full_key = match Self::versioned_key(redis, key).await {
            Ok(k) => k,
            Err(e) => {
                warn!(error = %e, "Cache generation lookup failed, skipping store");
                return;
            }
        };

        if let Err(e) = redis.set_ex::<_, _, ()>(&full_key, body, ttl_seconds).await {
            warn!(key = %full_key, error = %e, "Cache write failed, skipping store");
        }
    }

    /// Invalidate the entire cache
    ///
    /// Bumping the generation makes every existing entry unreachable in
    /// one step. The flush is not atomic with the mutation that triggered
    /// it; a brief stale-read window is accepted.
    pub async fn flush(redis: &mut ConnectionManager) {
        if let Err(e) = redis.incr::<_, _, i64>(CACHE_GENERATION_KEY, 1).await {
            warn!(error = %e, "Cache flush failed");
        }
    }

    async fn versioned_key(
        redis: &mut ConnectionManager,
        key: &str,
    ) -> Result<String, redis::RedisError> {
        let generation: Option<i64> = redis.get(CACHE_GENERATION_KEY).await?;
        Ok(format!(
            "{}:{}:{}",
            CACHE_KEY_PREFIX,
            generation.unwrap_or(0),
            key
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_is_order_insensitive() {
        let a = CacheService::cache_key("questions.list", &params(&[("a", "1"), ("b", "2")]));
        let b = CacheService::cache_key("questions.list", &params(&[("b", "2"), ("a", "1")]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_separates_operations() {
        let a = CacheService::cache_key("questions.list", &params(&[("id", "1")]));
        let b = CacheService::cache_key("exams.list", &params(&[("id", "1")]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_separates_parameter_sets() {
        let a = CacheService::cache_key("questions.list", &params(&[("id", "1")]));
        let b = CacheService::cache_key("questions.list", &params(&[("id", "2")]));
        let c = CacheService::cache_key("questions.list", &params(&[("id", "1"), ("id", "2")]));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_repeated_values_keep_multiplicity() {
        let once = CacheService::cache_key("q", &params(&[("id", "1")]));
        let twice = CacheService::cache_key("q", &params(&[("id", "1"), ("id", "1")]));
        assert_ne!(once, twice);
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(CacheService::cache_key("courses.list", &[]), "courses.list?");
    }

    #[test]
    fn test_separator_characters_in_values_cannot_collide() {
        // One filter whose value contains the joining characters must not
        // produce the same key as two separate filters.
        let smuggled = CacheService::cache_key("courses.list", &params(&[("code", "X&name=Y")]));
        let split = CacheService::cache_key("courses.list", &params(&[("code", "X"), ("name", "Y")]));
        assert_ne!(smuggled, split);

        let in_name = CacheService::cache_key("courses.list", &params(&[("code=X&name", "Y")]));
        assert_ne!(in_name, split);
    }

    #[test]
    fn test_escaping_is_injective() {
        // A pre-escaped value must not alias the raw value it decodes to.
        let raw = CacheService::cache_key("q", &params(&[("code", "a&b")]));
        let pre_escaped = CacheService::cache_key("q", &params(&[("code", "a%26b")]));
        assert_ne!(raw, pre_escaped);
    }

    #[test]
    fn test_visibility_scope_is_reserved() {
        let admin = Requester {
            id: Some(1),
            registered: true,
            admin: true,
        };
        let user = Requester {
            id: Some(2),
            registered: true,
            admin: false,
        };

        let admin_key = CacheService::visibility_key("exams.list", &[], &admin);
        let user_key = CacheService::visibility_key("exams.list", &[], &user);
        assert_ne!(admin_key, user_key);

        // A client-supplied `visibility` query parameter stays in the
        // parameter section and cannot reach the scope section.
        let forged =
            CacheService::cache_key("exams.list", &params(&[("visibility", "admin")]));
        assert_ne!(forged, admin_key);
        let forged_scope =
            CacheService::cache_key("exams.list", &params(&[("x", "1#visibility=admin")]));
        assert_ne!(
            forged_scope,
            CacheService::visibility_key("exams.list", &params(&[("x", "1")]), &admin)
        );
    }

    #[test]
    fn test_user_scope_separates_requesters() {
        let p = params(&[("course", "TDT4100")]);
        let a = CacheService::user_key("stats.course", &p, Some(1));
        let b = CacheService::user_key("stats.course", &p, Some(2));
        let anon = CacheService::user_key("stats.course", &p, None);
        assert_ne!(a, b);
        assert_ne!(a, anon);

        let forged = CacheService::cache_key("stats.course", &params(&[("course", "TDT4100"), ("user", "1")]));
        assert_ne!(forged, a);
    }

    #[tokio::test]
    async fn test_flush_invalidates_between_reads() {
        let mut redis = crate::test_utils::fixtures::test_redis().await;
        let tag = crate::test_utils::fixtures::unique_tag();
        let key = CacheService::cache_key(
            "courses.list",
            &[("code".to_string(), format!("COH-{}", tag))],
        );

        CacheService::store(&mut redis, &key, &vec!["before".to_string()], 60).await;
        let hit: Option<Vec<String>> = CacheService::fetch(&mut redis, &key).await;
        assert_eq!(hit, Some(vec!["before".to_string()]));

        // A write flushes; the stale entry must not answer the next read.
        CacheService::flush(&mut redis).await;
        let miss: Option<Vec<String>> = CacheService::fetch(&mut redis, &key).await;
        assert!(miss.is_none());

        CacheService::store(&mut redis, &key, &vec!["after".to_string()], 60).await;
        let refreshed: Option<Vec<String>> = CacheService::fetch(&mut redis, &key).await;
        assert_eq!(refreshed, Some(vec!["after".to_string()]));
    }
}
