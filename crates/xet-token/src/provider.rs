//! Per-`(refresh_url, hub_token)` token cache with coalesced refresh.
//!
//! # State machine
//!
//! - `FRESH` (cache hit, not within the safety window of expiry) → `FRESH`.
//! - `STALE`, no refresh in flight → `REFRESHING`, one refresh started.
//! - `STALE`, refresh already in flight → the caller awaits the existing
//!   shared future instead of starting another.
//! - Refresh success → `FRESH`, the new value published for all waiters.
//! - Refresh failure → the in-flight entry is removed and every waiter
//!   (the caller who started it and every caller who joined it) observes
//!   the same error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::error::TokenError;
use crate::refresh::{RawTokenResponse, TokenRefresher};

/// Default margin before `exp` during which a token is treated as stale.
/// See the spec's open question on clock skew: no formal bound is given,
/// so this follows its recommended value.
pub const DEFAULT_SAFETY_WINDOW: Duration = Duration::from_secs(60);

/// A cached CAS connection: where to fetch from and the bearer token to
/// use, valid until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Base URL of the CAS service this token is valid for.
    pub cas_url: String,
    /// Bearer token to attach to CAS requests.
    pub access_token: String,
    /// Expiry, UNIX seconds.
    pub expires_at: i64,
}

impl ConnectionInfo {
    fn is_stale(&self, safety_window: Duration, now: SystemTime) -> bool {
        let now_unix = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(i64::MAX);
        let safety_secs = i64::try_from(safety_window.as_secs()).unwrap_or(i64::MAX);
        self.expires_at <= now_unix.saturating_add(safety_secs)
    }
}

impl From<RawTokenResponse> for ConnectionInfo {
    fn from(raw: RawTokenResponse) -> Self {
        Self {
            cas_url: raw.cas_url,
            access_token: raw.access_token,
            expires_at: raw.exp,
        }
    }
}

type RefreshFuture = Shared<BoxFuture<'static, Result<Arc<ConnectionInfo>, TokenError>>>;

enum CacheState {
    Fresh(Arc<ConnectionInfo>),
    Refreshing(RefreshFuture),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    refresh_url: String,
    hub_token: Option<String>,
}

/// Caches CAS connection info keyed by `(refresh_url, hub_token)`, coalescing
/// concurrent refreshes into a single HTTP request.
pub struct TokenProvider<R> {
    refresher: Arc<R>,
    safety_window: Duration,
    cache: Mutex<HashMap<CacheKey, CacheState>>,
}

impl<R: TokenRefresher> TokenProvider<R> {
    /// Builds a provider with the default 60-second safety window.
    pub fn new(refresher: R) -> Self {
        Self::with_safety_window(refresher, DEFAULT_SAFETY_WINDOW)
    }

    /// Builds a provider with an explicit safety window.
    pub fn with_safety_window(refresher: R, safety_window: Duration) -> Self {
        Self {
            refresher: Arc::new(refresher),
            safety_window,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns cached connection info if fresh, otherwise awaits a refresh
    /// (joining one already in flight rather than starting a second).
    pub async fn connection_info(
        &self,
        refresh_url: &str,
        hub_token: Option<&str>,
    ) -> Result<Arc<ConnectionInfo>, TokenError> {
        let key = CacheKey {
            refresh_url: refresh_url.to_string(),
            hub_token: hub_token.map(str::to_string),
        };

        let refresh_future = {
            let mut cache = self.cache.lock().await;
            match cache.get(&key) {
                Some(CacheState::Fresh(info))
                    if !info.is_stale(self.safety_window, SystemTime::now()) =>
                {
                    return Ok(Arc::clone(info));
                }
                Some(CacheState::Refreshing(shared)) => shared.clone(),
                _ => {
                    let shared = self.spawn_refresh(refresh_url.to_string(), hub_token.map(str::to_string));
                    cache.insert(key.clone(), CacheState::Refreshing(shared.clone()));
                    shared
                }
            }
        };

        let result = refresh_future.await;

        let mut cache = self.cache.lock().await;
        match &result {
            Ok(info) => {
                cache.insert(key, CacheState::Fresh(Arc::clone(info)));
            }
            Err(_) => {
                cache.remove(&key);
            }
        }
        result
    }

    fn spawn_refresh(&self, refresh_url: String, hub_token: Option<String>) -> RefreshFuture {
        let refresher = Arc::clone(&self.refresher);
        async move {
            refresher
                .refresh(&refresh_url, hub_token.as_deref())
                .await
                .map(|raw| Arc::new(ConnectionInfo::from(raw)))
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRefresher {
        calls: AtomicUsize,
        response: Result<RawTokenResponse, TokenError>,
    }

    #[async_trait::async_trait]
    impl TokenRefresher for CountingRefresher {
        async fn refresh(
            &self,
            _refresh_url: &str,
            _hub_token: Option<&str>,
        ) -> Result<RawTokenResponse, TokenError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.response.clone()
        }
    }

    fn fresh_response(expires_in_secs: i64) -> RawTokenResponse {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        RawTokenResponse {
            access_token: "tok".into(),
            exp: now + expires_in_secs,
            cas_url: "https://cas.example.test".into(),
        }
    }

    #[tokio::test]
    async fn fresh_token_is_served_from_cache_without_refreshing_again() {
        let refresher = CountingRefresher {
            calls: AtomicUsize::new(0),
            response: Ok(fresh_response(3600)),
        };
        let provider = TokenProvider::new(refresher);

        let first = provider.connection_info("https://hub/refresh", None).await.unwrap();
        let second = provider.connection_info("https://hub/refresh", None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.refresher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_with_expired_token_coalesce_into_one_refresh() {
        let refresher = CountingRefresher {
            calls: AtomicUsize::new(0),
            response: Ok(fresh_response(3600)),
        };
        let provider = Arc::new(TokenProvider::new(refresher));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let provider = Arc::clone(&provider);
            handles.push(tokio::spawn(async move {
                provider.connection_info("https://hub/refresh", None).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(provider.refresher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_cache_entry_triggers_a_new_refresh() {
        let refresher = CountingRefresher {
            calls: AtomicUsize::new(0),
            response: Ok(fresh_response(0)), // expires immediately
        };
        let provider = TokenProvider::with_safety_window(refresher, Duration::from_secs(60));

        provider.connection_info("https://hub/refresh", None).await.unwrap();
        provider.connection_info("https://hub/refresh", None).await.unwrap();

        assert_eq!(provider.refresher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn refresh_failure_propagates_to_every_waiter_and_clears_in_flight_state() {
        let refresher = CountingRefresher {
            calls: AtomicUsize::new(0),
            response: Err(TokenError::RefreshFailed {
                url: "https://hub/refresh".into(),
                status: 500,
            }),
        };
        let provider = Arc::new(TokenProvider::new(refresher));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let provider = Arc::clone(&provider);
            handles.push(tokio::spawn(async move {
                provider.connection_info("https://hub/refresh", None).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_err());
        }
        assert_eq!(provider.refresher.calls.load(Ordering::SeqCst), 1);

        // A subsequent call starts a fresh refresh rather than replaying the
        // failed one forever.
        assert!(provider.connection_info("https://hub/refresh", None).await.is_err());
        assert_eq!(provider.refresher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn different_keys_never_share_a_cache_entry() {
        let refresher = CountingRefresher {
            calls: AtomicUsize::new(0),
            response: Ok(fresh_response(3600)),
        };
        let provider = TokenProvider::new(refresher);

        provider.connection_info("https://hub/a", None).await.unwrap();
        provider.connection_info("https://hub/a", Some("hub-tok")).await.unwrap();
        provider.connection_info("https://hub/b", None).await.unwrap();

        assert_eq!(provider.refresher.calls.load(Ordering::SeqCst), 3);
    }
}
