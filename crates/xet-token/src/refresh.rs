//! The HTTP call a token refresh makes, and the trait that lets
//! [`crate::TokenProvider`] be tested without a real server.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::TokenError;

/// The refresh endpoint's JSON response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTokenResponse {
    /// Bearer token to attach to CAS requests.
    #[serde(rename = "accessToken")]
    pub access_token: String,
    /// Expiry as UNIX seconds.
    pub exp: i64,
    /// Base URL of the CAS service this token is valid for.
    #[serde(rename = "casUrl")]
    pub cas_url: String,
}

/// Performs the `GET refresh_url` call that mints a fresh access token.
///
/// Implemented by [`ReqwestTokenRefresher`] for production use and by
/// in-memory doubles in tests, so [`crate::TokenProvider`]'s coalescing
/// logic can be exercised without a socket.
#[async_trait]
pub trait TokenRefresher: Send + Sync + 'static {
    /// Fetches a new token. `hub_token`, when present, is sent as
    /// `Authorization: Bearer {hub_token}`.
    async fn refresh(
        &self,
        refresh_url: &str,
        hub_token: Option<&str>,
    ) -> Result<RawTokenResponse, TokenError>;
}

/// Production [`TokenRefresher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTokenRefresher {
    client: reqwest::Client,
}

impl ReqwestTokenRefresher {
    /// Wraps an existing client (so it can share connection pooling with
    /// the rest of the download pipeline).
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenRefresher for ReqwestTokenRefresher {
    async fn refresh(
        &self,
        refresh_url: &str,
        hub_token: Option<&str>,
    ) -> Result<RawTokenResponse, TokenError> {
        let mut request = self
            .client
            .get(refresh_url)
            .header(reqwest::header::CACHE_CONTROL, "reload");
        if let Some(hub_token) = hub_token {
            request = request.bearer_auth(hub_token);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                TokenError::Timeout {
                    url: refresh_url.to_string(),
                }
            } else {
                TokenError::Transport {
                    url: refresh_url.to_string(),
                    reason: err.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            return Err(TokenError::RefreshFailed {
                url: refresh_url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<RawTokenResponse>()
            .await
            .map_err(|err| TokenError::MalformedResponse {
                url: refresh_url.to_string(),
                reason: err.to_string(),
            })
    }
}
