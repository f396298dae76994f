//! Builds and issues the reconstruction request.

use tracing::debug;

use crate::error::CasClientError;
use crate::types::ReconstructionPlan;

/// File IDs are truncated to this many characters in user-visible error
/// messages.
const FILE_ID_MESSAGE_PREFIX: usize = 20;

/// Thin wrapper around a shared `reqwest::Client` that knows how to build
/// and decode a reconstruction request.
#[derive(Debug, Clone)]
pub struct CasClient {
    http: reqwest::Client,
}

impl CasClient {
    /// Wraps an existing client so connection pooling is shared with the
    /// rest of the download pipeline.
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Requests the reconstruction plan for `file_id` from `cas_url`,
    /// optionally restricted to `byte_range` (inclusive-inclusive, matching
    /// HTTP `Range` semantics).
    pub async fn get_reconstruction(
        &self,
        cas_url: &str,
        file_id: &str,
        access_token: &str,
        byte_range: Option<(u64, u64)>,
    ) -> Result<ReconstructionPlan, CasClientError> {
        let url = format!(
            "{}/v1/reconstructions/{file_id}",
            cas_url.trim_end_matches('/')
        );
        url::Url::parse(&url).map_err(|_| CasClientError::InvalidUrl(url.clone()))?;

        let mut request = self.http.get(&url).bearer_auth(access_token);
        if let Some((lo, hi)) = byte_range {
            let inclusive_end = hi.saturating_sub(1);
            request = request.header(reqwest::header::RANGE, format!("bytes={lo}-{inclusive_end}"));
        }

        debug!(url = %url, ranged = byte_range.is_some(), "requesting reconstruction plan");

        let truncated_id = truncate_file_id(file_id);
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                CasClientError::Timeout {
                    file_id: truncated_id.clone(),
                }
            } else {
                CasClientError::Transport {
                    file_id: truncated_id.clone(),
                    reason: err.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CasClientError::NonSuccessStatus {
                file_id: truncated_id,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| CasClientError::MalformedResponse {
                file_id: truncated_id.clone(),
                reason: err.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|err| CasClientError::MalformedResponse {
            file_id: truncated_id,
            reason: err.to_string(),
        })
    }
}

fn truncate_file_id(file_id: &str) -> String {
    file_id.chars().take(FILE_ID_MESSAGE_PREFIX).collect()
}
