use thiserror::Error;

/// Errors from acquiring or refreshing a CAS access token.
#[derive(Debug, Error, Clone)]
pub enum TokenError {
    /// The refresh endpoint responded with a non-2xx status.
    #[error("token refresh to {url} failed with status {status}")]
    RefreshFailed {
        /// The refresh URL that was requested.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The refresh endpoint's connection or read timed out.
    #[error("token refresh to {url} timed out")]
    Timeout {
        /// The refresh URL that was requested.
        url: String,
    },

    /// The refresh response body was not valid JSON or was missing a
    /// required field.
    #[error("token refresh response from {url} was malformed: {reason}")]
    MalformedResponse {
        /// The refresh URL that was requested.
        url: String,
        /// A human-readable description of what was wrong.
        reason: String,
    },

    /// The underlying HTTP client failed for a reason other than a
    /// non-2xx status or a timeout (DNS failure, TLS error, connection
    /// refused, ...).
    #[error("token refresh to {url} failed: {reason}")]
    Transport {
        /// The refresh URL that was requested.
        url: String,
        /// A human-readable description of the transport failure.
        reason: String,
    },
}
