//! The root error type the public `Downloader` API returns. Every other
//! crate's error converts into a variant here via `#[from]`, so a caller
//! only ever has to match on one enum.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors the download pipeline can produce, taxonomized per spec §7:
/// input errors, protocol errors, transport errors, format/decompression
/// errors (re-exported from the crates that detect them), and I/O errors.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// `file_id` was not exactly 64 lowercase hex characters.
    #[error("invalid file id: {file_id}")]
    InvalidFileId {
        /// Truncated (at most 20 chars) offending ID.
        file_id: String,
    },

    /// `cas_url` (from the token response) was not a valid URL.
    #[error("invalid CAS URL: {0}")]
    InvalidCasUrl(String),

    /// A fetch-info's `url` was not a valid URL.
    #[error("invalid fetch URL: {0}")]
    InvalidFetchUrl(String),

    /// A CAS or fetch URL's scheme was not `https` and insecure mode was
    /// not explicitly enabled on the [`crate::Config`].
    #[error("refusing non-HTTPS URL {0} (insecure mode is disabled)")]
    InsecureUrlRejected(String),

    /// The [`crate::Config`] given to [`crate::Downloader::new`] failed
    /// validation.
    #[error("invalid downloader configuration: {0}")]
    Config(#[from] ConfigError),

    /// Token acquisition or refresh failed.
    #[error("token error: {0}")]
    Token(#[from] xet_token::TokenError),

    /// The reconstruction plan request or its decoding failed, including a
    /// term whose chunk range no fetch-info covers.
    #[error("reconstruction error: {0}")]
    Reconstruction(#[from] xet_cas_client::CasClientError),

    /// A xorb fetch returned a status other than 200-299 or 206.
    #[error("xorb fetch for {url} failed with status {status:?}: {reason}")]
    FetchFailed {
        /// The fetch URL that was requested (full URL; presigned fetch
        /// URLs are not secrets the way bearer tokens are, but callers
        /// that log this value should still prefer `xet_logging::url_host`
        /// for anything more than a one-off diagnostic).
        url: String,
        /// The HTTP status code, when one was received at all (`None` for
        /// a transport-level failure such as DNS or TLS).
        status: Option<u16>,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// A xorb fetch's connect or read timeout elapsed.
    #[error("xorb fetch for {url} timed out")]
    FetchTimeout {
        /// The fetch URL that timed out.
        url: String,
    },

    /// The chunk stream returned for a xorb fetch failed to parse or
    /// decompress.
    #[error("xorb decode error: {0}")]
    Xorb(#[from] xet_xorb::XorbError),

    /// A background fetch task panicked or was aborted before it could
    /// return a result.
    #[error("xorb fetch task for {url} did not complete: {reason}")]
    FetchTaskFailed {
        /// The fetch URL the failed task was retrieving.
        url: String,
        /// A human-readable description (panic message or "cancelled").
        reason: String,
    },

    /// The download was cancelled via its [`tokio_util::sync::CancellationToken`].
    #[error("download cancelled")]
    Cancelled,

    /// Writing to, or otherwise managing, the output destination failed.
    #[error("output I/O error: {0}")]
    Io(#[from] std::io::Error),
}
