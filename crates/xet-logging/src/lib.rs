#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_logging` is the thin bridge between the download pipeline and
//! `tracing`, mirroring the role the teacher workspace's `logging` crate
//! plays behind its own `tracing` feature: the pipeline crates never format
//! a log line themselves, they open a span or fire an event through the
//! helpers here.
//!
//! # Design
//!
//! Three span constructors cover the suspension points spec §5 names —
//! [`download_span`] around a whole `download()` call, [`fetch_span`]
//! around one xorb HTTP fetch, [`refresh_span`] around a token refresh —
//! plus [`truncate_file_id`] and [`url_host`], the two redaction rules
//! every log line in the pipeline is expected to apply: file IDs never
//! appear in full, and presigned fetch URLs are logged by host only, never
//! with their query-string signature. Fields are attached as structured
//! `tracing` fields rather than interpolated into the message string, so a
//! subscriber can filter or index on them.
//!
//! # Invariants
//!
//! - No helper in this crate ever logs a bearer token or full file
//!   contents.
//! - [`truncate_file_id`] never returns more than 20 characters, matching
//!   the truncation rule spec §7 applies to error messages.

use tracing::Span;

/// Number of leading characters a file ID keeps in any log line or error
/// message. Matches the truncation rule in spec §7.
pub const FILE_ID_LOG_PREFIX: usize = 20;

/// Truncates a file ID to [`FILE_ID_LOG_PREFIX`] characters for logging.
#[must_use]
pub fn truncate_file_id(file_id: &str) -> String {
    file_id.chars().take(FILE_ID_LOG_PREFIX).collect()
}

/// Extracts just the host from a URL, for logging presigned fetch URLs
/// without leaking their query-string signature. Returns `"<unparsed>"`
/// if the URL doesn't parse.
#[must_use]
pub fn url_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<unparsed>".to_string())
}

/// Opens a span around one `download()` call: truncated file ID and the
/// requested byte range, if any.
pub fn download_span(file_id: &str, byte_range: Option<(u64, u64)>) -> Span {
    tracing::debug_span!(
        "cas_download",
        file_id = %truncate_file_id(file_id),
        range_start = byte_range.map(|r| r.0),
        range_end = byte_range.map(|r| r.1),
    )
}

/// Opens a span around one xorb HTTP fetch: the host (not the full
/// presigned URL) and the inclusive byte range requested.
pub fn fetch_span(url: &str, url_range: (u64, u64)) -> Span {
    tracing::debug_span!(
        "xorb_fetch",
        host = %url_host(url),
        range_start = url_range.0,
        range_end = url_range.1,
    )
}

/// Opens a span around a token refresh, recording whether this caller
/// joined an already in-flight refresh rather than starting one.
pub fn refresh_span(coalesced: bool) -> Span {
    tracing::debug_span!("token_refresh", coalesced)
}

/// Emits a trace-level event summarizing one xorb's decode: how many
/// chunks it held and how many used each scheme (none / LZ4 / BG4+LZ4).
pub fn trace_decode_summary(chunk_count: usize, scheme_none: usize, scheme_lz4: usize, scheme_bg4: usize) {
    tracing::trace!(
        chunk_count,
        scheme_none,
        scheme_lz4,
        scheme_bg4,
        "xorb decode complete"
    );
}

/// Installs a default `tracing-subscriber` formatter driven by `RUST_LOG`.
/// Intended for binaries and examples; library code should never call
/// this, only install spans and events and let the embedding application
/// choose a subscriber.
#[cfg(feature = "init")]
pub fn init_subscriber() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
