use thiserror::Error;

/// Errors from requesting or decoding a reconstruction plan.
#[derive(Debug, Error, Clone)]
pub enum CasClientError {
    /// `cas_url` or the built request URL was not a valid URL.
    #[error("invalid CAS URL: {0}")]
    InvalidUrl(String),

    /// The CAS URL's scheme was not HTTPS and insecure mode was not
    /// explicitly enabled.
    #[error("refusing non-HTTPS CAS URL {0} (insecure mode is disabled)")]
    InsecureUrlRejected(String),

    /// The reconstruction endpoint returned a status outside 200–299.
    #[error("reconstruction request for {file_id} failed with status {status}: {body}")]
    NonSuccessStatus {
        /// Truncated file ID (see `DownloadError`'s truncation rule).
        file_id: String,
        /// The HTTP status code returned.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The request timed out before a response was received.
    #[error("reconstruction request for {file_id} timed out")]
    Timeout {
        /// Truncated file ID.
        file_id: String,
    },

    /// The underlying HTTP client failed outside of a timeout or non-2xx
    /// status (DNS failure, TLS error, connection reset, ...).
    #[error("reconstruction request for {file_id} failed: {reason}")]
    Transport {
        /// Truncated file ID.
        file_id: String,
        /// A human-readable description of the transport failure.
        reason: String,
    },

    /// The response body was not valid JSON, or was valid JSON that did
    /// not match the reconstruction schema.
    #[error("reconstruction response for {file_id} was malformed: {reason}")]
    MalformedResponse {
        /// Truncated file ID.
        file_id: String,
        /// A human-readable description of what was wrong.
        reason: String,
    },

    /// A term's chunk range was not fully covered by any fetch-info for its
    /// xorb hash.
    #[error("no fetch-info for hash {hash} covers chunk range [{lo}, {hi})")]
    UncoveredTermRange {
        /// The xorb hash the term referenced.
        hash: String,
        /// Start of the term's chunk range.
        lo: i32,
        /// End of the term's chunk range.
        hi: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_message_includes_status_and_body() {
        let err = CasClientError::NonSuccessStatus {
            file_id: "abc123".into(),
            status: 404,
            body: "not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn uncovered_term_range_message_names_hash_and_range() {
        let err = CasClientError::UncoveredTermRange {
            hash: "deadbeef".into(),
            lo: 2,
            hi: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("deadbeef"));
        assert!(msg.contains('2'));
        assert!(msg.contains('5'));
    }
}
