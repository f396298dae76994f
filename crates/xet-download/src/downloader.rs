//! The scheduler (spec §4.7): turns an ordered list of reconstruction
//! terms into one sequential byte stream, overlapping network fetches
//! across xorbs while writing output strictly in plan order.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use xet_cas_client::CasClient;
use xet_token::{ReqwestTokenRefresher, TokenProvider};
use xet_xorb::BatchDecoded;

use crate::config::Config;
use crate::error::DownloadError;
use crate::fetch::fetch_xorb;
use crate::http_pool::ClientPool;
use crate::id::validate_file_id;
use crate::output::Sink;
use crate::plan::{build_planned_terms, total_len_for_key, FetchRangeKey, PlannedTerm};

/// One call's worth of parameters to [`Downloader::download`] /
/// [`Downloader::download_to_file`]. A builder rather than a long
/// positional argument list, in the teacher workspace's configuration
/// style.
#[derive(Clone)]
pub struct DownloadRequest<'a> {
    file_id: &'a str,
    refresh_url: &'a str,
    hub_token: Option<&'a str>,
    byte_range: Option<(u64, u64)>,
    cancellation: Option<CancellationToken>,
}

impl<'a> DownloadRequest<'a> {
    /// Starts a request for the whole file, with no cancellation hook.
    #[must_use]
    pub fn new(file_id: &'a str, refresh_url: &'a str) -> Self {
        Self {
            file_id,
            refresh_url,
            hub_token: None,
            byte_range: None,
            cancellation: None,
        }
    }

    /// Sends `Authorization: Bearer {hub_token}` on the token refresh call.
    #[must_use]
    pub fn hub_token(mut self, hub_token: &'a str) -> Self {
        self.hub_token = Some(hub_token);
        self
    }

    /// Restricts the download to the half-open byte range `[lo, hi)`.
    #[must_use]
    pub const fn byte_range(mut self, range: (u64, u64)) -> Self {
        self.byte_range = Some(range);
        self
    }

    /// Attaches a token that, when tripped, cancels every in-flight fetch
    /// and fails the download with [`DownloadError::Cancelled`].
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Orchestrates CAS downloads: token refresh, reconstruction planning,
/// bounded-concurrency xorb fetching, and in-order splicing into an
/// output destination.
pub struct Downloader {
    config: Config,
    http_pool: ClientPool,
    token_provider: TokenProvider<ReqwestTokenRefresher>,
    cas_client: CasClient,
}

impl Downloader {
    /// Builds a downloader: an HTTP client pool, a token cache, and a CAS
    /// client all sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client pool fails to build
    /// (e.g. an invalid TLS configuration on the host).
    pub fn new(config: Config) -> Result<Self, DownloadError> {
        let http_pool = ClientPool::build(&config)?;
        let refresher = ReqwestTokenRefresher::new(http_pool.next_client());
        let token_provider = TokenProvider::with_safety_window(refresher, config.token_safety_window());
        let cas_client = CasClient::new(http_pool.next_client());
        Ok(Self {
            config,
            http_pool,
            token_provider,
            cas_client,
        })
    }

    /// Downloads `request` fully into memory.
    ///
    /// # Errors
    ///
    /// See [`DownloadError`] — invalid input, token/plan/transport
    /// failures, format/decompression errors, or cancellation.
    pub async fn download(&self, request: DownloadRequest<'_>) -> Result<Vec<u8>, DownloadError> {
        use tracing::Instrument;
        let span = xet_logging::download_span(request.file_id, request.byte_range);
        let (sink, _written) = self.execute(&request, Sink::memory()).instrument(span).await?;
        Ok(sink.into_memory())
    }

    /// Downloads `request`, writing positionally into `destination`
    /// (created, truncating if it already exists). Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// As [`Downloader::download`], plus I/O errors opening or writing
    /// the destination file.
    pub async fn download_to_file(
        &self,
        request: DownloadRequest<'_>,
        destination: &Path,
    ) -> Result<u64, DownloadError> {
        use tracing::Instrument;
        let span = xet_logging::download_span(request.file_id, request.byte_range);
        let sink = Sink::open_file(destination)?;
        let (_sink, written) = self.execute(&request, sink).instrument(span).await?;
        Ok(written)
    }

    /// Releases the pooled HTTP clients. Best-effort cleanup also happens
    /// on `Drop`, but an explicit call is the documented contract (spec
    /// §5 "Shared resources").
    pub fn shutdown(self) {
        drop(self);
    }

    async fn execute(&self, request: &DownloadRequest<'_>, mut sink: Sink) -> Result<(Sink, u64), DownloadError> {
        validate_file_id(request.file_id)?;

        if let Some((lo, hi)) = request.byte_range {
            if hi <= lo {
                return Ok((sink, 0));
            }
        }

        let connection_info = self
            .token_provider
            .connection_info(request.refresh_url, request.hub_token)
            .await?;
        validate_url_scheme_cas(&connection_info.cas_url, self.config.allow_insecure_http())?;

        let plan = self
            .cas_client
            .get_reconstruction(
                &connection_info.cas_url,
                request.file_id,
                &connection_info.access_token,
                request.byte_range,
            )
            .await?;

        let (planned, hash_usage) = build_planned_terms(&plan)?;
        for planned_term in &planned {
            validate_url_scheme_fetch(&planned_term.fetch_info.url, self.config.allow_insecure_http())?;
        }

        let max_bytes = request.byte_range.map(|(lo, hi)| hi - lo);
        let mut skip = plan.offset_into_first_range;
        let mut remaining = max_bytes;
        let mut write_offset = 0u64;

        let fetch_semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches().max(1)));
        let decode_semaphore = Arc::new(Semaphore::new(self.config.decode_buffer_permits()));
        let mut inflight: HashMap<FetchRangeKey, JoinHandle<Result<BatchDecoded, DownloadError>>> = HashMap::new();
        let mut cache: HashMap<FetchRangeKey, Arc<BatchDecoded>> = HashMap::new();

        let run = self
            .run_schedule(
                &planned,
                &hash_usage,
                request.cancellation.as_ref(),
                &fetch_semaphore,
                &decode_semaphore,
                &mut inflight,
                &mut cache,
                &mut skip,
                &mut remaining,
                &mut write_offset,
                &mut sink,
            )
            .await;

        for handle in inflight.into_values() {
            handle.abort();
        }

        run?;
        Ok((sink, write_offset))
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_schedule(
        &self,
        planned: &[PlannedTerm],
        hash_usage: &HashMap<String, usize>,
        cancellation: Option<&CancellationToken>,
        fetch_semaphore: &Arc<Semaphore>,
        decode_semaphore: &Arc<Semaphore>,
        inflight: &mut HashMap<FetchRangeKey, JoinHandle<Result<BatchDecoded, DownloadError>>>,
        cache: &mut HashMap<FetchRangeKey, Arc<BatchDecoded>>,
        skip: &mut u64,
        remaining: &mut Option<u64>,
        write_offset: &mut u64,
        sink: &mut Sink,
    ) -> Result<(), DownloadError> {
        let lookahead = self.config.max_concurrent_fetches().max(1);

        for (index, planned_term) in planned.iter().enumerate() {
            if matches!(remaining, Some(0)) {
                break;
            }
            if let Some(token) = cancellation {
                if token.is_cancelled() {
                    return Err(DownloadError::Cancelled);
                }
            }

            if !cache.contains_key(&planned_term.key) {
                let ahead_end = (index + lookahead).min(planned.len());
                for ahead in &planned[index..ahead_end] {
                    self.ensure_started(ahead, planned, hash_usage, fetch_semaphore, decode_semaphore, inflight, cache);
                }
            }

            let decoded = if let Some(cached) = cache.get(&planned_term.key) {
                Arc::clone(cached)
            } else {
                let handle = inflight
                    .remove(&planned_term.key)
                    .expect("lookahead prefetch must have started this term's fetch");
                let decoded = await_fetch(handle, cancellation).await?;
                let decoded = Arc::new(decoded);
                if hash_usage.get(&planned_term.term.hash).copied().unwrap_or(0) > 1 {
                    cache.insert(planned_term.key.clone(), Arc::clone(&decoded));
                }
                decoded
            };

            splice_term(planned_term, &decoded, skip, remaining, write_offset, sink).await?;
        }

        Ok(())
    }

    fn ensure_started(
        &self,
        planned_term: &PlannedTerm,
        planned: &[PlannedTerm],
        hash_usage: &HashMap<String, usize>,
        fetch_semaphore: &Arc<Semaphore>,
        decode_semaphore: &Arc<Semaphore>,
        inflight: &mut HashMap<FetchRangeKey, JoinHandle<Result<BatchDecoded, DownloadError>>>,
        cache: &HashMap<FetchRangeKey, Arc<BatchDecoded>>,
    ) {
        let _ = hash_usage; // usage decides cacheability on completion, not on start.
        let key = &planned_term.key;
        if cache.contains_key(key) || inflight.contains_key(key) {
            return;
        }

        let client = self.http_pool.next_client();
        let fetch_info = planned_term.fetch_info.clone();
        let total_len = total_len_for_key(planned, key);
        let fetch_semaphore = Arc::clone(fetch_semaphore);
        let decode_semaphore = Arc::clone(decode_semaphore);

        let handle = tokio::spawn(async move { fetch_xorb(client, fetch_info, total_len, fetch_semaphore, decode_semaphore).await });
        inflight.insert(key.clone(), handle);
    }
}

async fn await_fetch(
    mut handle: JoinHandle<Result<BatchDecoded, DownloadError>>,
    cancellation: Option<&CancellationToken>,
) -> Result<BatchDecoded, DownloadError> {
    let joined = match cancellation {
        Some(token) => {
            tokio::select! {
                res = &mut handle => res,
                () = token.cancelled() => {
                    handle.abort();
                    return Err(DownloadError::Cancelled);
                }
            }
        }
        None => (&mut handle).await,
    };

    joined.map_err(|join_err| DownloadError::FetchTaskFailed {
        url: String::new(),
        reason: join_err.to_string(),
    })?
}

/// Splices a term's chunk range out of its fetched xorb into `sink`,
/// applying the spec §4.7 "Splicing" rules in order: discard the
/// remaining `skip` bytes, truncate to the remaining output budget, then
/// write.
async fn splice_term(
    planned_term: &PlannedTerm,
    decoded: &BatchDecoded,
    skip: &mut u64,
    remaining: &mut Option<u64>,
    write_offset: &mut u64,
    sink: &mut Sink,
) -> Result<(), DownloadError> {
    let local_lo = (planned_term.term.range.start - planned_term.key.chunk_lo) as usize;
    let local_hi = (planned_term.term.range.end - planned_term.key.chunk_lo) as usize;

    let Some(mut slice) = decoded.chunk_range_bytes(local_lo, local_hi) else {
        return Err(DownloadError::Reconstruction(
            xet_cas_client::CasClientError::UncoveredTermRange {
                hash: planned_term.term.hash.clone(),
                lo: planned_term.term.range.start,
                hi: planned_term.term.range.end,
            },
        ));
    };

    if *skip > 0 {
        let discard = (*skip).min(slice.len() as u64) as usize;
        slice = &slice[discard..];
        *skip -= discard as u64;
        if slice.is_empty() {
            return Ok(());
        }
    }

    if let Some(budget) = remaining {
        if slice.len() as u64 > *budget {
            slice = &slice[..*budget as usize];
        }
    }

    sink.write_at(*write_offset, slice).await?;
    *write_offset += slice.len() as u64;
    if let Some(budget) = remaining {
        *budget -= slice.len() as u64;
    }

    Ok(())
}

fn validate_url_scheme_cas(url: &str, allow_insecure: bool) -> Result<(), DownloadError> {
    validate_url_scheme(url, allow_insecure).map_err(|scheme_err| match scheme_err {
        UrlSchemeError::Invalid => DownloadError::InvalidCasUrl(url.to_string()),
        UrlSchemeError::Insecure => DownloadError::InsecureUrlRejected(url.to_string()),
    })
}

fn validate_url_scheme_fetch(url: &str, allow_insecure: bool) -> Result<(), DownloadError> {
    validate_url_scheme(url, allow_insecure).map_err(|scheme_err| match scheme_err {
        UrlSchemeError::Invalid => DownloadError::InvalidFetchUrl(url.to_string()),
        UrlSchemeError::Insecure => DownloadError::InsecureUrlRejected(url.to_string()),
    })
}

enum UrlSchemeError {
    Invalid,
    Insecure,
}

fn validate_url_scheme(url: &str, allow_insecure: bool) -> Result<(), UrlSchemeError> {
    let parsed = url::Url::parse(url).map_err(|_| UrlSchemeError::Invalid)?;
    if !allow_insecure && parsed.scheme() != "https" {
        return Err(UrlSchemeError::Insecure);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scheme0_chunk(payload: &[u8]) -> Vec<u8> {
        let len = payload.len() as u32;
        let lb = len.to_le_bytes();
        let mut out = vec![0u8, lb[0], lb[1], lb[2], 0u8, lb[0], lb[1], lb[2]];
        out.extend_from_slice(payload);
        out
    }

    const FILE_ID: &str = "aa000000000000000000000000000000000000000000000000000000000000bb";

    fn token_json(cas_url: &str) -> String {
        format!(
            r#"{{"accessToken": "tok", "exp": {}, "casUrl": "{cas_url}"}}"#,
            i64::MAX / 2
        )
    }

    async fn mount_token(server: &MockServer, cas_url: &str) {
        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(token_json(cas_url)))
            .mount(server)
            .await;
    }

    async fn test_downloader(server: &MockServer) -> Downloader {
        let config = Config::builder().allow_insecure_http(true).pool_size(1).build().unwrap();
        mount_token(server, &server.uri()).await;
        Downloader::new(config).unwrap()
    }

    /// Spec §8 scenario 5: two terms sharing one xorb splice into one
    /// output and the xorb is fetched exactly once.
    #[tokio::test]
    async fn two_terms_sharing_a_xorb_splice_with_a_single_fetch() {
        let server = MockServer::start().await;
        let downloader = test_downloader(&server).await;

        let mut xorb_body = scheme0_chunk(b"AAAAA");
        xorb_body.extend_from_slice(&scheme0_chunk(b"BBBBB"));
        Mock::given(method("GET"))
            .and(path("/xorb"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(xorb_body))
            .expect(1)
            .mount(&server)
            .await;

        let plan = format!(
            r#"{{"offset_into_first_range": 0,
                 "terms": [
                     {{"hash": "h1", "unpacked_length": 5, "range": {{"start": 0, "end": 1}}}},
                     {{"hash": "h1", "unpacked_length": 5, "range": {{"start": 1, "end": 2}}}}
                 ],
                 "fetch_info": {{"h1": [{{"url": "{}/xorb", "range": {{"start": 0, "end": 2}}, "url_range": {{"start": 0, "end": 9}}}}]}}}}"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path(format!("/v1/reconstructions/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(plan))
            .mount(&server)
            .await;

        let request = DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri()));
        let bytes = downloader.download(request).await.unwrap();
        assert_eq!(bytes, b"AAAAABBBBB");
    }

    /// Spec §8 scenario 6: ranged download with `offset_into_first_range`
    /// discards a prefix and the output is truncated to the requested length.
    #[tokio::test]
    async fn ranged_download_applies_offset_into_first_range() {
        let server = MockServer::start().await;
        let downloader = test_downloader(&server).await;

        let xorb_body = scheme0_chunk(b"ABCDE");
        Mock::given(method("GET"))
            .and(path("/xorb"))
            .respond_with(ResponseTemplate::new(206).set_body_bytes(xorb_body))
            .mount(&server)
            .await;

        let plan = format!(
            r#"{{"offset_into_first_range": 3,
                 "terms": [{{"hash": "h1", "unpacked_length": 5, "range": {{"start": 0, "end": 1}}}}],
                 "fetch_info": {{"h1": [{{"url": "{}/xorb", "range": {{"start": 0, "end": 1}}, "url_range": {{"start": 0, "end": 4}}}}]}}}}"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path(format!("/v1/reconstructions/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(plan))
            .mount(&server)
            .await;

        let request = DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri())).byte_range((0, 2));
        let bytes = downloader.download(request).await.unwrap();
        assert_eq!(bytes, b"DE");
    }

    /// An empty requested byte range short-circuits before any network
    /// call, including the token refresh.
    #[tokio::test]
    async fn empty_byte_range_makes_no_network_calls() {
        let server = MockServer::start().await;
        // No mocks mounted at all; any request would 404 and fail the test.
        let config = Config::builder().allow_insecure_http(true).build().unwrap();
        let downloader = Downloader::new(config).unwrap();

        let request =
            DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri())).byte_range((5, 5));
        let bytes = downloader.download(request).await.unwrap();
        assert_eq!(bytes, Vec::<u8>::new());
    }

    /// Two consecutive full downloads of the same plan return byte-equal
    /// output.
    #[tokio::test]
    async fn idempotent_full_file_downloads() {
        let server = MockServer::start().await;
        let downloader = test_downloader(&server).await;

        let xorb_body = scheme0_chunk(b"hello");
        Mock::given(method("GET"))
            .and(path("/xorb"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(xorb_body))
            .mount(&server)
            .await;

        let plan = format!(
            r#"{{"offset_into_first_range": 0,
                 "terms": [{{"hash": "h1", "unpacked_length": 5, "range": {{"start": 0, "end": 1}}}}],
                 "fetch_info": {{"h1": [{{"url": "{}/xorb", "range": {{"start": 0, "end": 1}}, "url_range": {{"start": 0, "end": 4}}}}]}}}}"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path(format!("/v1/reconstructions/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(plan))
            .mount(&server)
            .await;

        let first = downloader
            .download(DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri())))
            .await
            .unwrap();
        let second = downloader
            .download(DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri())))
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"hello");
    }

    /// A plan with a term whose range no fetch-info covers is a malformed
    /// reconstruction, surfaced before any fetch is attempted.
    #[tokio::test]
    async fn uncovered_term_range_fails_without_fetching() {
        let server = MockServer::start().await;
        let downloader = test_downloader(&server).await;

        let plan = r#"{"offset_into_first_range": 0,
                 "terms": [{"hash": "h1", "unpacked_length": 5, "range": {"start": 0, "end": 1}}],
                 "fetch_info": {}}"#;
        Mock::given(method("GET"))
            .and(path(format!("/v1/reconstructions/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(plan))
            .mount(&server)
            .await;

        let request = DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri()));
        let err = downloader.download(request).await.unwrap_err();
        assert!(matches!(err, DownloadError::Reconstruction(_)));
    }

    /// An already-cancelled token fails the download before any term is
    /// spliced, rather than partially writing output.
    #[tokio::test]
    async fn cancellation_token_tripped_before_start_aborts_immediately() {
        let server = MockServer::start().await;
        let downloader = test_downloader(&server).await;

        let xorb_body = scheme0_chunk(b"hello");
        Mock::given(method("GET"))
            .and(path("/xorb"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(xorb_body))
            .mount(&server)
            .await;

        let plan = format!(
            r#"{{"offset_into_first_range": 0,
                 "terms": [{{"hash": "h1", "unpacked_length": 5, "range": {{"start": 0, "end": 1}}}}],
                 "fetch_info": {{"h1": [{{"url": "{}/xorb", "range": {{"start": 0, "end": 1}}, "url_range": {{"start": 0, "end": 4}}}}]}}}}"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path(format!("/v1/reconstructions/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(plan))
            .mount(&server)
            .await;

        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let request = DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri())).cancellation(cancellation);
        let err = downloader.download(request).await.unwrap_err();
        assert!(matches!(err, DownloadError::Cancelled));
    }

    /// A non-HTTPS CAS URL is rejected unless insecure mode is enabled —
    /// here it's left at its default (disabled) even though the token
    /// endpoint itself is plain HTTP, so the reconstruction fetch must
    /// never fire.
    #[tokio::test]
    async fn insecure_cas_url_is_rejected_by_default() {
        let server = MockServer::start().await;
        mount_token(&server, &server.uri()).await;
        let config = Config::builder().pool_size(1).build().unwrap();
        let downloader = Downloader::new(config).unwrap();

        let request = DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri()));
        let err = downloader.download(request).await.unwrap_err();
        assert!(matches!(err, DownloadError::InsecureUrlRejected(_)));
    }

    /// Downloading to a file writes the same bytes a memory download
    /// would, at the correct positional offsets.
    #[tokio::test]
    async fn download_to_file_writes_the_same_bytes_as_memory() {
        let server = MockServer::start().await;
        let downloader = test_downloader(&server).await;

        let mut xorb_body = scheme0_chunk(b"AAAAA");
        xorb_body.extend_from_slice(&scheme0_chunk(b"BBBBB"));
        Mock::given(method("GET"))
            .and(path("/xorb"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(xorb_body))
            .mount(&server)
            .await;

        let plan = format!(
            r#"{{"offset_into_first_range": 0,
                 "terms": [
                     {{"hash": "h1", "unpacked_length": 5, "range": {{"start": 0, "end": 1}}}},
                     {{"hash": "h1", "unpacked_length": 5, "range": {{"start": 1, "end": 2}}}}
                 ],
                 "fetch_info": {{"h1": [{{"url": "{}/xorb", "range": {{"start": 0, "end": 2}}, "url_range": {{"start": 0, "end": 9}}}}]}}}}"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path(format!("/v1/reconstructions/{FILE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(plan))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out.bin");
        let request = DownloadRequest::new(FILE_ID, &format!("{}/token", server.uri()));
        let written = downloader.download_to_file(request, &destination).await.unwrap();
        assert_eq!(written, 10);
        assert_eq!(std::fs::read(&destination).unwrap(), b"AAAAABBBBB");
    }

    /// An invalid file id is rejected before any network I/O — not even
    /// the token endpoint is mounted.
    #[tokio::test]
    async fn invalid_file_id_is_rejected_before_any_network_call() {
        let config = Config::builder().allow_insecure_http(true).build().unwrap();
        let downloader = Downloader::new(config).unwrap();
        let request = DownloadRequest::new("not-a-valid-id", "http://127.0.0.1:1/token");
        let err = downloader.download(request).await.unwrap_err();
        assert!(matches!(err, DownloadError::InvalidFileId { .. }));
    }
}

