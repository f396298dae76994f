//! Fetches one xorb byte range over HTTP and decodes it in batch mode,
//! under the two bounded resources spec §5 calls out: a fetch semaphore
//! limiting concurrent HTTP requests, and a decode-buffer semaphore
//! limiting how many received-but-unconsumed network buffers accumulate
//! while a single fetch's body streams in.

use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::sync::Semaphore;

use xet_cas_client::FetchInfo;
use xet_xorb::{decode_batch, BatchDecoded};

use crate::error::DownloadError;

/// Fetches and decodes the xorb byte range named by `fetch_info`,
/// expected to decompress to exactly `total_len` bytes across every term
/// that shares it.
///
/// Acquires a fetch permit before issuing the request and holds it until
/// the response body has been fully consumed, per spec §4.7's "Release
/// the permit after the response is fully consumed" rule.
pub(crate) async fn fetch_xorb(
    client: reqwest::Client,
    fetch_info: FetchInfo,
    total_len: usize,
    fetch_semaphore: Arc<Semaphore>,
    decode_semaphore: Arc<Semaphore>,
) -> Result<BatchDecoded, DownloadError> {
    use tracing::Instrument;

    let span = xet_logging::fetch_span(&fetch_info.url, (fetch_info.url_range.start, fetch_info.url_range.end));
    fetch_xorb_inner(client, fetch_info, total_len, fetch_semaphore, decode_semaphore)
        .instrument(span)
        .await
}

async fn fetch_xorb_inner(
    client: reqwest::Client,
    fetch_info: FetchInfo,
    total_len: usize,
    fetch_semaphore: Arc<Semaphore>,
    decode_semaphore: Arc<Semaphore>,
) -> Result<BatchDecoded, DownloadError> {
    let _fetch_permit = fetch_semaphore
        .acquire_owned()
        .await
        .map_err(|_| DownloadError::Cancelled)?;

    let range_header = format!("bytes={}-{}", fetch_info.url_range.start, fetch_info.url_range.end);
    let response = client
        .get(&fetch_info.url)
        .header(reqwest::header::RANGE, range_header)
        .send()
        .await
        .map_err(|err| classify_transport_error(&fetch_info.url, &err))?;

    let status = response.status();
    if !(status.is_success() || status.as_u16() == 206) {
        let body = response.text().await.unwrap_or_default();
        return Err(DownloadError::FetchFailed {
            url: fetch_info.url.clone(),
            status: Some(status.as_u16()),
            reason: body,
        });
    }

    let byte_stream = response.bytes_stream().map(|item| item.map_err(|err| err.to_string()));
    let gated = gate_by_semaphore(byte_stream, decode_semaphore);
    let decoded = decode_batch(gated, total_len).await?;

    tracing::trace!(bytes = decoded.bytes.len(), chunks = decoded.chunk_byte_indices.len().saturating_sub(1), "xorb fetch decoded");
    Ok(decoded)
}

fn classify_transport_error(url: &str, err: &reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        DownloadError::FetchTimeout { url: url.to_string() }
    } else {
        DownloadError::FetchFailed {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}

/// Wraps `stream` so that each item is only pulled once a decode-buffer
/// permit is available, and the permit is released as soon as that item
/// is in hand (the cursor copies it into its own buffer synchronously, so
/// "consumed" happens immediately on receipt).
fn gate_by_semaphore<S>(stream: S, semaphore: Arc<Semaphore>) -> impl Stream<Item = Result<Bytes, String>> + Unpin
where
    S: Stream<Item = Result<Bytes, String>> + Send + 'static,
{
    let boxed: Pin<Box<dyn Stream<Item = Result<Bytes, String>> + Send>> = Box::pin(stream);
    Box::pin(futures::stream::unfold((boxed, semaphore), |(mut stream, semaphore)| async move {
        let permit = semaphore.acquire_owned().await.ok()?;
        let item = stream.next().await;
        drop(permit);
        item.map(|value| (value, (stream, semaphore)))
    }))
}
