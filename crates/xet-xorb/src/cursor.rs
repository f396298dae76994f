//! Streaming chunk decoder: a growable byte cursor fed by an async byte
//! source, emitting one decompressed chunk as soon as it has buffered a
//! complete header and payload.

use bytes::{Buf, Bytes, BytesMut};
use futures::{Stream, StreamExt};

use crate::decode::decode_payload;
use crate::error::XorbError;
use crate::header::{ChunkHeader, HEADER_LEN};

/// Past this many consumed-but-unreclaimed bytes, and once they are more
/// than half the buffer, the cursor compacts by dropping the consumed
/// prefix.
const COMPACT_THRESHOLD: usize = 4096;

/// Buffers bytes from an async source and slices out complete chunks.
///
/// Generic over any `Stream` of `Result<Bytes, E>` where `E` can be turned
/// into a human-readable message — the cursor only needs to know a source
/// read failed, not its concrete error type, so HTTP, file, and in-memory
/// sources all plug in without an adapter.
pub struct ByteCursor<S> {
    source: S,
    buf: BytesMut,
    consumed: usize,
    source_done: bool,
}

impl<S, E> ByteCursor<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    /// Wraps a byte source with an empty cursor buffer.
    pub fn new(source: S) -> Self {
        Self {
            source,
            buf: BytesMut::new(),
            consumed: 0,
            source_done: false,
        }
    }

    /// Pulls and decodes the next chunk, buffering more input from the
    /// source as needed. Returns `Ok(None)` at a clean end of stream.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, XorbError> {
        loop {
            if let Some(chunk) = self.try_take_buffered_chunk()? {
                return Ok(Some(chunk));
            }

            if self.source_done {
                let residual = self.buf.len() - self.consumed;
                return if residual == 0 {
                    Ok(None)
                } else {
                    Err(XorbError::TruncatedStream(residual))
                };
            }

            match self.source.next().await {
                Some(Ok(bytes)) => self.buf.extend_from_slice(&bytes),
                Some(Err(err)) => return Err(XorbError::from_source_error(err)),
                None => self.source_done = true,
            }
        }
    }

    fn try_take_buffered_chunk(&mut self) -> Result<Option<Bytes>, XorbError> {
        let available = self.buf.len() - self.consumed;
        if available < HEADER_LEN {
            return Ok(None);
        }

        let header_start = self.consumed;
        let header = ChunkHeader::parse(&self.buf[header_start..header_start + HEADER_LEN])?;
        let payload_len = header.compressed_length as usize;
        let total_len = HEADER_LEN + payload_len;

        if available < total_len {
            return Ok(None);
        }

        let payload_start = header_start + HEADER_LEN;
        let decoded = decode_payload(&header, &self.buf[payload_start..payload_start + payload_len])?;

        self.consumed += total_len;
        self.maybe_compact();
        Ok(Some(decoded))
    }

    fn maybe_compact(&mut self) {
        if self.consumed > COMPACT_THRESHOLD && self.consumed * 2 > self.buf.len() {
            self.buf.advance(self.consumed);
            self.consumed = 0;
        }
    }
}

/// Adapts a [`ByteCursor`] into a lazily-polled `Stream` of decoded chunks,
/// matching the "async iterator over bytes" shape the pipeline otherwise
/// favors for HTTP response bodies.
pub fn decode_chunks<S, E>(source: S) -> impl Stream<Item = Result<Bytes, XorbError>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    futures::stream::unfold(Some(ByteCursor::new(source)), |state| async move {
        let mut cursor = state?;
        match cursor.next_chunk().await {
            Ok(Some(chunk)) => Some((Ok(chunk), Some(cursor))),
            Ok(None) => None,
            Err(err) => Some((Err(err), None)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn source_of(parts: Vec<&'static [u8]>) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
        stream::iter(parts.into_iter().map(|p| Ok(Bytes::from_static(p))))
    }

    fn scheme0_chunk(payload: &[u8]) -> Vec<u8> {
        let len = payload.len() as u32;
        let lb = len.to_le_bytes();
        let mut out = vec![0u8, lb[0], lb[1], lb[2], 0u8, lb[0], lb[1], lb[2]];
        out.extend_from_slice(payload);
        out
    }

    #[tokio::test]
    async fn single_chunk_split_across_reads() {
        let whole = scheme0_chunk(b"hello");
        let (first, second) = whole.split_at(3);
        let source = source_of(vec![
            Box::leak(first.to_vec().into_boxed_slice()),
            Box::leak(second.to_vec().into_boxed_slice()),
        ]);
        let mut cursor = ByteCursor::new(source);
        let chunk = cursor.next_chunk().await.unwrap().unwrap();
        assert_eq!(chunk, Bytes::from_static(b"hello"));
        assert!(cursor.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn two_chunks_in_one_read() {
        let mut whole = scheme0_chunk(b"hello");
        whole.extend_from_slice(&scheme0_chunk(b"world"));
        let leaked: &'static [u8] = Box::leak(whole.into_boxed_slice());
        let mut cursor = ByteCursor::new(source_of(vec![leaked]));
        assert_eq!(
            cursor.next_chunk().await.unwrap().unwrap(),
            Bytes::from_static(b"hello")
        );
        assert_eq!(
            cursor.next_chunk().await.unwrap().unwrap(),
            Bytes::from_static(b"world")
        );
        assert!(cursor.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn truncated_residual_at_eof_is_an_error() {
        let whole = scheme0_chunk(b"hello");
        let partial = &whole[..whole.len() - 1];
        let leaked: &'static [u8] = Box::leak(partial.to_vec().into_boxed_slice());
        let mut cursor = ByteCursor::new(source_of(vec![leaked]));
        let err = cursor.next_chunk().await.unwrap_err();
        assert!(matches!(err, XorbError::TruncatedStream(_)));
    }

    #[tokio::test]
    async fn empty_source_yields_no_chunks() {
        let mut cursor: ByteCursor<_> = ByteCursor::new(source_of(vec![]));
        assert!(cursor.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn compaction_does_not_corrupt_later_chunks() {
        // Enough leading chunks to push `consumed` past the compaction
        // threshold, followed by one more chunk that must still decode
        // correctly after the buffer is compacted out from under it.
        let filler_payload = vec![0x41u8; 4100];
        let mut whole = scheme0_chunk(&filler_payload);
        whole.extend_from_slice(&scheme0_chunk(b"tail"));
        let leaked: &'static [u8] = Box::leak(whole.into_boxed_slice());
        let mut cursor = ByteCursor::new(source_of(vec![leaked]));
        let first = cursor.next_chunk().await.unwrap().unwrap();
        assert_eq!(first.len(), 4100);
        let second = cursor.next_chunk().await.unwrap().unwrap();
        assert_eq!(second, Bytes::from_static(b"tail"));
    }

    #[tokio::test]
    async fn decode_chunks_stream_surfaces_errors_then_stops() {
        let whole = scheme0_chunk(b"hello");
        let partial = &whole[..whole.len() - 1];
        let leaked: &'static [u8] = Box::leak(partial.to_vec().into_boxed_slice());
        let stream = decode_chunks(source_of(vec![leaked]));
        let results: Vec<_> = stream.collect().await;
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
