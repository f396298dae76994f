//! The output abstraction: the only place the in-memory/file distinction
//! branches, per spec §4.7. Both variants support a positional write at an
//! arbitrary absolute offset; the memory variant additionally supports a
//! sequential append fallback since it has no "holes" concept worth
//! modelling.

use std::io;
use std::path::Path;
use std::sync::Arc;

/// Where a download's reassembled bytes are written.
pub(crate) enum Sink {
    /// Accumulates into an in-memory buffer, growing it as needed.
    Memory(Vec<u8>),
    /// Positional writes into a file opened (and truncated) up front.
    File(Arc<std::fs::File>),
}

impl Sink {
    /// Opens `path` for writing, creating it if absent and truncating it
    /// if present, per spec §6 "Persistent state layout".
    pub(crate) fn open_file(path: &Path) -> io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::File(Arc::new(file)))
    }

    /// An empty in-memory accumulator.
    pub(crate) fn memory() -> Self {
        Self::Memory(Vec::new())
    }

    /// Writes `data` at absolute byte offset `offset`. For the memory
    /// sink this resizes the buffer (zero-filling any gap) rather than
    /// truly seeking, since plan-ordered writes never actually leave a
    /// gap in practice; for the file sink this is a real positional
    /// write, performed off the async runtime's worker threads.
    pub(crate) async fn write_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        match self {
            Self::Memory(buf) => {
                let start = offset as usize;
                let end = start + data.len();
                if buf.len() < end {
                    buf.resize(end, 0);
                }
                buf[start..end].copy_from_slice(data);
                Ok(())
            }
            Self::File(file) => {
                let file = Arc::clone(file);
                let data = data.to_vec();
                tokio::task::spawn_blocking(move || positional_write(&file, offset, &data))
                    .await
                    .map_err(|join_err| io::Error::other(join_err.to_string()))?
            }
        }
    }

    /// Consumes the sink, returning the accumulated bytes for a
    /// memory-target download. Panics if called on a file sink — an
    /// internal misuse, never reachable through the public API.
    pub(crate) fn into_memory(self) -> Vec<u8> {
        match self {
            Self::Memory(buf) => buf,
            Self::File(_) => unreachable!("into_memory called on a file sink"),
        }
    }
}

#[cfg(unix)]
fn positional_write(file: &std::fs::File, offset: u64, data: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.write_all_at(data, offset)
}

#[cfg(windows)]
fn positional_write(file: &std::fs::File, offset: u64, data: &[u8]) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    let mut pos = offset;
    let mut remaining = data;
    while !remaining.is_empty() {
        let written = file.seek_write(remaining, pos)?;
        if written == 0 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "seek_write wrote 0 bytes"));
        }
        pos += written as u64;
        remaining = &remaining[written..];
    }
    Ok(())
}
