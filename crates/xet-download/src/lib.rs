#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_download` is the scheduler at the top of the CAS reconstruction
//! pipeline: given a file id and optional byte range, it acquires a CAS
//! access token ([`xet_token`]), fetches a reconstruction plan
//! ([`xet_cas_client`]), and then, for each term in plan order, ensures
//! the owning xorb byte range has been fetched over HTTP and decoded
//! ([`xet_xorb`]), splicing the decompressed bytes into the output at the
//! correct absolute offset.
//!
//! # Design
//!
//! [`Downloader`] owns the long-lived shared resources (an HTTP client
//! pool, a token cache) and exposes `download` / `download_to_file`.
//! Per-call state — the plan, the fetch/decode semaphores, the in-flight
//! and cached xorb futures — lives entirely inside one `execute` call and
//! is dropped with it, matching spec §3's "xorb caches live only for the
//! duration of a single download".
//!
//! Concurrency is two bounded resources in series (spec §5): a fetch
//! semaphore caps concurrent HTTP requests, and a decode-buffer semaphore
//! caps how many received-but-unconsumed network buffers pile up while a
//! single xorb's body streams in. Output is always produced in plan
//! order regardless of which xorb fetch completes first — the scheduler
//! prefetches ahead but always awaits the *current* term's future before
//! writing its slice.

mod config;
mod downloader;
mod error;
mod fetch;
mod http_pool;
mod id;
mod output;
mod plan;

pub use config::{Config, ConfigBuilder, ConfigError, MIN_DECODE_BUFFER_PERMITS};
pub use downloader::{DownloadRequest, Downloader};
pub use error::DownloadError;
pub use id::{validate_file_id, FILE_ID_LEN};
