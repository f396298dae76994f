#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_cas_client` builds and decodes the one HTTP call that drives the
//! rest of a download: `GET {cas_url}/v1/reconstructions/{file_id}`, which
//! returns the ordered list of terms and fetch-infos describing a file.
//!
//! # Design
//!
//! [`CasClient`] wraps a shared `reqwest::Client` and does nothing else —
//! no caching, no retry. [`ReconstructionPlan::fetch_info_for`] implements
//! the "first fetch-info whose chunk range covers this term" rule the
//! scheduler needs; a term with no covering fetch-info makes the whole
//! plan malformed rather than something the scheduler can skip over.

pub mod client;
pub mod error;
pub mod types;

pub use client::CasClient;
pub use error::CasClientError;
pub use types::{ChunkRange, FetchInfo, ReconstructionPlan, Term, UrlRange};
