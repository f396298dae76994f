#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_token` caches short-lived CAS access tokens minted by a Hub-side
//! refresh endpoint, keyed by `(refresh_url, hub_token)`. At most one
//! refresh is ever in flight per key: concurrent callers join the same
//! future rather than each issuing their own HTTP request.
//!
//! # Design
//!
//! [`TokenRefresher`] isolates the actual `GET refresh_url` call behind a
//! trait so [`TokenProvider`]'s coalescing logic can be tested with an
//! in-memory double; [`ReqwestTokenRefresher`] is the production
//! implementation. Coalescing itself is built on `futures::future::Shared`
//! rather than a custom broadcast channel: a refresh in flight is stored in
//! the cache as a clonable future, and every waiter (the caller who started
//! it and any who joined it) simply awaits its own clone.

pub mod error;
pub mod provider;
pub mod refresh;

pub use error::TokenError;
pub use provider::{ConnectionInfo, TokenProvider, DEFAULT_SAFETY_WINDOW};
pub use refresh::{RawTokenResponse, ReqwestTokenRefresher, TokenRefresher};
