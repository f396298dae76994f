//! Tunables for a [`crate::Downloader`], in the teacher workspace's
//! builder-pattern style (`crates/core/src/client/config/builder`):
//! every field has a documented default, a builder setter, and validation
//! happens once at `build()` rather than scattered across call sites.

use std::time::Duration;

use thiserror::Error;

/// Default fetch concurrency used when [`ConfigBuilder::max_concurrent_fetches`]
/// is left unset and it can't be derived from `pool_size * connections_per_host`.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 128;
/// Default number of in-flight decoded-but-unconsumed network buffers
/// allowed per xorb fetch.
pub const DEFAULT_DECODE_BUFFER_PERMITS: usize = 16;
/// The decode-buffer semaphore may never be configured below this; a
/// value of 1 would serialize network reads against decode with no
/// overlap at all, below the two-stage pipelining the spec requires.
pub const MIN_DECODE_BUFFER_PERMITS: usize = 2;
/// Default number of pooled `reqwest::Client`s the round-robin pool holds.
pub const DEFAULT_POOL_SIZE: usize = 4;
/// Default per-host connection limit applied to each pooled client.
pub const DEFAULT_CONNECTIONS_PER_HOST: usize = 32;
/// Default connect timeout applied to every HTTP request the pipeline issues.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default read timeout applied to every HTTP request the pipeline issues.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(120);
/// Default safety window before a cached token's `exp` during which it is
/// treated as stale (see `xet_token::DEFAULT_SAFETY_WINDOW`, duplicated
/// here as the `Config`-level default so callers have one place to look).
pub const DEFAULT_TOKEN_SAFETY_WINDOW: Duration = Duration::from_secs(60);

/// Runtime configuration for a [`crate::Downloader`]. Construct with
/// [`ConfigBuilder`] (`Config::builder()`), never directly — the fields
/// are private so `build()`'s validation can't be bypassed.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) max_concurrent_fetches: usize,
    pub(crate) decode_buffer_permits: usize,
    pub(crate) pool_size: usize,
    pub(crate) connections_per_host: usize,
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
    pub(crate) token_safety_window: Duration,
    pub(crate) allow_insecure_http: bool,
}

impl Config {
    /// Starts a [`ConfigBuilder`] with every field at its documented
    /// default.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Convenience for the common case of every default applying.
    ///
    /// # Errors
    ///
    /// Never fails; defaults always pass validation. Present for symmetry
    /// with [`ConfigBuilder::build`], whose `Result` this delegates to.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Config::builder().build()
    }

    /// Max concurrent xorb fetches (the fetch semaphore's permit count).
    #[must_use]
    pub const fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    /// Decoded-but-unconsumed network buffer slots per xorb fetch.
    #[must_use]
    pub const fn decode_buffer_permits(&self) -> usize {
        self.decode_buffer_permits
    }

    /// Number of pooled HTTP clients.
    #[must_use]
    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Per-host connection limit applied to each pooled client.
    #[must_use]
    pub const fn connections_per_host(&self) -> usize {
        self.connections_per_host
    }

    /// Connect timeout applied to every HTTP request.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Read timeout applied to every HTTP request.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Safety window before token expiry during which it is treated as stale.
    #[must_use]
    pub const fn token_safety_window(&self) -> Duration {
        self.token_safety_window
    }

    /// Whether non-HTTPS CAS and fetch URLs are accepted.
    #[must_use]
    pub const fn allow_insecure_http(&self) -> bool {
        self.allow_insecure_http
    }
}

/// Builder for [`Config`]. Every setter takes `self` by value so calls
/// chain; unset fields fall back to the `DEFAULT_*` constants at `build()`.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    max_concurrent_fetches: Option<usize>,
    decode_buffer_permits: usize,
    pool_size: usize,
    connections_per_host: usize,
    connect_timeout: Duration,
    read_timeout: Duration,
    token_safety_window: Duration,
    allow_insecure_http: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: None,
            decode_buffer_permits: DEFAULT_DECODE_BUFFER_PERMITS,
            pool_size: DEFAULT_POOL_SIZE,
            connections_per_host: DEFAULT_CONNECTIONS_PER_HOST,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            token_safety_window: DEFAULT_TOKEN_SAFETY_WINDOW,
            allow_insecure_http: false,
        }
    }
}

impl ConfigBuilder {
    /// Caps concurrent xorb fetches. Leave unset to auto-scale from
    /// `pool_size * connections_per_host`.
    #[must_use]
    pub const fn max_concurrent_fetches(mut self, value: usize) -> Self {
        self.max_concurrent_fetches = Some(value);
        self
    }

    /// Sets the decoded-buffer back-pressure permit count (minimum
    /// [`MIN_DECODE_BUFFER_PERMITS`], enforced at `build()`).
    #[must_use]
    pub const fn decode_buffer_permits(mut self, value: usize) -> Self {
        self.decode_buffer_permits = value;
        self
    }

    /// Sets the number of pooled HTTP clients.
    #[must_use]
    pub const fn pool_size(mut self, value: usize) -> Self {
        self.pool_size = value;
        self
    }

    /// Sets the per-host connection limit applied to each pooled client.
    #[must_use]
    pub const fn connections_per_host(mut self, value: usize) -> Self {
        self.connections_per_host = value;
        self
    }

    /// Sets the connect timeout applied to every HTTP request.
    #[must_use]
    pub const fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    /// Sets the read timeout applied to every HTTP request.
    #[must_use]
    pub const fn read_timeout(mut self, value: Duration) -> Self {
        self.read_timeout = value;
        self
    }

    /// Sets the token safety window.
    #[must_use]
    pub const fn token_safety_window(mut self, value: Duration) -> Self {
        self.token_safety_window = value;
        self
    }

    /// Allows non-HTTPS CAS and fetch URLs. Only meant for tests against a
    /// local mock server; production callers should never set this.
    #[must_use]
    pub const fn allow_insecure_http(mut self, value: bool) -> Self {
        self.allow_insecure_http = value;
        self
    }

    /// Validates and freezes the builder into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DecodeBufferPermitsTooLow`] if
    /// `decode_buffer_permits` is below [`MIN_DECODE_BUFFER_PERMITS`], or
    /// [`ConfigError::ZeroPoolSize`] / [`ConfigError::ZeroConnectionsPerHost`]
    /// if either is zero.
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.decode_buffer_permits < MIN_DECODE_BUFFER_PERMITS {
            return Err(ConfigError::DecodeBufferPermitsTooLow(self.decode_buffer_permits));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        if self.connections_per_host == 0 {
            return Err(ConfigError::ZeroConnectionsPerHost);
        }

        let max_concurrent_fetches = self.max_concurrent_fetches.unwrap_or_else(|| {
            (self.pool_size * self.connections_per_host).max(DEFAULT_MAX_CONCURRENT_FETCHES)
        });

        Ok(Config {
            max_concurrent_fetches,
            decode_buffer_permits: self.decode_buffer_permits,
            pool_size: self.pool_size,
            connections_per_host: self.connections_per_host,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
            token_safety_window: self.token_safety_window,
            allow_insecure_http: self.allow_insecure_http,
        })
    }
}

/// Errors from validating a [`ConfigBuilder`] at `build()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `decode_buffer_permits` was set below [`MIN_DECODE_BUFFER_PERMITS`].
    #[error("decode_buffer_permits must be at least {MIN_DECODE_BUFFER_PERMITS}, got {0}")]
    DecodeBufferPermitsTooLow(usize),

    /// `pool_size` was set to zero.
    #[error("pool_size must be at least 1")]
    ZeroPoolSize,

    /// `connections_per_host` was set to zero.
    #[error("connections_per_host must be at least 1")]
    ZeroConnectionsPerHost,
}
