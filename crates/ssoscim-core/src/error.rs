//! Error types for `ssoscim-core`.
//!
//! Every failure a directory operation can produce is one variant here, so
//! callers can tell a vanished resource from a throttled request without
//! string matching.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("401 unauthorized")]
  Unauthorized,

  #[error("404 not found")]
  NotFound,

  /// A filtered lookup that did not return exactly one match.
  #[error("{kind} {key:?} not found ({matches} matches)")]
  NoUniqueMatch {
    kind:    &'static str,
    key:     String,
    matches: u64,
  },

  #[error("409 conflict, resource already exists")]
  Conflict,

  #[error("429 throttled (retry after {retry_after_secs:?}s)")]
  Throttled { retry_after_secs: Option<u64> },

  #[error("unexpected HTTP status code: {0}")]
  UnexpectedStatus(u16),

  /// Network failure, timeout, or a cancelled rate-limiter wait.
  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("encoding error: {0}")]
  Encoding(#[from] serde_json::Error),

  #[error("invalid URL: {0}")]
  Url(String),

  #[error("configuration error: {0}")]
  Config(String),
}

impl Error {
  /// True for errors that mean "the resource is not there": a 404 reply or a
  /// lookup without a unique match.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound | Self::NoUniqueMatch { .. })
  }

  /// True when the remote asked the caller to slow down.
  pub fn is_throttled(&self) -> bool { matches!(self, Self::Throttled { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
