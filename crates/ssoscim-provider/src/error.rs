//! Error type for `ssoscim-provider`.
//!
//! Directory failures are wrapped with a short summary of what the binding
//! was doing, the way a host presents a diagnostic: summary first, detail
//! from the source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{summary}: {source}")]
  Operation {
    summary: &'static str,
    source:  ssoscim_core::Error,
  },

  #[error("unexpected format of ID ({0:?}), expected GROUP_ID,USER_ID")]
  ImportId(String),

  #[error("configuration error: {0}")]
  Config(String),
}

impl Error {
  /// The directory error behind an operation failure, if any.
  pub fn directory_error(&self) -> Option<&ssoscim_core::Error> {
    match self {
      Self::Operation { source, .. } => Some(source),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.directory_error().is_some_and(ssoscim_core::Error::is_not_found)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Attach a summary to a directory result.
pub(crate) trait Summarize<T> {
  fn summarize(self, summary: &'static str) -> Result<T>;
}

impl<T> Summarize<T> for ssoscim_core::Result<T> {
  fn summarize(self, summary: &'static str) -> Result<T> {
    self.map_err(|source| Error::Operation { summary, source })
  }
}

/// An operation that found nothing where something was required.
pub(crate) fn missing(summary: &'static str) -> Error {
  Error::Operation {
    summary,
    source: ssoscim_core::Error::NotFound,
  }
}
