//! Provider configuration.
//!
//! Everything that shapes provider behaviour is passed in explicitly; no
//! process-wide flags are set as a side effect of registration.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use ssoscim_client::{ClientConfig, RateLimit};
use strum::{Display, EnumString};

use crate::error::{Error, Result};

pub const ENDPOINT_ENV: &str = "AWS_SSO_SCIM_ENDPOINT";
pub const TOKEN_ENV: &str = "AWS_SSO_SCIM_TOKEN";

/// How attribute and resource descriptions are rendered for the host's
/// documentation generator and language server.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DescriptionKind {
  #[default]
  Markdown,
  Plain,
}

/// Provider-level settings supplied by the host.
#[derive(Clone, Default, Deserialize)]
pub struct ProviderConfig {
  #[serde(default)]
  pub endpoint:         Option<String>,
  #[serde(default)]
  pub token:            Option<String>,
  #[serde(default)]
  pub description_kind: DescriptionKind,
  #[serde(skip)]
  pub rate_limit:       Option<RateLimit>,
  /// Per-request timeout; the client default applies when unset.
  #[serde(skip)]
  pub timeout:          Option<Duration>,
}

impl fmt::Debug for ProviderConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProviderConfig")
      .field("endpoint", &self.endpoint)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("description_kind", &self.description_kind)
      .field("rate_limit", &self.rate_limit)
      .field("timeout", &self.timeout)
      .finish()
  }
}

impl ProviderConfig {
  /// Fill an unset endpoint or token from `lookup`, keyed by
  /// [`ENDPOINT_ENV`] and [`TOKEN_ENV`].
  pub fn with_defaults_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
    if self.endpoint.as_deref().is_none_or(str::is_empty) {
      self.endpoint = lookup(ENDPOINT_ENV);
    }
    if self.token.as_deref().is_none_or(str::is_empty) {
      self.token = lookup(TOKEN_ENV);
    }
    self
  }

  /// [`Self::with_defaults_from`] the process environment.
  pub fn with_env_defaults(self) -> Self {
    self.with_defaults_from(|key| std::env::var(key).ok())
  }

  /// `User-Agent` sent by a provider of the given version.
  pub fn user_agent(version: &str) -> String {
    format!("ssoscim-provider/{version} (aws-sso-scim)")
  }

  /// The client configuration for this provider. Fails when the endpoint
  /// or token is still missing.
  pub fn client_config(&self, version: &str) -> Result<ClientConfig> {
    let endpoint = self.endpoint.as_deref().unwrap_or_default();
    let token = self.token.as_deref().unwrap_or_default();
    if endpoint.is_empty() || token.is_empty() {
      return Err(Error::Config(format!(
        "token and endpoint are required (set {ENDPOINT_ENV} and {TOKEN_ENV})"
      )));
    }

    let mut cfg = ClientConfig::new(endpoint, token, Self::user_agent(version));
    if let Some(limit) = self.rate_limit {
      cfg.rate_limit = limit;
    }
    if let Some(timeout) = self.timeout {
      cfg.timeout = timeout;
    }
    Ok(cfg)
  }
}
