//! Layered settings: TOML file, then `AWS_SSO_SCIM_*` environment
//! variables, then command-line flags.

use std::{path::Path, time::Duration};

use anyhow::{Context as _, Result};
use config::{Config, Environment, File, Source};
use serde::Deserialize;
use ssoscim_client::RateLimit;
use ssoscim_provider::{DescriptionKind, ProviderConfig};

pub const ENV_PREFIX: &str = "AWS_SSO_SCIM";

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub endpoint:            Option<String>,
  pub token:               Option<String>,
  pub requests_per_second: Option<f64>,
  pub burst:               Option<u32>,
  pub timeout_secs:        Option<u64>,
}

#[derive(Deserialize, Default, Clone)]
pub struct Settings {
  #[serde(default)]
  pub endpoint:            Option<String>,
  #[serde(default)]
  pub token:               Option<String>,
  #[serde(default)]
  pub requests_per_second: Option<f64>,
  #[serde(default)]
  pub burst:               Option<u32>,
  #[serde(default)]
  pub timeout_secs:        Option<u64>,
  #[serde(default)]
  pub description_kind:    DescriptionKind,
}

impl std::fmt::Debug for Settings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Settings")
      .field("endpoint", &self.endpoint)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("requests_per_second", &self.requests_per_second)
      .field("burst", &self.burst)
      .field("timeout_secs", &self.timeout_secs)
      .field("description_kind", &self.description_kind)
      .finish()
  }
}

impl Settings {
  /// Load from `path` (optional) and the process environment.
  pub fn load(path: &Path, flags: &Overrides) -> Result<Self> {
    resolve(
      File::from(path).required(false),
      Environment::with_prefix(ENV_PREFIX).try_parsing(true),
      flags,
    )
    .with_context(|| format!("failed to load settings from {}", path.display()))
  }

  pub fn provider_config(&self) -> ProviderConfig {
    let defaults = RateLimit::default();
    let rate_limit = (self.requests_per_second.is_some() || self.burst.is_some()).then(|| {
      RateLimit {
        per_second: self.requests_per_second.unwrap_or(defaults.per_second),
        burst:      self.burst.unwrap_or(defaults.burst),
      }
    });
    ProviderConfig {
      endpoint: self.endpoint.clone(),
      token: self.token.clone(),
      description_kind: self.description_kind,
      rate_limit,
      timeout: self.timeout_secs.map(Duration::from_secs),
    }
  }
}

fn resolve<F, E>(file: F, env: E, flags: &Overrides) -> Result<Settings>
where
  F: Source + Send + Sync + 'static,
  E: Source + Send + Sync + 'static,
{
  let settings = Config::builder()
    .add_source(file)
    .add_source(env)
    .set_override_option("endpoint", flags.endpoint.clone())?
    .set_override_option("token", flags.token.clone())?
    .set_override_option("requests_per_second", flags.requests_per_second)?
    .set_override_option("burst", flags.burst.map(u64::from))?
    .set_override_option("timeout_secs", flags.timeout_secs)?
    .build()
    .context("failed to read settings")?;

  settings
    .try_deserialize()
    .context("failed to deserialise settings")
}
