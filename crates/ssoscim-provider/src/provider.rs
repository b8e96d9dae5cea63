//! [`Provider`]: a configured directory plus its presentation settings.

use ssoscim_client::ScimClient;
use ssoscim_core::Directory;
use tracing::info;

use crate::{
  config::{DescriptionKind, ProviderConfig},
  error::{Error, Result},
  schema::{ProviderSchema, provider_schema},
};

/// The value handed to every resource and data-source callback.
#[derive(Debug, Clone)]
pub struct Provider<D> {
  directory:        D,
  description_kind: DescriptionKind,
}

impl Provider<ScimClient> {
  /// Build the provider from host-supplied configuration.
  pub fn configure(config: &ProviderConfig, version: &str) -> Result<Self> {
    let client_config = config.client_config(version)?;
    let client = ScimClient::new(client_config)
      .map_err(|e| Error::Config(e.to_string()))?;
    info!(endpoint = %client.endpoint().base(), "configured SCIM provider");
    Ok(Self::new(client, config.description_kind))
  }
}

impl<D: Directory> Provider<D> {
  pub fn new(directory: D, description_kind: DescriptionKind) -> Self {
    Self {
      directory,
      description_kind,
    }
  }

  pub fn directory(&self) -> &D { &self.directory }

  pub fn description_kind(&self) -> DescriptionKind { self.description_kind }

  /// Resource and data-source schemas rendered for this provider.
  pub fn schema(&self) -> ProviderSchema { provider_schema(self.description_kind) }
}
