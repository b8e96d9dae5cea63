//! Server-maintained resource metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `meta` block the remote store attaches to every resource. Never set by
/// the client; cleared before a full-replace so stale versions are not sent
/// back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resource_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created:       Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_modified: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version:       Option<String>,
}
