//! SCIM Group resource.

use serde::{Deserialize, Serialize};

use crate::{GROUP_SCHEMA, meta::Meta};

/// A weak reference to a member (user or group) by id. No ownership, no
/// cascading delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  pub value:     String,
  #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,
}

/// A SCIM Group. `externalId` cannot change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub schemas:      Vec<String>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub id:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub external_id:  Option<String>,
  pub display_name: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub members:      Vec<Member>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta:         Option<Meta>,
}

impl Group {
  /// A new, not-yet-created group. An empty `external_id` is treated as
  /// absent.
  pub fn new(display_name: impl Into<String>, external_id: Option<&str>) -> Self {
    Self {
      schemas: vec![GROUP_SCHEMA.to_string()],
      display_name: display_name.into(),
      external_id: external_id
        .filter(|id| !id.is_empty())
        .map(str::to_owned),
      ..Default::default()
    }
  }

  pub fn has_member(&self, id: &str) -> bool {
    self.members.iter().any(|m| m.value == id)
  }
}
