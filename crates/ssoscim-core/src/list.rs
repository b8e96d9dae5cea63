//! The list-response envelope returned by collection queries.
//!
//! Envelopes are transient: they are interpreted and dropped, never stored.

use serde::{Deserialize, Serialize};

use crate::{group::Group, user::User};

/// A single page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
  #[serde(default)]
  pub schemas:        Vec<String>,
  pub total_results:  u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_index:    Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items_per_page: Option<u64>,
  #[serde(rename = "Resources", default = "Vec::new")]
  pub resources:      Vec<T>,
}

pub type UserListResponse = ListResponse<User>;
pub type GroupListResponse = ListResponse<Group>;

impl<T> ListResponse<T> {
  /// The sole resource, when both `totalResults` and the returned sequence
  /// report exactly one match. Anything else (none, several, or a count
  /// that disagrees with the payload) yields `None`.
  pub fn into_single(self) -> Option<T> {
    if self.total_results != 1 || self.resources.len() != 1 {
      return None;
    }
    self.resources.into_iter().next()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn envelope(total: u64, ids: &[&str]) -> GroupListResponse {
    let resources: Vec<_> = ids
      .iter()
      .map(|id| json!({ "id": id, "displayName": "Ops" }))
      .collect();
    serde_json::from_value(json!({
      "schemas": [crate::LIST_RESPONSE_SCHEMA],
      "totalResults": total,
      "Resources": resources,
    }))
    .unwrap()
  }

  #[test]
  fn single_requires_both_counts_to_be_one() {
    assert_eq!(envelope(1, &["g1"]).into_single().unwrap().id, "g1");
    assert!(envelope(0, &[]).into_single().is_none());
    assert!(envelope(2, &["g1", "g2"]).into_single().is_none());
    assert!(envelope(1, &["g1", "g2"]).into_single().is_none());
    assert!(envelope(2, &["g1"]).into_single().is_none());
    assert!(envelope(1, &[]).into_single().is_none());
  }

  #[test]
  fn missing_resources_key_decodes_as_empty() {
    let lr: UserListResponse =
      serde_json::from_value(json!({ "totalResults": 0, "itemsPerPage": 50 }))
        .unwrap();
    assert!(lr.resources.is_empty());
    assert_eq!(lr.items_per_page, Some(50));
  }
}
