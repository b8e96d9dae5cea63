//! PATCH request bodies.
//!
//! The value slot is a closed variant covering what is actually sent: a
//! scalar replace, or a `[{"value": <id>}]` list for membership changes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::PATCH_OP_SCHEMA;

/// The `op` of a single PATCH operation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PatchOpKind {
  Add,
  Remove,
  Replace,
}

/// One `{"value": ..}` entry of a multi-valued collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRef {
  pub value: String,
}

/// The `value` of a PATCH operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchValue {
  Bool(bool),
  String(String),
  Refs(Vec<ValueRef>),
}

impl From<bool> for PatchValue {
  fn from(v: bool) -> Self { Self::Bool(v) }
}

impl From<String> for PatchValue {
  fn from(v: String) -> Self { Self::String(v) }
}

impl From<&str> for PatchValue {
  fn from(v: &str) -> Self { Self::String(v.to_owned()) }
}

/// A single add/remove/replace instruction.
///
/// `path` is a dotted attribute name (`name.givenName`) or the bare name of a
/// multi-valued collection (`members`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
  pub op:    PatchOpKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub path:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<PatchValue>,
}

impl Operation {
  pub fn replace(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
    Self {
      op:    PatchOpKind::Replace,
      path:  Some(path.into()),
      value: Some(value.into()),
    }
  }

  pub fn add_member(member_id: impl Into<String>) -> Self {
    Self::members(PatchOpKind::Add, member_id.into())
  }

  pub fn remove_member(member_id: impl Into<String>) -> Self {
    Self::members(PatchOpKind::Remove, member_id.into())
  }

  fn members(op: PatchOpKind, member_id: String) -> Self {
    Self {
      op,
      path: Some("members".to_string()),
      value: Some(PatchValue::Refs(vec![ValueRef { value: member_id }])),
    }
  }
}

/// The PATCH message envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
  pub schemas:    Vec<String>,
  #[serde(rename = "Operations")]
  pub operations: Vec<Operation>,
}

impl PatchRequest {
  pub fn new(operations: Vec<Operation>) -> Self {
    Self {
      schemas: vec![PATCH_OP_SCHEMA.to_string()],
      operations,
    }
  }
}

impl From<Operation> for PatchRequest {
  fn from(op: Operation) -> Self { Self::new(vec![op]) }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use serde_json::json;

  use super::*;

  #[test]
  fn member_add_payload_shape() {
    let body = PatchRequest::from(Operation::add_member("u1"));
    assert_eq!(
      serde_json::to_value(&body).unwrap(),
      json!({
        "schemas": [PATCH_OP_SCHEMA],
        "Operations": [
          { "op": "add", "path": "members", "value": [{ "value": "u1" }] }
        ]
      })
    );
  }

  #[test]
  fn scalar_replace_payload_shape() {
    let body = PatchRequest::new(vec![
      Operation::replace("active", false),
      Operation::replace("name.givenName", "Alice"),
    ]);
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["Operations"][0]["value"], json!(false));
    assert_eq!(value["Operations"][1]["path"], json!("name.givenName"));
    assert_eq!(value["Operations"][1]["value"], json!("Alice"));
  }

  #[test]
  fn op_kind_text_matches_wire_form() {
    assert_eq!(PatchOpKind::Remove.to_string(), "remove");
    assert_eq!(PatchOpKind::from_str("replace").unwrap(), PatchOpKind::Replace);
    assert!(PatchOpKind::from_str("move").is_err());
  }
}
