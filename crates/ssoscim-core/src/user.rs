//! SCIM User resource and its sub-attributes.
//!
//! Optional attributes are `Option<String>` so that "omitted from the JSON"
//! and "present but empty" stay distinguishable; `None` is never serialised.

use serde::{Deserialize, Serialize};

use crate::{ENTERPRISE_USER_SCHEMA, USER_SCHEMA, meta::Meta};

// ─── Name ────────────────────────────────────────────────────────────────────

/// The structured `name` attribute. Every part is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub formatted:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub family_name:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub given_name:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub middle_name:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub honorific_prefix: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub honorific_suffix: Option<String>,
}

// ─── Multi-valued entries ────────────────────────────────────────────────────

/// An entry of the `emails` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
  pub value:   String,
  /// Usage label, e.g. `work`.
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind:    Option<String>,
  #[serde(default)]
  pub primary: bool,
}

/// An entry of the `phoneNumbers` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
  pub value: String,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind:  Option<String>,
}

/// An entry of the `addresses` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub formatted:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub street_address: Option<String>,
  /// City or locality.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub locality:       Option<String>,
  /// State, province, or region.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub region:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postal_code:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country:        Option<String>,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind:           Option<String>,
}

// ─── Enterprise extension ────────────────────────────────────────────────────

/// A weak reference to the user's manager. `displayName` is not accepted by
/// the identity store, so only the id and URI are carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
  pub value:      String,
  #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
  pub reference:  Option<String>,
}

/// The enterprise User extension block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseUser {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub employee_number: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cost_center:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub organization:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub division:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub manager:         Option<Manager>,
}

// ─── User ────────────────────────────────────────────────────────────────────

/// A SCIM User.
///
/// `id` is assigned by the remote store and is empty until the create call
/// returns; it is omitted from request bodies while empty.
///
/// The identity store keeps at most one email, phone number and address even
/// though the attributes are multi-valued on the wire; see
/// [`User::email`] and [`User::set_email`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(default)]
  pub schemas:            Vec<String>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub id:                 String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub external_id:        Option<String>,
  pub user_name:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:               Option<Name>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_name:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub nick_name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile_url:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:              Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_type:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub preferred_language: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub locale:             Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timezone:           Option<String>,
  /// Always serialised: an inactive user must send `"active": false`.
  #[serde(default)]
  pub active:             bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub emails:             Vec<Email>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub phone_numbers:      Vec<PhoneNumber>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub addresses:          Vec<Address>,
  #[serde(
    rename = "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub enterprise:         Option<EnterpriseUser>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta:               Option<Meta>,
}

impl User {
  /// A new, not-yet-created user with the core schema set.
  pub fn new(user_name: impl Into<String>) -> Self {
    Self {
      schemas: vec![USER_SCHEMA.to_string()],
      user_name: user_name.into(),
      ..Default::default()
    }
  }

  /// Attach the enterprise extension and declare its schema.
  pub fn with_enterprise(mut self, enterprise: EnterpriseUser) -> Self {
    if !self.schemas.iter().any(|s| s == ENTERPRISE_USER_SCHEMA) {
      self.schemas.push(ENTERPRISE_USER_SCHEMA.to_string());
    }
    self.enterprise = Some(enterprise);
    self
  }

  /// The single effective email entry, if any.
  pub fn email(&self) -> Option<&Email> { self.emails.first() }

  /// Replace the email entries with at most one value.
  pub fn set_email(&mut self, email: Option<Email>) {
    self.emails = email.into_iter().collect();
  }

  pub fn phone_number(&self) -> Option<&PhoneNumber> { self.phone_numbers.first() }

  pub fn address(&self) -> Option<&Address> { self.addresses.first() }

  /// Given name, or `""` when the name block or part is absent.
  pub fn given_name(&self) -> &str {
    self
      .name
      .as_ref()
      .and_then(|n| n.given_name.as_deref())
      .unwrap_or_default()
  }

  /// Family name, or `""` when the name block or part is absent.
  pub fn family_name(&self) -> &str {
    self
      .name
      .as_ref()
      .and_then(|n| n.family_name.as_deref())
      .unwrap_or_default()
  }
}
