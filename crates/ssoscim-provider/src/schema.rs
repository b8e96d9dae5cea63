//! Documented resource and data-source schemas.
//!
//! Descriptions are written in Markdown and rendered per
//! [`DescriptionKind`] when the schema is handed to the host.

use serde::Serialize;

use crate::config::DescriptionKind;
use AttributeMode::{Computed, Optional, Required};

/// How the host treats an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
  Required,
  Optional,
  Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
  pub name:        &'static str,
  pub description: String,
  pub mode:        AttributeMode,
  /// Changing the attribute replaces the remote resource.
  pub force_new:   bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
  pub type_name:   &'static str,
  pub description: String,
  pub importable:  bool,
  pub attributes:  Vec<AttributeSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
  pub resources:    Vec<ResourceSchema>,
  pub data_sources: Vec<ResourceSchema>,
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Name, Markdown description, mode, replace-on-change.
type Attr = (&'static str, &'static str, AttributeMode, bool);

const USER_RESOURCE: &[Attr] = &[
  ("id", "", Computed, false),
  ("given_name", "Given name for the user.", Required, false),
  ("family_name", "Family name for the user.", Required, false),
  ("display_name", "Display name for the user.", Required, false),
  ("user_name", "Username for the user.", Required, false),
  ("email_address", "Primary email address.", Optional, false),
  ("email_type", "Usage type of the email address, e.g. `work`.", Optional, false),
  ("active", "Set user to be active. Defaults to `false`.", Optional, false),
];

const GROUP_RESOURCE: &[Attr] = &[
  ("id", "", Computed, false),
  (
    "display_name",
    "Display name for the group. This cannot be changed after creation.",
    Required,
    true,
  ),
  (
    "external_id",
    "Identifier of the group in the source system. This cannot be changed after creation.",
    Optional,
    true,
  ),
];

const GROUP_MEMBER_RESOURCE: &[Attr] = &[
  ("id", "Composite `GROUP_ID,USER_ID` identifier.", Computed, false),
  ("group_id", "Group identifier.", Required, true),
  ("user_id", "User identifier.", Required, true),
];

const USER_DATA_SOURCE: &[Attr] = &[
  ("id", "", Computed, false),
  ("user_name", "Reference by `userName` attribute.", Required, false),
  ("display_name", "", Computed, false),
  ("given_name", "Given name for the user.", Computed, false),
  ("family_name", "Family name for the user.", Computed, false),
  ("email_address", "Primary email address.", Computed, false),
  ("email_type", "Usage type of the email address, e.g. `work`.", Computed, false),
  ("active", "Whether the user is active.", Computed, false),
];

const GROUP_DATA_SOURCE: &[Attr] = &[
  ("id", "", Computed, false),
  ("display_name", "Reference by `displayName` attribute.", Required, false),
  ("external_id", "", Computed, false),
];

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Render a Markdown description for `kind`. Plain output drops code-span
/// backticks; nothing else in the descriptions uses Markdown.
pub fn render(description: &str, kind: DescriptionKind) -> String {
  match kind {
    DescriptionKind::Markdown => description.to_owned(),
    DescriptionKind::Plain => description.replace('`', ""),
  }
}

fn resource(
  type_name: &'static str,
  description: &str,
  importable: bool,
  attrs: &[Attr],
  kind: DescriptionKind,
) -> ResourceSchema {
  ResourceSchema {
    type_name,
    description: render(description, kind),
    importable,
    attributes: attrs
      .iter()
      .map(|&(name, description, mode, force_new)| AttributeSchema {
        name,
        description: render(description, kind),
        mode,
        force_new,
      })
      .collect(),
  }
}

/// The full provider schema, rendered for `kind`.
pub fn provider_schema(kind: DescriptionKind) -> ProviderSchema {
  ProviderSchema {
    resources:    vec![
      resource(crate::user::TYPE_NAME, "Creates a new user.", true, USER_RESOURCE, kind),
      resource(crate::group::TYPE_NAME, "Creates a new group.", true, GROUP_RESOURCE, kind),
      resource(
        crate::group_member::TYPE_NAME,
        "Assigns a user to be member of a group.",
        true,
        GROUP_MEMBER_RESOURCE,
        kind,
      ),
    ],
    data_sources: vec![
      resource(
        crate::user::TYPE_NAME,
        "Allows you to reference an existing user by user name and get the internal ID.",
        false,
        USER_DATA_SOURCE,
        kind,
      ),
      resource(
        crate::group::TYPE_NAME,
        "Allows you to reference an existing group by display name and get the internal ID.",
        false,
        GROUP_DATA_SOURCE,
        kind,
      ),
    ],
  }
}
