//! The `aws-sso-scim_group` resource.
//!
//! Both attributes are immutable once the group exists; a change means the
//! host replaces the group, so there is no update.

use serde::{Deserialize, Serialize};
use ssoscim_core::{Directory, group::Group};
use tracing::info;

use crate::error::{Result, Summarize, missing};

pub const TYPE_NAME: &str = "aws-sso-scim_group";

const CREATE: &str = "Unable to create Group";
const READ: &str = "Unable to read Group";
const DELETE: &str = "Unable to delete Group";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupArgs {
  pub display_name: String,
  #[serde(default)]
  pub external_id:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
  pub id:           String,
  pub display_name: String,
  pub external_id:  Option<String>,
}

impl From<&Group> for GroupState {
  fn from(group: &Group) -> Self {
    Self {
      id:           group.id.clone(),
      display_name: group.display_name.clone(),
      external_id:  group.external_id.clone(),
    }
  }
}

pub async fn create<D: Directory>(dir: &D, args: &GroupArgs) -> Result<GroupState> {
  let created = dir
    .create_group(&args.display_name, args.external_id.as_deref())
    .await
    .summarize(CREATE)?;
  info!(id = %created.id, display_name = %created.display_name, "created group");
  read(dir, &created.id).await?.ok_or_else(|| missing(READ))
}

/// Current state of group `id`, or `None` when it no longer exists.
pub async fn read<D: Directory>(dir: &D, id: &str) -> Result<Option<GroupState>> {
  match dir.read_group(id).await {
    Ok(group) => Ok(Some(GroupState::from(&group))),
    Err(e) if e.is_not_found() => {
      info!(%id, "group no longer exists, removing from state");
      Ok(None)
    }
    Err(e) => Err(e).summarize(READ),
  }
}

pub async fn delete<D: Directory>(dir: &D, id: &str) -> Result<()> {
  match dir.delete_group(id).await {
    Ok(()) => {
      info!(%id, "deleted group");
      Ok(())
    }
    Err(e) if e.is_not_found() => Ok(()),
    Err(e) => Err(e).summarize(DELETE),
  }
}

pub async fn import<D: Directory>(dir: &D, id: &str) -> Result<GroupState> {
  read(dir, id).await?.ok_or_else(|| missing(READ))
}
