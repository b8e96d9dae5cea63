//! The `aws-sso-scim_group_member` resource: one user's membership in one
//! group, identified by the composite id `GROUP_ID,USER_ID`.

use serde::{Deserialize, Serialize};
use ssoscim_core::Directory;
use tracing::{info, warn};

use crate::error::{Error, Result, Summarize, missing};

pub const TYPE_NAME: &str = "aws-sso-scim_group_member";

const CREATE: &str = "Unable to add member to Group";
const READ: &str = "Unable to read Group member";
const DELETE: &str = "Unable to remove member from Group";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberArgs {
  pub group_id: String,
  pub user_id:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberState {
  pub id:       String,
  pub group_id: String,
  pub user_id:  String,
}

impl MemberState {
  fn new(group_id: &str, user_id: &str) -> Self {
    Self {
      id:       composite_id(group_id, user_id),
      group_id: group_id.to_owned(),
      user_id:  user_id.to_owned(),
    }
  }
}

pub fn composite_id(group_id: &str, user_id: &str) -> String {
  format!("{group_id},{user_id}")
}

/// Split `GROUP_ID,USER_ID`. Both halves must be non-empty and there must
/// be exactly one comma.
pub fn parse_import_id(id: &str) -> Result<(&str, &str)> {
  match id.split_once(',') {
    Some((g, u)) if !g.is_empty() && !u.is_empty() && !u.contains(',') => Ok((g, u)),
    _ => Err(Error::ImportId(id.to_owned())),
  }
}

pub async fn create<D: Directory>(dir: &D, args: &MemberArgs) -> Result<MemberState> {
  dir
    .add_group_member(&args.group_id, &args.user_id)
    .await
    .summarize(CREATE)?;
  info!(group_id = %args.group_id, user_id = %args.user_id, "added group member");
  read(dir, &args.group_id, &args.user_id)
    .await?
    .ok_or_else(|| missing(READ))
}

/// The membership, or `None` when the user is no longer in the group or
/// the group itself is gone.
pub async fn read<D: Directory>(
  dir: &D,
  group_id: &str,
  user_id: &str,
) -> Result<Option<MemberState>> {
  match dir.test_group_member(group_id, user_id).await {
    Ok(true) => Ok(Some(MemberState::new(group_id, user_id))),
    Ok(false) => {
      info!(%group_id, %user_id, "membership no longer exists, removing from state");
      Ok(None)
    }
    Err(e) if e.is_not_found() => Ok(None),
    Err(e) => Err(e).summarize(READ),
  }
}

pub async fn delete<D: Directory>(dir: &D, group_id: &str, user_id: &str) -> Result<()> {
  dir
    .remove_group_member(group_id, user_id)
    .await
    .summarize(DELETE)?;

  // The store may accept the removal before filters reflect it.
  if read(dir, group_id, user_id).await?.is_some() {
    warn!(%group_id, %user_id, "user is still a member after removal");
  } else {
    info!(%group_id, %user_id, "removed group member");
  }
  Ok(())
}

/// Adopt an existing membership from its composite id.
pub async fn import<D: Directory>(dir: &D, id: &str) -> Result<MemberState> {
  let (group_id, user_id) = parse_import_id(id)?;
  read(dir, group_id, user_id)
    .await?
    .ok_or_else(|| missing(READ))
}
