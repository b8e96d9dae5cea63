//! Read-only lookups by natural key.

use ssoscim_core::Directory;

use crate::{
  error::{Result, Summarize},
  group::GroupState,
  user::UserState,
};

/// The one user whose `userName` is `user_name`.
pub async fn user_by_name<D: Directory>(dir: &D, user_name: &str) -> Result<UserState> {
  let user = dir
    .find_user_by_username(user_name)
    .await
    .summarize("Unable to read User")?;
  Ok(UserState::from(&user))
}

/// The one group whose `displayName` is `display_name`.
pub async fn group_by_name<D: Directory>(dir: &D, display_name: &str) -> Result<GroupState> {
  let group = dir
    .find_group_by_display_name(display_name)
    .await
    .summarize("Unable to read Group")?;
  Ok(GroupState::from(&group))
}
