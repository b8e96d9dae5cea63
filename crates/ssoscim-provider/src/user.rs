//! The `aws-sso-scim_user` resource.

use serde::{Deserialize, Serialize};
use ssoscim_core::{
  Directory,
  user::{Email, Name, User},
};
use tracing::info;

use crate::error::{Result, Summarize, missing};

pub const TYPE_NAME: &str = "aws-sso-scim_user";

const CREATE: &str = "Unable to create User";
const READ: &str = "Unable to read User";
const UPDATE: &str = "Unable to update User";
const DELETE: &str = "Unable to delete User";

/// Desired state of a user as declared by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserArgs {
  pub user_name:     String,
  pub display_name:  String,
  pub given_name:    String,
  pub family_name:   String,
  #[serde(default)]
  pub email_address: Option<String>,
  #[serde(default)]
  pub email_type:    Option<String>,
  #[serde(default)]
  pub active:        bool,
}

/// Observed state of a user, as recorded by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
  pub id:            String,
  pub user_name:     String,
  pub display_name:  String,
  pub given_name:    String,
  pub family_name:   String,
  pub email_address: Option<String>,
  pub email_type:    Option<String>,
  pub active:        bool,
}

impl From<&User> for UserState {
  fn from(user: &User) -> Self {
    let email = user.email();
    Self {
      id:            user.id.clone(),
      user_name:     user.user_name.clone(),
      display_name:  user.display_name.clone().unwrap_or_default(),
      given_name:    user.given_name().to_owned(),
      family_name:   user.family_name().to_owned(),
      email_address: email.map(|e| e.value.clone()),
      email_type:    email.and_then(|e| e.kind.clone()),
      active:        user.active,
    }
  }
}

impl UserArgs {
  /// Write the declared attributes onto `user`, leaving everything the
  /// host does not manage untouched.
  fn apply(&self, user: &mut User) {
    user.user_name = self.user_name.clone();
    user.display_name = Some(self.display_name.clone());
    let name = user.name.get_or_insert_with(Name::default);
    name.given_name = Some(self.given_name.clone());
    name.family_name = Some(self.family_name.clone());
    user.set_email(
      self
        .email_address
        .as_ref()
        .filter(|v| !v.is_empty())
        .map(|value| Email {
          value:   value.clone(),
          kind:    self.email_type.clone().filter(|t| !t.is_empty()),
          primary: true,
        }),
    );
    user.active = self.active;
  }

  fn to_user(&self) -> User {
    let mut user = User::new(self.user_name.clone());
    self.apply(&mut user);
    user
  }
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

/// Create the user, then read it back so the state reflects the store.
pub async fn create<D: Directory>(dir: &D, args: &UserArgs) -> Result<UserState> {
  let created = dir.create_user(&args.to_user()).await.summarize(CREATE)?;
  info!(id = %created.id, user_name = %created.user_name, "created user");
  read(dir, &created.id).await?.ok_or_else(|| missing(READ))
}

/// Current state of user `id`, or `None` when it no longer exists.
pub async fn read<D: Directory>(dir: &D, id: &str) -> Result<Option<UserState>> {
  match dir.read_user(id).await {
    Ok(user) => Ok(Some(UserState::from(&user))),
    Err(e) if e.is_not_found() => {
      info!(%id, "user no longer exists, removing from state");
      Ok(None)
    }
    Err(e) => Err(e).summarize(READ),
  }
}

/// Replace the managed attributes of user `id` and return the new state.
/// `None` when the user vanished before it could be updated.
pub async fn update<D: Directory>(
  dir: &D,
  id: &str,
  args: &UserArgs,
) -> Result<Option<UserState>> {
  let mut user = match dir.read_user(id).await {
    Ok(user) => user,
    Err(e) if e.is_not_found() => {
      info!(%id, "user no longer exists, removing from state");
      return Ok(None);
    }
    Err(e) => return Err(e).summarize(UPDATE),
  };
  user.meta = None;
  args.apply(&mut user);
  dir.put_user(&user, id).await.summarize(UPDATE)?;
  info!(%id, "updated user");
  read(dir, id).await
}

/// Delete user `id`. A user that is already gone counts as deleted.
pub async fn delete<D: Directory>(dir: &D, id: &str) -> Result<()> {
  match dir.delete_user(id).await {
    Ok(()) => {
      info!(%id, "deleted user");
      Ok(())
    }
    Err(e) if e.is_not_found() => Ok(()),
    Err(e) => Err(e).summarize(DELETE),
  }
}

/// Adopt an existing user by id.
pub async fn import<D: Directory>(dir: &D, id: &str) -> Result<UserState> {
  read(dir, id).await?.ok_or_else(|| missing(READ))
}
