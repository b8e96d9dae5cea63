//! The `Directory` trait.
//!
//! The trait is implemented by the HTTP client (`ssoscim-client`). The
//! bindings layer (`ssoscim-provider`) depends on this abstraction, not on
//! any concrete transport, so its flows can be tested against in-memory
//! fakes.

use std::future::Future;

use crate::{Result, group::Group, patch::PatchRequest, user::User};

/// Operations against a remote SCIM identity store.
///
/// Every call is a single request/response round trip; there is no session
/// state between calls and no local caching. Ids are opaque and assigned by
/// the remote store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait Directory: Send + Sync {
  // ── Users ─────────────────────────────────────────────────────────────

  /// The first page of users. Results beyond `itemsPerPage` are not
  /// fetched.
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send + '_;

  /// The one user whose `userName` equals `user_name`. Zero or several
  /// matches fail with a not-found-class error naming the key.
  fn find_user_by_username<'a>(
    &'a self,
    user_name: &'a str,
  ) -> impl Future<Output = Result<User>> + Send + 'a;

  /// Create `user` and return the remote representation with its new id.
  fn create_user<'a>(
    &'a self,
    user: &'a User,
  ) -> impl Future<Output = Result<User>> + Send + 'a;

  /// Fetch a user by id. A 404 is the canonical "does not exist" signal.
  fn read_user<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<User>> + Send + 'a;

  /// Replace the full representation of user `id` (last write wins).
  /// Returns `None` when the remote replies without a body.
  fn put_user<'a>(
    &'a self,
    user: &'a User,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<User>>> + Send + 'a;

  /// Apply a partial update to user `id`.
  fn patch_user<'a>(
    &'a self,
    patch: &'a PatchRequest,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<User>>> + Send + 'a;

  /// Delete user `id`. Deleting an absent user surfaces `NotFound`.
  fn delete_user<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Groups ────────────────────────────────────────────────────────────

  /// The first page of groups.
  fn list_groups(&self) -> impl Future<Output = Result<Vec<Group>>> + Send + '_;

  /// The one group whose `displayName` equals `display_name`.
  fn find_group_by_display_name<'a>(
    &'a self,
    display_name: &'a str,
  ) -> impl Future<Output = Result<Group>> + Send + 'a;

  /// Create a group. An empty `external_id` is not sent.
  fn create_group<'a>(
    &'a self,
    display_name: &'a str,
    external_id: Option<&'a str>,
  ) -> impl Future<Output = Result<Group>> + Send + 'a;

  fn read_group<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Group>> + Send + 'a;

  fn patch_group<'a>(
    &'a self,
    patch: &'a PatchRequest,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  fn delete_group<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Membership ────────────────────────────────────────────────────────

  /// Whether `user_id` is a member of `group_id`. A negative answer is
  /// `Ok(false)`, never an error.
  fn test_group_member<'a>(
    &'a self,
    group_id: &'a str,
    user_id: &'a str,
  ) -> impl Future<Output = Result<bool>> + Send + 'a;

  fn add_group_member<'a>(
    &'a self,
    group_id: &'a str,
    user_id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  fn remove_group_member<'a>(
    &'a self,
    group_id: &'a str,
    user_id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;
}
