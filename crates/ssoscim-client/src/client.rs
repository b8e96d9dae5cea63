//! [`ScimClient`], the HTTP implementation of [`Directory`].

use std::{sync::Arc, time::Duration};

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use ssoscim_core::{
  Directory, Error, Result,
  group::Group,
  list::{GroupListResponse, UserListResponse},
  patch::{Operation, PatchRequest},
  user::User,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
  limiter::RateLimit,
  request::Endpoint,
  response::{self, Reply},
  transport::Transport,
};

const USERS: &str = "Users";
const GROUPS: &str = "Groups";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Construction parameters for a [`ScimClient`].
#[derive(Clone)]
pub struct ClientConfig {
  pub endpoint:   String,
  pub token:      String,
  pub user_agent: String,
  /// Deadline for a whole request/response exchange.
  pub timeout:    Duration,
  pub rate_limit: RateLimit,
}

impl std::fmt::Debug for ClientConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ClientConfig")
      .field("endpoint", &self.endpoint)
      .field("token", &"<redacted>")
      .field("user_agent", &self.user_agent)
      .field("timeout", &self.timeout)
      .field("rate_limit", &self.rate_limit)
      .finish()
  }
}

impl ClientConfig {
  /// Defaults: 10 second timeout, 10 requests/second with a burst of 10.
  pub fn new(
    endpoint: impl Into<String>,
    token: impl Into<String>,
    user_agent: impl Into<String>,
  ) -> Self {
    Self {
      endpoint:   endpoint.into(),
      token:      token.into(),
      user_agent: user_agent.into(),
      timeout:    Duration::from_secs(10),
      rate_limit: RateLimit::default(),
    }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// SCIM 2.0 client for users, groups and group membership.
///
/// Cheap to clone; clones share the connection pool and the rate limiter.
#[derive(Debug, Clone)]
pub struct ScimClient {
  endpoint:  Endpoint,
  transport: Arc<Transport>,
}

impl ScimClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let endpoint = Endpoint::new(&config.endpoint, &config.token, &config.user_agent)?;
    let transport = Transport::new(config.timeout, config.rate_limit)?;
    Ok(Self {
      endpoint,
      transport: Arc::new(transport),
    })
  }

  pub fn endpoint(&self) -> &Endpoint { &self.endpoint }

  /// Cancelling the returned token aborts every pending limiter wait of
  /// this client and its clones.
  pub fn cancellation_token(&self) -> CancellationToken {
    self.transport.cancellation_token()
  }

  // ── Plumbing ──────────────────────────────────────────────────────────

  async fn call<T, B>(
    &self,
    method: Method,
    path: &[&str],
    filter: Option<&str>,
    body: Option<&B>,
  ) -> Result<Reply<T>>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let req = self
      .endpoint
      .request(self.transport.http(), method, path, filter, body)?;
    let resp = self.transport.send(req).await?;
    response::decode(resp).await
  }

  async fn call_discard<B>(
    &self,
    method: Method,
    path: &[&str],
    body: Option<&B>,
  ) -> Result<()>
  where
    B: Serialize + ?Sized,
  {
    let req = self
      .endpoint
      .request(self.transport.http(), method, path, None, body)?;
    let resp = self.transport.send(req).await?;
    response::discard(resp).await.map(|_| ())
  }

  async fn query<T: DeserializeOwned>(
    &self,
    collection: &str,
    filter: Option<&str>,
  ) -> Result<T> {
    self
      .call::<T, ()>(Method::GET, &[collection], filter, None)
      .await?
      .into_body()
  }
}

/// `attr eq "value"` with `\` and `"` escaped inside the literal.
pub fn eq_filter(attribute: &str, value: &str) -> String {
  format!("{attribute} eq \"{}\"", escape_filter_value(value))
}

fn escape_filter_value(value: &str) -> String {
  value.replace('\\', "\\\\").replace('"', "\\\"")
}

// ─── Directory ───────────────────────────────────────────────────────────────

impl Directory for ScimClient {
  // ── Users ─────────────────────────────────────────────────────────────

  async fn list_users(&self) -> Result<Vec<User>> {
    let lr: UserListResponse = self.query(USERS, None).await?;
    if lr.total_results > lr.resources.len() as u64 {
      debug!(
        total = lr.total_results,
        returned = lr.resources.len(),
        "user listing truncated to the first page"
      );
    }
    Ok(lr.resources)
  }

  async fn find_user_by_username(&self, user_name: &str) -> Result<User> {
    let filter = eq_filter("userName", user_name);
    let lr: UserListResponse = self.query(USERS, Some(&filter)).await?;
    let matches = lr.total_results;
    lr.into_single().ok_or_else(|| Error::NoUniqueMatch {
      kind: "user",
      key: user_name.to_owned(),
      matches,
    })
  }

  async fn create_user(&self, user: &User) -> Result<User> {
    self
      .call(Method::POST, &[USERS], None, Some(user))
      .await?
      .into_body()
  }

  async fn read_user(&self, id: &str) -> Result<User> {
    self
      .call::<User, ()>(Method::GET, &[USERS, id], None, None)
      .await?
      .into_body()
  }

  async fn put_user(&self, user: &User, id: &str) -> Result<Option<User>> {
    Ok(
      self
        .call(Method::PUT, &[USERS, id], None, Some(user))
        .await?
        .into_option(),
    )
  }

  async fn patch_user(&self, patch: &PatchRequest, id: &str) -> Result<Option<User>> {
    Ok(
      self
        .call(Method::PATCH, &[USERS, id], None, Some(patch))
        .await?
        .into_option(),
    )
  }

  async fn delete_user(&self, id: &str) -> Result<()> {
    self.call_discard::<()>(Method::DELETE, &[USERS, id], None).await
  }

  // ── Groups ────────────────────────────────────────────────────────────

  async fn list_groups(&self) -> Result<Vec<Group>> {
    let lr: GroupListResponse = self.query(GROUPS, None).await?;
    Ok(lr.resources)
  }

  async fn find_group_by_display_name(&self, display_name: &str) -> Result<Group> {
    let filter = eq_filter("displayName", display_name);
    let lr: GroupListResponse = self.query(GROUPS, Some(&filter)).await?;
    let matches = lr.total_results;
    lr.into_single().ok_or_else(|| Error::NoUniqueMatch {
      kind: "group",
      key: display_name.to_owned(),
      matches,
    })
  }

  async fn create_group(
    &self,
    display_name: &str,
    external_id: Option<&str>,
  ) -> Result<Group> {
    let body = Group::new(display_name, external_id);
    self
      .call(Method::POST, &[GROUPS], None, Some(&body))
      .await?
      .into_body()
  }

  async fn read_group(&self, id: &str) -> Result<Group> {
    self
      .call::<Group, ()>(Method::GET, &[GROUPS, id], None, None)
      .await?
      .into_body()
  }

  async fn patch_group(&self, patch: &PatchRequest, id: &str) -> Result<()> {
    self.call_discard(Method::PATCH, &[GROUPS, id], Some(patch)).await
  }

  async fn delete_group(&self, id: &str) -> Result<()> {
    self.call_discard::<()>(Method::DELETE, &[GROUPS, id], None).await
  }

  // ── Membership ────────────────────────────────────────────────────────

  async fn test_group_member(&self, group_id: &str, user_id: &str) -> Result<bool> {
    let filter = format!(
      "{} and {}",
      eq_filter("id", group_id),
      eq_filter("members", user_id)
    );
    let lr: GroupListResponse = self.query(GROUPS, Some(&filter)).await?;
    Ok(lr.into_single().is_some())
  }

  async fn add_group_member(&self, group_id: &str, user_id: &str) -> Result<()> {
    let patch = PatchRequest::from(Operation::add_member(user_id));
    self.patch_group(&patch, group_id).await
  }

  async fn remove_group_member(&self, group_id: &str, user_id: &str) -> Result<()> {
    let patch = PatchRequest::from(Operation::remove_member(user_id));
    self.patch_group(&patch, group_id).await
  }
}
