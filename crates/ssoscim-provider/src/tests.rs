use std::{
  collections::BTreeMap,
  sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
  },
};

use ssoscim_core::{
  Directory, Error as DirError, Result as DirResult,
  group::{Group, Member},
  patch::{PatchOpKind, PatchRequest, PatchValue},
  user::User,
};
use uuid::Uuid;

use crate::{
  DescriptionKind, Error, Provider, data_source, group,
  group::GroupArgs,
  group_member::{self, MemberArgs},
  user::{self, UserArgs},
};

// ─── Fake directory ──────────────────────────────────────────────────────────

#[derive(Default)]
struct State {
  users:  BTreeMap<String, User>,
  groups: BTreeMap<String, Group>,
}

/// An in-memory identity store. Ids are assigned on create, like the
/// remote store does.
#[derive(Default)]
struct FakeDirectory {
  state:          Mutex<State>,
  /// Accept member removals without applying them.
  sticky_members: AtomicBool,
  /// Fail every call with 401.
  unauthorized:   AtomicBool,
}

impl FakeDirectory {
  fn check(&self) -> DirResult<()> {
    if self.unauthorized.load(Ordering::SeqCst) {
      return Err(DirError::Unauthorized);
    }
    Ok(())
  }

  fn state(&self) -> std::sync::MutexGuard<'_, State> { self.state.lock().unwrap() }
}

fn single<T: Clone>(kind: &'static str, key: &str, found: Vec<&T>) -> DirResult<T> {
  match found.as_slice() {
    [one] => Ok((*one).clone()),
    _ => Err(DirError::NoUniqueMatch {
      kind,
      key: key.to_owned(),
      matches: found.len() as u64,
    }),
  }
}

impl Directory for FakeDirectory {
  // ── Users ─────────────────────────────────────────────────────────────

  async fn list_users(&self) -> DirResult<Vec<User>> {
    self.check()?;
    Ok(self.state().users.values().cloned().collect())
  }

  async fn find_user_by_username(&self, user_name: &str) -> DirResult<User> {
    self.check()?;
    let state = self.state();
    let found = state.users.values().filter(|u| u.user_name == user_name).collect();
    single("user", user_name, found)
  }

  async fn create_user(&self, user: &User) -> DirResult<User> {
    self.check()?;
    let mut state = self.state();
    if state.users.values().any(|u| u.user_name == user.user_name) {
      return Err(DirError::Conflict);
    }
    let mut created = user.clone();
    created.id = Uuid::new_v4().to_string();
    state.users.insert(created.id.clone(), created.clone());
    Ok(created)
  }

  async fn read_user(&self, id: &str) -> DirResult<User> {
    self.check()?;
    self.state().users.get(id).cloned().ok_or(DirError::NotFound)
  }

  async fn put_user(&self, user: &User, id: &str) -> DirResult<Option<User>> {
    self.check()?;
    let mut state = self.state();
    let slot = state.users.get_mut(id).ok_or(DirError::NotFound)?;
    *slot = User {
      id: id.to_owned(),
      ..user.clone()
    };
    Ok(None)
  }

  async fn patch_user(&self, patch: &PatchRequest, id: &str) -> DirResult<Option<User>> {
    self.check()?;
    let mut state = self.state();
    let user = state.users.get_mut(id).ok_or(DirError::NotFound)?;
    for op in &patch.operations {
      match (op.op, op.path.as_deref(), &op.value) {
        (PatchOpKind::Replace, Some("active"), Some(PatchValue::Bool(v))) => user.active = *v,
        (PatchOpKind::Replace, Some("displayName"), Some(PatchValue::String(v))) => {
          user.display_name = Some(v.clone());
        }
        _ => return Err(DirError::UnexpectedStatus(400)),
      }
    }
    Ok(Some(user.clone()))
  }

  async fn delete_user(&self, id: &str) -> DirResult<()> {
    self.check()?;
    self.state().users.remove(id).map(drop).ok_or(DirError::NotFound)
  }

  // ── Groups ────────────────────────────────────────────────────────────

  async fn list_groups(&self) -> DirResult<Vec<Group>> {
    self.check()?;
    Ok(self.state().groups.values().cloned().collect())
  }

  async fn find_group_by_display_name(&self, display_name: &str) -> DirResult<Group> {
    self.check()?;
    let state = self.state();
    let found = state
      .groups
      .values()
      .filter(|g| g.display_name == display_name)
      .collect();
    single("group", display_name, found)
  }

  async fn create_group(
    &self,
    display_name: &str,
    external_id: Option<&str>,
  ) -> DirResult<Group> {
    self.check()?;
    let mut created = Group::new(display_name, external_id);
    created.id = Uuid::new_v4().to_string();
    self.state().groups.insert(created.id.clone(), created.clone());
    Ok(created)
  }

  async fn read_group(&self, id: &str) -> DirResult<Group> {
    self.check()?;
    self.state().groups.get(id).cloned().ok_or(DirError::NotFound)
  }

  async fn patch_group(&self, patch: &PatchRequest, id: &str) -> DirResult<()> {
    self.check()?;
    let sticky = self.sticky_members.load(Ordering::SeqCst);
    let mut state = self.state();
    let group = state.groups.get_mut(id).ok_or(DirError::NotFound)?;
    for op in &patch.operations {
      let Some(PatchValue::Refs(refs)) = &op.value else {
        return Err(DirError::UnexpectedStatus(400));
      };
      for r in refs {
        match op.op {
          PatchOpKind::Add if !group.has_member(&r.value) => group.members.push(Member {
            value:     r.value.clone(),
            reference: None,
          }),
          PatchOpKind::Remove if !sticky => group.members.retain(|m| m.value != r.value),
          _ => {}
        }
      }
    }
    Ok(())
  }

  async fn delete_group(&self, id: &str) -> DirResult<()> {
    self.check()?;
    self.state().groups.remove(id).map(drop).ok_or(DirError::NotFound)
  }

  // ── Membership ────────────────────────────────────────────────────────

  async fn test_group_member(&self, group_id: &str, user_id: &str) -> DirResult<bool> {
    self.check()?;
    Ok(
      self
        .state()
        .groups
        .get(group_id)
        .is_some_and(|g| g.has_member(user_id)),
    )
  }

  async fn add_group_member(&self, group_id: &str, user_id: &str) -> DirResult<()> {
    self
      .patch_group(
        &PatchRequest::from(ssoscim_core::patch::Operation::add_member(user_id)),
        group_id,
      )
      .await
  }

  async fn remove_group_member(&self, group_id: &str, user_id: &str) -> DirResult<()> {
    self
      .patch_group(
        &PatchRequest::from(ssoscim_core::patch::Operation::remove_member(user_id)),
        group_id,
      )
      .await
  }
}

fn jane() -> UserArgs {
  UserArgs {
    user_name:     "jdoe".into(),
    display_name:  "Jane Doe".into(),
    given_name:    "Jane".into(),
    family_name:   "Doe".into(),
    email_address: Some("jane@example.com".into()),
    email_type:    Some("work".into()),
    active:        true,
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_create_reads_back_assigned_id() {
  let dir = FakeDirectory::default();
  let state = user::create(&dir, &jane()).await.unwrap();

  assert!(!state.id.is_empty());
  assert_eq!(state.user_name, "jdoe");
  assert_eq!(state.email_address.as_deref(), Some("jane@example.com"));
  assert_eq!(state.email_type.as_deref(), Some("work"));
  assert!(state.active);

  let stored = dir.read_user(&state.id).await.unwrap();
  assert_eq!(stored.schemas, vec![ssoscim_core::USER_SCHEMA.to_string()]);
}

#[tokio::test]
async fn user_create_conflict_carries_summary() {
  let dir = FakeDirectory::default();
  user::create(&dir, &jane()).await.unwrap();
  let err = user::create(&dir, &jane()).await.unwrap_err();

  assert!(matches!(
    err.directory_error(),
    Some(ssoscim_core::Error::Conflict)
  ));
  assert!(err.to_string().starts_with("Unable to create User: 409"));
}

#[tokio::test]
async fn user_read_of_vanished_user_is_none() {
  let dir = FakeDirectory::default();
  assert_eq!(user::read(&dir, "missing").await.unwrap(), None);
}

#[tokio::test]
async fn user_update_replaces_managed_attributes_only() {
  let dir = FakeDirectory::default();
  let created = user::create(&dir, &jane()).await.unwrap();
  {
    let mut state = dir.state();
    let stored = state.users.get_mut(&created.id).unwrap();
    stored.title = Some("Engineer".into());
  }

  let args = UserArgs {
    display_name: "Jane Q. Doe".into(),
    email_address: None,
    active: false,
    ..jane()
  };
  let updated = user::update(&dir, &created.id, &args).await.unwrap().unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.display_name, "Jane Q. Doe");
  assert_eq!(updated.email_address, None);
  assert!(!updated.active);

  let stored = dir.read_user(&created.id).await.unwrap();
  assert_eq!(stored.title.as_deref(), Some("Engineer"));
  assert!(stored.meta.is_none());
}

#[tokio::test]
async fn user_update_of_vanished_user_is_none() {
  let dir = FakeDirectory::default();
  assert_eq!(user::update(&dir, "missing", &jane()).await.unwrap(), None);
}

#[tokio::test]
async fn user_delete_tolerates_absence() {
  let dir = FakeDirectory::default();
  let created = user::create(&dir, &jane()).await.unwrap();
  user::delete(&dir, &created.id).await.unwrap();
  user::delete(&dir, &created.id).await.unwrap();
  assert!(dir.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn user_import_requires_existing_user() {
  let dir = FakeDirectory::default();
  let created = user::create(&dir, &jane()).await.unwrap();
  assert_eq!(user::import(&dir, &created.id).await.unwrap(), created);

  let err = user::import(&dir, "missing").await.unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn unauthorized_is_not_collapsed_into_absence() {
  let dir = FakeDirectory::default();
  dir.unauthorized.store(true, Ordering::SeqCst);

  let err = user::read(&dir, "u1").await.unwrap_err();
  assert!(matches!(
    err.directory_error(),
    Some(ssoscim_core::Error::Unauthorized)
  ));
  assert!(err.to_string().starts_with("Unable to read User"));

  let err = user::delete(&dir, "u1").await.unwrap_err();
  assert!(err.to_string().starts_with("Unable to delete User"));
}

// ─── Groups ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn group_lifecycle() {
  let dir = FakeDirectory::default();
  let args = GroupArgs {
    display_name: "Engineering".into(),
    external_id:  Some(String::new()),
  };
  let created = group::create(&dir, &args).await.unwrap();
  assert_eq!(created.display_name, "Engineering");
  assert_eq!(created.external_id, None);

  assert_eq!(group::import(&dir, &created.id).await.unwrap(), created);

  group::delete(&dir, &created.id).await.unwrap();
  assert_eq!(group::read(&dir, &created.id).await.unwrap(), None);
  group::delete(&dir, &created.id).await.unwrap();
}

// ─── Membership ──────────────────────────────────────────────────────────────

async fn seed(dir: &FakeDirectory) -> (String, String) {
  let u = user::create(dir, &jane()).await.unwrap();
  let g = group::create(dir, &GroupArgs {
    display_name: "Ops".into(),
    external_id:  Some("ext-ops".into()),
  })
  .await
  .unwrap();
  (g.id, u.id)
}

#[tokio::test]
async fn member_create_read_delete() {
  let dir = FakeDirectory::default();
  let (group_id, user_id) = seed(&dir).await;

  let args = MemberArgs {
    group_id: group_id.clone(),
    user_id:  user_id.clone(),
  };
  let state = group_member::create(&dir, &args).await.unwrap();
  assert_eq!(state.id, format!("{group_id},{user_id}"));

  // Adding twice is harmless.
  group_member::create(&dir, &args).await.unwrap();
  assert_eq!(dir.read_group(&group_id).await.unwrap().members.len(), 1);

  group_member::delete(&dir, &group_id, &user_id).await.unwrap();
  assert_eq!(
    group_member::read(&dir, &group_id, &user_id).await.unwrap(),
    None
  );
}

#[tokio::test]
async fn member_delete_succeeds_when_removal_is_not_yet_visible() {
  let dir = FakeDirectory::default();
  let (group_id, user_id) = seed(&dir).await;
  dir.add_group_member(&group_id, &user_id).await.unwrap();
  dir.sticky_members.store(true, Ordering::SeqCst);

  group_member::delete(&dir, &group_id, &user_id).await.unwrap();
  assert!(dir.test_group_member(&group_id, &user_id).await.unwrap());
}

#[tokio::test]
async fn member_import_parses_composite_id() {
  let dir = FakeDirectory::default();
  let (group_id, user_id) = seed(&dir).await;
  dir.add_group_member(&group_id, &user_id).await.unwrap();

  let state = group_member::import(&dir, &format!("{group_id},{user_id}"))
    .await
    .unwrap();
  assert_eq!(state.group_id, group_id);
  assert_eq!(state.user_id, user_id);

  let err = group_member::import(&dir, &group_id).await.unwrap_err();
  assert!(matches!(err, Error::ImportId(_)));

  let err = group_member::import(&dir, &format!("{group_id},nobody"))
    .await
    .unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn member_of_deleted_group_reads_as_none() {
  let dir = FakeDirectory::default();
  let (group_id, user_id) = seed(&dir).await;
  dir.add_group_member(&group_id, &user_id).await.unwrap();
  group::delete(&dir, &group_id).await.unwrap();
  assert_eq!(
    group_member::read(&dir, &group_id, &user_id).await.unwrap(),
    None
  );
}

// ─── Data sources ────────────────────────────────────────────────────────────

#[tokio::test]
async fn data_sources_look_up_by_natural_key() {
  let dir = FakeDirectory::default();
  let (group_id, user_id) = seed(&dir).await;

  assert_eq!(data_source::user_by_name(&dir, "jdoe").await.unwrap().id, user_id);
  assert_eq!(data_source::group_by_name(&dir, "Ops").await.unwrap().id, group_id);

  let err = data_source::user_by_name(&dir, "nobody").await.unwrap_err();
  assert!(err.is_not_found());
  assert_eq!(
    err.to_string(),
    r#"Unable to read User: user "nobody" not found (0 matches)"#
  );
}

#[tokio::test]
async fn ambiguous_group_name_is_an_error() {
  let dir = FakeDirectory::default();
  dir.create_group("Ops", None).await.unwrap();
  dir.create_group("Ops", None).await.unwrap();

  let err = data_source::group_by_name(&dir, "Ops").await.unwrap_err();
  assert!(matches!(
    err.directory_error(),
    Some(ssoscim_core::Error::NoUniqueMatch { matches: 2, .. })
  ));
}

#[tokio::test]
async fn patch_user_updates_active_flag() {
  let dir = FakeDirectory::default();
  let created = user::create(&dir, &jane()).await.unwrap();
  let patch = PatchRequest::from(ssoscim_core::patch::Operation::replace("active", false));
  dir.patch_user(&patch, &created.id).await.unwrap();
  assert!(!user::read(&dir, &created.id).await.unwrap().unwrap().active);
}

// ─── Provider ────────────────────────────────────────────────────────────────

#[test]
fn provider_over_fake_renders_schema() {
  let provider = Provider::new(FakeDirectory::default(), DescriptionKind::Markdown);
  let schema = provider.schema();
  let names: Vec<_> = schema.resources.iter().map(|r| r.type_name).collect();
  assert_eq!(names, [user::TYPE_NAME, group::TYPE_NAME, group_member::TYPE_NAME]);
  assert_eq!(schema.data_sources.len(), 2);
}
