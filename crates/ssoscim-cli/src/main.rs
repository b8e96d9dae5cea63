//! `ssoscim`: operate on a SCIM 2.0 identity store from the command line.
//!
//! # Usage
//!
//! ```
//! export AWS_SSO_SCIM_ENDPOINT=https://scim.us-east-1.amazonaws.com/xxxx/scim/v2/
//! export AWS_SSO_SCIM_TOKEN=...
//! ssoscim users find jdoe
//! ssoscim members add <group-id> <user-id>
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use ssoscim_client::ScimClient;
use ssoscim_core::Directory;
use ssoscim_provider::{
  Provider, data_source, group,
  group::GroupArgs,
  group_member::{self, MemberArgs},
  schema::provider_schema,
  user::{self, UserArgs},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{Overrides, Settings};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ssoscim", version, about = "Manage users and groups over SCIM 2.0")]
struct Cli {
  /// Path to a TOML settings file.
  #[arg(short, long, value_name = "FILE", default_value = "ssoscim.toml")]
  config: PathBuf,

  /// SCIM base URL, e.g. `https://scim.example.com/scim/v2/`.
  #[arg(long)]
  endpoint: Option<String>,

  /// Bearer token.
  #[arg(long)]
  token: Option<String>,

  /// Steady-state request rate.
  #[arg(long, value_name = "N")]
  requests_per_second: Option<f64>,

  /// Requests allowed back to back before pacing starts.
  #[arg(long, value_name = "N")]
  burst: Option<u32>,

  #[arg(long, value_name = "SECS")]
  timeout_secs: Option<u64>,

  /// Log more (`-v` debug, `-vv` trace).
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Users.
  #[command(subcommand)]
  Users(UserCommand),
  /// Groups.
  #[command(subcommand)]
  Groups(GroupCommand),
  /// Group membership.
  #[command(subcommand)]
  Members(MemberCommand),
  /// Print the documented resource schema.
  Schema {
    /// Strip Markdown from descriptions.
    #[arg(long)]
    plain: bool,
  },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
  /// List the first page of users.
  List,
  /// Look a user up by user name.
  Find { user_name: String },
  Get { id: String },
  Create(UserFlags),
  Update {
    id:    String,
    #[command(flatten)]
    flags: UserFlags,
  },
  Delete { id: String },
}

#[derive(Args, Debug)]
struct UserFlags {
  #[arg(long)]
  user_name:    String,
  #[arg(long)]
  display_name: String,
  #[arg(long)]
  given_name:   String,
  #[arg(long)]
  family_name:  String,
  #[arg(long)]
  email:        Option<String>,
  #[arg(long)]
  email_type:   Option<String>,
  #[arg(long)]
  active:       bool,
}

impl From<UserFlags> for UserArgs {
  fn from(f: UserFlags) -> Self {
    Self {
      user_name:     f.user_name,
      display_name:  f.display_name,
      given_name:    f.given_name,
      family_name:   f.family_name,
      email_address: f.email,
      email_type:    f.email_type,
      active:        f.active,
    }
  }
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
  List,
  /// Look a group up by display name.
  Find { display_name: String },
  Get { id: String },
  Create {
    display_name: String,
    #[arg(long)]
    external_id:  Option<String>,
  },
  Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
  Add { group_id: String, user_id: String },
  Remove { group_id: String, user_id: String },
  /// Exit successfully and print `true`/`false`.
  Test { group_id: String, user_id: String },
  /// Read a membership by its `GROUP_ID,USER_ID` id.
  Import { id: String },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let level = match cli.verbose {
    0 => LevelFilter::WARN,
    1 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let overrides = Overrides {
    endpoint:            cli.endpoint.clone(),
    token:               cli.token.clone(),
    requests_per_second: cli.requests_per_second,
    burst:               cli.burst,
    timeout_secs:        cli.timeout_secs,
  };
  let settings = Settings::load(&cli.config, &overrides)?;
  tracing::debug!(?settings, "loaded settings");

  if let Command::Schema { plain } = cli.command {
    let kind = if plain {
      ssoscim_provider::DescriptionKind::Plain
    } else {
      settings.description_kind
    };
    return print(&provider_schema(kind));
  }

  let provider = Provider::configure(&settings.provider_config(), VERSION)
    .context("failed to configure SCIM client")?;

  match cli.command {
    Command::Users(cmd) => run_users(&provider, cmd).await,
    Command::Groups(cmd) => run_groups(&provider, cmd).await,
    Command::Members(cmd) => run_members(&provider, cmd).await,
    Command::Schema { .. } => Ok(()),
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn print<T: Serialize>(value: &T) -> Result<()> {
  let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
  println!("{out}");
  Ok(())
}

async fn run_users(provider: &Provider<ScimClient>, cmd: UserCommand) -> Result<()> {
  let dir = provider.directory();
  match cmd {
    UserCommand::List => print(&dir.list_users().await?),
    UserCommand::Find { user_name } => print(&data_source::user_by_name(dir, &user_name).await?),
    UserCommand::Get { id } => {
      let state = user::read(dir, &id)
        .await?
        .ok_or_else(|| anyhow!("user {id:?} does not exist"))?;
      print(&state)
    }
    UserCommand::Create(flags) => print(&user::create(dir, &flags.into()).await?),
    UserCommand::Update { id, flags } => {
      let state = user::update(dir, &id, &flags.into())
        .await?
        .ok_or_else(|| anyhow!("user {id:?} does not exist"))?;
      print(&state)
    }
    UserCommand::Delete { id } => {
      user::delete(dir, &id).await?;
      print(&serde_json::json!({ "deleted": id }))
    }
  }
}

async fn run_groups(provider: &Provider<ScimClient>, cmd: GroupCommand) -> Result<()> {
  let dir = provider.directory();
  match cmd {
    GroupCommand::List => print(&dir.list_groups().await?),
    GroupCommand::Find { display_name } => {
      print(&data_source::group_by_name(dir, &display_name).await?)
    }
    GroupCommand::Get { id } => {
      let state = group::read(dir, &id)
        .await?
        .ok_or_else(|| anyhow!("group {id:?} does not exist"))?;
      print(&state)
    }
    GroupCommand::Create {
      display_name,
      external_id,
    } => {
      let args = GroupArgs {
        display_name,
        external_id,
      };
      print(&group::create(dir, &args).await?)
    }
    GroupCommand::Delete { id } => {
      group::delete(dir, &id).await?;
      print(&serde_json::json!({ "deleted": id }))
    }
  }
}

async fn run_members(provider: &Provider<ScimClient>, cmd: MemberCommand) -> Result<()> {
  let dir = provider.directory();
  match cmd {
    MemberCommand::Add { group_id, user_id } => {
      print(&group_member::create(dir, &MemberArgs { group_id, user_id }).await?)
    }
    MemberCommand::Remove { group_id, user_id } => {
      group_member::delete(dir, &group_id, &user_id).await?;
      print(&serde_json::json!({ "removed": group_member::composite_id(&group_id, &user_id) }))
    }
    MemberCommand::Test { group_id, user_id } => {
      let member = dir
        .test_group_member(&group_id, &user_id)
        .await
        .context("failed to test group membership")?;
      print(&member)
    }
    MemberCommand::Import { id } => print(&group_member::import(dir, &id).await?),
  }
}
