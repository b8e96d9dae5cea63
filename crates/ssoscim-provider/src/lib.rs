//! Declarative bindings over a SCIM [`Directory`](ssoscim_core::Directory).
//!
//! Each resource module exposes `create`, `read`, `delete`, `import` (and
//! `update` for users) as free functions generic over the directory, so the
//! flows run unchanged against the HTTP client or an in-memory fake.

pub mod config;
pub mod data_source;
pub mod error;
pub mod group;
pub mod group_member;
pub mod provider;
pub mod schema;
pub mod user;

pub use config::{DescriptionKind, ProviderConfig};
pub use error::{Error, Result};
pub use provider::Provider;

#[cfg(test)]
mod tests;
