//! Core types and trait definitions for the SCIM provisioning client.
//!
//! This crate is deliberately free of HTTP dependencies. It holds the SCIM 2.0
//! wire schema, the error taxonomy shared by every layer, and the
//! [`Directory`] trait that the bindings layer programs against.

pub mod directory;
pub mod error;
pub mod group;
pub mod list;
pub mod meta;
pub mod patch;
pub mod user;

pub use directory::Directory;
pub use error::{Error, Result};

// ─── Schema URNs ─────────────────────────────────────────────────────────────

/// Core schema of a SCIM User resource.
pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";

/// Core schema of a SCIM Group resource.
pub const GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";

/// Enterprise User extension; also the JSON key of the extension block.
pub const ENTERPRISE_USER_SCHEMA: &str =
  "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";

/// Message schema of a PATCH request body.
pub const PATCH_OP_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";

/// Message schema of a list (query) response.
pub const LIST_RESPONSE_SCHEMA: &str =
  "urn:ietf:params:scim:api:messages:2.0:ListResponse";
