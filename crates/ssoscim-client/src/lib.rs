//! HTTP client for SCIM 2.0 identity stores.
//!
//! Requests are built by [`request::Endpoint`], paced by a token-bucket
//! [`limiter::RateLimiter`], sent by [`transport::Transport`] and interpreted
//! by [`response::classify`]. [`ScimClient`] composes them into the
//! [`ssoscim_core::Directory`] operations.
//!
//! # Quick start
//!
//! ```no_run
//! use ssoscim_client::{ClientConfig, ScimClient};
//! use ssoscim_core::Directory;
//!
//! # async fn run() -> ssoscim_core::Result<()> {
//! let client = ScimClient::new(ClientConfig::new(
//!   "https://scim.example.com/v2/",
//!   "token",
//!   "my-tool/1.0",
//! ))?;
//! let group = client.create_group("Engineering", None).await?;
//! println!("created {}", group.id);
//! # Ok(())
//! # }
//! ```

mod client;

pub mod limiter;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{ClientConfig, ScimClient, eq_filter};
pub use limiter::RateLimit;
pub use ssoscim_core::{Error, Result};
