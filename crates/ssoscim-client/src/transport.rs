//! The rate-limited transport: every request waits for a limiter token,
//! then goes out on a shared connection pool with a fixed deadline.

use std::time::Duration;

use ssoscim_core::{Error, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::limiter::{RateLimit, RateLimiter};

/// Paces and sends requests. No retries happen here; that decision belongs
/// to the caller.
#[derive(Debug)]
pub struct Transport {
  http:    reqwest::Client,
  limiter: RateLimiter,
  cancel:  CancellationToken,
}

impl Transport {
  /// `timeout` covers the whole exchange: connect, send, headers and body.
  /// `limit` must have a finite, positive rate.
  pub fn new(timeout: Duration, limit: RateLimit) -> Result<Self> {
    if !limit.is_valid() {
      return Err(Error::Config(format!(
        "requests per second must be a positive number, got {}",
        limit.per_second
      )));
    }
    let http = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
    Ok(Self {
      http,
      limiter: RateLimiter::new(limit),
      cancel: CancellationToken::new(),
    })
  }

  pub fn http(&self) -> &reqwest::Client { &self.http }

  pub fn limiter(&self) -> &RateLimiter { &self.limiter }

  /// A handle that, once cancelled, fails every pending and future limiter
  /// wait on this transport.
  pub fn cancellation_token(&self) -> CancellationToken { self.cancel.clone() }

  /// Wait for a token, then send `req`.
  pub async fn send(&self, req: reqwest::Request) -> Result<reqwest::Response> {
    self
      .limiter
      .acquire(&self.cancel)
      .await
      .map_err(|e| Error::Transport(Box::new(e)))?;

    debug!(method = %req.method(), url = %req.url(), "sending SCIM request");
    let resp = self
      .http
      .execute(req)
      .await
      .map_err(|e| Error::Transport(Box::new(e)))?;
    debug!(status = resp.status().as_u16(), "received SCIM response");
    Ok(resp)
  }
}
