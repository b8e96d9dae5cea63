//! Token-bucket pacing for outbound requests.
//!
//! The bucket refills continuously at `per_second` tokens per second up to
//! `burst`. A caller that finds the bucket empty reserves its token in
//! advance (the balance goes negative) and sleeps until the reservation
//! matures, so concurrent callers are served in arrival order.

use std::time::Duration;

use thiserror::Error;
use tokio::{sync::Mutex, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Pacing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimit {
  /// Steady-state refill rate.
  pub per_second: f64,
  /// Bucket capacity; also the number of requests allowed back to back.
  pub burst:      u32,
}

impl RateLimit {
  /// A usable limit has a finite, positive refill rate.
  pub fn is_valid(&self) -> bool { self.per_second.is_finite() && self.per_second > 0.0 }
}

impl Default for RateLimit {
  fn default() -> Self {
    Self {
      per_second: 10.0,
      burst:      10,
    }
  }
}

/// Returned when a wait for a token is abandoned.
#[derive(Debug, Error)]
#[error("rate limiter wait cancelled")]
pub struct Cancelled;

#[derive(Debug)]
struct Bucket {
  tokens: f64,
  last:   Instant,
}

/// A token bucket safe under concurrent acquisition.
#[derive(Debug)]
pub struct RateLimiter {
  limit:  RateLimit,
  bucket: Mutex<Bucket>,
}

impl RateLimiter {
  /// A limiter whose bucket starts full.
  pub fn new(limit: RateLimit) -> Self {
    Self {
      limit,
      bucket: Mutex::new(Bucket {
        tokens: f64::from(limit.burst),
        last:   Instant::now(),
      }),
    }
  }

  pub fn limit(&self) -> RateLimit { self.limit }

  /// Take one token, waiting until it is available or `cancel` fires.
  ///
  /// A cancelled wait returns its reservation to the bucket.
  pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
    if cancel.is_cancelled() {
      return Err(Cancelled);
    }

    let wait = self.reserve().await;
    if wait.is_zero() {
      return Ok(());
    }

    trace!(wait_ms = wait.as_millis() as u64, "waiting for rate limiter token");
    tokio::select! {
      _ = tokio::time::sleep(wait) => Ok(()),
      _ = cancel.cancelled() => {
        self.bucket.lock().await.tokens += 1.0;
        Err(Cancelled)
      }
    }
  }

  /// Debit one token and return how long the caller must wait before using
  /// it.
  async fn reserve(&self) -> Duration {
    let mut bucket = self.bucket.lock().await;
    let now = Instant::now();
    let elapsed = now.duration_since(bucket.last).as_secs_f64();
    bucket.last = now;
    bucket.tokens = (bucket.tokens + elapsed * self.limit.per_second)
      .min(f64::from(self.limit.burst));

    bucket.tokens -= 1.0;
    if bucket.tokens >= 0.0 {
      return Duration::ZERO;
    }
    // An unusable rate never matures a reservation.
    Duration::try_from_secs_f64(-bucket.tokens / self.limit.per_second)
      .unwrap_or(Duration::MAX)
  }
}
