//! Response classification.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200, 201 | decode the JSON body |
//! | 204, other 2xx | success, body ignored |
//! | 401 | [`Error::Unauthorized`] |
//! | 404 | [`Error::NotFound`] |
//! | 409 | [`Error::Conflict`] |
//! | 429 | [`Error::Throttled`] |
//! | anything else | [`Error::UnexpectedStatus`] |
//!
//! The body is always read to the end before returning so the connection
//! goes back to the pool.

use bytes::Bytes;
use reqwest::{
  StatusCode,
  header::{HeaderMap, RETRY_AFTER},
};
use serde::de::DeserializeOwned;
use ssoscim_core::{Error, Result};
use tracing::{debug, warn};

/// How a successful status treats the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Decode,
  NoContent,
  Success,
}

/// Map a status code to an [`Outcome`] or the matching error.
pub fn classify(status: StatusCode, headers: &HeaderMap) -> Result<Outcome> {
  match status.as_u16() {
    200 | 201 => Ok(Outcome::Decode),
    204 => Ok(Outcome::NoContent),
    s if (200..300).contains(&s) => Ok(Outcome::Success),
    401 => Err(Error::Unauthorized),
    404 => Err(Error::NotFound),
    409 => Err(Error::Conflict),
    429 => {
      let retry_after_secs = headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
      warn!(?retry_after_secs, "SCIM endpoint throttled the request");
      Err(Error::Throttled { retry_after_secs })
    }
    s => Err(Error::UnexpectedStatus(s)),
  }
}

/// A classified reply whose body may or may not have been decoded.
#[derive(Debug)]
pub enum Reply<T> {
  Body(T),
  Empty(StatusCode),
}

impl<T> Reply<T> {
  /// The decoded value; a bodiless success is unexpected here.
  pub fn into_body(self) -> Result<T> {
    match self {
      Reply::Body(v) => Ok(v),
      Reply::Empty(status) => Err(Error::UnexpectedStatus(status.as_u16())),
    }
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      Reply::Body(v) => Some(v),
      Reply::Empty(_) => None,
    }
  }
}

/// Classify `resp` and decode its body when the status calls for it.
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Reply<T>> {
  let status = resp.status();
  let outcome = classify(status, resp.headers());
  let body = drain(resp, &outcome).await;

  match outcome? {
    Outcome::Decode => Ok(Reply::Body(serde_json::from_slice(&body?)?)),
    Outcome::NoContent | Outcome::Success => Ok(Reply::Empty(status)),
  }
}

/// Classify `resp` without decoding anything.
pub async fn discard(resp: reqwest::Response) -> Result<StatusCode> {
  let status = resp.status();
  let outcome = classify(status, resp.headers());
  drain(resp, &outcome).await?;
  outcome.map(|_| status)
}

/// Read the body to completion. A read failure only matters when the status
/// was a success; otherwise the status error wins.
async fn drain(
  resp: reqwest::Response,
  outcome: &Result<Outcome>,
) -> Result<Bytes> {
  let status = resp.status();
  let read = resp.bytes().await;

  match (read, outcome) {
    (Ok(body), Ok(_)) => Ok(body),
    (Ok(body), Err(_)) => {
      debug!(
        status = status.as_u16(),
        body = %String::from_utf8_lossy(&body[..body.len().min(512)]),
        "SCIM error response"
      );
      Ok(body)
    }
    (Err(e), Ok(_)) => Err(Error::Transport(Box::new(e))),
    (Err(e), Err(_)) => {
      debug!(status = status.as_u16(), error = %e, "failed to read error body");
      Ok(Bytes::new())
    }
  }
}

#[cfg(test)]
mod tests {
  use reqwest::header::HeaderValue;

  use super::*;

  fn status(code: u16) -> Result<Outcome> {
    classify(StatusCode::from_u16(code).unwrap(), &HeaderMap::new())
  }

  #[test]
  fn success_codes() {
    assert_eq!(status(200).unwrap(), Outcome::Decode);
    assert_eq!(status(201).unwrap(), Outcome::Decode);
    assert_eq!(status(204).unwrap(), Outcome::NoContent);
    assert_eq!(status(202).unwrap(), Outcome::Success);
    assert_eq!(status(299).unwrap(), Outcome::Success);
  }

  #[test]
  fn client_error_codes() {
    assert!(matches!(status(401), Err(Error::Unauthorized)));
    assert!(matches!(status(404), Err(Error::NotFound)));
    assert!(matches!(status(409), Err(Error::Conflict)));
    assert!(matches!(
      status(429),
      Err(Error::Throttled { retry_after_secs: None })
    ));
  }

  #[test]
  fn everything_else_is_unexpected() {
    for code in [301, 304, 400, 403, 500, 503] {
      assert!(
        matches!(status(code), Err(Error::UnexpectedStatus(c)) if c == code),
        "status {code}"
      );
    }
  }

  #[test]
  fn retry_after_is_captured() {
    let mut headers = HeaderMap::new();
    headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
    assert!(matches!(
      classify(StatusCode::TOO_MANY_REQUESTS, &headers),
      Err(Error::Throttled { retry_after_secs: Some(7) })
    ));
  }

  #[test]
  fn empty_reply_is_unexpected_for_body_operations() {
    let reply: Reply<()> = Reply::Empty(StatusCode::NO_CONTENT);
    assert!(matches!(reply.into_body(), Err(Error::UnexpectedStatus(204))));
    let reply: Reply<u8> = Reply::Body(3);
    assert_eq!(reply.into_option(), Some(3));
  }
}
