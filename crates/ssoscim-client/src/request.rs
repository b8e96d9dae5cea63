//! Request construction: URL resolution, auth and content headers, JSON
//! bodies.

use std::fmt;

use reqwest::{
  Method,
  header::{ACCEPT, CONTENT_TYPE, HeaderValue, USER_AGENT},
};
use serde::Serialize;
use ssoscim_core::{Error, Result};
use url::Url;

const JSON: &str = "application/json";

/// The remote endpoint together with the credential used against it.
/// Immutable for the lifetime of a client.
#[derive(Clone)]
pub struct Endpoint {
  base:       Url,
  token:      String,
  user_agent: String,
}

impl fmt::Debug for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Endpoint")
      .field("base", &self.base.as_str())
      .field("token", &"<redacted>")
      .field("user_agent", &self.user_agent)
      .finish()
  }
}

impl Endpoint {
  /// Validate and capture the construction parameters.
  ///
  /// Fails with [`Error::Config`] when `endpoint` or `token` is empty, when
  /// `endpoint` is not an absolute hierarchical URL, or when the token or
  /// user agent cannot be carried in a header.
  pub fn new(endpoint: &str, token: &str, user_agent: &str) -> Result<Self> {
    if endpoint.is_empty() || token.is_empty() {
      return Err(Error::Config("token and endpoint are required".into()));
    }

    let base = Url::parse(endpoint)
      .map_err(|e| Error::Config(format!("invalid endpoint {endpoint:?}: {e}")))?;
    if base.cannot_be_a_base() {
      return Err(Error::Config(format!(
        "endpoint {endpoint:?} cannot be used as a base URL"
      )));
    }

    HeaderValue::from_str(&format!("Bearer {token}"))
      .map_err(|_| Error::Config("token contains invalid header characters".into()))?;
    HeaderValue::from_str(user_agent)
      .map_err(|_| Error::Config(format!("invalid user agent {user_agent:?}")))?;

    Ok(Self {
      base,
      token: token.to_owned(),
      user_agent: user_agent.to_owned(),
    })
  }

  pub fn base(&self) -> &Url { &self.base }

  pub fn user_agent(&self) -> &str { &self.user_agent }

  /// Resolve `path` segments beneath the base URL.
  ///
  /// The base is always treated as a collection root, so
  /// `https://host/v2` and `https://host/v2/` resolve `["Users"]` to the same
  /// `https://host/v2/Users`. Each segment is percent-encoded on its own, so
  /// an opaque id can never escape its segment. The `filter` query parameter
  /// is attached only when `filter` is non-empty.
  pub fn url(&self, path: &[&str], filter: Option<&str>) -> Result<Url> {
    let mut url = self.base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
      let mut segments = url
        .path_segments_mut()
        .map_err(|()| Error::Url(format!("{} cannot be a base", self.base)))?;
      segments.pop_if_empty();
      for segment in path {
        if segment.is_empty() {
          return Err(Error::Url(format!("empty path segment in {path:?}")));
        }
        segments.push(segment);
      }
    }

    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
      url.query_pairs_mut().append_pair("filter", filter);
    }
    Ok(url)
  }

  /// Build a request ready for the transport.
  ///
  /// Every request carries `Authorization: Bearer <token>`, the configured
  /// `User-Agent` and `Accept: application/json`. A body, when given, is
  /// JSON-encoded and labelled `Content-Type: application/json`.
  pub fn request<B>(
    &self,
    http: &reqwest::Client,
    method: Method,
    path: &[&str],
    filter: Option<&str>,
    body: Option<&B>,
  ) -> Result<reqwest::Request>
  where
    B: Serialize + ?Sized,
  {
    let url = self.url(path, filter)?;

    let mut builder = http
      .request(method, url)
      .bearer_auth(&self.token)
      .header(USER_AGENT, &self.user_agent)
      .header(ACCEPT, JSON);

    if let Some(body) = body {
      let bytes = serde_json::to_vec(body)?;
      builder = builder.header(CONTENT_TYPE, JSON).body(bytes);
    }

    builder.build().map_err(|e| Error::Transport(Box::new(e)))
  }
}
