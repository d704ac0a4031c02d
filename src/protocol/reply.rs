use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use super::error::ApiError;

/// Transport independent HTTP reply produced by the handlers
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
  pub status: StatusCode,
  pub headers: Vec<(HeaderName, String)>,
  pub body: Vec<u8>,
}

impl Reply {
  /// Reply with no body
  pub fn empty(status: StatusCode) -> Self {
    Reply {
      status,
      headers: Vec::new(),
      body: Vec::new(),
    }
  }

  /// Reply with a JSON encoded body
  pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, ApiError> {
    let body = serde_json::to_vec(value)
      .map_err(|e| ApiError::internal(format!("failed to encode response: {}", e)))?;
    Ok(Reply {
      status,
      headers: vec![(header::CONTENT_TYPE, "application/json".to_string())],
      body,
    })
  }

  pub fn html(body: impl Into<String>) -> Self {
    Reply {
      status: StatusCode::OK,
      headers: vec![(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string())],
      body: body.into().into_bytes(),
    }
  }

  /// 302 redirect to `location`
  pub fn redirect(location: impl Into<String>) -> Self {
    Reply::empty(StatusCode::FOUND).with_header(header::LOCATION, location)
  }

  /// Plain text error reply. Adds the headers some statuses require.
  pub fn error(err: &ApiError) -> Self {
    let mut reply = Reply {
      status: err.status(),
      headers: vec![(header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string())],
      body: err.to_string().into_bytes(),
    };
    match err {
      ApiError::MethodNotAllowed(allowed) => {
        reply = reply.with_header(header::ALLOW, allowed.join(", "));
      }
      ApiError::Unauthorized => {
        reply = reply.with_header(header::WWW_AUTHENTICATE, r#"Basic realm="admin""#);
      }
      _ => {}
    }
    reply
  }

  pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
    self.headers.push((name, value.into()));
    self
  }

  /// First value of the given header, if set
  pub fn header(&self, name: &HeaderName) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v.as_str())
  }
}

impl IntoResponse for Reply {
  fn into_response(self) -> Response {
    let mut response = Response::new(Body::from(self.body));
    *response.status_mut() = self.status;
    for (name, value) in self.headers {
      match HeaderValue::try_from(value) {
        Ok(value) => {
          response.headers_mut().append(name, value);
        }
        Err(e) => warn!("Dropping invalid value for header {}: {}", name, e),
      }
    }
    response
  }
}
