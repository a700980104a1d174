//! Output buffer written by controller actions.
//!
//! # Responsibilities
//! - Collect status, headers and body produced by a handler
//! - Serialize JSON payloads
//! - Convert into an axum response at the serving boundary
//!
//! # Design Decisions
//! - Status defaults to 200, like a handler that only writes a body
//! - Header names compare case-insensitively; setting a header replaces it
//! - Invalid header names/values are dropped with a warning on conversion

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;

/// Response produced by dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Append text to the body.
    pub fn write(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Append a JSON document to the body and mark the content type.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(value)?;
        self.set_header("Content-Type", "application/json");
        self.body.push_str(&encoded);
        Ok(())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = status;

        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}
