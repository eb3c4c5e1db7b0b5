// HTTP module - Transport to the service API
pub mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;

use crate::domain::error::{PaciError, PaciResult};
use async_trait::async_trait;

/// Request method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Fail on any 4xx or 5xx status, carrying the body as the message
    pub fn ensure_success(self) -> PaciResult<Self> {
        if self.status >= 400 {
            return Err(self.into_error());
        }
        Ok(self)
    }

    /// Fail unless the status is exactly `code`
    pub fn expect_status(self, code: u16) -> PaciResult<Self> {
        if self.status != code {
            return Err(self.into_error());
        }
        Ok(self)
    }

    pub fn into_error(self) -> PaciError {
        PaciError::Api {
            status: self.status,
            body: self.body,
        }
    }
}

/// Sends requests to the service API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request to `path`, relative to the service base URL
    async fn send(&self, method: Method, path: &str, body: Option<String>) -> PaciResult<Response>;
}
