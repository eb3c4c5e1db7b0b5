use super::{Method, Response, Transport};
use crate::domain::error::PaciResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

/// In-memory transport answering with queued responses
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Response>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Response::new(status, body));
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentRequest {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, method: Method, path: &str, body: Option<String>) -> PaciResult<Response> {
        self.sent.lock().unwrap().push(SentRequest {
            method,
            path: path.to_string(),
            body,
        });
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Response::new(200, "")))
    }
}
