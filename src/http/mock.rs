//! Scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

/// Answers requests from a FIFO script and records every request sent.
///
/// Clones share the same script and log.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a response with a raw body.
    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.lock()
            .replies
            .push_back(Ok(HttpResponse { status, body: body.into() }));
        self
    }

    /// Queue a response with a JSON body.
    pub fn respond_json(&self, status: u16, body: &Value) -> &Self {
        self.respond(status, body.to_string())
    }

    /// Queue a failure where no response arrives.
    pub fn fail(&self, reason: &str) -> &Self {
        self.lock().replies.push_back(Err(TransportError(reason.to_owned())));
        self
    }

    /// Every request sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request);
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_owned())))
    }
}
