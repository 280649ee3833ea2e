//! Recording transport with queued responses.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use undatas_client::transport::{ApiRequest, Transport};
use undatas_client::{Envelope, Error, Result};

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<Envelope>>,
    requests: Vec<ApiRequest>,
}

/// Transport that records requests and replays queued responses.
///
/// Responses are returned in the order they were queued. When the queue is
/// empty the transport answers with [`Error::InvalidResponse`], so an
/// unexpected request surfaces as a failure. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw envelope.
    pub fn push_envelope(&self, envelope: Envelope) -> &Self {
        self.state().responses.push_back(Ok(envelope));
        self
    }

    /// Queues a successful envelope carrying `data`.
    pub fn push_success(&self, data: impl Into<Value>) -> &Self {
        self.push_envelope(Envelope::success(data))
    }

    /// Queues a business failure.
    pub fn push_failure(&self, code: i64, msg: impl Into<String>) -> &Self {
        self.push_envelope(Envelope::failure(code, msg))
    }

    /// Queues a transport error.
    pub fn push_error(&self, error: Error) -> &Self {
        self.state().responses.push_back(Err(error));
        self
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// Returns the number of recorded requests.
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state().requests.last().cloned()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Envelope> {
        let mut state = self.state();
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::invalid_response("no mock response queued", None)))
    }
}
