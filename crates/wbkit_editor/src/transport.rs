//! API transport abstraction.

use crate::error::{EditorError, EditorResult};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Ordered request parameters for one API call.
pub type Params = Vec<(String, String)>;

/// Performs one write-API call against the remote service.
///
/// This trait abstracts the HTTP layer, allowing for different
/// implementations (blocking HTTP client, mock for testing, etc.).
/// A transport error means no server response was available;
/// server-reported errors come back as a decoded JSON body.
pub trait ApiTransport: Send + Sync {
    /// Sends the parameters and returns the decoded JSON response.
    fn call(&self, params: &Params) -> EditorResult<Value>;
}

impl<'a, T: ApiTransport + ?Sized> ApiTransport for &'a T {
    fn call(&self, params: &Params) -> EditorResult<Value> {
        (**self).call(params)
    }
}

/// A mock transport replaying scripted responses, for testing.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<Params>>,
    responses: Mutex<VecDeque<EditorResult<Value>>>,
}

impl MockTransport {
    /// Creates an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response body.
    pub fn enqueue(&self, response: Value) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queues a transport-level failure.
    pub fn enqueue_error(&self, error: EditorError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Returns every request made so far, in order.
    pub fn requests(&self) -> Vec<Params> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl ApiTransport for MockTransport {
    fn call(&self, params: &Params) -> EditorResult<Value> {
        self.requests.lock().push(params.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(EditorError::transport("no scripted response left")))
    }
}
