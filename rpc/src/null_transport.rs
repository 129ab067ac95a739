//! Nullable transport: record requests and replay scripted replies.

use std::collections::VecDeque;
use std::future::{ready, Future};
use std::sync::{Mutex, PoisonError};

use crate::transport::{Transport, TransportError};

/// A transport that never touches the network.
///
/// Replies are handed out in the order they were pushed. A request with no
/// reply left fails with [`TransportError::Request`].
#[derive(Default)]
pub struct NullTransport {
    requests: Mutex<Vec<String>>,
    replies: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw reply bytes.
    pub fn push_reply(&self, reply: impl Into<Vec<u8>>) {
        self.lock_replies().push_back(Ok(reply.into()));
    }

    /// Queue a JSON reply.
    pub fn push_json(&self, reply: serde_json::Value) {
        self.push_reply(reply.to_string());
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.lock_replies().push_back(Err(error));
    }

    /// Every request body sent so far, parsed as JSON.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|body| serde_json::from_str(body).unwrap_or(serde_json::Value::Null))
            .collect()
    }

    /// The `action` of every request sent so far.
    pub fn actions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.get("action").and_then(|a| a.as_str()).map(str::to_string))
            .collect()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Vec<u8>, TransportError>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for NullTransport {
    fn send(&self, body: String) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body);
        let reply = self
            .lock_replies()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted reply".into())));
        ready(reply)
    }
}
