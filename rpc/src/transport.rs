//! Request transport.
//!
//! A transport takes a finished JSON request body and returns the raw reply
//! bytes. It knows nothing about actions or reply shapes; the node client
//! does all decoding.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("node returned HTTP {0}")]
    Status(u16),

    #[error("request interceptor failed: {0}")]
    Interceptor(String),
}

/// Sends one JSON request body to the node.
pub trait Transport: Send + Sync {
    fn send(&self, body: String) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Mutates every HTTP request before it is sent, e.g. to add credentials.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: RequestBuilder) -> Result<RequestBuilder, TransportError>;
}

impl<F> RequestInterceptor for F
where
    F: Fn(RequestBuilder) -> Result<RequestBuilder, TransportError> + Send + Sync,
{
    fn intercept(&self, request: RequestBuilder) -> Result<RequestBuilder, TransportError> {
        self(request)
    }
}

/// HTTP basic authentication for nodes behind a proxy.
#[derive(Clone)]
pub struct NodeBasicAuth {
    pub username: String,
    pub password: String,
}

impl RequestInterceptor for NodeBasicAuth {
    fn intercept(&self, request: RequestBuilder) -> Result<RequestBuilder, TransportError> {
        Ok(request.basic_auth(&self.username, Some(&self.password)))
    }
}

impl std::fmt::Debug for NodeBasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeBasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// POSTs requests to a node's RPC endpoint with `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    node_url: String,
    interceptor: Option<Arc<dyn RequestInterceptor>>,
}

impl HttpTransport {
    /// Create a transport targeting the given URL (e.g. `http://127.0.0.1:7076`).
    pub fn new(node_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
            interceptor: None,
        })
    }

    /// Run `interceptor` on every request before it is sent.
    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptor = Some(Arc::new(interceptor));
        self
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, body: String) -> Result<Vec<u8>, TransportError> {
        let mut request = self
            .http
            .post(&self.node_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(interceptor) = &self.interceptor {
            request = interceptor.intercept(request)?;
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
