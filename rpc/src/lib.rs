//! JSON-RPC client for a remote node.
//!
//! The node is untrusted. Everything it says about an account's state is
//! checked against the frontier block it hands out (see
//! [`atto_blocks::verify_account_info`]). Transport is behind the
//! [`Transport`] trait: [`HttpTransport`] talks to a real node,
//! [`NullTransport`] replays scripted replies in tests.

pub mod client;
pub mod error;
pub mod messages;
pub mod null_transport;
pub mod transport;

pub use client::{AccountLookup, NodeClient};
pub use error::RpcError;
pub use messages::ACCOUNT_NOT_FOUND;
pub use null_transport::NullTransport;
pub use transport::{HttpTransport, NodeBasicAuth, RequestInterceptor, Transport, TransportError};
