//! Shared utilities for the atto client.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
