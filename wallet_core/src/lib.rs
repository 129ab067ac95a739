//! Light wallet core.
//!
//! Ties the lower crates together for one account of a seed:
//! - [`WalletConfig`]: node URL, representative, unit, work settings
//! - [`Wallet`]: verified balance, receive, send and representative change
//! - [`WorkSource`]: local PoW, node PoW, or node with local fallback

pub mod config;
pub mod error;
pub mod wallet;
pub mod work;

pub use config::{BasicAuthConfig, ThresholdConfig, WalletConfig, MAX_UNIT_DIGITS};
pub use error::WalletError;
pub use wallet::{Received, Wallet};
pub use work::WorkSource;
