//! Wallet configuration with TOML file support.

use std::path::Path;

use atto_crypto::{Account, DEFAULT_PREFIX};
use atto_rpc::{HttpTransport, NodeBasicAuth};
use atto_types::Unit;
use atto_utils::LogFormat;
use atto_work::{WorkGenerator, WorkThresholds};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::work::WorkSource;

/// Display units wider than this are treated as typos.
pub const MAX_UNIT_DIGITS: u32 = 255;

/// Configuration for a light wallet.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// RPC endpoint of the node. It must support `work_generate` unless
    /// work is computed locally.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Representative of newly opened accounts.
    #[serde(default = "default_representative")]
    pub default_representative: String,

    /// Prefix of addresses this wallet prints.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,

    /// Decimal places of the display unit.
    #[serde(default = "default_unit_digits")]
    pub unit_digits: u32,

    /// Display suffix of the unit.
    #[serde(default = "default_unit_name")]
    pub unit_name: String,

    #[serde(default)]
    pub work_source: WorkSource,

    /// Workers for local PoW; 0 means one per logical CPU.
    #[serde(default)]
    pub work_threads: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub work_thresholds: ThresholdConfig,

    /// Credentials for nodes behind an authenticating proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuthConfig>,
}

/// Work thresholds as 16 hex digits. TOML integers are signed, so the
/// values do not fit as numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(with = "hex_u64", default = "default_threshold")]
    pub default: u64,
    #[serde(with = "hex_u64", default = "receive_threshold")]
    pub receive: u64,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

mod hex_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:016x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let text = String::deserialize(deserializer)?;
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(&text);
        u64::from_str_radix(digits, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid threshold '{text}': {e}")))
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_node_url() -> String {
    "https://proxy.powernode.cc/proxy".to_string()
}

fn default_representative() -> String {
    "nano_18shbirtzhmkf7166h39nowj9c9zrpufeg75bkbyoobqwf1iu3srfm9eo3pz".to_string()
}

fn default_address_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_unit_digits() -> u32 {
    Unit::NANO_DIGITS
}

fn default_unit_name() -> String {
    "NANO".to_string()
}

fn default_threshold() -> u64 {
    WorkThresholds::DEFAULT
}

fn receive_threshold() -> u64 {
    WorkThresholds::RECEIVE
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        let config: Self = toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), WalletError> {
        if self.unit_digits > MAX_UNIT_DIGITS {
            return Err(WalletError::Config(format!(
                "unit_digits {} exceeds {MAX_UNIT_DIGITS}",
                self.unit_digits
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn representative(&self) -> Result<Account, WalletError> {
        Account::from_address(&self.default_representative).map_err(|e| {
            WalletError::Config(format!(
                "default_representative '{}': {e}",
                self.default_representative
            ))
        })
    }

    pub fn unit(&self) -> Unit {
        Unit::new(self.unit_digits)
    }

    pub fn thresholds(&self) -> WorkThresholds {
        WorkThresholds::new(self.work_thresholds.default, self.work_thresholds.receive)
    }

    pub fn generator(&self) -> WorkGenerator {
        WorkGenerator::with_workers(self.work_threads)
    }

    /// An HTTP transport for `node_url`, authenticating if configured.
    pub fn http_transport(&self) -> Result<HttpTransport, WalletError> {
        let transport = HttpTransport::new(self.node_url.clone())?;
        Ok(match &self.basic_auth {
            Some(auth) => transport.with_interceptor(NodeBasicAuth {
                username: auth.username.clone(),
                password: auth.password.clone(),
            }),
            None => transport,
        })
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            default: default_threshold(),
            receive: receive_threshold(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            default_representative: default_representative(),
            address_prefix: default_address_prefix(),
            unit_digits: default_unit_digits(),
            unit_name: default_unit_name(),
            work_source: WorkSource::default(),
            work_thresholds: ThresholdConfig::default(),
            work_threads: 0,
            basic_auth: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
