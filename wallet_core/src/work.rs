//! Where block work comes from.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkSource {
    /// Compute on this machine's CPU.
    Local,
    /// Ask the node via `work_generate`.
    Node,
    /// Ask the node; compute locally if that fails.
    #[default]
    LocalFallback,
}
