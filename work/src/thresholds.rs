//! Block-kind-aware PoW thresholds.
//!
//! Thresholds are fixed network policy, not computed from load:
//! - Receive blocks need the LOWER threshold (they move funds the account
//!   already owns, so carry less spam risk)
//! - Send, change and open blocks need the standard threshold

/// Simplified block kind for PoW threshold selection.
///
/// Keeps `atto-work` free of a dependency on the block types; callers map
/// their block kind to this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkBlockKind {
    /// Send, change and open.
    Base,
    /// Receive into an already opened account.
    Receive,
}

/// A nonce's work value must be at least the threshold of its block kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkThresholds {
    pub default: u64,
    pub receive: u64,
}

impl WorkThresholds {
    pub const DEFAULT: u64 = 0xffff_fff8_0000_0000;
    pub const RECEIVE: u64 = 0xffff_fe00_0000_0000;

    pub fn new(default: u64, receive: u64) -> Self {
        Self { default, receive }
    }

    /// Get the required work threshold for a specific block kind.
    pub fn threshold_for(&self, kind: WorkBlockKind) -> u64 {
        match kind {
            WorkBlockKind::Base => self.default,
            WorkBlockKind::Receive => self.receive,
        }
    }

    /// Expected number of hashes to find a nonce for `threshold`:
    /// `2^64 / (2^64 - threshold)`, rounded down.
    pub fn expected_attempts(threshold: u64) -> u128 {
        let space = 1u128 << 64;
        space / (space - threshold as u128)
    }
}

impl Default for WorkThresholds {
    fn default() -> Self {
        Self::new(Self::DEFAULT, Self::RECEIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_easier_than_send() {
        let thresholds = WorkThresholds::default();
        let send = thresholds.threshold_for(WorkBlockKind::Base);
        let receive = thresholds.threshold_for(WorkBlockKind::Receive);
        assert!(receive < send, "receive threshold ({receive:x}) must be below send ({send:x})");
    }

    #[test]
    fn default_values() {
        let thresholds = WorkThresholds::default();
        assert_eq!(thresholds.threshold_for(WorkBlockKind::Base), 0xfffffff800000000);
        assert_eq!(thresholds.threshold_for(WorkBlockKind::Receive), 0xfffffe0000000000);
    }

    #[test]
    fn expected_attempts_scale() {
        assert_eq!(WorkThresholds::expected_attempts(WorkThresholds::DEFAULT), 1 << 29);
        assert_eq!(WorkThresholds::expected_attempts(WorkThresholds::RECEIVE), 1 << 23);
        assert_eq!(WorkThresholds::expected_attempts(0), 1);
    }

    #[test]
    fn custom_thresholds_propagate() {
        let thresholds = WorkThresholds::new(1000, 10);
        assert_eq!(thresholds.threshold_for(WorkBlockKind::Base), 1000);
        assert_eq!(thresholds.threshold_for(WorkBlockKind::Receive), 10);
    }
}
