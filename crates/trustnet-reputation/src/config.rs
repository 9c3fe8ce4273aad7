// crates/trustnet-reputation/src/config.rs
//
// Tunables for one score computation.

use serde::{Deserialize, Serialize};

use trustnet_core::error::TrustError;

/// Configuration for the trust scoring pipeline.
///
/// The defaults are the reference values; scores are only comparable between
/// deployments that use the same settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hard cap on participants visited by network discovery. Default: 10,000.
    pub network_size_limit: usize,
    /// Fraction of propagated trust lost per hop. Default: 0.25.
    pub decay: f64,
    /// Maximum power-iteration rounds. Default: 1000.
    pub max_rounds: u32,
    /// Decimal places compared when checking convergence. Default: 8.
    pub precision: i32,
}

/// Reference network size cap.
pub const NETWORK_SIZE_LIMIT: usize = 10_000;

/// Reference decay factor.
pub const DECAY: f64 = 0.25;

/// Largest `precision` an f64 can meaningfully be rounded to.
pub const MAX_PRECISION: i32 = 15;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            network_size_limit: NETWORK_SIZE_LIMIT,
            decay: DECAY,
            max_rounds: 1000,
            precision: 8,
        }
    }
}

impl EngineConfig {
    /// Reject settings the pipeline cannot run with.
    ///
    /// A `precision` beyond `MAX_PRECISION` overflows the rounding scale and
    /// would make every convergence check fail.
    pub fn validate(&self) -> Result<(), TrustError> {
        if !(0..=MAX_PRECISION).contains(&self.precision) {
            return Err(TrustError::InvalidConfig(format!(
                "precision must be within 0..={}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(TrustError::InvalidConfig(format!(
                "decay must be within 0..=1, got {}",
                self.decay
            )));
        }
        if self.network_size_limit == 0 {
            return Err(TrustError::InvalidConfig(
                "network_size_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
