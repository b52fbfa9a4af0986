//! Settlement tuning knobs.

use serde::{Deserialize, Serialize};

use splitledger_core::{DomainError, DomainResult};

/// Default tolerance below which a float remainder counts as zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default number of decimals used when rendering amounts.
pub const DEFAULT_DISPLAY_PRECISION: usize = 2;

/// Largest accepted display precision.
pub const MAX_DISPLAY_PRECISION: usize = 10;

/// Settlement configuration.
///
/// `tolerance` drives every "is this zero?" decision in the engine.
/// `display_precision` only affects rendering; accumulation is never rounded.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementConfig {
    tolerance: f64,
    display_precision: usize,
}

impl SettlementConfig {
    pub fn new(tolerance: f64, display_precision: usize) -> DomainResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(DomainError::validation(format!(
                "tolerance must be a finite, non-negative number, got {tolerance}"
            )));
        }
        if display_precision > MAX_DISPLAY_PRECISION {
            return Err(DomainError::validation(format!(
                "display precision must be at most {MAX_DISPLAY_PRECISION}, got {display_precision}"
            )));
        }
        Ok(Self {
            tolerance,
            display_precision,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn display_precision(&self) -> usize {
        self.display_precision
    }

    /// Whether `value` is indistinguishable from zero.
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.tolerance
    }

    /// Render an amount at the configured precision.
    pub fn format_amount(&self, value: f64) -> String {
        format!("{:.*}", self.display_precision, value)
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}
