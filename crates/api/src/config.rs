//! Process configuration read from the environment.

use splitledger_core::DomainResult;
use splitledger_settlement::SettlementConfig;
use splitledger_settlement::config::{DEFAULT_DISPLAY_PRECISION, DEFAULT_TOLERANCE};

pub const TOLERANCE_ENV: &str = "SPLITLEDGER_TOLERANCE";
pub const DISPLAY_PRECISION_ENV: &str = "SPLITLEDGER_DISPLAY_PRECISION";

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub settlement: SettlementConfig,
}

impl AppConfig {
    /// Load from `SPLITLEDGER_*` variables.
    ///
    /// Unset variables use the defaults silently; unparsable or out-of-range
    /// values fall back to the defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tolerance = parse_var(&lookup, TOLERANCE_ENV, DEFAULT_TOLERANCE);
        let precision = parse_var(&lookup, DISPLAY_PRECISION_ENV, DEFAULT_DISPLAY_PRECISION);

        let settlement = SettlementConfig::new(tolerance, precision).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid settlement configuration; using defaults");
            SettlementConfig::default()
        });

        Self { settlement }
    }

    /// Apply explicit overrides (e.g. from command-line flags).
    pub fn with_overrides(self, tolerance: Option<f64>, display_precision: Option<usize>) -> DomainResult<Self> {
        let settlement = SettlementConfig::new(
            tolerance.unwrap_or(self.settlement.tolerance()),
            display_precision.unwrap_or(self.settlement.display_precision()),
        )?;
        Ok(Self { settlement })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: core::str::FromStr + core::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "unparsable value; using default");
            default
        }),
    }
}
