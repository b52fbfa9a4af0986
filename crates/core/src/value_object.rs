//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A strictly positive, finite monetary amount.
///
/// Amounts are kept at full `f64` precision; rounding only happens when a
/// value is rendered for display.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl ValueObject for Amount {}

impl Amount {
    /// Validate and wrap a raw value.
    ///
    /// Rejects zero, negative, NaN and infinite values.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!("amount must be a finite number, got {value}")));
        }
        if value <= 0.0 {
            return Err(DomainError::validation(format!("amount must be positive, got {value}")));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Equal per-head share of this amount, or `None` when nobody shares it.
    pub fn share(self, heads: usize) -> Option<f64> {
        if heads == 0 {
            None
        } else {
            Some(self.0 / heads as f64)
        }
    }
}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
