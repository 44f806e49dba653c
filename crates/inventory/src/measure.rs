//! Fixed-point physical measurements (length, weight).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rollstock_core::{DomainError, DomainResult, ValueObject};

/// A strictly positive decimal quantity with bounded precision.
///
/// At most [`Measure::MAX_INTEGER_DIGITS`] digits before the decimal point and
/// [`Measure::MAX_FRACTION_DIGITS`] after it. Trailing zeros do not count, so
/// `12.500` is accepted and stored as `12.5`.
///
/// Deserialization goes through the same validation as [`Measure::new`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Measure(Decimal);

impl Measure {
    pub const MAX_INTEGER_DIGITS: u32 = 6;
    pub const MAX_FRACTION_DIGITS: u32 = 3;

    /// Validate `value` as the measure called `name` (used in error messages).
    pub fn new(name: &str, value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::invalid_input(format!("{name} must be greater than 0")));
        }

        let value = value.normalize();
        if value.scale() > Self::MAX_FRACTION_DIGITS {
            return Err(DomainError::invalid_input(format!(
                "{name}: at most {} fractional digits allowed",
                Self::MAX_FRACTION_DIGITS
            )));
        }
        if value.trunc() >= Decimal::from(10u64.pow(Self::MAX_INTEGER_DIGITS)) {
            return Err(DomainError::invalid_input(format!(
                "{name}: at most {} integer digits allowed",
                Self::MAX_INTEGER_DIGITS
            )));
        }

        Ok(Self(value))
    }

    /// Like [`Measure::new`], treating a missing value as invalid input.
    pub fn required(name: &str, value: Option<Decimal>) -> DomainResult<Self> {
        match value {
            Some(v) => Self::new(name, v),
            None => Err(DomainError::invalid_input(format!("{name} is required"))),
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Measure {}

impl core::fmt::Display for Measure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Measure {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new("measure", value)
    }
}

impl From<Measure> for Decimal {
    fn from(value: Measure) -> Self {
        value.0
    }
}
