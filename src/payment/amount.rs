//! Native asset (XLM) amounts
//!
//! The wire carries amounts as decimal strings; the ledger counts stroops
//! (1 XLM = 10^7 stroops) in a signed 64-bit integer. Parsing is strict and
//! never rounds: anything that cannot be represented exactly is rejected.

use rust_decimal::prelude::*;
use std::fmt;
use thiserror::Error;

/// Fractional digits supported by the native asset
pub const NATIVE_DECIMALS: u32 = 7;
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount cannot be empty")]
    Empty,

    #[error("Amount cannot be negative")]
    Negative,

    #[error("Invalid format: use 0.5 not .5")]
    LeadingDot,

    #[error("Invalid format: use 5.0 not 5.")]
    TrailingDot,

    #[error("Invalid format: {0:?} is not a plain decimal number")]
    NotNumeric(String),

    #[error("Amount precision exceeds {max} decimal places")]
    PrecisionOverflow { max: u32 },

    #[error("Amount too large")]
    Overflow,
}

/// Exact, non-negative XLM amount.
///
/// Keeps the caller's decimal as given (`"10.5"` displays as `10.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeAmount {
    value: Decimal,
    stroops: i64,
}

impl NativeAmount {
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative);
        }
        if s.starts_with('.') {
            return Err(AmountError::LeadingDot);
        }
        if s.ends_with('.') {
            return Err(AmountError::TrailingDot);
        }
        // Decimal::from_str also takes '_', '+' and exponents; the wire does not
        let dots = s.chars().filter(|&c| c == '.').count();
        if dots > 1 || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(AmountError::NotNumeric(s.to_string()));
        }

        // Decimal::from_str rounds past 28 significant digits, so the
        // precision check runs on the text
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let significant = fraction.trim_end_matches('0');
        if significant.len() > NATIVE_DECIMALS as usize {
            return Err(AmountError::PrecisionOverflow {
                max: NATIVE_DECIMALS,
            });
        }
        let literal = match fraction.len() {
            n if n <= NATIVE_DECIMALS as usize => s,
            _ if significant.is_empty() => whole,
            _ => &s[..whole.len() + 1 + significant.len()],
        };

        let value = Decimal::from_str(literal).map_err(|e| match e {
            rust_decimal::Error::ExceedsMaximumPossibleValue => AmountError::Overflow,
            _ => AmountError::NotNumeric(s.to_string()),
        })?;

        Self::from_decimal(value)
    }

    fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative);
        }
        if value.normalize().scale() > NATIVE_DECIMALS {
            return Err(AmountError::PrecisionOverflow {
                max: NATIVE_DECIMALS,
            });
        }
        let stroops = value
            .checked_mul(Decimal::from(STROOPS_PER_UNIT))
            .and_then(|d| d.to_i64())
            .ok_or(AmountError::Overflow)?;

        Ok(Self { value, stroops })
    }

    pub fn stroops(&self) -> i64 {
        self.stroops
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
