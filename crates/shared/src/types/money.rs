//! Monetary helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts stay as full-precision `rust_decimal::Decimal` through every
//! computation and are rounded to two places only when serialized.

use rust_decimal::Decimal;
use serde::Serializer;

/// Decimal places used for money and percentages on the wire.
pub const WIRE_SCALE: u32 = 2;

/// Rounds to the wire scale and pads to exactly two places (`85` -> `85.00`).
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(WIRE_SCALE);
    rounded.rescale(WIRE_SCALE);
    rounded
}

/// Serializer for money and percentage fields: two decimal places, as a string.
///
/// Use with `#[serde(serialize_with = "round2")]`.
pub fn round2<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    rust_decimal::serde::str::serialize(&round_money(*value), serializer)
}

/// Optional variant of [`round2`]; `None` serializes as `null`.
pub fn round2_opt<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => round2(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// Computes `part / whole * 100`, or `None` when `whole` is zero.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        None
    } else {
        Some(part / whole * Decimal::ONE_HUNDRED)
    }
}

/// Computes the percentage change from `base` to `current`, or `None` when
/// `base` is zero.
#[must_use]
pub fn percent_change(base: Decimal, current: Decimal) -> Option<Decimal> {
    percent_of(current - base, base)
}
