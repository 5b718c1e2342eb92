//! # Signed Fixed-Point Arithmetic
//!
//! Sign-and-magnitude integers over an unsigned `u128` magnitude, plus the
//! fixed-point multiply used for fee and mark-to-market conversion.
//!
//! Balances reported by the ledger carry an explicit sign flag instead of a
//! two's-complement value. Every cross-sign operation decides which operand's
//! sign dominates and subtracts the smaller magnitude from the larger one, so
//! the magnitude never wraps.
//!
//! Zero has two encodings (`{0, true}` and `{0, false}`). Results produced here
//! always report zero as non-negative; use [`SignedInt::eq_value`] when
//! comparing values that may come from elsewhere.

use crate::error::LiquidatorError;
use soroban_sdk::contracttype;

/// Fixed-point base: `10^18` represents `1.0`.
pub const BASE: u128 = 1_000_000_000_000_000_000;

/// Signed integer in sign-and-magnitude form.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SignedInt {
    /// Magnitude
    pub value: u128,
    /// `true` for values >= 0
    pub is_positive: bool,
}

impl SignedInt {
    pub const fn new(value: u128, is_positive: bool) -> Self {
        Self { value, is_positive }
    }

    pub const fn zero() -> Self {
        Self::new(0, true)
    }

    pub const fn negate(self) -> Self {
        Self::new(self.value, !self.is_positive)
    }

    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Numeric equality: `+0` and `-0` compare equal.
    pub fn eq_value(&self, other: &Self) -> bool {
        self.value == other.value && (self.value == 0 || self.is_positive == other.is_positive)
    }

    /// True when the value is non-zero and points in `direction`
    /// (`true` = positive).
    pub fn is_strictly_in(&self, direction: bool) -> bool {
        self.value > 0 && self.is_positive == direction
    }
}

/// `a + b` with explicit sign resolution.
pub fn signed_add(a: SignedInt, b: SignedInt) -> Result<SignedInt, LiquidatorError> {
    if a.is_positive == b.is_positive {
        let value = a
            .value
            .checked_add(b.value)
            .ok_or(LiquidatorError::ArithmeticOverflow)?;
        return Ok(normalize(SignedInt::new(value, a.is_positive)));
    }

    // signs differ: the larger magnitude wins
    if a.value >= b.value {
        let value = checked_sub_u128(a.value, b.value)?;
        Ok(normalize(SignedInt::new(value, a.is_positive)))
    } else {
        let value = checked_sub_u128(b.value, a.value)?;
        Ok(normalize(SignedInt::new(value, b.is_positive)))
    }
}

/// `a - b`, defined as `a + (-b)`.
pub fn signed_sub(a: SignedInt, b: SignedInt) -> Result<SignedInt, LiquidatorError> {
    signed_add(a, b.negate())
}

/// Fixed-point multiply: `value * base_value / BASE`, truncated toward zero.
///
/// Both operands are split into whole and fractional parts of `BASE` so the
/// full product never has to fit in a `u128`; only a result that does not fit
/// reports `ArithmeticOverflow`.
pub fn base_mul(value: u128, base_value: u128) -> Result<u128, LiquidatorError> {
    let (value_whole, value_frac) = (value / BASE, value % BASE);
    let (base_whole, base_frac) = (base_value / BASE, base_value % BASE);

    // whole * whole * BASE + whole * frac + frac * whole + frac * frac / BASE
    let whole = checked_mul_u128(value_whole, base_whole)?;
    let whole = checked_mul_u128(whole, BASE)?;
    let cross = checked_add_u128(
        checked_mul_u128(value_whole, base_frac)?,
        checked_mul_u128(value_frac, base_whole)?,
    )?;
    // both fractions are below 10^18, so this product fits
    let frac = value_frac * base_frac / BASE;

    checked_add_u128(checked_add_u128(whole, cross)?, frac)
}

fn checked_mul_u128(a: u128, b: u128) -> Result<u128, LiquidatorError> {
    a.checked_mul(b).ok_or(LiquidatorError::ArithmeticOverflow)
}

fn checked_add_u128(a: u128, b: u128) -> Result<u128, LiquidatorError> {
    a.checked_add(b).ok_or(LiquidatorError::ArithmeticOverflow)
}

pub fn checked_sub_u128(a: u128, b: u128) -> Result<u128, LiquidatorError> {
    a.checked_sub(b).ok_or(LiquidatorError::ArithmeticUnderflow)
}

fn normalize(v: SignedInt) -> SignedInt {
    if v.value == 0 {
        SignedInt::zero()
    } else {
        v
    }
}
