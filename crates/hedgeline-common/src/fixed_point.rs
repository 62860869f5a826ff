//! Fixed-point arithmetic on 10^8-scaled integers
//!
//! Every financial quantity (strike, notional, premium, price) is carried as a
//! [`ScaledAmount`]: the decimal value multiplied by [`SCALE`]. Multiplication
//! and division re-apply the scale and always truncate toward zero. The
//! intermediate product is checked before the division step, so an overflow
//! surfaces as [`ArithmeticError::Overflow`] instead of wrapping.

use crate::error::{ArithmeticError, ValidationError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places carried by a [`ScaledAmount`]
pub const SCALE_DECIMALS: u32 = 8;

/// Fixed-point scale factor (10^8)
pub const SCALE: u128 = 100_000_000;

/// Basis-point denominator
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Decimal quantity encoded as an integer multiple of 10^-8
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ScaledAmount(u128);

impl ScaledAmount {
    pub const ZERO: ScaledAmount = ScaledAmount(0);

    /// One whole unit (1.0)
    pub const ONE: ScaledAmount = ScaledAmount(SCALE);

    pub const MAX: ScaledAmount = ScaledAmount(u128::MAX);

    /// Wrap an already-scaled integer
    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Raw scaled integer
    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Whole units, e.g. `from_units(50_000)` is 50000.0
    pub fn from_units(units: u64) -> Result<Self, ArithmeticError> {
        (units as u128)
            .checked_mul(SCALE)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert a decimal, rejecting negatives and digits past the 8th place
    pub fn from_decimal(value: Decimal) -> Result<Self, ValidationError> {
        let truncated = value.round_dp_with_strategy(SCALE_DECIMALS, RoundingStrategy::ToZero);
        if truncated != value {
            return Err(ValidationError::PrecisionLoss(value.to_string()));
        }
        Self::from_decimal_truncated(value)
    }

    /// Convert a decimal, truncating anything past the 8th place
    pub fn from_decimal_truncated(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::NegativeAmount(value.to_string()));
        }

        let mut scaled = value.round_dp_with_strategy(SCALE_DECIMALS, RoundingStrategy::ToZero);
        scaled.rescale(SCALE_DECIMALS);
        if scaled.scale() != SCALE_DECIMALS {
            return Err(ValidationError::PrecisionLoss(value.to_string()));
        }

        u128::try_from(scaled.mantissa())
            .map(Self)
            .map_err(|_| ValidationError::NegativeAmount(value.to_string()))
    }

    /// Decimal view of this amount
    pub fn to_decimal(self) -> Result<Decimal, ArithmeticError> {
        let mantissa = i128::try_from(self.0).map_err(|_| ArithmeticError::Overflow)?;
        Decimal::try_from_i128_with_scale(mantissa, SCALE_DECIMALS)
            .map_err(|_| ArithmeticError::Overflow)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    /// Subtraction that fails instead of going below zero
    pub fn checked_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// `max(0, self - rhs)`
    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08}", self.0 / SCALE, self.0 % SCALE)
    }
}

/// `floor(a * b / SCALE)`
pub fn mul_down(a: ScaledAmount, b: ScaledAmount) -> Result<ScaledAmount, ArithmeticError> {
    let product = a.0.checked_mul(b.0).ok_or(ArithmeticError::Overflow)?;
    Ok(ScaledAmount(product / SCALE))
}

/// `floor(a * SCALE / b)`
pub fn div_down(a: ScaledAmount, b: ScaledAmount) -> Result<ScaledAmount, ArithmeticError> {
    if b.0 == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let product = a.0.checked_mul(SCALE).ok_or(ArithmeticError::Overflow)?;
    Ok(ScaledAmount(product / b.0))
}

/// `floor(a * bps / 10_000)`
pub fn apply_bps(a: ScaledAmount, bps: u32) -> Result<ScaledAmount, ArithmeticError> {
    let product = a.0.checked_mul(bps as u128).ok_or(ArithmeticError::Overflow)?;
    Ok(ScaledAmount(product / BPS_DENOMINATOR))
}
