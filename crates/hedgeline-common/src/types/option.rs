//! Option type and expiration marker

use crate::error::ValidationError;
use crate::fixed_point::ScaledAmount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of protection
///
/// The wire form is `"PUT"` / `"CALL"`, matched case-sensitively. Anything
/// else is a validation failure; there is no default variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    /// Pays when the price falls below the protected value
    Put,
    /// Pays when the price rises above the protected value
    Call,
}

impl OptionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OptionType::Put => "PUT",
            OptionType::Call => "CALL",
        }
    }

    /// Per-unit intrinsic value at `price`, floored at zero
    #[inline]
    pub fn intrinsic(&self, protected_value: ScaledAmount, price: ScaledAmount) -> ScaledAmount {
        match self {
            OptionType::Put => protected_value.saturating_sub(price),
            OptionType::Call => price.saturating_sub(protected_value),
        }
    }
}

impl FromStr for OptionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUT" => Ok(OptionType::Put),
            "CALL" => Ok(OptionType::Call),
            other => Err(ValidationError::InvalidOptionType(other.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point at which a policy expires (block height or epoch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpirationMarker(pub u64);

impl ExpirationMarker {
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Whether `now` is at or past this marker
    #[inline]
    pub fn has_passed(self, now: ExpirationMarker) -> bool {
        now.0 >= self.0
    }
}

impl fmt::Display for ExpirationMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
