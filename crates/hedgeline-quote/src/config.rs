//! Quote configuration

use anyhow::Result;
use hedgeline_common::HedgelineError;
use serde::{Deserialize, Serialize};

/// Pricing inputs not supplied per request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Annualized, continuously compounded
    pub risk_free_rate: f64,
    /// Annualized volatility used when a request carries none
    pub default_volatility: f64,
    pub days_per_year: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            default_volatility: 0.6,
            days_per_year: 365.0,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from a `.env` file and `HEDGELINE_` variables
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("HEDGELINE_RISK_FREE_RATE") {
            cfg.risk_free_rate = val
                .parse()
                .map_err(|e| anyhow::anyhow!("HEDGELINE_RISK_FREE_RATE: {}", e))?;
        }
        if let Ok(val) = std::env::var("HEDGELINE_DEFAULT_VOLATILITY") {
            cfg.default_volatility = val
                .parse()
                .map_err(|e| anyhow::anyhow!("HEDGELINE_DEFAULT_VOLATILITY: {}", e))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> std::result::Result<(), HedgelineError> {
        if !self.risk_free_rate.is_finite() {
            return Err(HedgelineError::Config(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if !(self.default_volatility.is_finite() && self.default_volatility > 0.0) {
            return Err(HedgelineError::Config(format!(
                "default_volatility must be positive, got {}",
                self.default_volatility
            )));
        }
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(HedgelineError::Config(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        QuoteConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_non_positive_volatility() {
        let cfg = QuoteConfig {
            default_volatility: 0.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(HedgelineError::Config(_))));

        let cfg = QuoteConfig {
            default_volatility: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
