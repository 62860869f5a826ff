//! Lifecycle configuration

use anyhow::Result;
use hedgeline_common::{fixed_point::BPS_DENOMINATOR, HedgelineError};
use hedgeline_engine::DEFAULT_TIME_VALUE_BPS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Upper bound on any single oracle, parameter store or vault call
    pub collaborator_timeout_ms: u64,
    /// Time value share used by the bounds model, in basis points
    pub time_value_bps: u32,
    /// Prefix for exported metric names
    pub metrics_prefix: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout_ms: 2_000,
            time_value_bps: DEFAULT_TIME_VALUE_BPS,
            metrics_prefix: "hedgeline".to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Load configuration from a `.env` file and `HEDGELINE_` variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("HEDGELINE_COLLABORATOR_TIMEOUT_MS") {
            cfg.collaborator_timeout_ms = val
                .parse()
                .map_err(|e| anyhow::anyhow!("HEDGELINE_COLLABORATOR_TIMEOUT_MS: {}", e))?;
        }
        if let Ok(val) = std::env::var("HEDGELINE_TIME_VALUE_BPS") {
            cfg.time_value_bps = val
                .parse()
                .map_err(|e| anyhow::anyhow!("HEDGELINE_TIME_VALUE_BPS: {}", e))?;
        }
        if let Ok(val) = std::env::var("HEDGELINE_METRICS_PREFIX") {
            cfg.metrics_prefix = val;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the orchestrator cannot run with
    pub fn validate(&self) -> std::result::Result<(), HedgelineError> {
        if self.collaborator_timeout_ms == 0 {
            return Err(HedgelineError::Config(
                "collaborator_timeout_ms must be positive".to_string(),
            ));
        }
        if self.time_value_bps as u128 > BPS_DENOMINATOR {
            return Err(HedgelineError::Config(format!(
                "time_value_bps {} exceeds {}",
                self.time_value_bps, BPS_DENOMINATOR
            )));
        }
        if self.metrics_prefix.is_empty()
            || !self
                .metrics_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(HedgelineError::Config(format!(
                "invalid metrics prefix: {:?}",
                self.metrics_prefix
            )));
        }
        Ok(())
    }

    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborator_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = LifecycleConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.collaborator_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let cfg = LifecycleConfig {
            collaborator_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(HedgelineError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let cfg = LifecycleConfig {
            metrics_prefix: "hedge-line".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_deserializes_from_json() {
        let cfg: LifecycleConfig = serde_json::from_str(
            r#"{"collaborator_timeout_ms": 500, "time_value_bps": 150, "metrics_prefix": "hl"}"#,
        )
        .unwrap();
        assert_eq!(cfg.time_value_bps, 150);
        cfg.validate().unwrap();
    }
}
