//! Black–Scholes pricing
//!
//! European option value on a non-dividend-paying underlying. Used only to
//! produce a candidate premium; nothing here is trusted by settlement.

use hedgeline_common::{HedgelineError, OptionType, Result, ValidationError};
use statrs::distribution::{ContinuousCDF, Normal};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| HedgelineError::Internal(format!("standard normal: {}", e)))?;
    Ok(normal.cdf(x))
}

fn intrinsic(option_type: OptionType, spot: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

/// Black–Scholes d1 and d2
pub fn d1_d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * time.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Value of one unit of the option
///
/// At or past expiry, or with zero volatility, this collapses to the
/// (discounted forward) intrinsic value.
pub fn price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
) -> Result<f64> {
    if !(spot > 0.0 && strike > 0.0) || !rate.is_finite() || !vol.is_finite() || vol < 0.0 {
        return Err(ValidationError::InvalidParameters(format!(
            "spot={} strike={} rate={} vol={}",
            spot, strike, rate, vol
        ))
        .into());
    }

    if time <= 0.0 {
        return Ok(intrinsic(option_type, spot, strike));
    }

    let df = (-rate * time).exp();
    if vol == 0.0 {
        let forward = spot * (rate * time).exp();
        return Ok(df * intrinsic(option_type, forward, strike));
    }

    let (d1, d2) = d1_d2(spot, strike, rate, vol, time);
    let value = match option_type {
        OptionType::Call => spot * norm_cdf(d1)? - strike * df * norm_cdf(d2)?,
        OptionType::Put => strike * df * norm_cdf(-d2)? - spot * norm_cdf(-d1)?,
    };

    // Rounding can leave deep OTM values a hair below zero
    Ok(value.max(0.0))
}
