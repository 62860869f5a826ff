//! Settlement payout calculation
//!
//! ```text
//! PUT:  intrinsic = max(0, strike - price)
//! CALL: intrinsic = max(0, price - strike)
//! payout = intrinsic × (amount / ONE)
//! ```
//!
//! At- and out-of-the-money policies settle with a zero payout.

use hedgeline_common::{
    fixed_point::{div_down, mul_down},
    OptionType, Result, ScaledAmount, SettlementOutcome, SettlementResult,
};

/// Payout owed for a policy at `expiration_price`
pub fn calculate_settlement(
    option_type: OptionType,
    protected_value: ScaledAmount,
    protection_amount: ScaledAmount,
    expiration_price: ScaledAmount,
) -> Result<SettlementResult> {
    let intrinsic_value = option_type.intrinsic(protected_value, expiration_price);

    // Units of protection relative to one whole unit
    let units = div_down(protection_amount, ScaledAmount::ONE)?;
    let payout = mul_down(intrinsic_value, units)?;

    let outcome = if payout.is_zero() {
        SettlementOutcome::Expired
    } else {
        SettlementOutcome::Exercised
    };

    Ok(SettlementResult {
        payout,
        intrinsic_value,
        expiration_price,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgeline_common::{ArithmeticError, HedgelineError};
    use proptest::prelude::*;

    fn units(n: u64) -> ScaledAmount {
        ScaledAmount::from_units(n).unwrap()
    }

    #[test]
    fn test_itm_put() {
        let result =
            calculate_settlement(OptionType::Put, units(50_000), ScaledAmount::ONE, units(45_000))
                .unwrap();
        assert_eq!(result.payout, units(5_000));
        assert_eq!(result.payout.raw(), 500_000_000_000);
        assert_eq!(result.outcome, SettlementOutcome::Exercised);
    }

    #[test]
    fn test_otm_call() {
        let result =
            calculate_settlement(OptionType::Call, units(50_000), ScaledAmount::ONE, units(45_000))
                .unwrap();
        assert_eq!(result.payout, ScaledAmount::ZERO);
        assert_eq!(result.outcome, SettlementOutcome::Expired);
    }

    #[test]
    fn test_itm_call_fractional_amount() {
        // 0.5 BTC, price 52000 vs strike 50000
        let result = calculate_settlement(
            OptionType::Call,
            units(50_000),
            ScaledAmount::from_raw(50_000_000),
            units(52_000),
        )
        .unwrap();
        assert_eq!(result.payout, units(1_000));
        assert_eq!(result.intrinsic_value, units(2_000));
    }

    #[test]
    fn test_overflow_surfaces() {
        let err = calculate_settlement(
            OptionType::Call,
            ScaledAmount::ZERO,
            ScaledAmount::MAX,
            ScaledAmount::ONE,
        )
        .unwrap_err();
        assert_eq!(err, HedgelineError::Arithmetic(ArithmeticError::Overflow));
    }

    proptest! {
        #[test]
        fn prop_at_the_money_pays_nothing(
            strike in 0u128..=10_000_000_000_000u128,
            amount in 0u128..=10_000_000_000_000u128,
            is_put in any::<bool>(),
        ) {
            let option_type = if is_put { OptionType::Put } else { OptionType::Call };
            let strike = ScaledAmount::from_raw(strike);
            let result = calculate_settlement(
                option_type, strike, ScaledAmount::from_raw(amount), strike,
            ).unwrap();
            prop_assert_eq!(result.payout, ScaledAmount::ZERO);
        }

        #[test]
        fn prop_out_of_the_money_pays_nothing(
            strike in 1u128..=10_000_000_000_000u128,
            gap in 0u128..=10_000_000_000_000u128,
            amount in 0u128..=10_000_000_000_000u128,
        ) {
            let strike_amt = ScaledAmount::from_raw(strike);
            let amount = ScaledAmount::from_raw(amount);

            let above = ScaledAmount::from_raw(strike + gap);
            let put = calculate_settlement(OptionType::Put, strike_amt, amount, above).unwrap();
            prop_assert_eq!(put.payout, ScaledAmount::ZERO);

            let below = ScaledAmount::from_raw(strike.saturating_sub(gap));
            let call = calculate_settlement(OptionType::Call, strike_amt, amount, below).unwrap();
            prop_assert_eq!(call.payout, ScaledAmount::ZERO);
        }

        #[test]
        fn prop_payout_monotonic_in_amount(
            strike in 0u128..=10_000_000_000_000u128,
            price in 0u128..=10_000_000_000_000u128,
            amount in 0u128..=10_000_000_000_000u128,
            extra in 0u128..=10_000_000_000u128,
            is_put in any::<bool>(),
        ) {
            let option_type = if is_put { OptionType::Put } else { OptionType::Call };
            let strike = ScaledAmount::from_raw(strike);
            let price = ScaledAmount::from_raw(price);
            let small = calculate_settlement(
                option_type, strike, ScaledAmount::from_raw(amount), price,
            ).unwrap();
            let large = calculate_settlement(
                option_type, strike, ScaledAmount::from_raw(amount + extra), price,
            ).unwrap();
            prop_assert!(small.payout <= large.payout);
        }
    }
}
