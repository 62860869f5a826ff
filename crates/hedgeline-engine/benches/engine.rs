//! Hedgeline engine benchmarks
//!
//! Covers the hot paths run on every create and settle:
//! - Fixed-point multiply/divide
//! - Premium bound derivation and verification
//! - Settlement payout

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hedgeline_common::{
    fixed_point::{div_down, mul_down},
    BuyerTier, OptionType, RiskTier, ScaledAmount,
};
use hedgeline_engine::{calculate_settlement, verify_submitted_premium, SystemParameters};

fn units(n: u64) -> ScaledAmount {
    ScaledAmount::from_units(n).unwrap()
}

// ============ ARITHMETIC BENCHMARKS ============

fn bench_fixed_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point");
    let a = units(50_000);
    let b = ScaledAmount::from_raw(123_456_789);

    group.bench_function("mul_down", |bench| {
        bench.iter(|| mul_down(black_box(a), black_box(b)))
    });
    group.bench_function("div_down", |bench| {
        bench.iter(|| div_down(black_box(a), black_box(b)))
    });

    group.finish();
}

// ============ VERIFICATION BENCHMARKS ============

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("verification");
    let tier = RiskTier::Buyer(BuyerTier::Standard);
    let params = SystemParameters::default_for(tier);

    for spot in [40_000u64, 50_000, 60_000].iter() {
        group.bench_with_input(BenchmarkId::new("put_spot", spot), spot, |bench, &spot| {
            bench.iter(|| {
                verify_submitted_premium(
                    black_box(units(1_500)),
                    OptionType::Put,
                    units(50_000),
                    ScaledAmount::ONE,
                    units(spot),
                    tier,
                    &params,
                )
            })
        });
    }

    group.finish();
}

// ============ SETTLEMENT BENCHMARKS ============

fn bench_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement");

    for (name, option_type) in [("put", OptionType::Put), ("call", OptionType::Call)] {
        group.bench_function(name, |bench| {
            bench.iter(|| {
                calculate_settlement(
                    option_type,
                    black_box(units(50_000)),
                    black_box(ScaledAmount::ONE),
                    black_box(units(45_000)),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fixed_point, bench_verification, bench_settlement);
criterion_main!(benches);
