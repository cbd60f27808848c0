//! Property-based tests for report and metric invariants.
//!
//! These tests verify properties that should hold for any fund:
//! - Every report carries the full key vocabulary and serializes to
//!   valid JSON, whatever the input
//! - TVPI decomposes into DPI + RVPI
//! - A computed IRR is a root of the NPV function
//! - Sanitized values never hold a non-finite number

use proptest::prelude::*;
use vintage_analytics::prelude::*;
use vintage_core::prelude::*;
use vintage_math::safe::decimal_to_f64;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Deterministic hash for reproducible test data.
fn mix(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15).wrapping_add(i);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x
}

/// Generates a fund with an up-front call, `n` quarterly-ish flows
/// (calls early, distributions later) and a terminal NAV mark.
fn generate_fund(n: usize, seed: u64) -> Vec<FundRow> {
    let base = Date::from_ymd(2018, 1, 1).unwrap();
    let mut rows = vec![FundRow::flow(base.to_string(), dec!(-1000000))];

    for i in 0..n {
        let hash = mix(seed, i as u64);
        let offset = 90 * (i as i64 + 1) + (hash % 45) as i64;
        let date = base.add_days(offset).to_string();
        let amount = Decimal::from(50_000 + (hash % 400_000));
        rows.push(if i < n / 3 {
            FundRow::new(date).with_contribution(amount)
        } else {
            FundRow::new(date).with_distribution(amount)
        });
    }

    let nav = Decimal::from(mix(seed, n as u64 + 1) % 2_000_000);
    rows.push(FundRow::valuation(
        base.add_days(90 * (n as i64 + 1) + 30).to_string(),
        nav,
    ));
    rows
}

/// Generates a gently rising monthly index with seeded noise.
fn generate_benchmark(seed: u64) -> Vec<BenchmarkRow> {
    let base = Date::from_ymd(2017, 12, 1).unwrap();
    (0..48u64)
        .map(|i| {
            let level = 2000 + 25 * i + mix(seed ^ 0xbeef, i) % 200;
            BenchmarkRow::new(base.add_days(30 * i as i64).to_string(), Decimal::from(level))
        })
        .collect()
}

// =============================================================================
// PROPERTY: REPORTS ARE COMPLETE AND JSON-SAFE
// =============================================================================

#[test]
fn property_reports_are_complete_and_json_safe() {
    let engine = MetricsEngine::new();

    for seed in 0..10 {
        for size in [3, 8, 16, 24] {
            let report = engine
                .run_rows(&generate_fund(size, seed), Some(&generate_benchmark(seed)))
                .unwrap();

            let json = serde_json::to_string(&report)
                .unwrap_or_else(|e| panic!("size={size}, seed={seed}: {e}"));
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            let object = value.as_object().unwrap();

            // 16 metric keys plus the coverage flag
            assert_eq!(object.len(), 17, "size={size}, seed={seed}");
            for key in MetricKey::ALL {
                assert!(
                    object.contains_key(key.as_str()),
                    "{key} missing for size={size}, seed={seed}"
                );
            }
        }
    }
}

// =============================================================================
// PROPERTY: TVPI = DPI + RVPI
// =============================================================================

#[test]
fn property_tvpi_decomposes() {
    for seed in 0..10 {
        for size in [3, 8, 16, 24] {
            let fund = CashFlowSeries::from_rows(&generate_fund(size, seed)).unwrap();

            let total = tvpi(&fund);
            let split = dpi(&fund) + rvpi(&fund);
            assert!(
                (total - split).abs() <= 1e-9 * total.abs().max(1.0),
                "TVPI {total} != DPI + RVPI {split} for size={size}, seed={seed}"
            );
        }
    }
}

// =============================================================================
// PROPERTY: THE IRR IS A ROOT OF THE NPV FUNCTION
// =============================================================================

#[test]
fn property_generated_fund_irr_solves_npv() {
    for seed in 0..10 {
        for size in [3, 8, 16, 24] {
            let fund = CashFlowSeries::from_rows(&generate_fund(size, seed)).unwrap();
            let flows: Vec<(Date, f64)> = fund
                .as_signed_series()
                .iter()
                .map(|e| (e.date(), decimal_to_f64(e.amount())))
                .collect();

            let rate = xirr(&flows, &SolverConfig::default())
                .unwrap_or_else(|e| panic!("size={size}, seed={seed}: {e}"));
            let magnitude: f64 = flows.iter().map(|(_, a)| a.abs()).sum();
            assert!(
                npv(&flows, rate).abs() <= 1e-6 * magnitude,
                "residual too large for size={size}, seed={seed}"
            );
        }
    }
}

proptest! {
    #[test]
    fn prop_random_irr_solves_npv(
        call in 1.0e5_f64..1.0e6,
        dists in proptest::collection::vec((365i64..3000, 2.0e4_f64..6.0e5), 1..=5),
    ) {
        let base = Date::from_ymd(2015, 1, 1).unwrap();
        let mut flows = vec![(base, -call)];
        for (offset, amount) in dists {
            flows.push((base.add_days(offset), amount));
        }

        let rate = xirr(&flows, &SolverConfig::default()).unwrap();
        let magnitude: f64 = flows.iter().map(|(_, a)| a.abs()).sum();
        prop_assert!(npv(&flows, rate).abs() <= 1e-6 * magnitude);
    }

    #[test]
    fn prop_sanitized_values_hold_only_finite_numbers(x in proptest::num::f64::ANY) {
        if let MetricValue::Number(value) = MetricValue::sanitize(x) {
            prop_assert!(value.is_finite());
        }
    }
}
