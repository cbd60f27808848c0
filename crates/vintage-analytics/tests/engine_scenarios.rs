//! Integration test: full metric reports for a quarterly buyout fund.
//!
//! The main scenario is a 2019-vintage fund marked quarterly through
//! March 2022, benchmarked against a broad equity index that dips in
//! March 2020 and rallies hard afterwards.
//!
//! | Date       | Flow        | NAV       | Index |
//! |------------|-------------|-----------|-------|
//! | 2019-03-31 | -2,500,000  |           | 2800  |
//! | 2019-09-30 | -1,500,000  |           | 2900  |
//! | 2020-03-31 | -1,000,000  | 4,600,000 | 2500  |
//! | 2020-09-30 |   +500,000  |           | 3350  |
//! | 2021-03-31 | +1,200,000  | 4,900,000 | 3950  |
//! | 2021-09-30 | +1,500,000  |           | 4300  |
//! | 2022-03-31 | +1,000,000  | 3,200,000 | 4500  |
//!
//! The fund alone earns a healthy 18.8% IRR, but the index rally makes it
//! a benchmark underperformer: KS PME lands below 1 and direct alpha goes
//! negative. Expected values were computed independently with arbitrary-
//! precision bisection.

use approx::assert_relative_eq;
use vintage_analytics::prelude::*;
use vintage_core::prelude::*;

fn quarterly_fund() -> Vec<FundRow> {
    vec![
        FundRow::flow("2019-03-31", dec!(-2500000)),
        FundRow::flow("2019-09-30", dec!(-1500000)),
        FundRow::flow("2020-03-31", dec!(-1000000)).with_nav(dec!(4600000)),
        FundRow::flow("2020-09-30", dec!(500000)),
        FundRow::flow("2021-03-31", dec!(1200000)).with_nav(dec!(4900000)),
        FundRow::flow("2021-09-30", dec!(1500000)),
        FundRow::flow("2022-03-31", dec!(1000000)).with_nav(dec!(3200000)),
    ]
}

fn quarterly_index() -> Vec<BenchmarkRow> {
    vec![
        BenchmarkRow::new("2019-03-31", dec!(2800)),
        BenchmarkRow::new("2019-09-30", dec!(2900)),
        BenchmarkRow::new("2020-03-31", dec!(2500)),
        BenchmarkRow::new("2020-09-30", dec!(3350)),
        BenchmarkRow::new("2021-03-31", dec!(3950)),
        BenchmarkRow::new("2021-09-30", dec!(4300)),
        BenchmarkRow::new("2022-03-31", dec!(4500)),
    ]
}

/// -1M call, 600k distributions after one and two years. Fund IRR is
/// 13.04% (2020 is a leap year, so the spans are 366 and 731 days).
fn realized_fund() -> CashFlowSeries {
    CashFlowSeries::from_rows(&[
        FundRow::flow("2020-01-01", dec!(-1000000)),
        FundRow::flow("2021-01-01", dec!(600000)),
        FundRow::flow("2022-01-01", dec!(600000)),
    ])
    .unwrap()
}

fn flat_benchmark() -> BenchmarkSeries {
    BenchmarkSeries::from_rows(&[
        BenchmarkRow::new("2020-01-01", dec!(100)),
        BenchmarkRow::new("2021-01-01", dec!(100)),
        BenchmarkRow::new("2022-01-01", dec!(100)),
    ])
    .unwrap()
}

fn number(report: &MetricsReport, key: MetricKey) -> f64 {
    report
        .get(key)
        .as_f64()
        .unwrap_or_else(|| panic!("{key} should be a number, got {:?}", report.get(key)))
}

#[test]
fn test_quarterly_fund_full_report() {
    let report = MetricsEngine::new()
        .run_rows(&quarterly_fund(), Some(&quarterly_index()))
        .unwrap();

    println!("=== QUARTERLY FUND REPORT ===");
    for (key, value) in report.iter() {
        println!("{key}: {value}");
    }

    // Cash totals and multiples
    assert_relative_eq!(number(&report, MetricKey::TotalContributions), 5_000_000.0);
    assert_relative_eq!(number(&report, MetricKey::TotalDistributions), 4_200_000.0);
    assert_relative_eq!(number(&report, MetricKey::FinalNav), 3_200_000.0);
    assert_relative_eq!(number(&report, MetricKey::Tvpi), 1.48, epsilon = 1e-12);
    assert_relative_eq!(number(&report, MetricKey::Dpi), 0.84, epsilon = 1e-12);
    assert_relative_eq!(number(&report, MetricKey::Rvpi), 0.64, epsilon = 1e-12);

    // Rates
    assert_relative_eq!(
        number(&report, MetricKey::FundIrr),
        0.187_630_878_073,
        epsilon = 1e-8
    );
    assert_relative_eq!(
        number(&report, MetricKey::BenchmarkIrr),
        0.171_175_985_690,
        epsilon = 1e-9
    );

    // PME family: the index rally beats the fund
    assert_relative_eq!(
        number(&report, MetricKey::KsPme),
        0.958_633_864_998,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        number(&report, MetricKey::PmePlusLambda),
        1.073_113_956_199,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        number(&report, MetricKey::DirectAlpha),
        -0.018_905_923_408,
        epsilon = 1e-8
    );
    assert_relative_eq!(
        number(&report, MetricKey::LongNickelsPme),
        0.209_498_705_460,
        epsilon = 1e-8
    );

    // Risk statistics over the two annual NAV windows
    assert_relative_eq!(
        number(&report, MetricKey::Volatility),
        0.191_991_725_859,
        epsilon = 1e-9
    );
    assert_eq!(report.get(MetricKey::MaxDrawdown).as_f64(), Some(0.0));
    assert_relative_eq!(
        number(&report, MetricKey::Alpha),
        0.077_490_167_458,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        number(&report, MetricKey::Beta),
        0.616_021_450_410,
        epsilon = 1e-9
    );

    // Every fund date is an exact index date
    assert!(!report.benchmark_coverage_partial());
}

#[test]
fn test_realized_fund_without_benchmark() {
    let report = MetricsEngine::new().run(&realized_fund(), None);

    assert_relative_eq!(
        number(&report, MetricKey::FundIrr),
        0.130_404_004_039,
        epsilon = 1e-9
    );
    assert_relative_eq!(number(&report, MetricKey::Tvpi), 1.2, epsilon = 1e-12);
    assert_relative_eq!(number(&report, MetricKey::Dpi), 1.2, epsilon = 1e-12);
    assert_eq!(report.get(MetricKey::Rvpi).as_f64(), Some(0.0));
    assert_eq!(report.get(MetricKey::FinalNav).as_f64(), Some(0.0));

    for key in MetricKey::ALL {
        if key.is_benchmark_dependent() {
            assert!(report.get(key).is_null(), "{key} should be null");
        }
    }
}

#[test]
fn test_flat_benchmark_degenerates_to_time_value_free_metrics() {
    // Against a flat index, future-valuing is a no-op: KS PME collapses
    // to TVPI, the replicating IRR to zero, and direct alpha to the log
    // of the fund's own growth rate
    let report = MetricsEngine::new().run(&realized_fund(), Some(&flat_benchmark()));

    assert_relative_eq!(number(&report, MetricKey::KsPme), 1.2, epsilon = 1e-12);
    assert_relative_eq!(
        number(&report, MetricKey::PmePlusLambda),
        0.833_333_333_333_333_3,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        number(&report, MetricKey::DirectAlpha),
        0.122_575_094_525,
        epsilon = 1e-9
    );
    assert!(number(&report, MetricKey::LongNickelsPme).abs() < 1e-8);
    assert_eq!(report.get(MetricKey::BenchmarkIrr).as_f64(), Some(0.0));
}

#[test]
fn test_benchmark_presence_does_not_change_standalone_metrics() {
    let engine = MetricsEngine::new();
    let bare = engine.run(&realized_fund(), None);
    let benchmarked = engine.run(&realized_fund(), Some(&flat_benchmark()));

    for key in MetricKey::ALL {
        if !key.is_benchmark_dependent() {
            assert_eq!(bare.get(key), benchmarked.get(key), "{key}");
        }
    }
}

#[test]
fn test_identical_inputs_serialize_identically() {
    let engine = MetricsEngine::new();
    let first = engine
        .run_rows(&quarterly_fund(), Some(&quarterly_index()))
        .unwrap();
    let second = engine
        .run_rows(&quarterly_fund(), Some(&quarterly_index()))
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_row_order_does_not_change_the_report() {
    let mut shuffled = quarterly_fund();
    shuffled.reverse();
    let engine = MetricsEngine::new();

    let forward = engine
        .run_rows(&quarterly_fund(), Some(&quarterly_index()))
        .unwrap();
    let reversed = engine.run_rows(&shuffled, Some(&quarterly_index())).unwrap();

    assert_eq!(
        serde_json::to_string(&forward).unwrap(),
        serde_json::to_string(&reversed).unwrap()
    );
}

#[test]
fn test_report_round_trips_through_json() {
    let report = MetricsEngine::new()
        .run_rows(&quarterly_fund(), Some(&quarterly_index()))
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let parsed: MetricsReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_undefined_metrics_serialize_as_null() {
    // Distribution-only fund: no contributions, so every multiple is
    // undefined and the IRR has no sign change
    let fund = CashFlowSeries::from_rows(&[
        FundRow::flow("2021-01-01", dec!(500)),
        FundRow::flow("2022-01-01", dec!(500)),
    ])
    .unwrap();
    let report = MetricsEngine::new().run(&fund, None);

    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("NaN"));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("TVPI").unwrap().is_null());
    assert!(value.get("Fund IRR").unwrap().is_null());
    assert_eq!(
        value.get("Total Distributions").unwrap().as_f64(),
        Some(1000.0)
    );
}

#[test]
fn test_partial_benchmark_coverage_is_flagged() {
    // Index history starts after the first call and ends before the
    // final mark
    let short_index = vec![
        BenchmarkRow::new("2019-06-30", dec!(2850)),
        BenchmarkRow::new("2020-06-30", dec!(3000)),
        BenchmarkRow::new("2021-06-30", dec!(4100)),
    ];
    let report = MetricsEngine::new()
        .run_rows(&quarterly_fund(), Some(&short_index))
        .unwrap();

    assert!(report.benchmark_coverage_partial());
    // Clamped, not dropped: benchmark metrics still compute
    assert!(!report.get(MetricKey::KsPme).is_null());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"benchmark_coverage_partial\":true"));
}

#[test]
fn test_invalid_fund_rows_are_rejected_up_front() {
    let rows = vec![
        FundRow::flow("2020-01-01", dec!(-1000)),
        FundRow::flow("sometime in June", dec!(500)),
    ];
    let err = MetricsEngine::new().run_rows(&rows, None).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidDate { row: 1, .. }));
}

#[test]
fn test_invalid_benchmark_rows_are_rejected_up_front() {
    let benchmark = vec![
        BenchmarkRow::new("2020-01-01", dec!(100)),
        BenchmarkRow::new("2020-06-01", dec!(-3)),
    ];
    let fund = vec![
        FundRow::flow("2020-01-01", dec!(-1000)),
        FundRow::flow("2021-01-01", dec!(1100)),
    ];
    let err = MetricsEngine::new()
        .run_rows(&fund, Some(&benchmark))
        .unwrap_err();
    assert!(matches!(err, ValidationError::NonPositiveLevel { row: 1, .. }));
}
