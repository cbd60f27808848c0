//! Sanitized metrics report with a fixed key vocabulary.
//!
//! The report is the engine's terminal output: a closed set of metric
//! keys, each holding a JSON-safe value. Callers depend on two contracts
//! here:
//!
//! - **Key-set stability**: every key is present in every report, whether
//!   or not a benchmark was supplied. "Not computable" is a null value,
//!   never a missing key.
//! - **Strict-encoder safety**: no raw NaN or float infinity ever reaches
//!   the wire. NaN becomes `null`; infinities become the string sentinels
//!   `"Infinity"` / `"-Infinity"`.
//!
//! Serialization order follows [`MetricKey`] declaration order, so
//! identical reports serialize byte-identically.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JSON sentinel for positive infinity.
pub const INFINITY_SENTINEL: &str = "Infinity";

/// JSON sentinel for negative infinity.
pub const NEG_INFINITY_SENTINEL: &str = "-Infinity";

/// Report field carrying the benchmark coverage quality flag.
const COVERAGE_FLAG: &str = "benchmark_coverage_partial";

/// The closed vocabulary of report keys.
///
/// Declaration order is serialization order. Adding a variant is an API
/// change: downstream consumers key charts and tables off these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKey {
    /// Fund internal rate of return (XIRR, actual/365).
    FundIrr,
    /// Annualized benchmark return over the fund's window.
    BenchmarkIrr,
    /// Total value to paid-in multiple.
    Tvpi,
    /// Distributed to paid-in multiple.
    Dpi,
    /// Residual value to paid-in multiple.
    Rvpi,
    /// Kaplan-Schoar public market equivalent.
    KsPme,
    /// PME+ distribution scaling factor.
    PmePlusLambda,
    /// Continuously compounded excess return over the benchmark.
    DirectAlpha,
    /// IRR of the index-replicating portfolio.
    LongNickelsPme,
    /// Total capital called, positive.
    TotalContributions,
    /// Total capital distributed, positive.
    TotalDistributions,
    /// Latest reported net asset value.
    FinalNav,
    /// Annualized volatility of flow-adjusted NAV returns.
    Volatility,
    /// Largest peak-to-trough decline of the compounded return index.
    MaxDrawdown,
    /// Annualized regression intercept against benchmark returns.
    Alpha,
    /// Regression slope against benchmark returns.
    Beta,
}

impl MetricKey {
    /// Every key, in report order.
    pub const ALL: [MetricKey; 16] = [
        MetricKey::FundIrr,
        MetricKey::BenchmarkIrr,
        MetricKey::Tvpi,
        MetricKey::Dpi,
        MetricKey::Rvpi,
        MetricKey::KsPme,
        MetricKey::PmePlusLambda,
        MetricKey::DirectAlpha,
        MetricKey::LongNickelsPme,
        MetricKey::TotalContributions,
        MetricKey::TotalDistributions,
        MetricKey::FinalNav,
        MetricKey::Volatility,
        MetricKey::MaxDrawdown,
        MetricKey::Alpha,
        MetricKey::Beta,
    ];

    /// Returns the key's report name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKey::FundIrr => "Fund IRR",
            MetricKey::BenchmarkIrr => "Benchmark IRR",
            MetricKey::Tvpi => "TVPI",
            MetricKey::Dpi => "DPI",
            MetricKey::Rvpi => "RVPI",
            MetricKey::KsPme => "KS PME",
            MetricKey::PmePlusLambda => "PME+ Lambda",
            MetricKey::DirectAlpha => "Direct Alpha",
            MetricKey::LongNickelsPme => "Long-Nickels PME",
            MetricKey::TotalContributions => "Total Contributions",
            MetricKey::TotalDistributions => "Total Distributions",
            MetricKey::FinalNav => "Final NAV",
            MetricKey::Volatility => "Volatility",
            MetricKey::MaxDrawdown => "Max Drawdown",
            MetricKey::Alpha => "Alpha",
            MetricKey::Beta => "Beta",
        }
    }

    /// Parses a report name back to its key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }

    /// Returns true for metrics that require a benchmark series.
    ///
    /// These keys stay null in any report computed without a benchmark.
    #[must_use]
    pub const fn is_benchmark_dependent(self) -> bool {
        matches!(
            self,
            MetricKey::BenchmarkIrr
                | MetricKey::KsPme
                | MetricKey::PmePlusLambda
                | MetricKey::DirectAlpha
                | MetricKey::LongNickelsPme
                | MetricKey::Volatility
                | MetricKey::MaxDrawdown
                | MetricKey::Alpha
                | MetricKey::Beta
        )
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MetricKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown metric key `{name}`")))
    }
}

/// A JSON-safe metric value.
///
/// Values enter a report only through [`MetricValue::sanitize`] or
/// [`MetricValue::from_option`], so `Number` always holds a finite float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// A finite number.
    Number(f64),
    /// Positive infinity, serialized as `"Infinity"`.
    Infinity,
    /// Negative infinity, serialized as `"-Infinity"`.
    NegInfinity,
    /// Not computable for this input, serialized as `null`.
    Null,
}

impl MetricValue {
    /// Coerces a raw calculation result into a JSON-safe value.
    ///
    /// NaN maps to `Null`, the infinities to their sentinel variants.
    #[must_use]
    pub fn sanitize(value: f64) -> Self {
        if value.is_nan() {
            MetricValue::Null
        } else if value == f64::INFINITY {
            MetricValue::Infinity
        } else if value == f64::NEG_INFINITY {
            MetricValue::NegInfinity
        } else {
            MetricValue::Number(value)
        }
    }

    /// Coerces an optional result; `None` maps to `Null`.
    #[must_use]
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(MetricValue::Null, Self::sanitize)
    }

    /// Returns the finite number, if this value holds one.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            MetricValue::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if the value is `Null`.
    #[must_use]
    pub fn is_null(self) -> bool {
        self == MetricValue::Null
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(value) => write!(f, "{value}"),
            MetricValue::Infinity => f.write_str(INFINITY_SENTINEL),
            MetricValue::NegInfinity => f.write_str(NEG_INFINITY_SENTINEL),
            MetricValue::Null => f.write_str("null"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MetricValue::Number(value) => serializer.serialize_f64(*value),
            MetricValue::Infinity => serializer.serialize_str(INFINITY_SENTINEL),
            MetricValue::NegInfinity => serializer.serialize_str(NEG_INFINITY_SENTINEL),
            MetricValue::Null => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = MetricValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number, null, \"Infinity\" or \"-Infinity\"")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<MetricValue, E> {
                Ok(MetricValue::sanitize(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<MetricValue, E> {
                Ok(MetricValue::sanitize(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<MetricValue, E> {
                Ok(MetricValue::sanitize(value as f64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<MetricValue, E> {
                match value {
                    INFINITY_SENTINEL => Ok(MetricValue::Infinity),
                    NEG_INFINITY_SENTINEL => Ok(MetricValue::NegInfinity),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<MetricValue, E> {
                Ok(MetricValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<MetricValue, E> {
                Ok(MetricValue::Null)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// The engine's terminal output: every metric key mapped to a sanitized
/// value, plus the benchmark coverage quality flag.
///
/// A fresh report holds `Null` for every key; the engine overwrites what
/// it can compute. Reports for identical inputs serialize to identical
/// bytes.
///
/// # Example
///
/// ```rust
/// use vintage_analytics::report::{MetricKey, MetricValue, MetricsReport};
///
/// let mut report = MetricsReport::new();
/// report.set(MetricKey::Tvpi, MetricValue::sanitize(1.2));
///
/// assert_eq!(report.get(MetricKey::Tvpi).as_f64(), Some(1.2));
/// assert!(report.get(MetricKey::KsPme).is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    values: BTreeMap<MetricKey, MetricValue>,
    benchmark_coverage_partial: bool,
}

impl MetricsReport {
    /// Creates a report with every key present and null.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: MetricKey::ALL
                .iter()
                .map(|&key| (key, MetricValue::Null))
                .collect(),
            benchmark_coverage_partial: false,
        }
    }

    /// Sets a metric value.
    pub fn set(&mut self, key: MetricKey, value: MetricValue) {
        self.values.insert(key, value);
    }

    /// Returns the value for a key. Every key is always present.
    #[must_use]
    pub fn get(&self, key: MetricKey) -> MetricValue {
        self.values
            .get(&key)
            .copied()
            .unwrap_or(MetricValue::Null)
    }

    /// Iterates keys and values in report order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, MetricValue)> + '_ {
        self.values.iter().map(|(&key, &value)| (key, value))
    }

    /// Returns true when any fund date fell outside the benchmark's range
    /// and was clamped to its nearest boundary.
    #[must_use]
    pub fn benchmark_coverage_partial(&self) -> bool {
        self.benchmark_coverage_partial
    }

    /// Sets the coverage quality flag.
    pub fn set_benchmark_coverage_partial(&mut self, partial: bool) {
        self.benchmark_coverage_partial = partial;
    }
}

impl Default for MetricsReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for MetricsReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.serialize_entry(COVERAGE_FLAG, &self.benchmark_coverage_partial)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for MetricsReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = MetricsReport;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a metrics report object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<MetricsReport, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut report = MetricsReport::new();
                while let Some(name) = map.next_key::<String>()? {
                    if name == COVERAGE_FLAG {
                        report.benchmark_coverage_partial = map.next_value()?;
                    } else if let Some(key) = MetricKey::from_name(&name) {
                        report.values.insert(key, map.next_value()?);
                    } else {
                        return Err(de::Error::custom(format!("unknown metric key `{name}`")));
                    }
                }
                Ok(report)
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_special_values() {
        assert_eq!(MetricValue::sanitize(1.5), MetricValue::Number(1.5));
        assert_eq!(MetricValue::sanitize(f64::NAN), MetricValue::Null);
        assert_eq!(MetricValue::sanitize(f64::INFINITY), MetricValue::Infinity);
        assert_eq!(
            MetricValue::sanitize(f64::NEG_INFINITY),
            MetricValue::NegInfinity
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(MetricValue::from_option(None), MetricValue::Null);
        assert_eq!(
            MetricValue::from_option(Some(0.25)),
            MetricValue::Number(0.25)
        );
        assert_eq!(MetricValue::from_option(Some(f64::NAN)), MetricValue::Null);
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in MetricKey::ALL {
            assert_eq!(MetricKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(MetricKey::from_name("Sharpe Ratio"), None);
    }

    #[test]
    fn test_benchmark_dependent_partition() {
        let dependent: Vec<MetricKey> = MetricKey::ALL
            .iter()
            .copied()
            .filter(|k| k.is_benchmark_dependent())
            .collect();
        assert_eq!(dependent.len(), 9);
        assert!(!MetricKey::Tvpi.is_benchmark_dependent());
        assert!(!MetricKey::FundIrr.is_benchmark_dependent());
        assert!(MetricKey::KsPme.is_benchmark_dependent());
        assert!(MetricKey::Volatility.is_benchmark_dependent());
    }

    #[test]
    fn test_fresh_report_is_all_null() {
        let report = MetricsReport::new();
        for key in MetricKey::ALL {
            assert!(report.get(key).is_null(), "{key} should start null");
        }
        assert!(!report.benchmark_coverage_partial());
    }

    #[test]
    fn test_value_serialization() {
        assert_eq!(
            serde_json::to_string(&MetricValue::Number(1.2)).unwrap(),
            "1.2"
        );
        assert_eq!(
            serde_json::to_string(&MetricValue::Infinity).unwrap(),
            "\"Infinity\""
        );
        assert_eq!(
            serde_json::to_string(&MetricValue::NegInfinity).unwrap(),
            "\"-Infinity\""
        );
        assert_eq!(serde_json::to_string(&MetricValue::Null).unwrap(), "null");
    }

    #[test]
    fn test_value_deserialization() {
        let value: MetricValue = serde_json::from_str("1.2").unwrap();
        assert_eq!(value, MetricValue::Number(1.2));
        let value: MetricValue = serde_json::from_str("3").unwrap();
        assert_eq!(value, MetricValue::Number(3.0));
        let value: MetricValue = serde_json::from_str("\"Infinity\"").unwrap();
        assert_eq!(value, MetricValue::Infinity);
        let value: MetricValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, MetricValue::Null);
        assert!(serde_json::from_str::<MetricValue>("\"lots\"").is_err());
    }

    #[test]
    fn test_report_serialization_order_is_fixed() {
        let report = MetricsReport::new();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            "{\"Fund IRR\":null,\"Benchmark IRR\":null,\"TVPI\":null,\"DPI\":null,\
             \"RVPI\":null,\"KS PME\":null,\"PME+ Lambda\":null,\"Direct Alpha\":null,\
             \"Long-Nickels PME\":null,\"Total Contributions\":null,\
             \"Total Distributions\":null,\"Final NAV\":null,\"Volatility\":null,\
             \"Max Drawdown\":null,\"Alpha\":null,\"Beta\":null,\
             \"benchmark_coverage_partial\":false}"
        );
    }

    #[test]
    fn test_report_round_trip() {
        let mut report = MetricsReport::new();
        report.set(MetricKey::Tvpi, MetricValue::Number(1.35));
        report.set(MetricKey::FundIrr, MetricValue::Number(0.1304));
        report.set(MetricKey::KsPme, MetricValue::Infinity);
        report.set_benchmark_coverage_partial(true);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: MetricsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_report_rejects_unknown_keys() {
        let result = serde_json::from_str::<MetricsReport>("{\"Sharpe Ratio\":1.0}");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_keys_deserialize_as_null() {
        let parsed: MetricsReport = serde_json::from_str("{\"TVPI\":2.0}").unwrap();
        assert_eq!(parsed.get(MetricKey::Tvpi), MetricValue::Number(2.0));
        assert!(parsed.get(MetricKey::FundIrr).is_null());
        assert!(!parsed.benchmark_coverage_partial());
    }

    #[test]
    fn test_display() {
        assert_eq!(MetricValue::Number(1.5).to_string(), "1.5");
        assert_eq!(MetricValue::Infinity.to_string(), "Infinity");
        assert_eq!(MetricValue::Null.to_string(), "null");
        assert_eq!(MetricKey::KsPme.to_string(), "KS PME");
    }
}
