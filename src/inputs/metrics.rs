//! Recovery-objective metric normalization

use crate::inputs::ValidationError;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Value substituted for any absent metric. Large enough to fail every
/// realistic SLO threshold and rank last on every dimension.
pub const METRIC_SENTINEL: f64 = 1e9;

const RPO_KEYS: [&str; 3] = ["rpo_seconds", "rpo", "rpo_s"];
const RTO_KEYS: [&str; 3] = ["rto_seconds", "rto", "rto_s"];
const LATENCY_KEYS: [&str; 2] = ["latency_ms", "latency"];

/// Recovery metrics for one provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub rpo_seconds: f64,
    pub rto_seconds: f64,
    pub latency_ms: f64,
}

impl MetricSet {
    pub fn new(rpo_seconds: f64, rto_seconds: f64, latency_ms: f64) -> Self {
        Self {
            rpo_seconds,
            rto_seconds,
            latency_ms,
        }
    }

    /// All-sentinel metrics for a provider with no data
    pub fn missing() -> Self {
        Self::new(METRIC_SENTINEL, METRIC_SENTINEL, METRIC_SENTINEL)
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::missing()
    }
}

/// Per-provider metrics. Absent providers read as [`MetricSet::missing`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsTable(BTreeMap<Provider, MetricSet>);

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, provider: Provider, metrics: MetricSet) -> Self {
        self.0.insert(provider, metrics);
        self
    }

    pub fn get(&self, provider: Provider) -> MetricSet {
        self.0.get(&provider).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, provider: Provider, metrics: MetricSet) -> Option<MetricSet> {
        self.0.insert(provider, metrics)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Metrics for every roster provider, absent ones all-sentinel.
    pub fn resolved(&self, roster: &[Provider]) -> BTreeMap<Provider, MetricSet> {
        roster.iter().map(|p| (*p, self.get(*p))).collect()
    }
}

impl FromIterator<(Provider, MetricSet)> for MetricsTable {
    fn from_iter<I: IntoIterator<Item = (Provider, MetricSet)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse a metrics JSON document and normalize it.
pub fn parse_metrics_json(text: &str) -> Result<MetricsTable, ValidationError> {
    let raw: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::MetricsShape(e.to_string()))?;
    normalize_metrics(&raw)
}

/// Convert a provider-keyed document into canonical [`MetricSet`]s.
///
/// Absent or `null` fields become [`METRIC_SENTINEL`]; a `null` provider
/// entry becomes all sentinels. Values that are present but not a
/// non-negative finite number (JSON number or numeric string) are rejected.
pub fn normalize_metrics(raw: &Value) -> Result<MetricsTable, ValidationError> {
    let entries = match raw {
        Value::Null => return Ok(MetricsTable::new()),
        Value::Object(entries) => entries,
        other => {
            return Err(ValidationError::MetricsShape(format!(
                "expected an object keyed by provider, got {}",
                json_kind(other)
            )))
        }
    };

    let mut table = MetricsTable::new();
    for (name, entry) in entries {
        let provider: Provider = name.parse()?;
        let metrics = match entry {
            Value::Null => MetricSet::missing(),
            Value::Object(fields) => MetricSet {
                rpo_seconds: read_field(provider, fields, &RPO_KEYS)?,
                rto_seconds: read_field(provider, fields, &RTO_KEYS)?,
                latency_ms: read_field(provider, fields, &LATENCY_KEYS)?,
            },
            other => {
                return Err(ValidationError::MetricsShape(format!(
                    "entry for '{}' must be an object, got {}",
                    provider,
                    json_kind(other)
                )))
            }
        };

        if table.insert(provider, metrics).is_some() {
            return Err(ValidationError::MetricsShape(format!(
                "provider '{}' listed more than once",
                provider
            )));
        }
    }

    Ok(table)
}

fn read_field(
    provider: Provider,
    fields: &Map<String, Value>,
    keys: &[&str],
) -> Result<f64, ValidationError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|k| fields.get(*k).map(|v| (*k, v)))
    else {
        return Ok(METRIC_SENTINEL);
    };

    let invalid = |message: String| ValidationError::MetricValue {
        provider,
        field: key.to_string(),
        message,
    };

    let number = match value {
        Value::Null => return Ok(METRIC_SENTINEL),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{} is not representable", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("'{}' is not numeric", s)))?,
        other => return Err(invalid(format!("expected a number, got {}", json_kind(other)))),
    };

    if !number.is_finite() || number < 0.0 {
        return Err(invalid(format!("{} must be a non-negative finite number", number)));
    }

    Ok(number)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_canonical_fields() {
        let raw = json!({
            "azure": {"rpo_seconds": 200, "rto_seconds": 400, "latency_ms": 45},
            "gcp": {"rpo_seconds": 240.5, "rto_seconds": 480, "latency_ms": 55}
        });
        let table = normalize_metrics(&raw).unwrap();
        assert_eq!(table.get(Provider::Azure), MetricSet::new(200.0, 400.0, 45.0));
        assert_eq!(table.get(Provider::Gcp), MetricSet::new(240.5, 480.0, 55.0));
    }

    #[test]
    fn accepts_short_and_legacy_field_names() {
        let raw = json!({
            "azure": {"rpo": 300, "rto": 600, "latency_ms": 45},
            "gcp": {"rpo_s": 240, "rto_s": 480, "latency": 55}
        });
        let table = normalize_metrics(&raw).unwrap();
        assert_eq!(table.get(Provider::Azure), MetricSet::new(300.0, 600.0, 45.0));
        assert_eq!(table.get(Provider::Gcp), MetricSet::new(240.0, 480.0, 55.0));
    }

    #[test]
    fn missing_fields_become_sentinels() {
        let raw = json!({"azure": {"rpo": 100, "latency_ms": null}});
        let metrics = normalize_metrics(&raw).unwrap().get(Provider::Azure);
        assert_eq!(metrics.rpo_seconds, 100.0);
        assert_eq!(metrics.rto_seconds, METRIC_SENTINEL);
        assert_eq!(metrics.latency_ms, METRIC_SENTINEL);
    }

    #[test]
    fn missing_provider_is_all_sentinels() {
        let raw = json!({"azure": {"rpo": 1, "rto": 1, "latency_ms": 1}, "gcp": null});
        let table = normalize_metrics(&raw).unwrap();
        assert_eq!(table.get(Provider::Gcp), MetricSet::missing());
        assert_eq!(table.get(Provider::Onprem), MetricSet::missing());
    }

    #[test]
    fn null_document_is_empty_table() {
        assert!(normalize_metrics(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let raw = json!({"gcp": {"rpo": "240", "rto": " 480 ", "latency_ms": "55.5"}});
        let metrics = normalize_metrics(&raw).unwrap().get(Provider::Gcp);
        assert_eq!(metrics, MetricSet::new(240.0, 480.0, 55.5));
    }

    #[test]
    fn non_numeric_value_fails() {
        let raw = json!({"azure": {"rpo": "soon"}});
        let err = normalize_metrics(&raw).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MetricValue { provider: Provider::Azure, ref field, .. } if field == "rpo"
        ));

        let raw = json!({"azure": {"latency_ms": true}});
        assert!(normalize_metrics(&raw).is_err());
    }

    #[test]
    fn negative_value_fails() {
        let raw = json!({"gcp": {"rto_seconds": -5}});
        assert!(matches!(
            normalize_metrics(&raw),
            Err(ValidationError::MetricValue { provider: Provider::Gcp, .. })
        ));
    }

    #[test]
    fn unknown_provider_key_fails() {
        let raw = json!({"aws": {"rpo": 1}});
        assert_eq!(
            normalize_metrics(&raw).unwrap_err(),
            ValidationError::UnknownProvider("aws".to_string())
        );
    }

    #[test]
    fn non_object_shapes_fail() {
        assert!(matches!(
            normalize_metrics(&json!([1, 2])),
            Err(ValidationError::MetricsShape(_))
        ));
        assert!(matches!(
            normalize_metrics(&json!({"azure": 5})),
            Err(ValidationError::MetricsShape(_))
        ));
    }

    #[test]
    fn case_variants_of_one_provider_conflict() {
        let raw = json!({"azure": {"rpo": 1}, "AZURE": {"rpo": 2}});
        assert!(matches!(
            normalize_metrics(&raw),
            Err(ValidationError::MetricsShape(_))
        ));
    }

    #[test]
    fn parse_metrics_json_reports_syntax_errors() {
        assert!(matches!(
            parse_metrics_json("{not json"),
            Err(ValidationError::MetricsShape(_))
        ));
    }
}
