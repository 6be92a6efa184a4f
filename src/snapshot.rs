//! Serializable point-in-time captures of a registry.
//!
//! Requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! registro = { version = "0.2", features = ["serde"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::metric::Metric;
use crate::registry::Registry;

/// The captured value of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    /// A counter value.
    Counter(u64),
    /// A gauge value.
    Gauge(f64),
}

impl SnapshotValue {
    /// Returns the value as a u64, truncating gauge values.
    pub fn as_u64(&self) -> u64 {
        match self {
            SnapshotValue::Counter(v) => *v,
            SnapshotValue::Gauge(v) => *v as u64,
        }
    }

    /// Returns the value as an f64.
    pub fn as_f64(&self) -> f64 {
        match self {
            SnapshotValue::Counter(v) => *v as f64,
            SnapshotValue::Gauge(v) => *v,
        }
    }
}

/// A snapshot of a single named metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// The registered name, labels included.
    pub name: String,
    /// The value at capture time.
    pub value: SnapshotValue,
}

/// A snapshot of every metric in a registry, in first-registration order.
///
/// Values are read one metric at a time; concurrent writers may land between
/// reads, the capture is best-effort rather than transactional.
///
/// # Examples
///
/// ```rust
/// use registro::snapshot::RegistrySnapshot;
/// use registro::Registry;
///
/// let registry = Registry::new();
/// registry.new_counter("requests_total").unwrap().set(42);
///
/// let snapshot = RegistrySnapshot::capture(&registry);
/// assert_eq!(snapshot.get("requests_total").unwrap().value.as_u64(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// The captured metrics.
    pub metrics: Vec<MetricSnapshot>,
}

impl RegistrySnapshot {
    /// Captures the current value of every metric in `registry`.
    pub fn capture(registry: &Registry) -> Self {
        let metrics = registry
            .entries()
            .iter()
            .map(|entry| MetricSnapshot {
                name: entry.name().to_string(),
                value: match entry.metric() {
                    Metric::Counter(counter) => SnapshotValue::Counter(counter.get()),
                    Metric::Gauge(gauge) => SnapshotValue::Gauge(gauge.get()),
                },
            })
            .collect();
        RegistrySnapshot { metrics }
    }

    /// Finds a captured metric by name.
    pub fn get(&self, name: &str) -> Option<&MetricSnapshot> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_preserves_order_and_values() {
        let registry = Registry::new();
        registry.new_counter("a").unwrap().set(1);
        registry.new_gauge("b", || 2.5).unwrap();
        registry.new_counter("c").unwrap().set(3);

        let snapshot = RegistrySnapshot::capture(&registry);
        let names: Vec<&str> = snapshot.metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(snapshot.metrics[0].value, SnapshotValue::Counter(1));
        assert_eq!(snapshot.metrics[1].value, SnapshotValue::Gauge(2.5));
    }

    #[test]
    fn test_capture_is_detached() {
        let registry = Registry::new();
        let counter = registry.new_counter("detached").unwrap();
        counter.set(10);

        let snapshot = RegistrySnapshot::capture(&registry);
        counter.set(999);

        assert_eq!(snapshot.get("detached").unwrap().value.as_u64(), 10);
    }

    #[test]
    fn test_get_missing_name() {
        let registry = Registry::new();
        let snapshot = RegistrySnapshot::capture(&registry);
        assert!(snapshot.get("absent").is_none());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(SnapshotValue::Counter(7).as_f64(), 7.0);
        assert_eq!(SnapshotValue::Gauge(7.9).as_u64(), 7);
    }

    #[test]
    fn test_serialize_to_json() {
        let registry = Registry::new();
        registry.new_counter("requests_total").unwrap().set(42);

        let snapshot = RegistrySnapshot::capture(&registry);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"metrics":[{"name":"requests_total","value":42}]}"#
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"metrics":[{"name":"a","value":1},{"name":"b","value":2.5}]}"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.metrics.len(), 2);
        assert_eq!(snapshot.metrics[0].value, SnapshotValue::Counter(1));
        assert_eq!(snapshot.metrics[1].value, SnapshotValue::Gauge(2.5));
    }
}
