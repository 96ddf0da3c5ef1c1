use std::collections::HashMap;

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use super::error::MetricError;
use super::specs::{all_gauges, GaugeSpec};

pub const DEFAULT_NAMESPACE: &str = "dump1090_";

/// Label name/value pairs for one sample.
pub type Labels<'a> = [(&'a str, &'a str)];

struct Entry {
    gauge: GaugeVec,
    labels: &'static [&'static str],
}

/// In-memory gauges, one `GaugeVec` per metric name.
///
/// Every gauge declares a fixed set of label names. Labels not given to
/// [`MetricStore::set`] are exported as empty strings, which scrapers treat
/// as absent. Each `GaugeVec` carries its own lock, so pipelines running on
/// different tasks can write concurrently.
pub struct MetricStore {
    registry: Registry,
    namespace: String,
    gauges: HashMap<&'static str, Entry>,
}

impl MetricStore {
    pub fn new(namespace: &str) -> Result<Self, MetricError> {
        let registry = Registry::new();
        let mut gauges = HashMap::new();

        for spec in all_gauges() {
            let gauge = register(&registry, namespace, spec)?;
            gauges.insert(
                spec.name,
                Entry {
                    gauge,
                    labels: spec.labels,
                },
            );
        }

        Ok(Self {
            registry,
            namespace: namespace.to_string(),
            gauges,
        })
    }

    /// Upsert the sample for `name` with the given label set.
    pub fn set(&self, name: &str, labels: &Labels, value: f64) -> Result<(), MetricError> {
        let entry = self.entry(name)?;
        let values = label_values(name, entry.labels, labels)?;
        entry
            .gauge
            .get_metric_with_label_values(&values)?
            .set(value);
        Ok(())
    }

    /// Current value of a sample, if it has been set.
    pub fn get(&self, name: &str, labels: &Labels) -> Option<f64> {
        let entry = self.gauges.get(name)?;
        let wanted = label_values(name, entry.labels, labels).ok()?;
        let full_name = format!("{}{}", self.namespace, name);

        let family = self
            .registry
            .gather()
            .into_iter()
            .find(|mf| mf.get_name() == full_name)?;

        family
            .get_metric()
            .iter()
            .find(|m| {
                entry.labels.iter().zip(&wanted).all(|(label, value)| {
                    let actual = m
                        .get_label()
                        .iter()
                        .find(|lp| lp.get_name() == *label)
                        .map(|lp| lp.get_value())
                        .unwrap_or("");
                    actual == *value
                })
            })
            .map(|m| m.get_gauge().get_value())
    }

    /// Number of label sets currently held for `name`.
    #[cfg(test)]
    pub fn series_count(&self, name: &str) -> usize {
        let full_name = format!("{}{}", self.namespace, name);
        self.registry
            .gather()
            .iter()
            .find(|mf| mf.get_name() == full_name)
            .map(|mf| mf.get_metric().len())
            .unwrap_or(0)
    }

    /// Render every sample in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, MetricError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn entry(&self, name: &str) -> Result<&Entry, MetricError> {
        self.gauges
            .get(name)
            .ok_or_else(|| MetricError::UnknownGauge(name.to_string()))
    }
}

fn register(registry: &Registry, namespace: &str, spec: &GaugeSpec) -> Result<GaugeVec, MetricError> {
    let opts = Opts::new(format!("{}{}", namespace, spec.name), spec.help);
    let gauge = GaugeVec::new(opts, spec.labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

fn label_values<'a>(
    name: &str,
    declared: &[&str],
    labels: &Labels<'a>,
) -> Result<Vec<&'a str>, MetricError> {
    let mut values = vec![""; declared.len()];
    for (label, value) in labels {
        let idx = declared
            .iter()
            .position(|d| d == label)
            .ok_or_else(|| MetricError::UnknownLabel {
                gauge: name.to_string(),
                label: label.to_string(),
            })?;
        values[idx] = *value;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::specs::{
        AIRCRAFT_ALTITUDE, DIRECTION, HEX, MAX_RANGE_BY_DIRECTION, OBSERVED, TIME_PERIOD,
    };
    use std::sync::Arc;

    fn store() -> MetricStore {
        MetricStore::new(DEFAULT_NAMESPACE).unwrap()
    }

    #[test]
    fn set_then_get() {
        let store = store();
        store.set(OBSERVED, &[(TIME_PERIOD, "latest")], 3.0).unwrap();
        assert_eq!(store.get(OBSERVED, &[(TIME_PERIOD, "latest")]), Some(3.0));
        assert_eq!(store.get(OBSERVED, &[(TIME_PERIOD, "last1min")]), None);
    }

    #[test]
    fn same_labels_overwrite() {
        let store = store();
        let labels = [(TIME_PERIOD, "latest"), (DIRECTION, "N")];
        store.set(MAX_RANGE_BY_DIRECTION, &labels, 10.0).unwrap();
        store.set(MAX_RANGE_BY_DIRECTION, &labels, 4.0).unwrap();
        assert_eq!(store.get(MAX_RANGE_BY_DIRECTION, &labels), Some(4.0));
        assert_eq!(store.series_count(MAX_RANGE_BY_DIRECTION), 1);
    }

    #[test]
    fn label_order_does_not_matter() {
        let store = store();
        store
            .set(MAX_RANGE_BY_DIRECTION, &[(DIRECTION, "W"), (TIME_PERIOD, "latest")], 1.5)
            .unwrap();
        assert_eq!(
            store.get(MAX_RANGE_BY_DIRECTION, &[(TIME_PERIOD, "latest"), (DIRECTION, "W")]),
            Some(1.5)
        );
    }

    #[test]
    fn omitted_labels_are_empty() {
        let store = store();
        store.set(AIRCRAFT_ALTITUDE, &[(HEX, "abc123")], 5000.0).unwrap();
        assert_eq!(
            store.get(AIRCRAFT_ALTITUDE, &[(HEX, "abc123"), ("reg", "")]),
            Some(5000.0)
        );
    }

    #[test]
    fn rejects_unknown_gauge_and_label() {
        let store = store();
        assert!(matches!(
            store.set("no_such_gauge", &[], 1.0),
            Err(MetricError::UnknownGauge(_))
        ));
        assert!(matches!(
            store.set(OBSERVED, &[("colour", "red")], 1.0),
            Err(MetricError::UnknownLabel { .. })
        ));
    }

    #[test]
    fn renders_with_namespace() {
        let store = store();
        store.set(OBSERVED, &[(TIME_PERIOD, "latest")], 7.0).unwrap();
        let text = store.render().unwrap();
        assert!(text.contains("# TYPE dump1090_recent_aircraft_observed gauge"));
        assert!(text.contains(r#"dump1090_recent_aircraft_observed{time_period="latest"} 7"#));
    }

    #[test]
    fn nan_is_stored() {
        let store = store();
        store.set("stats_local_signal_strength", &[(TIME_PERIOD, "last1min")], f64::NAN).unwrap();
        assert!(store
            .get("stats_local_signal_strength", &[(TIME_PERIOD, "last1min")])
            .unwrap()
            .is_nan());
    }

    #[test]
    fn concurrent_writers_do_not_lose_series() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let hex = format!("{:02x}{:04x}", t, i);
                        store
                            .set(AIRCRAFT_ALTITUDE, &[(HEX, hex.as_str())], i as f64)
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.series_count(AIRCRAFT_ALTITUDE), 400);
    }
}
