use serde_json::Value;

use super::error::PipelineError;
use crate::metrics::specs::{StatSpec, OPTIONAL_STATS_FIELDS, STATS_GAUGES, TIME_PERIOD};
use crate::metrics::MetricStore;

/// Copy the configured time periods of a `stats.json` document into gauges.
///
/// Missing fields are recorded as NaN instead of failing the cycle.
pub fn process_stats(
    document: &Value,
    time_periods: &[String],
    store: &MetricStore,
) -> Result<(), PipelineError> {
    let periods = document
        .as_object()
        .ok_or_else(|| PipelineError::malformed("stats", "expected an object of time periods"))?;

    for time_period in time_periods {
        let Some(tp_stats) = periods.get(time_period) else {
            log::error!("Problem extracting time period: {}", time_period);
            continue;
        };

        for group in missing_groups(tp_stats) {
            log::warn!(
                "Problem extracting group '{}' from time period {}",
                group,
                time_period
            );
        }

        let labels = [(TIME_PERIOD, time_period.as_str())];
        for spec in STATS_GAUGES {
            store.set(spec.gauge.name, &labels, stat_value(tp_stats, spec))?;
        }
    }

    Ok(())
}

/// Groups of the statistics table absent from one time period, each listed once.
fn missing_groups(tp_stats: &Value) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = Vec::new();
    for spec in STATS_GAUGES {
        if !spec.group.is_empty()
            && tp_stats.get(spec.group).is_none()
            && !missing.contains(&spec.group)
        {
            missing.push(spec.group);
        }
    }
    missing
}

fn stat_value(tp_stats: &Value, spec: &StatSpec) -> f64 {
    let group = if spec.group.is_empty() {
        tp_stats
    } else {
        match tp_stats.get(spec.group) {
            Some(group) => group,
            // Already reported once by `missing_groups`.
            None => return f64::NAN,
        }
    };

    let raw = match group.get(spec.field) {
        // 'accepted' counts arrive as a list indexed by corrected bits.
        Some(Value::Array(items)) => items.first(),
        other => other,
    };

    if let Some(value) = raw.and_then(Value::as_f64) {
        return value;
    }

    // 'signal' and 'peak_signal' are absent when no aircraft are in range.
    let expected_absent = raw.is_none() && OPTIONAL_STATS_FIELDS.contains(&spec.field);
    if !expected_absent {
        let group = if spec.group.is_empty() {
            " ".to_string()
        } else {
            format!(" {} ", spec.group)
        };
        log::warn!(
            "Problem extracting{}item '{}' from: {}",
            group,
            spec.field,
            tp_stats
        );
    }
    f64::NAN
}
