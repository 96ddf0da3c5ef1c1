//! Fixed table of every gauge the exporter publishes.

pub struct GaugeSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

/// A statistics gauge and where its value lives in `stats.json`.
pub struct StatSpec {
    /// Group object inside a time period; empty for the period itself.
    pub group: &'static str,
    pub field: &'static str,
    pub gauge: GaugeSpec,
}

pub const TIME_PERIOD: &str = "time_period";
pub const DIRECTION: &str = "direction";
pub const HEX: &str = "hex";
pub const FLIGHT: &str = "flight";
pub const REGISTRATION: &str = "reg";
pub const TYPE: &str = "type";

const SUMMARY_LABELS: &[&str] = &[TIME_PERIOD];
const DIRECTION_LABELS: &[&str] = &[TIME_PERIOD, DIRECTION];
const AIRCRAFT_LABELS: &[&str] = &[HEX, FLIGHT, REGISTRATION, TYPE];

pub const OBSERVED: &str = "recent_aircraft_observed";
pub const OBSERVED_WITH_POSITION: &str = "recent_aircraft_with_position";
pub const OBSERVED_WITH_MLAT: &str = "recent_aircraft_with_multilateration";
pub const MAX_RANGE: &str = "recent_aircraft_max_range";
pub const MESSAGES_TOTAL: &str = "messages_total";
pub const OBSERVED_WITH_DIRECTION: &str = "recent_aircraft_observed_with_direction";
pub const MAX_RANGE_BY_DIRECTION: &str = "recent_aircraft_max_range_by_direction";
pub const AIRCRAFT_LATITUDE: &str = "aircraft_latitude";
pub const AIRCRAFT_LONGITUDE: &str = "aircraft_longitude";
pub const AIRCRAFT_ALTITUDE: &str = "aircraft_altitude";
pub const AIRCRAFT_HEADING: &str = "aircraft_heading";

pub const AIRCRAFT_GAUGES: &[GaugeSpec] = &[
    GaugeSpec {
        name: OBSERVED,
        help: "Number of aircraft recently observed",
        labels: SUMMARY_LABELS,
    },
    GaugeSpec {
        name: OBSERVED_WITH_POSITION,
        help: "Number of aircraft recently observed with position",
        labels: SUMMARY_LABELS,
    },
    GaugeSpec {
        name: OBSERVED_WITH_MLAT,
        help: "Number of aircraft recently observed with multilateration",
        labels: SUMMARY_LABELS,
    },
    GaugeSpec {
        name: MAX_RANGE,
        help: "Maximum range of recently observed aircraft",
        labels: SUMMARY_LABELS,
    },
    GaugeSpec {
        name: MESSAGES_TOTAL,
        help: "Number of Mode-S messages processed since start up",
        labels: SUMMARY_LABELS,
    },
    GaugeSpec {
        name: OBSERVED_WITH_DIRECTION,
        help: "Number of aircraft recently observed per compass direction",
        labels: DIRECTION_LABELS,
    },
    GaugeSpec {
        name: MAX_RANGE_BY_DIRECTION,
        help: "Maximum range of recently observed aircraft per compass direction",
        labels: DIRECTION_LABELS,
    },
    GaugeSpec {
        name: AIRCRAFT_LATITUDE,
        help: "Latitude of a recently observed aircraft",
        labels: AIRCRAFT_LABELS,
    },
    GaugeSpec {
        name: AIRCRAFT_LONGITUDE,
        help: "Longitude of a recently observed aircraft",
        labels: AIRCRAFT_LABELS,
    },
    GaugeSpec {
        name: AIRCRAFT_ALTITUDE,
        help: "Altitude of a recently observed aircraft in feet",
        labels: AIRCRAFT_LABELS,
    },
    GaugeSpec {
        name: AIRCRAFT_HEADING,
        help: "Heading of a recently observed aircraft in degrees",
        labels: AIRCRAFT_LABELS,
    },
];

macro_rules! stat {
    ($group:literal, $field:literal, $name:literal, $help:literal) => {
        StatSpec {
            group: $group,
            field: $field,
            gauge: GaugeSpec {
                name: $name,
                help: $help,
                labels: SUMMARY_LABELS,
            },
        }
    };
}

pub const STATS_GAUGES: &[StatSpec] = &[
    stat!("", "messages", "messages", "Number of Mode-S messages processed"),
    stat!("cpr", "airborne", "stats_cpr_airborne", "Number of airborne CPR messages received"),
    stat!("cpr", "filtered", "stats_cpr_filtered", "Number of CPR messages ignored"),
    stat!("cpr", "global_bad", "stats_cpr_global_bad", "Global positions that were rejected"),
    stat!("cpr", "global_ok", "stats_cpr_global_ok", "Global positions successfully derived"),
    stat!("cpr", "global_range", "stats_cpr_global_range", "Global positions rejected due to receiver max range check"),
    stat!("cpr", "global_skipped", "stats_cpr_global_skipped", "Global position attempts skipped due to missing data"),
    stat!("cpr", "global_speed", "stats_cpr_global_speed", "Global positions rejected due to speed check"),
    stat!("cpr", "local_aircraft_relative", "stats_cpr_local_aircraft_relative", "Local positions found relative to a previous aircraft position"),
    stat!("cpr", "local_ok", "stats_cpr_local_ok", "Local (relative) positions successfully found"),
    stat!("cpr", "local_range", "stats_cpr_local_range", "Local positions not used due to receiver max range check"),
    stat!("cpr", "local_receiver_relative", "stats_cpr_local_receiver_relative", "Local positions found relative to the receiver position"),
    stat!("cpr", "local_skipped", "stats_cpr_local_skipped", "Local (relative) positions not used due to missing data"),
    stat!("cpr", "local_speed", "stats_cpr_local_speed", "Local positions not used as they failed the speed check"),
    stat!("cpr", "surface", "stats_cpr_surface", "Number of surface CPR messages received"),
    stat!("cpu", "background", "stats_cpu_background_milliseconds", "Time spent in network I/O, processing and periodic tasks"),
    stat!("cpu", "demod", "stats_cpu_demodulation_milliseconds", "Time spent demodulation and decoding data from SDR dongle"),
    stat!("cpu", "reader", "stats_cpu_reader_milliseconds", "Time spent reading sample data from SDR dongle"),
    stat!("local", "accepted", "stats_local_accepted", "Number of valid Mode S messages accepted with N-bit errors corrected"),
    stat!("local", "bad", "stats_local_bad", "Number of sample blocks that did not contain a valid message"),
    stat!("local", "modeac", "stats_local_modeac", "Number of Mode A / C messages decoded"),
    stat!("local", "modes", "stats_local_modes", "Number of Mode S preambles received"),
    stat!("local", "noise", "stats_local_noise", "Calculated receiver noise floor level"),
    stat!("local", "peak_signal", "stats_local_peak_signal", "Peak signal power level"),
    stat!("local", "signal", "stats_local_signal_strength", "Signal strength dBFS"),
    stat!("local", "strong_signals", "stats_local_strong_signals", "Number of messages that had a signal power above -3dBFS"),
    stat!("local", "unknown_icao", "stats_local_unknown_icao", "Number of Mode S preambles containing an unrecognized ICAO"),
    stat!("remote", "accepted", "stats_remote_accepted", "Number of valid Mode S messages accepted with N-bit errors corrected"),
    stat!("remote", "bad", "stats_remote_bad", "Number of sample blocks that did not contain a valid message"),
    stat!("remote", "modeac", "stats_remote_modeac", "Number of Mode A / C messages decoded"),
    stat!("remote", "modes", "stats_remote_modes", "Number of Mode S preambles received"),
    stat!("remote", "unknown_icao", "stats_remote_unknown_icao", "Number of Mode S preambles containing an unrecognized ICAO"),
    stat!("tracks", "all", "stats_tracks_all", "Number of tracks created"),
    stat!("tracks", "single_message", "stats_tracks_single_message", "Number of tracks consisting of only a single message"),
];

/// Fields dump1090 leaves out when no aircraft are in range.
pub const OPTIONAL_STATS_FIELDS: &[&str] = &["signal", "peak_signal"];

pub fn all_gauges() -> impl Iterator<Item = &'static GaugeSpec> {
    AIRCRAFT_GAUGES
        .iter()
        .chain(STATS_GAUGES.iter().map(|s| &s.gauge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn gauge_names_are_unique() {
        let names: Vec<_> = all_gauges().map(|g| g.name).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn stat_fields_are_unique_per_group() {
        let pairs: HashSet<_> = STATS_GAUGES.iter().map(|s| (s.group, s.field)).collect();
        assert_eq!(pairs.len(), STATS_GAUGES.len());
    }
}
