use serde::Deserialize;
use serde_json::Value;

use super::error::PipelineError;
use crate::geo::{self, Direction, Position};
use crate::knowledge::KnowledgeBase;
use crate::metrics::specs::{
    AIRCRAFT_ALTITUDE, AIRCRAFT_HEADING, AIRCRAFT_LATITUDE, AIRCRAFT_LONGITUDE, DIRECTION,
    FLIGHT, HEX, MAX_RANGE, MAX_RANGE_BY_DIRECTION, MESSAGES_TOTAL, OBSERVED,
    OBSERVED_WITH_DIRECTION, OBSERVED_WITH_MLAT, OBSERVED_WITH_POSITION, REGISTRATION,
    TIME_PERIOD, TYPE,
};
use crate::metrics::MetricStore;

/// Only aircraft heard from within this many seconds contribute.
pub const RECENT_THRESHOLD_SECS: f64 = 15.0;

/// Time period label for values derived from the current snapshot.
pub const LATEST: &str = "latest";

const FEED: &str = "aircraft";

/// Altitude as reported by dump1090: feet, or the string `"ground"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Altitude {
    Feet(f64),
    Label(String),
}

impl Altitude {
    pub fn feet(&self) -> Option<f64> {
        match self {
            Altitude::Feet(ft) => Some(*ft),
            Altitude::Label(label) if label == "ground" => Some(0.0),
            Altitude::Label(_) => None,
        }
    }
}

/// One entry of `aircraft.json`, with every optional field explicit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub hex: String,
    pub flight: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt_baro: Option<Altitude>,
    pub alt_geom: Option<Altitude>,
    pub track: Option<f64>,
    pub true_heading: Option<f64>,
    pub mag_heading: Option<f64>,
    /// Names of the fields that were derived from multilateration.
    pub mlat: Option<Vec<String>>,
    pub seen: Option<f64>,
    pub seen_pos: Option<f64>,
}

type Source = fn(&Observation) -> Option<f64>;

fn alt_geom(o: &Observation) -> Option<f64> {
    o.alt_geom.as_ref().and_then(Altitude::feet)
}

fn alt_baro(o: &Observation) -> Option<f64> {
    o.alt_baro.as_ref().and_then(Altitude::feet)
}

const ALTITUDE_SOURCES: &[(&str, Source)] = &[("alt_geom", alt_geom), ("alt_baro", alt_baro)];

fn track(o: &Observation) -> Option<f64> {
    o.track
}

fn true_heading(o: &Observation) -> Option<f64> {
    o.true_heading
}

fn mag_heading(o: &Observation) -> Option<f64> {
    o.mag_heading
}

const HEADING_SOURCES: &[(&str, Source)] = &[
    ("track", track),
    ("true_heading", true_heading),
    ("mag_heading", mag_heading),
];

fn first_present(obs: &Observation, sources: &[(&str, Source)]) -> Option<f64> {
    sources.iter().find_map(|(_, source)| source(obs))
}

impl Observation {
    pub fn is_recent(&self) -> bool {
        self.seen.is_some_and(|s| s < RECENT_THRESHOLD_SECS)
    }

    pub fn has_recent_position(&self) -> bool {
        self.seen_pos.is_some_and(|s| s < RECENT_THRESHOLD_SECS)
    }

    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.lat?, self.lon?))
    }

    /// Geometric altitude when known, barometric otherwise.
    pub fn altitude(&self) -> Option<f64> {
        first_present(self, ALTITUDE_SOURCES)
    }

    /// Track over ground, falling back to true then magnetic heading.
    pub fn heading(&self) -> Option<f64> {
        first_present(self, HEADING_SOURCES)
    }

    pub fn is_mlat_position(&self) -> bool {
        self.mlat
            .as_ref()
            .is_some_and(|fields| fields.iter().any(|f| f == "lat"))
    }

    pub fn callsign(&self) -> &str {
        self.flight.as_deref().map(str::trim).unwrap_or("")
    }
}

/// A validated `aircraft.json` document.
#[derive(Debug, Clone, Default)]
pub struct AircraftSnapshot {
    pub messages: f64,
    pub aircraft: Vec<Observation>,
}

impl AircraftSnapshot {
    pub fn from_document(document: &Value) -> Result<Self, PipelineError> {
        let messages = document
            .get("messages")
            .ok_or_else(|| PipelineError::malformed(FEED, "missing 'messages'"))?
            .as_f64()
            .ok_or_else(|| PipelineError::malformed(FEED, "'messages' is not a number"))?;

        let entries = document
            .get("aircraft")
            .ok_or_else(|| PipelineError::malformed(FEED, "missing 'aircraft'"))?
            .as_array()
            .ok_or_else(|| PipelineError::malformed(FEED, "'aircraft' is not a list"))?;

        let aircraft = entries
            .iter()
            .filter_map(|entry| match Observation::deserialize(entry) {
                Ok(obs) => Some(obs),
                Err(e) => {
                    log::debug!("Skipping aircraft entry {}: {}", entry, e);
                    None
                }
            })
            .collect();

        Ok(Self { messages, aircraft })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionSummary {
    pub observed: u32,
    pub max_range: f64,
}

/// Numbers derived from one aircraft snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AircraftSummary {
    pub messages: f64,
    pub observed: u32,
    pub with_position: u32,
    pub with_mlat: u32,
    pub max_range: f64,
    pub by_direction: [DirectionSummary; 8],
}

impl AircraftSummary {
    pub fn direction(&self, direction: Direction) -> DirectionSummary {
        self.by_direction[direction.index()]
    }

    fn record_range(&mut self, direction: Direction, distance: f64) {
        self.max_range = self.max_range.max(distance);
        let slot = &mut self.by_direction[direction.index()];
        slot.observed += 1;
        slot.max_range = slot.max_range.max(distance);
    }
}

/// Turn an `aircraft.json` document into gauges.
///
/// Per-aircraft position gauges are written for every aircraft with a recent
/// position. Range and direction figures need the receiver `origin`; without
/// it they stay at zero.
///
/// Per-aircraft series are never removed: an aircraft that leaves coverage
/// keeps exporting its last latitude, longitude, altitude and heading.
pub fn process_aircraft(
    document: &Value,
    origin: Option<Position>,
    knowledge: &KnowledgeBase,
    store: &MetricStore,
) -> Result<AircraftSummary, PipelineError> {
    let snapshot = AircraftSnapshot::from_document(document)?;
    let mut summary = AircraftSummary {
        messages: snapshot.messages,
        ..Default::default()
    };

    for obs in &snapshot.aircraft {
        if obs.is_recent() {
            summary.observed += 1;
        }
        if !obs.has_recent_position() {
            continue;
        }
        summary.with_position += 1;

        if obs.is_mlat_position() {
            summary.with_mlat += 1;
        }

        let Some(position) = obs.position() else {
            log::debug!("Aircraft {} has a recent position age but no lat/lon", obs.hex);
            continue;
        };

        write_aircraft(store, obs, position, knowledge)?;

        if let Some(origin) = origin {
            let distance = geo::distance(origin, position);
            let direction = geo::octant(geo::bearing(origin, position));
            summary.record_range(direction, distance);
        }
    }

    write_summary(store, &summary)?;

    log::debug!(
        "aircraft: observed={}, with_pos={}, with_mlat={}, max_range={}, messages={}",
        summary.observed,
        summary.with_position,
        summary.with_mlat,
        summary.max_range,
        summary.messages
    );

    Ok(summary)
}

fn write_aircraft(
    store: &MetricStore,
    obs: &Observation,
    position: Position,
    knowledge: &KnowledgeBase,
) -> Result<(), PipelineError> {
    let record = knowledge.lookup(&obs.hex);
    let registration = record
        .and_then(|r| r.registration.as_deref())
        .unwrap_or("");
    let type_code = record.and_then(|r| r.type_code.as_deref()).unwrap_or("");

    let labels = [
        (HEX, obs.hex.as_str()),
        (FLIGHT, obs.callsign()),
        (REGISTRATION, registration),
        (TYPE, type_code),
    ];

    store.set(AIRCRAFT_LATITUDE, &labels, position.latitude)?;
    store.set(AIRCRAFT_LONGITUDE, &labels, position.longitude)?;
    if let Some(altitude) = obs.altitude() {
        store.set(AIRCRAFT_ALTITUDE, &labels, altitude)?;
    }
    if let Some(heading) = obs.heading() {
        store.set(AIRCRAFT_HEADING, &labels, heading)?;
    }
    Ok(())
}

fn write_summary(store: &MetricStore, summary: &AircraftSummary) -> Result<(), PipelineError> {
    let labels = [(TIME_PERIOD, LATEST)];
    store.set(OBSERVED, &labels, summary.observed as f64)?;
    store.set(OBSERVED_WITH_POSITION, &labels, summary.with_position as f64)?;
    store.set(OBSERVED_WITH_MLAT, &labels, summary.with_mlat as f64)?;
    store.set(MAX_RANGE, &labels, summary.max_range)?;
    store.set(MESSAGES_TOTAL, &labels, summary.messages)?;

    for direction in Direction::ALL {
        let labels = [(TIME_PERIOD, LATEST), (DIRECTION, direction.as_str())];
        let slot = summary.direction(direction);
        store.set(OBSERVED_WITH_DIRECTION, &labels, slot.observed as f64)?;
        store.set(MAX_RANGE_BY_DIRECTION, &labels, slot.max_range)?;
    }
    Ok(())
}
