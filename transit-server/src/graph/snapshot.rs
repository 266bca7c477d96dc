//! JSON network snapshots.
//!
//! A snapshot is a flat, serde-friendly dump of stops, calendars, trips and
//! edges. Loading resolves every cross reference and builds a `MemoryGraph`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{EdgeKind, Label, MemoryGraph, NodeId, PropertyValue};

/// Error loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot is not valid JSON for this format
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// An edge references a stop id that is not in `stops`
    #[error("edge references unknown stop {0}")]
    UnknownStop(PropertyValue),

    /// A trip references a service id that is not in `calendars`
    #[error("trip {trip_id} references unknown calendar {service_id}")]
    UnknownCalendar { trip_id: String, service_id: String },
}

/// A stop record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub stop_id: PropertyValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_code: Option<PropertyValue>,
    pub stop_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_lon: Option<f64>,
}

/// A service calendar: which weekdays its trips run on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarRecord {
    pub service_id: String,
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
    #[serde(default)]
    pub sunday: bool,
}

impl CalendarRecord {
    fn flags(&self) -> [(&'static str, bool); 7] {
        [
            ("monday", self.monday),
            ("tuesday", self.tuesday),
            ("wednesday", self.wednesday),
            ("thursday", self.thursday),
            ("friday", self.friday),
            ("saturday", self.saturday),
            ("sunday", self.sunday),
        ]
    }
}

/// A trip record. Trips without a `service_id` never run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub trip_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
}

/// One scheduled hop between consecutive stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveRecord {
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub trip_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_time_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arr_time_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arr_time: Option<String>,
}

/// A walking transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkRecord {
    pub from: PropertyValue,
    pub to: PropertyValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_sec: Option<i64>,
}

/// A complete network snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub calendars: Vec<CalendarRecord>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
    #[serde(default)]
    pub drives: Vec<DriveRecord>,
    #[serde(default)]
    pub walks: Vec<WalkRecord>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Build the in-memory graph.
    ///
    /// Edges are added in snapshot order, so the planner sees them in the
    /// same order on every load.
    pub fn into_graph(self) -> Result<MemoryGraph, SnapshotError> {
        let mut graph = MemoryGraph::new();

        let mut stops: HashMap<PropertyValue, NodeId> = HashMap::new();
        for stop in &self.stops {
            let mut properties = vec![
                ("stop_id", stop.stop_id.clone()),
                ("stop_name", PropertyValue::from(stop.stop_name.as_str())),
            ];
            if let Some(code) = &stop.stop_code {
                properties.push(("stop_code", code.clone()));
            }
            if let Some(lat) = stop.stop_lat {
                properties.push(("stop_lat", PropertyValue::from(lat)));
            }
            if let Some(lon) = stop.stop_lon {
                properties.push(("stop_lon", PropertyValue::from(lon)));
            }
            let node = graph.add_node(Some(Label::Stop), properties);
            stops.entry(stop.stop_id.clone()).or_insert(node);
        }

        let mut calendars: HashMap<&str, NodeId> = HashMap::new();
        for calendar in &self.calendars {
            let node = graph.add_node(
                None,
                calendar
                    .flags()
                    .map(|(day, runs)| (day, PropertyValue::from(runs))),
            );
            calendars.insert(calendar.service_id.as_str(), node);
        }

        for trip in &self.trips {
            let calendar = match &trip.service_id {
                Some(service_id) => Some(*calendars.get(service_id.as_str()).ok_or_else(
                    || SnapshotError::UnknownCalendar {
                        trip_id: trip.trip_id.clone(),
                        service_id: service_id.clone(),
                    },
                )?),
                None => None,
            };
            graph.add_trip(
                &trip.trip_id,
                trip.trip_headsign.as_deref().unwrap_or_default(),
                calendar,
            );
        }

        let lookup = |id: &PropertyValue| {
            stops
                .get(id)
                .copied()
                .ok_or_else(|| SnapshotError::UnknownStop(id.clone()))
        };

        for drive in &self.drives {
            let from = lookup(&drive.from)?;
            let to = lookup(&drive.to)?;
            let mut properties = vec![("trip_id", PropertyValue::from(drive.trip_id.as_str()))];
            let times = [
                ("dep_time_sec", drive.dep_time_sec.map(PropertyValue::from)),
                ("arr_time_sec", drive.arr_time_sec.map(PropertyValue::from)),
                ("dep_time", drive.dep_time.clone().map(PropertyValue::from)),
                ("arr_time", drive.arr_time.clone().map(PropertyValue::from)),
            ];
            properties.extend(
                times
                    .into_iter()
                    .filter_map(|(attr, value)| value.map(|v| (attr, v))),
            );
            graph.add_edge(EdgeKind::Drive, from, to, properties);
        }

        for walk in &self.walks {
            let from = lookup(&walk.from)?;
            let to = lookup(&walk.to)?;
            graph.add_walk(from, to, walk.time_sec);
        }

        info!(
            stops = self.stops.len(),
            trips = self.trips.len(),
            drives = self.drives.len(),
            walks = self.walks.len(),
            "loaded network snapshot"
        );

        Ok(graph)
    }
}

/// Read a snapshot file and build its graph.
pub fn load_graph(path: impl AsRef<Path>) -> Result<MemoryGraph, SnapshotError> {
    Snapshot::read(path)?.into_graph()
}
