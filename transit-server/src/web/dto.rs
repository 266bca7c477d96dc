//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Leg;
use crate::graph::{GraphStore, NodeId, PropertyValue};
use crate::planner::{Location, PlanResult, RouteRequest};

/// Query string for `GET /route`.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Source stop id or code
    pub from: String,

    /// Destination stop id or code
    pub to: String,

    /// Departure time, "HH:MM" or "HH:MM:SS"
    pub time: String,

    /// Weekday name (defaults to monday)
    pub day: Option<String>,
}

impl From<RouteQuery> for RouteRequest {
    fn from(query: RouteQuery) -> Self {
        RouteRequest {
            from: query.from,
            to: query.to,
            start_time: query.time,
            day: query.day,
        }
    }
}

/// One leg of a planned route.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LegResult {
    /// "T1 (Kier: Centrum)" or "Walking transfer"
    pub line: String,

    /// Boarding stop name
    pub start_stop: String,

    /// Departure, "HH:MM:SS" (hour 00-23)
    pub dep_time: String,

    /// Alighting stop name
    pub end_stop: String,

    /// Arrival, "HH:MM:SS" (hour 00-23)
    pub arr_time: String,

    /// Number of hops covered by this leg
    pub stops_count: usize,

    /// Whether the leg starts the day after the query day
    pub is_next_day: bool,
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            line: leg.line().to_string(),
            start_stop: leg.start_stop().to_string(),
            dep_time: leg.dep_time(),
            end_stop: leg.end_stop().to_string(),
            arr_time: leg.arr_time(),
            stops_count: leg.stops_count(),
            is_next_day: leg.is_next_day(),
        }
    }
}

/// Response for `GET /route`.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Legs in travel order; empty when no route exists
    pub legs: Vec<LegResult>,

    /// Search states examined
    pub states_explored: usize,
}

impl RouteResponse {
    pub fn from_result(result: &PlanResult) -> Self {
        Self {
            legs: result.legs.iter().map(LegResult::from_leg).collect(),
            states_explored: result.states_popped,
        }
    }
}

/// Response for `GET /stops/{id}`.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub stop_id: Option<PropertyValue>,
    pub stop_code: Option<PropertyValue>,
    pub stop_name: Option<String>,
}

impl StopResult {
    pub fn from_node<G: GraphStore>(graph: &G, node: NodeId) -> Self {
        Self {
            stop_id: graph.node_property(node, "stop_id").cloned(),
            stop_code: graph.node_property(node, "stop_code").cloned(),
            stop_name: graph.node_str(node, "stop_name").map(str::to_string),
        }
    }
}

/// Response for `GET /stops/random-location`.
#[derive(Debug, Serialize)]
pub struct LocationResult {
    /// Degrees north
    pub latitude: f64,

    /// Degrees east
    pub longitude: f64,
}

impl From<Location> for LocationResult {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, Segment, ServiceTime};
    use crate::graph::MemoryGraph;

    fn segment(dep: u32, arr: u32) -> Segment {
        Segment {
            start_name: "Alpha".to_string(),
            end_name: "Bravo".to_string(),
            mode: Mode::Trip("T1".to_string()),
            departure: ServiceTime::from_secs(dep),
            arrival: ServiceTime::from_secs(arr),
            is_next_day: ServiceTime::from_secs(dep).is_next_day(),
        }
    }

    #[test]
    fn leg_result_renders_clock_times() {
        let leg = Leg::from_run(
            "T1 (Kier: Bravo)".to_string(),
            &[segment(86_400 + 3_600, 86_400 + 4_200)],
        )
        .unwrap();

        let result = LegResult::from_leg(&leg);
        assert_eq!(
            result,
            LegResult {
                line: "T1 (Kier: Bravo)".to_string(),
                start_stop: "Alpha".to_string(),
                dep_time: "01:00:00".to_string(),
                end_stop: "Bravo".to_string(),
                arr_time: "01:10:00".to_string(),
                stops_count: 1,
                is_next_day: true,
            }
        );
    }

    #[test]
    fn leg_result_json_shape() {
        let leg = Leg::from_run("Walking transfer".to_string(), &[segment(60, 120)]).unwrap();
        let json = serde_json::to_value(LegResult::from_leg(&leg)).unwrap();

        assert_eq!(json["line"], "Walking transfer");
        assert_eq!(json["dep_time"], "00:01:00");
        assert_eq!(json["arr_time"], "00:02:00");
        assert_eq!(json["stops_count"], 1);
        assert_eq!(json["is_next_day"], false);
    }

    #[test]
    fn route_query_defaults() {
        let query: RouteQuery =
            serde_json::from_str(r#"{"from": "A", "to": "B", "time": "08:00"}"#).unwrap();
        let request = RouteRequest::from(query);

        assert_eq!(request.from, "A");
        assert_eq!(request.start_time, "08:00");
        assert_eq!(request.day, None);
    }

    #[test]
    fn stop_result_keeps_property_types() {
        let mut g = MemoryGraph::new();
        let stop = g.add_stop(17_i64, "N-17", "North");

        let json = serde_json::to_value(StopResult::from_node(&g, stop)).unwrap();
        assert_eq!(json["stop_id"], 17);
        assert_eq!(json["stop_code"], "N-17");
        assert_eq!(json["stop_name"], "North");
    }

    #[test]
    fn location_result_shape() {
        let json = serde_json::to_value(LocationResult::from(Location {
            latitude: 52.5,
            longitude: 21.25,
        }))
        .unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 52.5, "longitude": 21.25}));
    }
}
