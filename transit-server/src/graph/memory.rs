//! In-memory graph store.
//!
//! Nodes and edges live in flat vectors and are addressed by index. Labelled
//! nodes are indexed by every property at insertion time so `find_node` is a
//! hash lookup.

use std::collections::HashMap;

use chrono::Weekday;

use super::{Edge, EdgeId, EdgeKind, GraphStore, Label, NodeId, PropertyValue};
use crate::domain::calendar_key;

type Properties = HashMap<String, PropertyValue>;

#[derive(Debug, Clone)]
struct NodeData {
    label: Option<Label>,
    properties: Properties,
}

#[derive(Debug, Clone)]
struct EdgeData {
    kind: EdgeKind,
    start: NodeId,
    end: NodeId,
    properties: Properties,
}

/// An immutable-once-built transit graph held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    /// Outgoing edge ids per node, in insertion order.
    outgoing: Vec<Vec<EdgeId>>,
    by_label: HashMap<Label, Vec<NodeId>>,
    /// First node inserted for each (label, attribute, value).
    index: HashMap<(Label, String, PropertyValue), NodeId>,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes of any label.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges of any kind.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a node with the given label and properties.
    pub fn add_node<K, I>(&mut self, label: Option<Label>, properties: I) -> NodeId
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropertyValue)>,
    {
        let id = NodeId(self.nodes.len() as u32);
        let properties: Properties = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();

        if let Some(label) = label {
            self.by_label.entry(label).or_default().push(id);
            for (attr, value) in &properties {
                self.index
                    .entry((label, attr.clone(), value.clone()))
                    .or_insert(id);
            }
        }

        self.nodes.push(NodeData { label, properties });
        self.outgoing.push(Vec::new());
        id
    }

    /// Add a directed edge. Returns `None` if either endpoint is unknown.
    pub fn add_edge<K, I>(
        &mut self,
        kind: EdgeKind,
        start: NodeId,
        end: NodeId,
        properties: I,
    ) -> Option<EdgeId>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropertyValue)>,
    {
        if end.0 as usize >= self.nodes.len() {
            return None;
        }
        let id = EdgeId(self.edges.len() as u32);
        self.outgoing.get_mut(start.0 as usize)?.push(id);
        self.edges.push(EdgeData {
            kind,
            start,
            end,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        });
        Some(id)
    }

    /// Add a `Stop` node.
    pub fn add_stop(
        &mut self,
        stop_id: impl Into<PropertyValue>,
        stop_code: impl Into<PropertyValue>,
        stop_name: &str,
    ) -> NodeId {
        self.add_node(
            Some(Label::Stop),
            [
                ("stop_id", stop_id.into()),
                ("stop_code", stop_code.into()),
                ("stop_name", PropertyValue::from(stop_name)),
            ],
        )
    }

    /// Add a `Stop` node with `stop_lat`/`stop_lon` coordinates in degrees.
    pub fn add_stop_at(
        &mut self,
        stop_id: impl Into<PropertyValue>,
        stop_code: impl Into<PropertyValue>,
        stop_name: &str,
        lat: f64,
        lon: f64,
    ) -> NodeId {
        self.add_node(
            Some(Label::Stop),
            [
                ("stop_id", stop_id.into()),
                ("stop_code", stop_code.into()),
                ("stop_name", PropertyValue::from(stop_name)),
                ("stop_lat", PropertyValue::from(lat)),
                ("stop_lon", PropertyValue::from(lon)),
            ],
        )
    }

    /// Add an unlabelled calendar node running on the given days.
    pub fn add_calendar(&mut self, days: &[Weekday]) -> NodeId {
        let all = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        self.add_node(
            None,
            all.map(|day| (calendar_key(day), PropertyValue::from(days.contains(&day)))),
        )
    }

    /// Add a `Trip` node, optionally linked to a calendar.
    pub fn add_trip(&mut self, trip_id: &str, headsign: &str, calendar: Option<NodeId>) -> NodeId {
        let trip = self.add_node(
            Some(Label::Trip),
            [
                ("trip_id", PropertyValue::from(trip_id)),
                ("trip_headsign", PropertyValue::from(headsign)),
            ],
        );
        if let Some(calendar) = calendar {
            self.add_edge(
                EdgeKind::ValidOn,
                trip,
                calendar,
                std::iter::empty::<(String, PropertyValue)>(),
            );
        }
        trip
    }

    /// Add a drive edge with integer times (seconds since midnight).
    pub fn add_drive(
        &mut self,
        from: NodeId,
        to: NodeId,
        trip_id: &str,
        dep_time_sec: i64,
        arr_time_sec: i64,
    ) -> Option<EdgeId> {
        self.add_edge(
            EdgeKind::Drive,
            from,
            to,
            [
                ("trip_id", PropertyValue::from(trip_id)),
                ("dep_time_sec", PropertyValue::from(dep_time_sec)),
                ("arr_time_sec", PropertyValue::from(arr_time_sec)),
            ],
        )
    }

    /// Add a drive edge with "HH:MM:SS" string times.
    pub fn add_drive_hms(
        &mut self,
        from: NodeId,
        to: NodeId,
        trip_id: &str,
        dep_time: &str,
        arr_time: &str,
    ) -> Option<EdgeId> {
        self.add_edge(
            EdgeKind::Drive,
            from,
            to,
            [
                ("trip_id", PropertyValue::from(trip_id)),
                ("dep_time", PropertyValue::from(dep_time)),
                ("arr_time", PropertyValue::from(arr_time)),
            ],
        )
    }

    /// Add a walk edge. Without a duration the planner's default applies.
    pub fn add_walk(&mut self, from: NodeId, to: NodeId, time_sec: Option<i64>) -> Option<EdgeId> {
        let properties = time_sec.map(|secs| ("time_sec", PropertyValue::from(secs)));
        self.add_edge(EdgeKind::Walk, from, to, properties)
    }

    fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    fn edge(&self, edge: EdgeId) -> Option<&EdgeData> {
        self.edges.get(edge.0 as usize)
    }

    /// Returns the label of a node.
    pub fn label(&self, node: NodeId) -> Option<Label> {
        self.node(node).and_then(|n| n.label)
    }
}

impl GraphStore for MemoryGraph {
    fn find_node(&self, label: Label, attr: &str, value: &PropertyValue) -> Option<NodeId> {
        self.index
            .get(&(label, attr.to_string(), value.clone()))
            .copied()
    }

    fn find_all(&self, label: Label) -> impl Iterator<Item = NodeId> + '_ {
        self.by_label
            .get(&label)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
    }

    fn outgoing(&self, node: NodeId, kind: EdgeKind) -> impl Iterator<Item = Edge> + '_ {
        self.outgoing
            .get(node.0 as usize)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&id| {
                let data = self.edge(id)?;
                (data.kind == kind).then_some(Edge {
                    id,
                    kind: data.kind,
                    start: data.start,
                    end: data.end,
                })
            })
    }

    fn node_property(&self, node: NodeId, attr: &str) -> Option<&PropertyValue> {
        self.node(node)?.properties.get(attr)
    }

    fn edge_property(&self, edge: EdgeId, attr: &str) -> Option<&PropertyValue> {
        self.edge(edge)?.properties.get(attr)
    }
}
