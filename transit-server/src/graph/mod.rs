//! Transit graph store interface.
//!
//! The planner never owns network data. It reads stops, trips, calendars and
//! edges through the `GraphStore` trait, addressing nodes and edges by the
//! store's handles. `MemoryGraph` is the in-process implementation used by
//! the server and the tests.

mod memory;
mod snapshot;

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

pub use memory::MemoryGraph;
pub use snapshot::{
    CalendarRecord, DriveRecord, Snapshot, SnapshotError, StopRecord, TripRecord, WalkRecord,
    load_graph,
};

/// Handle to a node, stable for as long as the store is borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Handle to an edge, stable for as long as the store is borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// Node labels the planner queries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Stop,
    Trip,
}

/// Edge types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// One scheduled hop of a trip between consecutive stops.
    Drive,
    /// A walking transfer between stops.
    Walk,
    /// Links a trip to its service calendar.
    ValidOn,
}

/// A property value stored on a node or edge.
///
/// Identifiers appear as either strings or integers depending on how the
/// data was imported, so lookups must be explicit about which they want.
/// Floats compare and hash by bit pattern so values can key an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => a == b,
            (PropertyValue::Int(a), PropertyValue::Int(b)) => a == b,
            (PropertyValue::Float(a), PropertyValue::Float(b)) => a.to_bits() == b.to_bits(),
            (PropertyValue::Str(a), PropertyValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropertyValue::Bool(b) => b.hash(state),
            PropertyValue::Int(i) => i.hash(state),
            PropertyValue::Float(f) => f.to_bits().hash(state),
            PropertyValue::Str(s) => s.hash(state),
        }
    }
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value; integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Float(x) => write!(f, "{x}"),
            PropertyValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Str(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Str(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// A directed edge as seen by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub kind: EdgeKind,
    pub start: NodeId,
    pub end: NodeId,
}

/// Read access to a transit graph.
///
/// All methods are synchronous pointer-chasing lookups; a query holds a
/// shared borrow of the store for its whole duration.
pub trait GraphStore {
    /// Find the first node with `label` whose `attr` equals `value`.
    ///
    /// Values of different variants never compare equal, so `Int(42)` does
    /// not match `Str("42")`.
    fn find_node(&self, label: Label, attr: &str, value: &PropertyValue) -> Option<NodeId>;

    /// Iterate all nodes carrying `label`.
    fn find_all(&self, label: Label) -> impl Iterator<Item = NodeId> + '_;

    /// Iterate outgoing edges of one kind.
    fn outgoing(&self, node: NodeId, kind: EdgeKind) -> impl Iterator<Item = Edge> + '_;

    /// Read a node property.
    fn node_property(&self, node: NodeId, attr: &str) -> Option<&PropertyValue>;

    /// Read an edge property.
    fn edge_property(&self, edge: EdgeId, attr: &str) -> Option<&PropertyValue>;

    /// Read a string node property.
    fn node_str(&self, node: NodeId, attr: &str) -> Option<&str> {
        self.node_property(node, attr).and_then(PropertyValue::as_str)
    }

    /// Read a string edge property.
    fn edge_str(&self, edge: EdgeId, attr: &str) -> Option<&str> {
        self.edge_property(edge, attr).and_then(PropertyValue::as_str)
    }

    /// Read a numeric node property as a float.
    fn node_float(&self, node: NodeId, attr: &str) -> Option<f64> {
        self.node_property(node, attr).and_then(PropertyValue::as_float)
    }

    /// Read an integer edge property.
    fn edge_int(&self, edge: EdgeId, attr: &str) -> Option<i64> {
        self.edge_property(edge, attr).and_then(PropertyValue::as_int)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_accessors() {
        assert_eq!(PropertyValue::from("abc").as_str(), Some("abc"));
        assert_eq!(PropertyValue::from("abc").as_int(), None);
        assert_eq!(PropertyValue::from(7_i64).as_int(), Some(7));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from(1_i64).as_bool(), None);
        assert_eq!(PropertyValue::from(52.25).as_float(), Some(52.25));
        assert_eq!(PropertyValue::from(52_i64).as_float(), Some(52.0));
        assert_eq!(PropertyValue::from("52.25").as_float(), None);
    }

    #[test]
    fn variants_never_equal() {
        assert_ne!(PropertyValue::from("42"), PropertyValue::from(42_i64));
        assert_ne!(PropertyValue::from(42.0), PropertyValue::from(42_i64));
    }

    #[test]
    fn floats_key_a_map() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(PropertyValue::from(21.0125), "lat");
        map.insert(PropertyValue::from(f64::NAN), "nan");
        assert_eq!(map.get(&PropertyValue::from(21.0125)), Some(&"lat"));
        assert_eq!(map.get(&PropertyValue::from(f64::NAN)), Some(&"nan"));
        assert_eq!(map.get(&PropertyValue::from(21_i64)), None);
    }

    #[test]
    fn untagged_json() {
        let values: Vec<PropertyValue> = serde_json::from_str(r#"["a", 3, false, 52.23]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PropertyValue::from("a"),
                PropertyValue::from(3_i64),
                PropertyValue::from(false),
                PropertyValue::from(52.23)
            ]
        );
    }

    #[test]
    fn display() {
        assert_eq!(PropertyValue::from("A1").to_string(), "A1");
        assert_eq!(PropertyValue::from(12_i64).to_string(), "12");
    }
}
