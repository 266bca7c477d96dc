//! Random points inside the area the network covers.
//!
//! The covered area is the latitude/longitude bounding box of every stop that
//! carries both `stop_lat` and `stop_lon`. Stops without coordinates are
//! ignored.

use rand::Rng;
use tracing::debug;

use crate::graph::{GraphStore, Label};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Bounding box over stop coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl StopBounds {
    /// Scan all stops. Returns `None` when no stop has finite coordinates.
    pub fn collect<G: GraphStore>(graph: &G) -> Option<Self> {
        let mut bounds: Option<StopBounds> = None;
        let mut located = 0usize;

        for stop in graph.find_all(Label::Stop) {
            let (Some(lat), Some(lon)) = (
                graph.node_float(stop, "stop_lat"),
                graph.node_float(stop, "stop_lon"),
            ) else {
                continue;
            };
            if !lat.is_finite() || !lon.is_finite() {
                continue;
            }
            located += 1;

            bounds = Some(match bounds {
                None => StopBounds {
                    min_lat: lat,
                    max_lat: lat,
                    min_lon: lon,
                    max_lon: lon,
                },
                Some(b) => StopBounds {
                    min_lat: b.min_lat.min(lat),
                    max_lat: b.max_lat.max(lat),
                    min_lon: b.min_lon.min(lon),
                    max_lon: b.max_lon.max(lon),
                },
            });
        }

        debug!(located, "collected stop bounds");
        bounds
    }

    /// Whether a point lies inside the box, edges included.
    pub fn contains(&self, point: Location) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }

    /// A uniformly distributed point inside the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Location {
        Location {
            latitude: rng.gen_range(self.min_lat..=self.max_lat),
            longitude: rng.gen_range(self.min_lon..=self.max_lon),
        }
    }
}

/// Pick a random point inside the stops' bounding box.
pub fn random_location<G: GraphStore, R: Rng>(graph: &G, rng: &mut R) -> Option<Location> {
    StopBounds::collect(graph).map(|bounds| bounds.sample(rng))
}
