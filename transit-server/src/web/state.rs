//! Application state for the web layer.

use std::sync::Arc;

use crate::graph::MemoryGraph;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// The graph is read-only once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Transit network
    pub graph: Arc<MemoryGraph>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: MemoryGraph, config: PlannerConfig) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
        }
    }
}
