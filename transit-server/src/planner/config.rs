//! Configuration for the route planner.

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Walking time assumed for walk edges without a `time_sec` (seconds).
    pub default_walk_secs: u32,

    /// Line label shown for walking legs.
    pub walk_label: String,

    /// Text between the trip id and the headsign in a ride's line label,
    /// rendered as `"<trip_id> (<prefix> <headsign>)"`.
    pub headsign_prefix: String,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_walk_secs: u32,
        walk_label: impl Into<String>,
        headsign_prefix: impl Into<String>,
    ) -> Self {
        Self {
            default_walk_secs,
            walk_label: walk_label.into(),
            headsign_prefix: headsign_prefix.into(),
        }
    }

    /// Render the line label for a ride on `trip_id`.
    ///
    /// `headsign` is `None` when no trip node exists for the id, in which
    /// case the bare trip id is shown.
    pub fn line_label(&self, trip_id: &str, headsign: Option<&str>) -> String {
        match headsign {
            Some(headsign) => format!("{trip_id} ({} {headsign})", self.headsign_prefix),
            None => trip_id.to_string(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_walk_secs: 60,
            walk_label: "Walking transfer".to_string(),
            headsign_prefix: "Kier:".to_string(),
        }
    }
}
