//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{PlanError, Planner, RouteRequest, lookup_stop, random_location};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(plan_route))
        .route("/stops/random-location", get(random_stop_location))
        .route("/stops/:id", get(get_stop))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan the earliest-arrival route between two stops.
///
/// The search runs on the blocking pool.
async fn plan_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let request = RouteRequest::from(query);

    let result = tokio::task::spawn_blocking(move || {
        Planner::new(state.graph.as_ref(), state.config.as_ref()).plan(&request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("planner task failed: {e}"),
    })??;

    Ok(Json(RouteResponse::from_result(&result)))
}

/// Look up a stop by id or code.
async fn get_stop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StopResult>, AppError> {
    let node = lookup_stop(state.graph.as_ref(), &id).ok_or_else(|| AppError::NotFound {
        message: format!("unknown stop: {id}"),
    })?;

    Ok(Json(StopResult::from_node(state.graph.as_ref(), node)))
}

/// A random point inside the bounding box of all located stops.
async fn random_stop_location(
    State(state): State<AppState>,
) -> Result<Json<LocationResult>, AppError> {
    let location = random_location(state.graph.as_ref(), &mut rand::thread_rng()).ok_or_else(
        || AppError::NotFound {
            message: "no stops have coordinates".to_string(),
        },
    )?;

    Ok(Json(LocationResult::from(location)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::UnknownStop(_) => AppError::NotFound { message },
            PlanError::InvalidStartTime(_) => AppError::BadRequest { message },
            PlanError::Cancelled | PlanError::Itinerary(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use crate::planner::PlannerConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::Weekday;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut g = MemoryGraph::new();
        let cal = g.add_calendar(&[Weekday::Mon]);
        g.add_trip("T1", "Centrum", Some(cal));
        let a = g.add_stop_at("A", 100_i64, "Alpha", 52.10, 20.90);
        let b = g.add_stop_at("B", 200_i64, "Bravo", 52.30, 21.10);
        g.add_drive(a, b, "T1", 8 * 3600, 8 * 3600 + 600);
        g.add_walk(b, a, Some(300));

        create_router(AppState::new(g, PlannerConfig::default()))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        get_from(app(), uri).await
    }

    async fn get_from(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn route_found() {
        let (status, json) = get("/route?from=A&to=B&time=07:30&day=monday").await;

        assert_eq!(status, StatusCode::OK);
        let legs = json["legs"].as_array().unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0]["line"], "T1 (Kier: Centrum)");
        assert_eq!(legs[0]["start_stop"], "Alpha");
        assert_eq!(legs[0]["dep_time"], "08:00:00");
        assert_eq!(legs[0]["arr_time"], "08:10:00");
        assert_eq!(legs[0]["is_next_day"], false);
    }

    #[tokio::test]
    async fn route_day_defaults_to_monday() {
        let (status, json) = get("/route?from=100&to=200&time=07:30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["legs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_route_is_empty_list() {
        let (status, json) = get("/route?from=A&to=B&time=09:00&day=monday").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["legs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn walk_leg() {
        let (status, json) = get("/route?from=B&to=A&time=12:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["legs"][0]["line"], "Walking transfer");
        assert_eq!(json["legs"][0]["arr_time"], "12:05:00");
    }

    #[tokio::test]
    async fn unknown_stop_is_404() {
        let (status, json) = get("/route?from=A&to=Z&time=07:30").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "unknown stop: Z");
    }

    #[tokio::test]
    async fn bad_time_is_400() {
        let (status, json) = get("/route?from=A&to=B&time=noon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("invalid start time"));
    }

    #[tokio::test]
    async fn missing_parameter_is_400() {
        let (status, _) = get("/route?from=A&to=B").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stop_lookup() {
        let (status, json) = get("/stops/200").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stop_id"], "B");
        assert_eq!(json["stop_code"], 200);
        assert_eq!(json["stop_name"], "Bravo");

        let (status, _) = get("/stops/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn random_location_inside_stop_bounds() {
        for _ in 0..20 {
            let (status, json) = get("/stops/random-location").await;
            assert_eq!(status, StatusCode::OK);

            let lat = json["latitude"].as_f64().unwrap();
            let lon = json["longitude"].as_f64().unwrap();
            assert!((52.10..=52.30).contains(&lat), "latitude {lat}");
            assert!((20.90..=21.10).contains(&lon), "longitude {lon}");
        }
    }

    #[tokio::test]
    async fn random_location_without_coordinates_is_404() {
        let mut g = MemoryGraph::new();
        g.add_stop("A", 100_i64, "Alpha");
        let app = create_router(AppState::new(g, PlannerConfig::default()));

        let (status, json) = get_from(app, "/stops/random-location").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "no stops have coordinates");

        let empty = create_router(AppState::new(MemoryGraph::new(), PlannerConfig::default()));
        let (status, _) = get_from(empty, "/stops/random-location").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
