//! Health check endpoint handlers.
//!
//! Health checks directly access the database connection pool rather
//! than going through the service layer.

use crate::api::doc::HEALTH_TAG;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use jiff::{Timestamp, tz::TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Application version
    pub version: String,
    /// Timestamp of the health check (ISO 8601 format)
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    /// Detailed checks for various components
    pub checks: HashMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Basic health check
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Basic health check endpoint.
///
/// Returns health information including database connectivity.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy")
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let mut checks = HashMap::new();

    let db_check = check_database(&state).await;
    let overall_status = match db_check.status {
        HealthStatus::Healthy => HealthStatus::Healthy,
        HealthStatus::Degraded => HealthStatus::Degraded,
        HealthStatus::Unhealthy => HealthStatus::Unhealthy,
    };
    checks.insert("database".to_string(), db_check);

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Timestamp::now().to_zoned(TimeZone::UTC).to_string(),
        checks,
    };

    match response.status {
        HealthStatus::Unhealthy => Err(StatusCode::SERVICE_UNAVAILABLE),
        _ => Ok(Json(response)),
    }
}

/// Readiness probe endpoint.
///
/// Ready means the database is reachable.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    let db_check = check_database(&state).await;

    match db_check.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe endpoint. Does not touch external dependencies.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Probes the database by running a trivial query on a pooled connection.
async fn check_database(state: &AppState) -> ComponentHealth {
    let start_time = std::time::Instant::now();

    match state.db_pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Connected".to_string()),
                    response_time_ms: Some(start_time.elapsed().as_millis() as u64),
                },
                Err(e) => ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some(format!("Query failed: {}", e)),
                    response_time_ms: Some(start_time.elapsed().as_millis() as u64),
                },
            }
        }
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(format!("Connection failed: {}", e)),
            response_time_ms: Some(start_time.elapsed().as_millis() as u64),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::Healthy;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"healthy\"");
    }

    #[tokio::test]
    async fn test_liveness_check() {
        let result = liveness_check().await;
        assert_eq!(result, StatusCode::OK);
    }

    #[test]
    fn test_component_health_creation() {
        let health = ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some("Connection failed".to_string()),
            response_time_ms: Some(12),
        };

        assert!(matches!(health.status, HealthStatus::Unhealthy));
        assert_eq!(health.response_time_ms, Some(12));
    }
}
