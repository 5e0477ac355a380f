//! Liveness and database readiness probes

use actix_web::get;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::prelude::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivenessResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub version: String,
    #[schema(example = "connected")]
    pub database: String,
}

/// Always 200 while the process serves requests
#[utoipa::path(
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse),
    )
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    Json(LivenessResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

/// Pings the database
#[utoipa::path(
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthResponse),
        (status = 503, description = "Database unavailable", body = HealthResponse),
    )
)]
#[get("/health/db")]
pub async fn health_db(db: Data<DatabaseConnection>) -> impl Responder {
    let connected = match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            ::tracing::warn!(error = %e, "Database ping failed");
            false
        }
    };

    let response = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    };

    if connected {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
