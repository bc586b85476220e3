use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use sqlx::PgPool;

use crate::api::tags::ApiTags;

#[derive(Debug, Clone, Object)]
pub struct HealthCheckResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Whether the toll store answered a ping
    pub database: bool,
    pub timestamp: String,
    pub version: String,
}

pub struct HealthApi {
    pool: PgPool,
}

impl HealthApi {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[OpenApi]
impl HealthApi {
    /// Health check
    ///
    /// Always answers 200 while the process is up; `status` turns
    /// `degraded` when the database cannot be reached.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        let database = match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("health check database ping failed: {}", e);
                false
            }
        };

        Json(HealthCheckResponse {
            status: if database { "healthy" } else { "degraded" }.to_string(),
            database,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}
