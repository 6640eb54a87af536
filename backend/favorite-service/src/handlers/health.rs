use super::AppState;
use crate::error::ServiceResult;
use crate::repository::UserRepository;
use actix_web::{web, HttpResponse};
use tracing::warn;

/// Dependency check behind GET /ready
#[async_trait::async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn check(&self) -> ServiceResult<()>;
}

#[async_trait::async_trait]
impl ReadinessProbe for UserRepository {
    async fn check(&self) -> ServiceResult<()> {
        self.ping().await
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

pub async fn ready(state: web::Data<AppState>) -> HttpResponse {
    match state.readiness.check().await {
        Ok(()) => HttpResponse::Ok().body("READY"),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().body("NOT READY")
        }
    }
}
