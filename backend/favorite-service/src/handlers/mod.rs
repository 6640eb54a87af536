//! HTTP adapter over the favorite services

pub mod admin;
pub mod favorites;
pub mod health;

use crate::services::{Authorizer, FavoriteService};
use actix_web::web;
use std::sync::Arc;

pub use health::ReadinessProbe;

/// State shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub favorites: FavoriteService,
    pub authorizer: Arc<dyn Authorizer>,
    pub readiness: Arc<dyn ReadinessProbe>,
}

impl AppState {
    pub fn new(
        favorites: FavoriteService,
        authorizer: Arc<dyn Authorizer>,
        readiness: Arc<dyn ReadinessProbe>,
    ) -> Self {
        Self {
            favorites,
            authorizer,
            readiness,
        }
    }
}

/// Register every route; `/admin` only when enabled
pub fn configure(cfg: &mut web::ServiceConfig, admin_routes_enabled: bool) {
    cfg.route("/getFavorite", web::get().to(favorites::get_favorite))
        .route("/getFavorite", web::post().to(favorites::get_favorite))
        .route("/health", web::get().to(health::health))
        .route("/ready", web::get().to(health::ready))
        .route("/metrics", web::get().to(crate::metrics::metrics_handler));

    if admin_routes_enabled {
        cfg.route(
            "/admin/votes/{item_id}/refresh",
            web::post().to(admin::refresh_votes),
        );
    }
}
