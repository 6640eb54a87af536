use super::AppState;
use crate::domain::ItemId;
use crate::error::ServiceError;
use crate::services::bearer_token;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::info;

/// POST /admin/votes/{item_id}/refresh
///
/// Recompute an item's tally from the vote log and overwrite the cached copy.
/// Requires the same bearer token as the read path; the log query is never
/// run for an anonymous caller.
pub async fn refresh_votes(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<ItemId>,
) -> Result<HttpResponse, ServiceError> {
    let token = bearer_token(
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );
    let user_id = state.authorizer.authorize(token).await?;

    let item_id = path.into_inner();
    info!(user_id, item_id, "Vote tally refresh requested");
    let tally = state.favorites.votes().refresh_tally(item_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "item_id": item_id,
        "first_vote": tally.first_vote,
        "last_vote": tally.last_vote,
    })))
}
