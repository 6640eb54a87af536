use super::AppState;
use crate::domain::{Pagination, RawPagination};
use crate::error::ServiceError;
use crate::metrics;
use crate::services::bearer_token;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::error;

/// GET|POST /getFavorite
///
/// `limit`/`offset` come from the query string, or from the form body on
/// POST (body wins). Bad values silently become defaults, so neither source
/// is ever allowed to reject the request.
pub async fn get_favorite(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: Option<web::Form<Vec<(String, String)>>>,
) -> Result<HttpResponse, ServiceError> {
    let query = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map(|q| q.into_inner())
        .unwrap_or_default();
    let raw = merge(
        RawPagination::from_pairs(query),
        form.map(|f| RawPagination::from_pairs(f.into_inner())),
    );
    let page = Pagination::from_raw(&raw);

    let token = bearer_token(
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );

    let result = async {
        let user_id = state.authorizer.authorize(token).await?;
        state.favorites.run(user_id, page.limit, page.offset).await
    }
    .await;

    match result {
        Ok(payload) => {
            metrics::record_request("success");
            Ok(HttpResponse::Ok().json(payload))
        }
        Err(err) => {
            metrics::record_request(err.kind());
            error!(kind = err.kind(), error = %err, "Favorite request failed");
            Err(err)
        }
    }
}

fn merge(query: RawPagination, form: Option<RawPagination>) -> RawPagination {
    match form {
        Some(form) => RawPagination {
            limit: form.limit.or(query.limit),
            offset: form.offset.or(query.offset),
        },
        None => query,
    }
}
