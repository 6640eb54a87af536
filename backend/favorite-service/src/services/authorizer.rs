use crate::domain::UserId;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::UserRepository;
use tracing::debug;

/// Resolves the caller identity of a request
#[async_trait::async_trait]
pub trait Authorizer: Send + Sync {
    /// `token` is the bearer credential, if the request carried one
    async fn authorize(&self, token: Option<&str>) -> ServiceResult<UserId>;
}

/// Token authorizer backed by the `users` table
#[derive(Clone)]
pub struct PgTokenAuthorizer {
    users: UserRepository,
}

impl PgTokenAuthorizer {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait::async_trait]
impl Authorizer for PgTokenAuthorizer {
    async fn authorize(&self, token: Option<&str>) -> ServiceResult<UserId> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::Unauthorized("missing token".to_string()))?;

        match self.users.find_user_by_token(token).await? {
            Some(user_id) => {
                debug!(user_id, "Request authorized");
                Ok(user_id)
            }
            None => Err(ServiceError::Unauthorized("invalid token".to_string())),
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let value = header?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}
