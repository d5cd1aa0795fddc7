//! Admin gate for mutation endpoints.
//!
//! The catalog core treats "authenticated" as an opaque precondition supplied
//! by the routing layer: handlers that mutate the catalog take an [`AdminUser`]
//! argument, and the extractor rejects requests whose bearer token does not
//! match the configured admin token. The store itself performs no checks and
//! is not a trust boundary.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::{errors::ApiError, AppState};

/// Proof that the request carried the configured admin token. Handlers accept
/// this as an otherwise-unused argument to gate a route.
pub struct AdminUser;

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if token == state.config.admin_token => Ok(AdminUser),
            Some(_) => {
                warn!("Admin request rejected: invalid token");
                Err(ApiError::Unauthorized)
            }
            None => Err(ApiError::Unauthorized),
        }
    }
}
