use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::{token_from_header, Claims};
use crate::error::ApiError;

/// Authenticated caller, injected into request extensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| ApiError::unauthorized("Invalid Authorization header format")))
        .transpose()?;

    let claims = token_from_header(header)
        .and_then(|token| state.jwt.verify(token))
        .map_err(|e| {
            tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
            ApiError::from(e)
        })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated user {}", auth_user.id);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
