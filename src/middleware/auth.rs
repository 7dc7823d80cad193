use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::error::{AppError, AppResult};
use crate::utils::jwt::verify_token;
use crate::AppState;

/// Extract and validate the bearer token; the claims are made available to
/// handlers as a request extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    auth: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let TypedHeader(auth) =
        auth.map_err(|_| AppError::Unauthorized("Bearer token required".to_string()))?;

    let claims = verify_token(auth.token(), &state.config)?;
    tracing::debug!(sub = %claims.sub, city = %claims.city, "Request authenticated");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
