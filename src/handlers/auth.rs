use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::models::auth::{AuthenticationRequestBody, AuthenticationResponse};
use crate::utils::extract::JsonBody;
use crate::utils::jwt::{create_token, CityInfoUser};
use crate::utils::negotiate::{Negotiated, ResponseFormat};
use crate::AppState;

/// Demo credential check: every username is accepted and mapped to the same
/// sample user. Replace with a real user store before exposing the API.
pub fn validate_user_credentials(
    username: Option<&str>,
    _password: Option<&str>,
) -> Option<CityInfoUser> {
    Some(CityInfoUser {
        user_id: 1,
        user_name: username.unwrap_or_default().to_string(),
        first_name: "Rahim".to_string(),
        last_name: "Pamelo".to_string(),
        city: "Antwerp".to_string(),
    })
}

/// Exchange a username and password for a bearer token
pub async fn authenticate(
    State(state): State<AppState>,
    format: ResponseFormat,
    JsonBody(payload): JsonBody<AuthenticationRequestBody>,
) -> AppResult<Response> {
    let user = validate_user_credentials(payload.username.as_deref(), payload.password.as_deref())
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let access_token = create_token(&user, &state.config)?;
    tracing::info!(user_id = user.user_id, user_name = %user.user_name, "Token issued");

    Ok(Negotiated::new(
        format,
        "AuthenticationResponse",
        AuthenticationResponse { access_token },
    )
    .into_response())
}
