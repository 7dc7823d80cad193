use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Identity asserted by a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityInfoUser {
    pub user_id: i32,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub given_name: String,
    pub family_name: String,
    pub city: String,
    pub iss: String,
    pub aud: String,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
}

pub fn create_token(user: &CityInfoUser, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let exp = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.user_id.to_string(),
        given_name: user.first_name.clone(),
        family_name: user.last_name.clone(),
        city: user.city.clone(),
        iss: config.auth_issuer.clone(),
        aud: config.auth_audience.clone(),
        nbf: now.timestamp(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    let key = EncodingKey::from_base64_secret(&config.auth_secret)
        .map_err(|e| AppError::Internal(format!("Invalid signing key: {}", e)))?;

    encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
    let key = DecodingKey::from_base64_secret(&config.auth_secret)
        .map_err(|e| AppError::Internal(format!("Invalid signing key: {}", e)))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.auth_issuer]);
    validation.set_audience(&[&config.auth_audience]);
    validation.validate_nbf = true;

    Ok(decode::<Claims>(token, &key, &validation)?.claims)
}
