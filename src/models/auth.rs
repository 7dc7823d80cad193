use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AuthenticationRequestBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthenticationResponse {
    pub access_token: String,
}
