use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: String,
}

/// Error payload the API sends alongside 4xx/5xx responses.
#[derive(Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
