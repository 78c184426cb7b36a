use crate::store::FetchError;
use axum::http::StatusCode;
use tracing::error;

pub const MISSING_CONFIG_MESSAGE: &str =
    "Missing Firebase configuration. Copy firebase-config.example.json and fill your keys.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn missing_config() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: MISSING_CONFIG_MESSAGE.to_string(),
        }
    }

    pub fn fetch_failed(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: format!("Could not load data: {err}"),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        error!("dashboard fetch failed: {err}");
        Self::fetch_failed(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
