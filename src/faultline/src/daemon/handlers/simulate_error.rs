use crate::daemon::error::AppError;
use anyhow::anyhow;
use axum::http::StatusCode;

pub const SIMULATE_ERROR_ENDPOINT: &str = "/simulate-error";

pub async fn simulate_error() -> Result<StatusCode, AppError> {
    Err(
        AppError::internal(anyhow!("This is a test exception to simulate an error."))
            .with_kind("InvalidOperation"),
    )
}
