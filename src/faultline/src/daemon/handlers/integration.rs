use crate::daemon::state::DaemonState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const INTEGRATION_ENDPOINT: &str = "/integration.json";
pub const INTEGRATION_NOT_FOUND_MESSAGE: &str = "Integration configuration not found.";

pub async fn integration(State(state): State<DaemonState>) -> Response {
    match state.manifest() {
        Some(manifest) => Json(manifest.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, INTEGRATION_NOT_FOUND_MESSAGE).into_response(),
    }
}
