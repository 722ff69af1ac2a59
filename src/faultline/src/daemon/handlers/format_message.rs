use crate::daemon::error::AppError;
use crate::daemon::state::DaemonState;
use crate::daemon::structs::FormatRejection;
use crate::report::{process_format_request, FormatError, FormatRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

pub const FORMAT_MESSAGE_ENDPOINT: &str = "/format-message";

fn reject(code: &str, message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(FormatRejection::new(code, message))).into_response()
}

pub async fn format_message(
    State(state): State<DaemonState>,
    payload: Result<Json<FormatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected format request body: {}", rejection.body_text());
            return Ok(reject(
                FormatError::InvalidPayload.code(),
                rejection.body_text(),
            ));
        }
    };

    let report = match process_format_request(&request) {
        Ok(report) => report,
        Err(e) if e.is_caller_error() => {
            warn!("Rejected format request: {}", e);
            return Ok(reject(e.code(), e.to_string()));
        }
        Err(e) => return Err(AppError::internal(e).with_kind("FormattingFailed")),
    };

    let payload = state.envelope().wrap_report(report);

    if state.config().forward_formatted_reports {
        match state.dispatcher().dispatch(payload.clone()) {
            Ok(()) => debug!("Queued formatted report for webhook delivery"),
            Err(e) => warn!("Formatted report not forwarded: {}", e),
        }
    }

    Ok(Json(payload).into_response())
}
