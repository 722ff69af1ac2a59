use crate::daemon::error::{generic_error_response, CapturedFailure, ErrorCategory};
use crate::daemon::state::DaemonState;
use crate::report::ErrorRecord;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use tracing::error;

/// Terminal error handler wrapped around every route.
///
/// Successful responses pass through untouched. A response that carries a
/// [`CapturedFailure`] is logged, queued for webhook delivery and replaced by
/// the generic error body; the delivery itself is never awaited.
pub(super) async fn intercept(
    State(state): State<DaemonState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let Some(failure) = response.extensions_mut().remove::<CapturedFailure>() else {
        return response;
    };

    let status = failure.category.status_code();
    error!(
        "Unhandled {} on {} {}: {}",
        failure.kind, method, path, failure.message
    );

    let record = ErrorRecord::new(failure.kind, failure.message, status.as_u16())
        .with_request(method, path)
        .with_stack_trace(failure.stack_trace)
        .with_inner_exception_message(failure.inner_message);
    let record_id = record.id().to_string();

    if let Err(e) = state
        .dispatcher()
        .dispatch(state.envelope().wrap_record(record))
    {
        error!("Failed to queue error report {}: {}", record_id, e);
    }

    generic_error_response(status)
}

/// Turns a handler panic into a failure the interceptor reports like any other.
pub(super) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    let mut response = ErrorCategory::Internal.status_code().into_response();
    response.extensions_mut().insert(CapturedFailure {
        category: ErrorCategory::Internal,
        kind: "Panic".to_string(),
        message,
        stack_trace: None,
        inner_message: None,
    });
    response
}
