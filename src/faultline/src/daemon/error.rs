use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::daemon::structs::GenericErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::backtrace::BacktraceStatus;

/// Closed set of failure classes the interceptor knows how to map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authorization,
    Authentication,
    NotImplemented,
    Internal,
}

impl ErrorCategory {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Authorization => StatusCode::UNAUTHORIZED,
            ErrorCategory::Authentication => StatusCode::FORBIDDEN,
            ErrorCategory::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_kind(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "ValidationError",
            ErrorCategory::Authorization => "AuthorizationError",
            ErrorCategory::Authentication => "AuthenticationError",
            ErrorCategory::NotImplemented => "NotImplemented",
            ErrorCategory::Internal => "InternalError",
        }
    }
}

/// A handler failure that should be reported and answered generically.
#[derive(Debug)]
pub struct AppError {
    category: ErrorCategory,
    kind: String,
    source: anyhow::Error,
}

impl AppError {
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            kind: category.default_kind().to_string(),
            source: source.into(),
        }
    }

    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

    pub fn validation(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Validation, source)
    }

    /// Overrides the exception kind shown in reports.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    fn capture(&self) -> CapturedFailure {
        let backtrace = self.source.backtrace();
        let stack_trace =
            (backtrace.status() == BacktraceStatus::Captured).then(|| backtrace.to_string());

        CapturedFailure {
            category: self.category,
            kind: self.kind.clone(),
            message: self.source.to_string(),
            stack_trace,
            inner_message: self.source.chain().nth(1).map(|cause| cause.to_string()),
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::internal(err)
    }
}

/// Failure details carried from a handler to the interceptor in the response
/// extensions.
#[derive(Clone, Debug)]
pub struct CapturedFailure {
    pub category: ErrorCategory,
    pub kind: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub inner_message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let failure = self.capture();
        let mut response = generic_error_response(self.category.status_code());
        response.extensions_mut().insert(failure);
        response
    }
}

pub(crate) fn generic_error_response(status: StatusCode) -> Response {
    (
        status,
        Json(GenericErrorBody {
            error: GENERIC_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};
    use rstest::rstest;

    #[rstest]
    #[case::validation(ErrorCategory::Validation, 400)]
    #[case::authorization(ErrorCategory::Authorization, 401)]
    #[case::authentication(ErrorCategory::Authentication, 403)]
    #[case::not_implemented(ErrorCategory::NotImplemented, 501)]
    #[case::internal(ErrorCategory::Internal, 500)]
    fn test_category_status(#[case] category: ErrorCategory, #[case] status: u16) {
        assert_eq!(category.status_code().as_u16(), status);
    }

    #[test]
    fn test_response_carries_captured_failure() {
        let source: anyhow::Result<()> = Err(anyhow!("disk full"));
        let err = AppError::from(source.context("could not save order").unwrap_err())
            .with_kind("IOException");

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let failure = response.extensions().get::<CapturedFailure>().unwrap();
        assert_eq!(failure.kind, "IOException");
        assert_eq!(failure.message, "could not save order");
        assert_eq!(failure.inner_message.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_default_kind_follows_category() {
        let err = AppError::validation(anyhow!("quantity must be positive"));
        assert_eq!(err.kind(), "ValidationError");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
