use thiserror::Error;

/// Failures of the synchronous format-message path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Empty message or no display settings.
    #[error("Invalid error payload.")]
    InvalidPayload,

    /// The message is not a serialized error record.
    #[error("Malformed JSON in message payload: {0}")]
    MalformedPayload(String),

    #[error("Formatted error report is empty.")]
    FormattingFailed,
}

impl FormatError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        FormatError::MalformedPayload(reason.into())
    }

    /// Stable identifier used in structured error responses
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::InvalidPayload => "invalid_payload",
            FormatError::MalformedPayload(_) => "malformed_payload",
            FormatError::FormattingFailed => "formatting_failed",
        }
    }

    /// True when the caller sent something unusable, as opposed to an internal fault.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, FormatError::FormattingFailed)
    }
}
