use serde::{Deserialize, Serialize};

/// Body of every response the interceptor writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenericErrorBody {
    pub error: String,
}

/// 400 body for format requests the caller got wrong.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatRejection {
    pub status: String,
    pub error: String,
    pub message: String,
}

impl FormatRejection {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: code.to_string(),
            message: message.into(),
        }
    }
}
