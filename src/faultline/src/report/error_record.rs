use crate::report::error::FormatError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const FIELD_NAMES: [&str; 9] = [
    "ErrorId",
    "Timestamp",
    "ExceptionType",
    "Message",
    "StackTrace",
    "HttpMethod",
    "Url",
    "StatusCode",
    "InnerExceptionMessage",
];

/// One captured failure.
///
/// Built once per intercepted error (or decoded from a caller-supplied message)
/// and never mutated afterwards; the id is always non-empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorRecord {
    #[serde(
        rename = "ErrorId",
        default = "generate_error_id",
        deserialize_with = "id_or_generated"
    )]
    id: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: DateTime<Utc>,
    #[serde(rename = "ExceptionType", default, deserialize_with = "null_as_empty")]
    exception_kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    message: String,
    #[serde(default)]
    stack_trace: Option<String>,
    #[serde(default)]
    http_method: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status_code: u16,
    #[serde(default)]
    inner_exception_message: Option<String>,
}

fn generate_error_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn id_or_generated<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_error_id))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(DateTime::<Utc>::default()),
        Some(raw) => parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`"))),
    }
}

/// Accepts RFC 3339 and offset-less ISO 8601 (read as UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(DateTime::<Utc>::default());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Maps `errorId`, `error_id`, `ERRORID`, ... onto the canonical wire name.
fn canonical_field_name(key: &str) -> Option<&'static str> {
    let folded: String = key
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();

    match folded.as_str() {
        "id" => Some("ErrorId"),
        "exceptionkind" => Some("ExceptionType"),
        _ => FIELD_NAMES
            .iter()
            .copied()
            .find(|name| name.to_ascii_lowercase() == folded),
    }
}

impl ErrorRecord {
    /// Captures a new record stamped with a fresh id and the current time.
    pub fn new(exception_kind: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            id: generate_error_id(),
            timestamp: Utc::now(),
            exception_kind: exception_kind.into(),
            message: message.into(),
            stack_trace: None,
            http_method: None,
            url: None,
            status_code,
            inner_exception_message: None,
        }
    }

    pub fn with_stack_trace(mut self, stack_trace: Option<String>) -> Self {
        self.stack_trace = stack_trace;
        self
    }

    pub fn with_inner_exception_message(mut self, inner: Option<String>) -> Self {
        self.inner_exception_message = inner;
        self
    }

    pub fn with_request(mut self, http_method: impl Into<String>, url: impl Into<String>) -> Self {
        self.http_method = Some(http_method.into());
        self.url = Some(url.into());
        self
    }

    /// Decodes a serialized record, matching field names case-insensitively.
    pub fn from_message(message: &str) -> Result<Self, FormatError> {
        let value: Value =
            serde_json::from_str(message).map_err(|e| FormatError::malformed(e.to_string()))?;

        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => return Err(FormatError::malformed("message decodes to no record")),
            other => {
                return Err(FormatError::malformed(format!(
                    "expected a JSON object, found {}",
                    json_type_name(&other)
                )))
            }
        };

        let normalized: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| match canonical_field_name(&key) {
                Some(name) => (name.to_string(), value),
                None => (key, value),
            })
            .collect();

        serde_json::from_value(Value::Object(normalized))
            .map_err(|e| FormatError::malformed(e.to_string()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn exception_kind(&self) -> &str {
        &self.exception_kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    pub fn http_method(&self) -> Option<&str> {
        self.http_method.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn inner_exception_message(&self) -> Option<&str> {
        self.inner_exception_message.as_deref()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_new_record_has_id_and_timestamp() {
        let before = Utc::now();
        let record = ErrorRecord::new("InvalidOperation", "boom", 500);

        assert!(!record.id().is_empty());
        assert!(record.timestamp() >= before);
        assert_eq!(record.status_code(), 500);
        assert_eq!(record.stack_trace(), None);
    }

    #[test]
    fn test_from_message_matches_fields_case_insensitively() {
        let message = r#"{
            "errorid": "12345",
            "TIMESTAMP": "2025-02-20T10:15:30Z",
            "exception_type": "System.NullReferenceException",
            "message": "Object reference not set to an instance of an object.",
            "httpMethod": "GET",
            "URL": "/api/resource",
            "statuscode": 500,
            "StackTrace": "at ExampleClass.Method()",
            "innerExceptionMessage": "Inner exception occurred."
        }"#;

        let record = ErrorRecord::from_message(message).unwrap();

        assert_eq!(record.id(), "12345");
        assert_eq!(
            record.timestamp(),
            Utc.with_ymd_and_hms(2025, 2, 20, 10, 15, 30).unwrap()
        );
        assert_eq!(record.exception_kind(), "System.NullReferenceException");
        assert_eq!(record.http_method(), Some("GET"));
        assert_eq!(record.url(), Some("/api/resource"));
        assert_eq!(record.status_code(), 500);
        assert_eq!(record.stack_trace(), Some("at ExampleClass.Method()"));
        assert_eq!(
            record.inner_exception_message(),
            Some("Inner exception occurred.")
        );
    }

    #[test]
    fn test_from_message_fills_missing_fields() {
        let record = ErrorRecord::from_message(r#"{"ErrorId": null, "Message": "Test error"}"#)
            .unwrap();

        assert!(!record.id().is_empty());
        assert_eq!(record.message(), "Test error");
        assert_eq!(record.exception_kind(), "");
        assert_eq!(record.timestamp(), DateTime::<Utc>::default());
        assert_eq!(record.status_code(), 0);
    }

    #[test]
    fn test_from_message_accepts_offsetless_timestamp() {
        let record =
            ErrorRecord::from_message(r#"{"Timestamp": "2025-02-20T10:15:30.1234567"}"#).unwrap();

        assert_eq!(
            record.timestamp().date_naive(),
            chrono::NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()
        );
    }

    #[rstest]
    #[case::plain_text("Invalid JSON")]
    #[case::null("null")]
    #[case::array("[1, 2, 3]")]
    #[case::string_literal("\"just a string\"")]
    #[case::wrong_field_type(r#"{"StatusCode": "not a number"}"#)]
    #[case::bad_timestamp(r#"{"Timestamp": "yesterday"}"#)]
    fn test_from_message_rejects_malformed(#[case] message: &str) {
        let err = ErrorRecord::from_message(message).unwrap_err();
        assert!(matches!(err, FormatError::MalformedPayload(_)), "{err:?}");
    }

    #[test]
    fn test_serialized_record_decodes_back() {
        let record = ErrorRecord::new("Validation", "bad input", 400)
            .with_request("POST", "/orders")
            .with_stack_trace(Some("frame 0".to_string()));

        let encoded = serde_json::to_string(&record).unwrap();
        assert!(encoded.contains("\"ExceptionType\":\"Validation\""));

        let decoded = ErrorRecord::from_message(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
