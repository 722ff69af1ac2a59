use crate::report::error::FormatError;
use crate::report::error_record::ErrorRecord;
use crate::report::format_request::FormatRequest;
use crate::report::formatter::format_error_report;
use tracing::debug;

/// Validates a format request, decodes its record and renders the report.
///
/// Validation runs before any decoding, so an empty message or settings list
/// is always reported as [`FormatError::InvalidPayload`].
pub fn process_format_request(request: &FormatRequest) -> Result<String, FormatError> {
    request.validate()?;

    let error = ErrorRecord::from_message(&request.message)?;
    let report = format_error_report(&error, &request.settings);

    if report.trim().is_empty() {
        return Err(FormatError::FormattingFailed);
    }

    debug!(
        "Formatted error report {} with {} settings",
        error.id(),
        request.settings.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        SETTING_INCLUDE_INNER_EXCEPTION, SETTING_INCLUDE_STACK_TRACE, SETTING_MAX_MESSAGE_LENGTH,
    };
    use crate::report::display_setting::DisplaySetting;
    use rstest::rstest;
    use serde_json::json;

    fn all_settings() -> Vec<DisplaySetting> {
        vec![
            DisplaySetting::checkbox(SETTING_INCLUDE_STACK_TRACE, true),
            DisplaySetting::checkbox(SETTING_INCLUDE_INNER_EXCEPTION, true),
            DisplaySetting::number(SETTING_MAX_MESSAGE_LENGTH, 100),
        ]
    }

    #[test]
    fn test_valid_payload_returns_formatted_error() {
        let message = json!({
            "ErrorId": "4f1c",
            "Timestamp": "2025-02-20T10:15:30Z",
            "ExceptionType": "System.NullReferenceException",
            "Message": "Object reference not set to an instance of an object.",
            "HttpMethod": "GET",
            "Url": "https://api.example.com/resource",
            "StatusCode": 500,
            "StackTrace": "at ExampleClass.Method()",
            "InnerExceptionMessage": "Inner exception occurred."
        })
        .to_string();

        let report = process_format_request(&FormatRequest::new(message, all_settings())).unwrap();

        assert!(report.contains("Exception: System.NullReferenceException"));
        assert!(report.contains("Object reference not set to an instance of an object."));
        assert!(report.contains("📌 Stack Trace: at ExampleClass.Method()"));
        assert!(report.contains("⚠️ Inner Exception: Inner exception occurred."));
    }

    #[test]
    fn test_unrecognised_settings_are_ignored() {
        let request: FormatRequest = serde_json::from_value(json!({
            "message": json!({"Message": "boom", "StackTrace": "at Orders.Save()"}).to_string(),
            "settings": [
                {"label": "Include StackTrace", "type": "checkbox", "default": "true"},
                {"label": "Channels", "type": "multi-select", "default": ["alerts", "ops"]},
                {"label": "Routing", "type": "object", "default": {"team": "payments"}}
            ]
        }))
        .unwrap();

        let report = process_format_request(&request).unwrap();

        assert!(report.contains("Message: boom\n"));
        assert!(report.ends_with("📌 Stack Trace: at Orders.Save()\n"));
    }

    #[rstest]
    #[case::empty_message("", all_settings())]
    #[case::blank_message(" \t", all_settings())]
    #[case::no_settings(r#"{"Message": "x"}"#, vec![])]
    // validation happens before decoding, so garbage is never looked at
    #[case::garbage_without_settings("Invalid JSON", vec![])]
    fn test_invalid_payload(#[case] message: &str, #[case] settings: Vec<DisplaySetting>) {
        assert_eq!(
            process_format_request(&FormatRequest::new(message, settings)),
            Err(FormatError::InvalidPayload)
        );
    }

    #[rstest]
    #[case::not_json("Invalid JSON")]
    #[case::null("null")]
    #[case::number("42")]
    fn test_malformed_payload(#[case] message: &str) {
        let result = process_format_request(&FormatRequest::new(message, all_settings()));
        assert!(matches!(result, Err(FormatError::MalformedPayload(_))));
    }
}
