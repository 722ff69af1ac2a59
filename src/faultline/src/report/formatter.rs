use crate::constants::{
    MAX_STACK_TRACE_LENGTH_FALLBACK, SETTING_INCLUDE_INNER_EXCEPTION, SETTING_INCLUDE_STACK_TRACE,
    SETTING_MAX_MESSAGE_LENGTH, TRUNCATION_MARKER,
};
use crate::report::display_setting::{DisplaySetting, SettingKind};
use crate::report::error_record::ErrorRecord;
use chrono::SecondsFormat;
use std::borrow::Cow;

/// Toggles resolved from a list of display settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_stack_trace: bool,
    pub include_inner_exception: bool,
    /// `None` disables truncation.
    pub max_stack_trace_length: Option<usize>,
}

impl ReportOptions {
    pub fn from_settings(settings: &[DisplaySetting]) -> Self {
        let flag = |label: &str| {
            DisplaySetting::find(settings, label, &SettingKind::Checkbox)
                .and_then(|setting| setting.default_value.as_ref())
                .is_some_and(|value| value.as_flag())
        };

        let max_stack_trace_length =
            match DisplaySetting::find(settings, SETTING_MAX_MESSAGE_LENGTH, &SettingKind::Number)
                .and_then(|setting| setting.default_value.as_ref())
                .and_then(|value| value.as_integer())
            {
                Some(length) if length > 0 => Some(usize::try_from(length).unwrap_or(usize::MAX)),
                Some(_) => None,
                None => Some(MAX_STACK_TRACE_LENGTH_FALLBACK),
            };

        Self {
            include_stack_trace: flag(SETTING_INCLUDE_STACK_TRACE),
            include_inner_exception: flag(SETTING_INCLUDE_INNER_EXCEPTION),
            max_stack_trace_length,
        }
    }
}

fn truncate(text: &str, max_length: Option<usize>) -> Cow<'_, str> {
    match max_length {
        Some(max) if text.chars().count() > max => {
            let mut shortened: String = text.chars().take(max).collect();
            shortened.push_str(TRUNCATION_MARKER);
            Cow::Owned(shortened)
        }
        _ => Cow::Borrowed(text),
    }
}

/// Renders an error record as a human-readable report, one field per line.
///
/// Pure and deterministic: the same record and settings always produce the
/// same text.
pub fn format_error_report(error: &ErrorRecord, settings: &[DisplaySetting]) -> String {
    let options = ReportOptions::from_settings(settings);

    let mut lines = vec![
        format!("Error Id: {}", error.id()),
        format!(
            "Error Timestamp: {}",
            error.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!("Exception: {}", error.exception_kind()),
        format!("Message: {}", error.message()),
        format!(
            "HTTP Method: {} || URL: {} || Status Code: {}",
            error.http_method().unwrap_or_default(),
            error.url().unwrap_or_default(),
            error.status_code()
        ),
    ];

    if options.include_inner_exception {
        if let Some(inner) = error.inner_exception_message().filter(|m| !m.is_empty()) {
            lines.push(format!("⚠️ Inner Exception: {inner}"));
        }
    }

    if options.include_stack_trace {
        if let Some(stack_trace) = error.stack_trace().filter(|s| !s.is_empty()) {
            lines.push(format!(
                "📌 Stack Trace: {}",
                truncate(stack_trace, options.max_stack_trace_length)
            ));
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
