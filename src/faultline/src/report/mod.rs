//! Error records, display settings and the report formatter.

pub mod display_setting;
pub mod error;
pub mod error_record;
pub mod format_request;
pub mod formatter;
pub mod processor;

pub use display_setting::{DisplaySetting, SettingKind, SettingValue};
pub use error::FormatError;
pub use error_record::ErrorRecord;
pub use format_request::FormatRequest;
pub use formatter::{format_error_report, ReportOptions};
pub use processor::process_format_request;
