pub mod format_message;
pub mod integration;
pub mod simulate_error;
