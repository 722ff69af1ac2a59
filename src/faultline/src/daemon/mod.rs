mod app;
pub mod error;
mod handlers;
mod interceptor;
mod routes;
mod server;
mod state;
pub mod structs;

pub use app::get_app;
pub use error::{AppError, CapturedFailure, ErrorCategory};
pub use handlers::format_message::FORMAT_MESSAGE_ENDPOINT;
pub use handlers::integration::{INTEGRATION_ENDPOINT, INTEGRATION_NOT_FOUND_MESSAGE};
pub use handlers::simulate_error::SIMULATE_ERROR_ENDPOINT;
pub use server::{shutdown_signal, DaemonServer};
pub use state::DaemonState;
