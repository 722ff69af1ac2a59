use crate::daemon::handlers::format_message::{format_message, FORMAT_MESSAGE_ENDPOINT};
use crate::daemon::handlers::integration::{integration, INTEGRATION_ENDPOINT};
use crate::daemon::handlers::simulate_error::{simulate_error, SIMULATE_ERROR_ENDPOINT};
use crate::daemon::state::DaemonState;
use axum::routing::{get, post, MethodRouter};
use std::sync::LazyLock;

pub(super) static ROUTES: LazyLock<Vec<(&'static str, MethodRouter<DaemonState>)>> =
    LazyLock::new(|| {
        vec![
            (FORMAT_MESSAGE_ENDPOINT, post(format_message)),
            (INTEGRATION_ENDPOINT, get(integration)),
            (SIMULATE_ERROR_ENDPOINT, get(simulate_error)),
        ]
    });
