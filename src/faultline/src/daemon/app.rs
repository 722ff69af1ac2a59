use crate::constants::API_BASE_PATH;
use crate::daemon::interceptor::{intercept, panic_response};
use crate::daemon::routes::ROUTES;
use crate::daemon::state::DaemonState;
use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin `{}`", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn get_app(state: DaemonState) -> Router {
    let mut api = Router::new();
    for (path, method_router) in ROUTES.iter() {
        api = api.route(path, method_router.clone());
    }
    with_error_handling(api, state)
}

/// Mounts `api` under the base path behind CORS, the interceptor and panic capture.
pub(super) fn with_error_handling(api: Router<DaemonState>, state: DaemonState) -> Router {
    // outermost last: CORS, then the interceptor, then panic capture
    Router::new()
        .nest(API_BASE_PATH, api)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), intercept))
        .layer(cors_layer(&state.config().cors_allowed_origins))
        .with_state(state)
}
