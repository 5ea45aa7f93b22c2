use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    analysis::handlers::{analyze_writing_style, analyze_writing_style_details, assess_url_trust},
    app_state::AppState,
    config::Config,
    health::health_check,
    middleware::rate_limit::{RateLimit, rate_limit_middleware},
    openapi::openapi_json,
};

/// Requests running longer than `secs` are answered with 408.
fn request_timeout(secs: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(secs))
}

/// Assemble the HTTP surface. Only the `/api` routes are rate limited.
///
/// The rate limiter reads the peer address, so serve the router with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let rate_limit = RateLimit::new(
        config.rate_limit_max_requests(),
        config.rate_limit_window_secs(),
    );

    let api = Router::new()
        .route("/api/writing-style", post(analyze_writing_style))
        .route(
            "/api/writing-style/details",
            post(analyze_writing_style_details),
        )
        .route("/api/url-trust", post(assess_url_trust))
        .route_layer(middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(health_check))
        .route("/healthz", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(request_timeout(config.request_timeout_secs()))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
