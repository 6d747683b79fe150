use axum::{
    Router, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::{
    ApiConfig, card, metrics,
    middleware::{cors::create_cors_layer, request_id::request_id_middleware},
    review,
    state::ApiState,
    stats,
};

/// API routes, without state or middleware.
pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .fallback(handler_404)
}

fn api_routes() -> Router<ApiState> {
    Router::new()
        .merge(card::routes())
        .merge(review::routes())
        .merge(stats::routes())
}

/// The full service: routes, state, `/metrics` when a recorder is installed,
/// and the middleware stack.
pub fn app(state: ApiState, config: &ApiConfig, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut app = router().with_state(state);

    if let Some(handle) = metrics_handle {
        app = app
            .merge(
                Router::new()
                    .route("/metrics", get(metrics::metrics_handler))
                    .with_state(handle),
            )
            .layer(middleware::from_fn(metrics::track_metrics));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(create_cors_layer(&config.allowed_origins))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
