use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod flights;
pub mod health;
pub mod state;

pub use state::AppState;

/// Build the proxy router. An empty origin list means wildcard CORS;
/// a non-empty list reflects only the named front-end origins (tower-http
/// adds `Vary: Origin` for list policies).
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    let cors = if allowed_origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    };

    Router::new()
        .route(
            "/api/flight-offers",
            get(flights::search_offers_get).post(flights::search_offers_post),
        )
        .route("/api/health", get(health::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
