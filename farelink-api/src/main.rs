use std::net::SocketAddr;
use std::sync::Arc;

use farelink_api::{app, state::{AppState, HealthInfo}};
use farelink_upstream::{Config, OfferClient, SystemClock, TokenManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farelink_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Farelink proxy on port {}", config.server.port);

    // One shared outbound client; the platform's default deadlines apply,
    // no timeout of our own.
    let http = reqwest::Client::new();

    let tokens = Arc::new(TokenManager::new(
        http.clone(),
        &config.upstream.host,
        config.upstream.client_id.clone(),
        config.upstream.client_secret.clone(),
        Arc::new(SystemClock),
    ));
    let offers = Arc::new(OfferClient::new(
        http,
        &config.upstream.host,
        &config.upstream.currency,
        config.upstream.max_results,
        tokens,
    ));

    let state = AppState {
        offers,
        shape: config.http.response_shape,
        health: HealthInfo {
            client_id_configured: config.upstream.client_id.is_some(),
            client_secret_configured: config.upstream.client_secret.is_some(),
            upstream_host: config.upstream.host.clone(),
        },
    };

    let app = app(state, &config.http.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
