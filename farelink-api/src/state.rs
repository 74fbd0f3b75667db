use std::sync::Arc;

use farelink_core::offer::ResponseShape;
use farelink_upstream::OfferClient;

/// Operational facts surfaced by the health endpoint. Boolean presence
/// flags only, never the secret values.
#[derive(Clone)]
pub struct HealthInfo {
    pub client_id_configured: bool,
    pub client_secret_configured: bool,
    pub upstream_host: String,
}

#[derive(Clone)]
pub struct AppState {
    pub offers: Arc<OfferClient>,
    pub shape: ResponseShape,
    pub health: HealthInfo,
}
