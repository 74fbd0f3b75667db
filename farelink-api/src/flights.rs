use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use farelink_core::offer::{self, OfferSummary, ResponseShape};
use farelink_core::query::{CabinClass, SearchQuery};
use farelink_core::ProxyError;

use crate::error::ApiError;
use crate::state::AppState;

/// Inbound parameters, shared by the GET query string and the POST JSON
/// body. Everything is optional here; requiredness is enforced when the
/// `SearchQuery` is built so both entry points report the same 400s.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub depart: Option<String>,
    pub ret: Option<String>,
    pub adults: Option<u32>,
    pub cabin: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersResponse {
    pub offers: Vec<OfferSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
}

pub async fn search_offers_get(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<OffersResponse>, ApiError> {
    run_search(state, params).await
}

pub async fn search_offers_post(
    State(state): State<AppState>,
    Json(params): Json<SearchParams>,
) -> Result<Json<OffersResponse>, ApiError> {
    run_search(state, params).await
}

async fn run_search(state: AppState, params: SearchParams) -> Result<Json<OffersResponse>, ApiError> {
    let query = build_query(params)?;
    let mut offers = state.offers.search(&query).await?;

    let min_price = match state.shape {
        ResponseShape::Full => None,
        ResponseShape::Presentation => {
            offer::apply_presentation(&mut offers);
            offer::min_price(&offers)
        }
    };

    Ok(Json(OffersResponse { offers, min_price }))
}

fn build_query(params: SearchParams) -> Result<SearchQuery, ApiError> {
    let origin = required(params.origin, "origin")?;
    let destination = required(params.destination, "destination")?;
    let depart = required(params.depart, "depart")?;

    let cabin = match params.cabin.as_deref() {
        Some(cabin) => CabinClass::parse(cabin)?,
        None => CabinClass::default(),
    };
    let travelers = params.adults.unwrap_or(1).max(1);

    let query = SearchQuery::new(
        &origin,
        &destination,
        &depart,
        params.ret.as_deref(),
        travelers,
        cabin,
    )?;
    Ok(query)
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError(ProxyError::Validation(format!(
            "Missing required parameter: {}",
            name
        )))),
    }
}
