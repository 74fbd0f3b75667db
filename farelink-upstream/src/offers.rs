//! Flight-offer search against the upstream shopping endpoint.

use std::sync::Arc;

use farelink_core::offer::{self, OfferSummary};
use farelink_core::query::SearchQuery;
use farelink_core::{ProxyError, ProxyResult};

use crate::token::TokenManager;

pub struct OfferClient {
    http: reqwest::Client,
    search_url: String,
    currency: String,
    max_results: u32,
    tokens: Arc<TokenManager>,
}

impl OfferClient {
    pub fn new(
        http: reqwest::Client,
        host: &str,
        currency: &str,
        max_results: u32,
        tokens: Arc<TokenManager>,
    ) -> Self {
        OfferClient {
            http,
            search_url: format!("{}/v2/shopping/flight-offers", host.trim_end_matches('/')),
            currency: currency.to_string(),
            max_results,
            tokens,
        }
    }

    /// Run one search round trip: acquire a credential, issue the GET,
    /// and project the payload into offer summaries. No retries, no
    /// sorting, no filtering; a payload without an offer list degrades
    /// to zero results.
    pub async fn search(&self, query: &SearchQuery) -> ProxyResult<Vec<OfferSummary>> {
        let credential = self.tokens.acquire().await?;

        let adults = query.travelers.to_string();
        let max = self.max_results.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("originLocationCode", query.origin.as_str()),
            ("destinationLocationCode", query.destination.as_str()),
            ("departureDate", query.departure_date.as_str()),
        ];
        if let Some(ret) = &query.return_date {
            params.push(("returnDate", ret.as_str()));
        }
        params.push(("adults", adults.as_str()));
        params.push(("travelClass", query.cabin.as_upstream()));
        params.push(("currencyCode", self.currency.as_str()));
        params.push(("max", max.as_str()));
        params.push(("nonStop", "false"));

        let response = self
            .http
            .get(&self.search_url)
            .bearer_auth(&credential.token)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ProxyError::UpstreamSearch { status, body });
        }

        let payload: serde_json::Value = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("upstream search body is not JSON ({}), returning zero offers", err);
                return Ok(Vec::new());
            }
        };

        let offers = offer::offers_from_payload(payload);
        tracing::debug!(
            "search {} -> {} returned {} offers",
            query.origin,
            query.destination,
            offers.len()
        );
        Ok(offer::summarize_all(offers))
    }
}
