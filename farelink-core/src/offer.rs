use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Raw upstream payload models
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPrice {
    pub grand_total: Option<String>,
    pub total: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSegment {
    pub carrier_code: Option<String>,
    pub number: Option<String>,
    // Departure/arrival are passed through untouched, so keep them as raw
    // JSON rather than re-modelling the upstream's airport/terminal shape.
    pub departure: Value,
    pub arrival: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItinerary {
    pub duration: Option<String>,
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOffer {
    pub price: Option<RawPrice>,
    pub validating_airline_codes: Vec<String>,
    pub itineraries: Vec<RawItinerary>,
}

// ============================================================================
// Trimmed response shape
// ============================================================================

/// How offer summaries are rendered for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// Direct structural projection of the upstream offer.
    #[default]
    Full,
    /// Adds a minimum price and rewrites ISO 8601 durations into a
    /// friendlier label (`PT12H30M` -> `12h 30m`).
    Presentation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub carrier_code: Option<String>,
    pub number: Option<String>,
    pub departure: Value,
    pub arrival: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummary {
    pub duration: String,
    pub segments: Vec<SegmentSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub total_price: Option<String>,
    pub carrier_codes: Vec<String>,
    pub itineraries: Vec<ItinerarySummary>,
}

// ============================================================================
// Projection
// ============================================================================

/// Extract the offer list from a raw search payload. A missing or
/// non-array `data` field degrades to an empty list instead of an error;
/// zero offers is a renderable state for the caller.
pub fn offers_from_payload(payload: Value) -> Vec<RawOffer> {
    let Some(data) = payload.get("data") else {
        tracing::warn!("upstream search payload has no data field, returning zero offers");
        return Vec::new();
    };
    if !data.is_array() {
        tracing::warn!("upstream search data field is not an array, returning zero offers");
        return Vec::new();
    }
    match serde_json::from_value(data.clone()) {
        Ok(offers) => offers,
        Err(err) => {
            tracing::warn!("upstream offer list failed to parse: {}", err);
            Vec::new()
        }
    }
}

/// Project one raw offer into the trimmed summary. Total price prefers
/// `grandTotal` and falls back to `total`; everything else is verbatim.
pub fn summarize(offer: RawOffer) -> OfferSummary {
    let total_price = offer
        .price
        .and_then(|p| p.grand_total.or(p.total));

    let itineraries = offer
        .itineraries
        .into_iter()
        .map(|it| ItinerarySummary {
            duration: it.duration.unwrap_or_default(),
            segments: it
                .segments
                .into_iter()
                .map(|s| SegmentSummary {
                    carrier_code: s.carrier_code,
                    number: s.number,
                    departure: s.departure,
                    arrival: s.arrival,
                })
                .collect(),
        })
        .collect();

    OfferSummary {
        total_price,
        carrier_codes: offer.validating_airline_codes,
        itineraries,
    }
}

pub fn summarize_all(offers: Vec<RawOffer>) -> Vec<OfferSummary> {
    offers.into_iter().map(summarize).collect()
}

/// Presentation shaping: rewrite duration labels in place.
pub fn apply_presentation(offers: &mut [OfferSummary]) {
    for offer in offers.iter_mut() {
        for itinerary in offer.itineraries.iter_mut() {
            itinerary.duration = friendly_duration(&itinerary.duration);
        }
    }
}

/// Lowest total price across the summaries, as the original price string.
pub fn min_price(offers: &[OfferSummary]) -> Option<String> {
    offers
        .iter()
        .filter_map(|o| {
            let text = o.total_price.as_ref()?;
            let amount: f64 = text.parse().ok()?;
            Some((amount, text))
        })
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, text)| text.clone())
}

/// `PT12H30M` -> `12h 30m`. Anything that does not look like an ISO 8601
/// time duration is returned unchanged.
pub fn friendly_duration(iso: &str) -> String {
    let Some(rest) = iso.strip_prefix("PT") else {
        return iso.to_string();
    };

    let mut parts = Vec::new();
    let mut digits = String::new();
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == 'H' && !digits.is_empty() {
            parts.push(format!("{}h", digits));
            digits.clear();
        } else if c == 'M' && !digits.is_empty() {
            parts.push(format!("{}m", digits));
            digits.clear();
        } else {
            return iso.to_string();
        }
    }
    if parts.is_empty() || !digits.is_empty() {
        return iso.to_string();
    }
    parts.join(" ")
}
