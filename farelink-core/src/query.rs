use chrono::NaiveDate;
use serde::Serialize;

use crate::{ProxyError, ProxyResult};

/// Cabin classes accepted by the upstream search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Parse a caller-supplied cabin name, case-insensitively.
    pub fn parse(value: &str) -> ProxyResult<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ECONOMY" => Ok(CabinClass::Economy),
            "PREMIUM_ECONOMY" => Ok(CabinClass::PremiumEconomy),
            "BUSINESS" => Ok(CabinClass::Business),
            "FIRST" => Ok(CabinClass::First),
            other => Err(ProxyError::Validation(format!(
                "Invalid cabin class '{}': expected one of ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST",
                other
            ))),
        }
    }

    /// The uppercase token the upstream expects in `travelClass`.
    pub fn as_upstream(&self) -> &'static str {
        match self {
            CabinClass::Economy => "ECONOMY",
            CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
            CabinClass::Business => "BUSINESS",
            CabinClass::First => "FIRST",
        }
    }
}

/// A validated flight search. Immutable once built; origin and destination
/// are stored uppercased so the upstream request never re-normalizes.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub travelers: u32,
    pub cabin: CabinClass,
}

impl SearchQuery {
    pub fn new(
        origin: &str,
        destination: &str,
        departure_date: &str,
        return_date: Option<&str>,
        travelers: u32,
        cabin: CabinClass,
    ) -> ProxyResult<Self> {
        let origin = validate_iata("origin", origin)?;
        let destination = validate_iata("destination", destination)?;
        validate_date("depart", departure_date)?;
        if let Some(ret) = return_date {
            validate_date("ret", ret)?;
        }

        Ok(SearchQuery {
            origin,
            destination,
            departure_date: departure_date.to_string(),
            return_date: return_date.map(|r| r.to_string()),
            travelers: travelers.max(1),
            cabin,
        })
    }

    /// One-way when no return date was supplied.
    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}

fn validate_iata(field: &str, value: &str) -> ProxyResult<String> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(value.to_ascii_uppercase())
    } else {
        Err(ProxyError::Validation(format!(
            "Invalid {} code '{}': expected a 3-letter IATA code",
            field, value
        )))
    }
}

// Dates are passed through verbatim to the upstream, so only check that
// the string is a real ISO 8601 calendar date.
fn validate_date(field: &str, value: &str) -> ProxyResult<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ProxyError::Validation(format!(
            "Invalid {} date '{}': expected an ISO 8601 date (YYYY-MM-DD)",
            field, value
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_uppercases_codes() {
        let q = SearchQuery::new("jfk", "lhr", "2025-06-01", Some("2025-06-10"), 2, CabinClass::Business)
            .expect("valid query");
        assert_eq!(q.origin, "JFK");
        assert_eq!(q.destination, "LHR");
        assert!(q.is_round_trip());
    }

    #[test]
    fn rejects_non_iata_destination() {
        let err = SearchQuery::new("NYC", "LON12", "2025-05-01", None, 1, CabinClass::Economy)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("destination"), "got: {}", msg);
        assert!(msg.contains("LON12"), "got: {}", msg);
    }

    #[test]
    fn rejects_malformed_departure_date() {
        let err = SearchQuery::new("JFK", "LHR", "01-06-2025", None, 1, CabinClass::Economy)
            .unwrap_err();
        assert!(err.to_string().contains("depart"));
    }

    #[test]
    fn floors_traveler_count_at_one() {
        let q = SearchQuery::new("JFK", "LHR", "2025-06-01", None, 0, CabinClass::Economy)
            .expect("valid query");
        assert_eq!(q.travelers, 1);
    }

    #[test]
    fn cabin_parse_is_case_insensitive() {
        assert_eq!(CabinClass::parse("business").unwrap(), CabinClass::Business);
        assert_eq!(CabinClass::parse("Premium_Economy").unwrap(), CabinClass::PremiumEconomy);
        assert!(CabinClass::parse("COACH").is_err());
    }
}
