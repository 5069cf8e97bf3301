//! Lookup engine: resolves a raw query against a snapshot and shapes the
//! response payload.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parse::{display_phone, normalize_phone};
use crate::snapshot::Snapshot;

/// Whether the queried identifier is associated with known fraud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Fraud,
    NotFraud,
}

/// One location a fraud phone was reported in, exposed verbatim from the
/// matching record.
#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub state: String,
    pub city: String,
    pub zone: String,
    pub distinct_customers: String,
    pub customer_ids: Vec<String>,
}

/// The answer to one search query.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Display form of the matched phone (or of the query on no match).
    pub phone: String,
    pub locations: Vec<LocationView>,
    /// Always equals `phone`; kept as a separate field for the response
    /// shape the boundary layer renders.
    pub search_value: String,
}

/// Point-in-time cache diagnostics, never triggers a refresh.
#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub total_records: usize,
    pub unique_phones: usize,
    pub built_at: DateTime<Utc>,
}

/// Resolves `query` against `snapshot`.
///
/// Resolution order, first match wins: the normalized query as a phone
/// key, then the raw query as a customer id. On a match the display phone
/// re-inflates a 10-character key with its national `0` prefix; on no
/// match the same 10-character rule applies to the raw query itself.
#[must_use]
pub fn resolve(snapshot: &Snapshot, query: &str) -> SearchResult {
    let normalized = normalize_phone(query);

    let matched = if snapshot.contains_phone(&normalized) {
        Some(normalized)
    } else {
        snapshot.phone_for_customer(query).map(ToOwned::to_owned)
    };

    match matched {
        Some(phone) => {
            let locations = snapshot
                .records_for(&phone)
                .map(|record| LocationView {
                    state: record.state.clone(),
                    city: record.city.clone(),
                    zone: record.zone.clone(),
                    distinct_customers: record.distinct_customers.clone(),
                    customer_ids: record.customer_ids.clone(),
                })
                .collect();
            let display = display_phone(&phone);
            SearchResult {
                status: SearchStatus::Fraud,
                phone: display.clone(),
                locations,
                search_value: display,
            }
        }
        None => {
            let display = display_phone(query);
            SearchResult {
                status: SearchStatus::NotFraud,
                phone: display.clone(),
                locations: Vec::new(),
                search_value: display,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FraudRecord;

    fn snapshot() -> Snapshot {
        Snapshot::build(vec![
            FraudRecord {
                phone: "5551234".to_owned(),
                state: "Lagos".to_owned(),
                city: "Ikeja".to_owned(),
                zone: "South".to_owned(),
                distinct_customers: "2".to_owned(),
                customer_ids: vec!["CUST9".to_owned(), "CUST10".to_owned()],
            },
            FraudRecord {
                phone: "7400123456".to_owned(),
                state: "Abuja".to_owned(),
                city: "Garki".to_owned(),
                zone: "North".to_owned(),
                distinct_customers: "1".to_owned(),
                customer_ids: vec!["CUST11".to_owned()],
            },
        ])
    }

    #[test]
    fn phone_query_and_customer_query_return_same_locations() {
        let snapshot = snapshot();
        let by_phone = resolve(&snapshot, "5551234");
        let by_customer = resolve(&snapshot, "CUST9");

        assert_eq!(by_phone.status, SearchStatus::Fraud);
        assert_eq!(by_customer.status, SearchStatus::Fraud);
        assert_eq!(by_phone.locations.len(), 1);
        assert_eq!(by_phone.locations[0].city, "Ikeja");
        assert_eq!(by_customer.locations[0].city, "Ikeja");
        assert_eq!(by_phone.phone, by_customer.phone);
    }

    #[test]
    fn national_format_query_matches_normalized_key() {
        let result = resolve(&snapshot(), "07400123456");
        assert_eq!(result.status, SearchStatus::Fraud);
        assert_eq!(result.locations[0].state, "Abuja");
        // 10-character key re-inflates for display.
        assert_eq!(result.phone, "07400123456");
        assert_eq!(result.search_value, "07400123456");
    }

    #[test]
    fn short_phone_displays_as_is() {
        let result = resolve(&snapshot(), "5551234");
        assert_eq!(result.phone, "5551234");
    }

    #[test]
    fn no_match_echoes_query_with_display_rule() {
        let result = resolve(&snapshot(), "0000000000");
        assert_eq!(result.status, SearchStatus::NotFraud);
        assert!(result.locations.is_empty());
        // 10-character raw query gets the literal `0` prefix.
        assert_eq!(result.search_value, "00000000000");
        assert_eq!(result.phone, "00000000000");
    }

    #[test]
    fn no_match_non_ten_character_query_is_unchanged() {
        let result = resolve(&snapshot(), "UNKNOWN");
        assert_eq!(result.status, SearchStatus::NotFraud);
        assert_eq!(result.search_value, "UNKNOWN");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&resolve(&snapshot(), "nope")).expect("serialize");
        assert!(json.contains("\"status\":\"notfraud\""));
    }
}
