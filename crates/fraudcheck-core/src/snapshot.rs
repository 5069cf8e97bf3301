//! Record model and the immutable snapshot with its derived indexes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the feed after normalization. Multiple records may share a
/// phone — one per location the phone was reported in.
#[derive(Debug, Clone, Serialize)]
pub struct FraudRecord {
    /// Normalized phone number, never empty.
    pub phone: String,
    pub state: String,
    pub city: String,
    pub zone: String,
    /// Kept as upstream text; not guaranteed numeric.
    pub distinct_customers: String,
    /// Source order, duplicates preserved.
    pub customer_ids: Vec<String>,
}

/// One fully built generation of records plus both lookup indexes.
///
/// Never mutated after [`Snapshot::build`]; the cache publishes a new
/// generation by swapping an `Arc<Snapshot>`, so readers see either the
/// whole old generation or the whole new one.
#[derive(Debug)]
pub struct Snapshot {
    records: Vec<FraudRecord>,
    /// Normalized phone → indexes into `records`, in source order.
    phone_index: HashMap<String, Vec<usize>>,
    /// Customer id → normalized phone. Last writer wins on duplicates.
    customer_index: HashMap<String, String>,
    built_at: DateTime<Utc>,
}

impl Snapshot {
    /// The pre-first-fetch state: no records, no index entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    /// Builds both indexes over `records`. Pure and deterministic apart
    /// from the timestamp; touches no shared state, so it can run while
    /// readers keep using the previously published snapshot.
    #[must_use]
    pub fn build(records: Vec<FraudRecord>) -> Self {
        let mut phone_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut customer_index: HashMap<String, String> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            phone_index
                .entry(record.phone.clone())
                .or_default()
                .push(idx);

            for customer_id in &record.customer_ids {
                if let Some(previous) =
                    customer_index.insert(customer_id.clone(), record.phone.clone())
                {
                    if previous != record.phone {
                        tracing::warn!(
                            customer_id = %customer_id,
                            previous_phone = %previous,
                            phone = %record.phone,
                            "customer id listed under multiple phones; later row wins"
                        );
                    }
                }
            }
        }

        Self {
            records,
            phone_index,
            customer_index,
            built_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[FraudRecord] {
        &self.records
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn phone_count(&self) -> usize {
        self.phone_index.len()
    }

    #[must_use]
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    #[must_use]
    pub fn contains_phone(&self, phone: &str) -> bool {
        self.phone_index.contains_key(phone)
    }

    /// Records for a phone in the order they appeared in the feed. Empty
    /// for unknown phones.
    pub fn records_for<'a>(&'a self, phone: &str) -> impl Iterator<Item = &'a FraudRecord> + 'a {
        self.phone_index
            .get(phone)
            .into_iter()
            .flatten()
            .map(|&idx| &self.records[idx])
    }

    /// The phone a customer id points back at, if any.
    #[must_use]
    pub fn phone_for_customer(&self, customer_id: &str) -> Option<&str> {
        self.customer_index.get(customer_id).map(String::as_str)
    }

    /// Every customer-index target, for invariant checks in tests.
    pub fn customer_index_phones(&self) -> impl Iterator<Item = &str> + '_ {
        self.customer_index.values().map(String::as_str)
    }
}
