use crate::error::{LedgerError, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Wire and display format of record timestamps (local time, second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date portion of [`TIMESTAMP_FORMAT`], used as the grouping key in analytics.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Confirmed quantities from one reviewed capture, keyed by detected label.
pub type ConfirmedCounts = BTreeMap<String, u32>;

/// One confirmed observation of a product and quantity at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    // Older ledger files have no ids. Nil here; the store assigns a stable one on load.
    #[serde(default)]
    pub id: Uuid,
    #[serde(deserialize_with = "non_blank_name")]
    pub product_name: String,
    #[serde(deserialize_with = "positive_count")]
    pub count: u32,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl StockRecord {
    /// Creates a record stamped with the current local time.
    ///
    /// Does not validate; the store validates before constructing.
    pub fn new(product_name: impl Into<String>, count: u32) -> Self {
        Self::with_timestamp(product_name, count, now())
    }

    pub fn with_timestamp(
        product_name: impl Into<String>,
        count: u32,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_name: product_name.into(),
            count,
            timestamp,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// First eight hex digits of the id, enough to address a record by hand.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// Namespace for ids derived from legacy records that were stored without one.
const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5f0c_2b6e_9d41_4a7e_b3c8_1e6d_7a90_24f1);

/// Deterministic id for a record persisted without one, from its position and contents.
///
/// The same file always yields the same ids, so an id shown in one session still
/// resolves in the next, before any mutation has written the ids back.
pub fn legacy_id(position: usize, record: &StockRecord) -> Uuid {
    let key = format!(
        "{}|{}|{}|{}",
        position,
        record.product_name,
        record.count,
        record.timestamp_string()
    );
    Uuid::new_v5(&LEGACY_ID_NAMESPACE, key.as_bytes())
}

/// Current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| LedgerError::InvalidRecord(format!("bad timestamp '{}': {}", s, e)))
}

/// Trims a product name and rejects it if nothing is left.
pub fn validate_product_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidRecord(
            "product name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Accepts counts in `1..=u32::MAX`.
pub fn validate_count(count: i64) -> Result<u32> {
    if count < 1 {
        return Err(LedgerError::InvalidRecord(format!(
            "count must be at least 1, got {}",
            count
        )));
    }
    u32::try_from(count)
        .map_err(|_| LedgerError::InvalidRecord(format!("count {} is too large", count)))
}

/// Coerces user-entered text into a positive count.
pub fn parse_count(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| LedgerError::InvalidRecord(format!("count '{}' is not a number", trimmed)))?;
    validate_count(value)
}

fn non_blank_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        return Err(serde::de::Error::custom("product name cannot be blank"));
    }
    Ok(name)
}

fn positive_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = u32::deserialize(deserializer)?;
    if count == 0 {
        return Err(serde::de::Error::custom("record count must be at least 1"));
    }
    Ok(count)
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
