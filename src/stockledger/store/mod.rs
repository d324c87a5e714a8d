//! # Storage Layer
//!
//! The ledger is owned by a single [`LedgerStore`], which keeps the ordered record
//! sequence in memory and re-persists the whole sequence on every mutation through a
//! [`LedgerBackend`].
//!
//! ## Split of Responsibilities
//!
//! - [`LedgerBackend`] handles the "how": reading and writing the encoded ledger.
//! - [`LedgerStore`] handles the "what": validation, positional and id lookup, and the
//!   stage → persist → commit sequence that keeps memory and storage in step.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, a JSON file rewritten atomically
//!   (tmp file + rename).
//! - [`mem_backend::MemBackend`]: in-memory for tests. Holds the same JSON text the file
//!   backend would, so decoding and corruption paths are shared. Can simulate write
//!   failures.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── stock_data.json     # JSON array of records, insertion order
//! └── config.json         # StockConfig
//! ```
//!
//! Each record carries `id`, `product_name`, `count` and `timestamp`
//! (`YYYY-MM-DD HH:MM:SS`, local time). Non-ASCII names are written as-is.

use crate::error::{LedgerError, Result};
use crate::model::{legacy_id, StockRecord};
use std::path::{Path, PathBuf};

pub mod fs_backend;
pub mod ledger_store;
pub mod mem_backend;

pub use ledger_store::LedgerStore;

/// Abstract interface for raw ledger persistence.
pub trait LedgerBackend {
    /// Load the persisted records.
    /// Returns an empty vector when nothing has been persisted yet.
    /// Returns `StorageCorrupt` when persisted data exists but does not decode.
    fn load_records(&self) -> Result<Vec<StockRecord>>;

    /// Replace the persisted records with `records`.
    /// MUST be all-or-nothing: on error the previous persisted state is intact.
    fn save_records(&self, records: &[StockRecord]) -> Result<()>;

    /// Where the ledger lives. Virtual for non-file backends.
    fn location(&self) -> PathBuf;
}

pub(crate) fn encode_records(records: &[StockRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(LedgerError::Serialization)
}

/// Records stored without an id get [`legacy_id`], so decoding the same text twice
/// yields the same ids.
pub(crate) fn decode_records(path: &Path, content: &str) -> Result<Vec<StockRecord>> {
    let mut records: Vec<StockRecord> =
        serde_json::from_str(content).map_err(|source| LedgerError::StorageCorrupt {
            path: path.to_path_buf(),
            source,
        })?;
    for (position, record) in records.iter_mut().enumerate() {
        if record.id.is_nil() {
            record.id = legacy_id(position, record);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;

    #[test]
    fn encode_then_decode_preserves_order_and_fields() {
        let ts = parse_timestamp("2026-10-17 09:00:00").unwrap();
        let records = vec![
            StockRecord::with_timestamp("milk", 3, ts),
            StockRecord::with_timestamp("ขนมปัง", 2, ts),
        ];
        let text = encode_records(&records).unwrap();
        assert!(text.contains("ขนมปัง"));

        let decoded = decode_records(Path::new("mem"), &text).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn decode_assigns_stable_ids_to_legacy_records() {
        let legacy = r#"[
  {"product_name": "milk", "count": 3, "timestamp": "2026-10-16 08:00:00"},
  {"product_name": "milk", "count": 3, "timestamp": "2026-10-16 08:00:00"}
]"#;
        let first = decode_records(Path::new("mem"), legacy).unwrap();
        let second = decode_records(Path::new("mem"), legacy).unwrap();
        assert_eq!(first, second);
        assert_ne!(first[0].id, first[1].id);
        assert!(first.iter().all(|r| !r.id.is_nil()));
    }

    #[test]
    fn decode_of_blank_name_is_corrupt() {
        let text = r#"[{"product_name": "   ", "count": 1, "timestamp": "2026-10-16 08:00:00"}]"#;
        let err = decode_records(Path::new("mem"), text).unwrap_err();
        assert!(matches!(err, LedgerError::StorageCorrupt { .. }));
    }

    #[test]
    fn decode_of_wrong_shape_is_corrupt() {
        let err = decode_records(Path::new("mem"), r#"{"product_name": "milk"}"#).unwrap_err();
        assert!(matches!(err, LedgerError::StorageCorrupt { .. }));
    }
}
