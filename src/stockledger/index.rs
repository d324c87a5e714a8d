//! # Record Addressing
//!
//! Records are addressed in two ways:
//!
//! - **Position**: the record's place in the ledger. Users see it 1-based (`1`, `2`, ...),
//!   the store works 0-based. Positions shift after every add/delete, so they are only
//!   good until the next structural change.
//! - **Id**: the record's UUID, written `#` followed by a prefix of its hex form
//!   (`#3f9c2a1b`). Ids never change, which makes them safe for deferred edits.
//!
//! [`RecordSelector`] is the parsed user input; [`resolve`] turns it into a ledger
//! position against the current snapshot.

use crate::error::{LedgerError, Result};
use crate::model::StockRecord;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A user input selecting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// 0-based ledger position.
    Position(usize),
    /// Lowercase hex prefix of the record id, without hyphens.
    Id(String),
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Position(i) => write!(f, "{}", i + 1),
            RecordSelector::Id(prefix) => write!(f, "#{}", prefix),
        }
    }
}

impl FromStr for RecordSelector {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('#') {
            let prefix: String = rest.chars().filter(|c| *c != '-').collect();
            let prefix = prefix.to_lowercase();
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(LedgerError::Api(format!("Invalid record id: {}", s)));
            }
            return Ok(RecordSelector::Id(prefix));
        }
        match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(RecordSelector::Position(n - 1)),
            _ => Err(LedgerError::Api(format!("Invalid record index: {}", s))),
        }
    }
}

/// A record together with its ledger position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub index: usize,
    pub record: StockRecord,
}

impl DisplayRecord {
    pub fn new(index: usize, record: StockRecord) -> Self {
        Self { index, record }
    }

    /// 1-based position as shown to users.
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Resolve a selector to a 0-based position in `records`.
pub fn resolve(records: &[StockRecord], selector: &RecordSelector) -> Result<usize> {
    match selector {
        RecordSelector::Position(index) => {
            if *index < records.len() {
                Ok(*index)
            } else {
                Err(LedgerError::IndexOutOfRange {
                    index: *index,
                    len: records.len(),
                })
            }
        }
        RecordSelector::Id(prefix) => {
            let matches: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.id.simple().to_string().starts_with(prefix.as_str()))
                .map(|(i, _)| i)
                .collect();
            match matches.as_slice() {
                [only] => Ok(*only),
                [] => match Uuid::parse_str(prefix) {
                    Ok(id) => Err(LedgerError::RecordNotFound(id)),
                    Err(_) => Err(LedgerError::Api(format!("No record matches #{}", prefix))),
                },
                many => Err(LedgerError::Api(format!(
                    "#{} is ambiguous ({} records match)",
                    prefix,
                    many.len()
                ))),
            }
        }
    }
}
