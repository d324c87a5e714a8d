//! # Command Layer
//!
//! One module per operation. Each `run` takes the store (and whatever else it needs) as
//! plain Rust arguments and returns a [`CmdResult`] of typed data. No text is produced here:
//! turning results into words is the client's job.

use crate::analytics::{DailyTotals, ProductTotals, ProductTrends};
use crate::config::StockConfig;
use crate::error::{LedgerError, Result};
use crate::export::ExportOutcome;
use crate::index::DisplayRecord;
use std::path::{Path, PathBuf};

pub mod add;
pub mod config;
pub mod delete;
pub mod export;
pub mod list;
pub mod report;
pub mod update;

/// Filesystem locations the client resolved at startup.
#[derive(Debug, Clone)]
pub struct StockPaths {
    pub data_dir: PathBuf,
    /// Fallback export destination when the config does not name one.
    pub work_dir: PathBuf,
}

impl StockPaths {
    pub fn data_dir(&self) -> Result<&Path> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(LedgerError::Config("no data directory configured".to_string()));
        }
        Ok(&self.data_dir)
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created, changed or removed, with the position they had.
    pub affected_records: Vec<DisplayRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub summary: Option<ProductTotals>,
    pub daily: Option<DailyTotals>,
    pub trends: Option<ProductTrends>,
    pub export: Option<ExportOutcome>,
    pub config: Option<StockConfig>,
}

impl CmdResult {
    pub fn with_affected_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_summary(mut self, summary: ProductTotals) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_daily(mut self, daily: DailyTotals) -> Self {
        self.daily = Some(daily);
        self
    }

    pub fn with_trends(mut self, trends: ProductTrends) -> Self {
        self.trends = Some(trends);
        self
    }

    pub fn with_export(mut self, outcome: ExportOutcome) -> Self {
        self.export = Some(outcome);
        self
    }

    pub fn with_config(mut self, config: StockConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// A correction to one record. Unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub product_name: Option<String>,
    /// Count as the user typed it; coerced to a positive integer.
    pub count: Option<String>,
}

impl RecordUpdate {
    pub fn new(product_name: Option<String>, count: Option<String>) -> Self {
        Self {
            product_name,
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.count.is_none()
    }
}

/// History list filter: case-insensitive name substring and timestamp substring.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub name: Option<String>,
    pub date: Option<String>,
}
