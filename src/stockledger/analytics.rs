//! # Analytics Engine
//!
//! Pure derivations over a ledger snapshot. Nothing here mutates or caches; every call
//! walks the records again. Totals are `u64` so summing many `u32` counts cannot overflow.
//!
//! Trend series are independent per product. Dates a product was never counted on are
//! simply absent from its series: there is no zero-filling and no alignment across
//! products.

use crate::model::{StockRecord, TIMESTAMP_FORMAT};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Total count per product name (exact, case-sensitive match).
pub type ProductTotals = BTreeMap<String, u64>;

/// Total count per calendar date, ascending.
pub type DailyTotals = BTreeMap<NaiveDate, u64>;

/// One daily series per product.
pub type ProductTrends = BTreeMap<String, DailyTotals>;

pub fn summary_by_product(records: &[StockRecord]) -> ProductTotals {
    let mut totals = ProductTotals::new();
    for record in records {
        *totals.entry(record.product_name.clone()).or_insert(0) += u64::from(record.count);
    }
    totals
}

pub fn daily_totals(records: &[StockRecord]) -> DailyTotals {
    let mut totals = DailyTotals::new();
    for record in records {
        *totals.entry(record.date()).or_insert(0) += u64::from(record.count);
    }
    totals
}

pub fn product_daily_trends(records: &[StockRecord]) -> ProductTrends {
    let mut trends = ProductTrends::new();
    for record in records {
        *trends
            .entry(record.product_name.clone())
            .or_default()
            .entry(record.date())
            .or_insert(0) += u64::from(record.count);
    }
    trends
}

/// Daily series of a single product; empty when the product was never counted.
pub fn trend_for(records: &[StockRecord], product_name: &str) -> DailyTotals {
    let mut series = DailyTotals::new();
    for record in records.iter().filter(|r| r.product_name == product_name) {
        *series.entry(record.date()).or_insert(0) += u64::from(record.count);
    }
    series
}

/// Largest daily total in a series, for scaling a chart's value axis.
pub fn peak(series: &DailyTotals) -> Option<u64> {
    series.values().copied().max()
}

/// History search: records whose name contains `name_query` (case-insensitive) and whose
/// rendered timestamp contains `date_query`.
///
/// Indices are positions in the full ledger, so matches can be edited or deleted directly.
pub fn filter_records<'a>(
    records: &'a [StockRecord],
    name_query: Option<&str>,
    date_query: Option<&str>,
) -> Vec<(usize, &'a StockRecord)> {
    let name_query = name_query.map(|q| q.trim().to_lowercase());
    let date_query = date_query.map(str::trim);

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| match &name_query {
            Some(q) => r.product_name.to_lowercase().contains(q.as_str()),
            None => true,
        })
        .filter(|(_, r)| match date_query {
            Some(q) => r.timestamp.format(TIMESTAMP_FORMAT).to_string().contains(q),
            None => true,
        })
        .collect()
}
