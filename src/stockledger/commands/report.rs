use crate::analytics::{daily_totals, product_daily_trends, summary_by_product, trend_for};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{LedgerBackend, LedgerStore};

pub fn summary<B: LedgerBackend>(store: &LedgerStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_summary(summary_by_product(store.all_records())))
}

pub fn daily<B: LedgerBackend>(store: &LedgerStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_daily(daily_totals(store.all_records())))
}

/// Trend series for every product, or only for `product` when given.
/// An unknown product yields an empty map rather than an error.
pub fn trends<B: LedgerBackend>(
    store: &LedgerStore<B>,
    product: Option<&str>,
) -> Result<CmdResult> {
    let records = store.all_records();
    let trends = match product {
        None => product_daily_trends(records),
        Some(name) => {
            let series = trend_for(records, name);
            let mut only = crate::analytics::ProductTrends::new();
            if !series.is_empty() {
                only.insert(name.to_string(), series);
            }
            only
        }
    };
    Ok(CmdResult::default().with_trends(trends))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::fixtures::LedgerFixture;

    fn fixture() -> LedgerFixture {
        LedgerFixture::new()
            .with_record("milk", 2, "2026-10-16 08:00:00")
            .with_record("bread", 1, "2026-10-16 09:00:00")
            .with_record("milk", 5, "2026-10-17 08:00:00")
    }

    #[test]
    fn summary_is_filled() {
        let result = summary(&fixture().store()).unwrap();
        let summary = result.summary.unwrap();
        assert_eq!(summary["milk"], 7);
        assert_eq!(summary["bread"], 1);
    }

    #[test]
    fn daily_is_filled() {
        let result = daily(&fixture().store()).unwrap();
        let values: Vec<u64> = result.daily.unwrap().into_values().collect();
        assert_eq!(values, vec![3, 5]);
    }

    #[test]
    fn trends_for_one_product() {
        let store = fixture().store();
        let result = trends(&store, Some("milk")).unwrap();
        let trends = result.trends.unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends["milk"].len(), 2);

        let unknown = super::trends(&store, Some("cheese")).unwrap();
        assert!(unknown.trends.unwrap().is_empty());
    }

    #[test]
    fn trends_for_all_products() {
        let result = trends(&fixture().store(), None).unwrap();
        assert_eq!(result.trends.unwrap().len(), 2);
    }
}
