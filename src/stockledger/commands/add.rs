use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayRecord;
use crate::model::ConfirmedCounts;
use crate::store::{LedgerBackend, LedgerStore};

pub fn run<B: LedgerBackend>(
    store: &mut LedgerStore<B>,
    product_name: &str,
    count: i64,
) -> Result<CmdResult> {
    let (index, record) = store.add(product_name, count)?;
    Ok(CmdResult::default().with_affected_records(vec![DisplayRecord::new(index, record)]))
}

/// Store the reviewed counts of one capture.
pub fn record<B: LedgerBackend>(
    store: &mut LedgerStore<B>,
    batch: &ConfirmedCounts,
) -> Result<CmdResult> {
    let first = store.len();
    let added = store.record_detections(batch)?;
    let affected = added
        .into_iter()
        .enumerate()
        .map(|(offset, record)| DisplayRecord::new(first + offset, record))
        .collect();
    Ok(CmdResult::default().with_affected_records(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn reports_new_record_position() {
        let mut store = LedgerStore::open(MemBackend::new()).unwrap();
        run(&mut store, "milk", 3).unwrap();
        let result = run(&mut store, "bread", 2).unwrap();

        assert_eq!(result.affected_records.len(), 1);
        assert_eq!(result.affected_records[0].index, 1);
        assert_eq!(result.affected_records[0].record.product_name, "bread");
    }

    #[test]
    fn rejects_non_positive_count() {
        let mut store = LedgerStore::open(MemBackend::new()).unwrap();
        assert!(matches!(
            run(&mut store, "milk", 0),
            Err(LedgerError::InvalidRecord(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn batch_positions_follow_existing_records() {
        let mut store = LedgerStore::open(MemBackend::new()).unwrap();
        run(&mut store, "milk", 1).unwrap();

        let batch: ConfirmedCounts = [("bottle".to_string(), 2), ("cup".to_string(), 1)]
            .into_iter()
            .collect();
        let result = record(&mut store, &batch).unwrap();
        let positions: Vec<_> = result.affected_records.iter().map(|r| r.index).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(store.all_records()[2].product_name, "cup");
    }
}
