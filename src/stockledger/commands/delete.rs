use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{resolve, DisplayRecord, RecordSelector};
use crate::store::{LedgerBackend, LedgerStore};

/// Delete every selected record.
///
/// All selectors are resolved against the snapshot before anything is removed, so
/// `delete 1 2` removes the first two records as listed, not the first and third.
/// The removals share one write: either all of them persist or none do.
pub fn run<B: LedgerBackend>(
    store: &mut LedgerStore<B>,
    selectors: &[RecordSelector],
) -> Result<CmdResult> {
    let mut ids = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let index = resolve(store.all_records(), selector)?;
        ids.push(store.get(index)?.id);
    }

    let affected = store
        .delete_many(&ids)?
        .into_iter()
        .map(|(index, record)| DisplayRecord::new(index, record))
        .collect();
    Ok(CmdResult::default().with_affected_records(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::store::mem_backend::fixtures::LedgerFixture;

    fn fixture() -> LedgerFixture {
        LedgerFixture::new()
            .with_record("a", 1, "2026-10-15 08:00:00")
            .with_record("b", 2, "2026-10-15 09:00:00")
            .with_record("c", 3, "2026-10-15 10:00:00")
    }

    fn names(store: &LedgerStore<crate::store::mem_backend::MemBackend>) -> Vec<String> {
        store
            .all_records()
            .iter()
            .map(|r| r.product_name.clone())
            .collect()
    }

    #[test]
    fn deletes_by_position() {
        let mut store = fixture().store();
        let result = run(&mut store, &[RecordSelector::Position(1)]).unwrap();
        assert_eq!(result.affected_records[0].record.product_name, "b");
        assert_eq!(names(&store), vec!["a", "c"]);
    }

    #[test]
    fn multiple_positions_resolve_before_shifting() {
        let mut store = fixture().store();
        run(
            &mut store,
            &[RecordSelector::Position(0), RecordSelector::Position(1)],
        )
        .unwrap();
        assert_eq!(names(&store), vec!["c"]);
        assert_eq!(store.backend().writes(), 1);
    }

    #[test]
    fn failed_write_deletes_nothing() {
        let mut store = fixture().store();
        store.backend().set_simulate_write_error(true);

        let err = run(
            &mut store,
            &[RecordSelector::Position(0), RecordSelector::Position(1)],
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
        assert_eq!(names(&store), vec!["a", "b", "c"]);
        assert_eq!(store.backend().load_records().unwrap().len(), 3);
    }

    #[test]
    fn duplicate_selectors_delete_once() {
        let mut store = fixture().store();
        let id = RecordSelector::Id(store.all_records()[2].short_id());
        let result = run(&mut store, &[RecordSelector::Position(2), id]).unwrap();
        assert_eq!(result.affected_records.len(), 1);
        assert_eq!(names(&store), vec!["a", "b"]);
    }

    #[test]
    fn any_bad_selector_deletes_nothing() {
        let mut store = fixture().store();
        let err = run(
            &mut store,
            &[RecordSelector::Position(0), RecordSelector::Position(9)],
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::IndexOutOfRange { .. }));
        assert_eq!(store.len(), 3);
    }
}
