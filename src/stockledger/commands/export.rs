use crate::commands::CmdResult;
use crate::error::Result;
use crate::export::export_csv;
use crate::model::now;
use crate::store::{LedgerBackend, LedgerStore};
use std::path::Path;

pub fn run<B: LedgerBackend>(store: &LedgerStore<B>, dest_dir: &Path) -> Result<CmdResult> {
    let outcome = export_csv(store.all_records(), dest_dir, now())?;
    Ok(CmdResult::default().with_export(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportOutcome;
    use crate::store::mem_backend::fixtures::LedgerFixture;
    use crate::store::mem_backend::MemBackend;
    use tempfile::TempDir;

    #[test]
    fn empty_store_exports_nothing() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::open(MemBackend::new()).unwrap();
        let result = run(&store, dir.path()).unwrap();
        assert_eq!(result.export, Some(ExportOutcome::NoData));
    }

    #[test]
    fn export_leaves_ledger_alone() {
        let dir = TempDir::new().unwrap();
        let store = LedgerFixture::new()
            .with_record("milk", 3, "2026-10-15 08:00:00")
            .store();
        let before = store.all_records().to_vec();

        let result = run(&store, dir.path()).unwrap();
        assert!(matches!(result.export, Some(ExportOutcome::Written(_))));
        assert_eq!(store.all_records(), before.as_slice());
        assert_eq!(store.backend().writes(), 0);
    }
}
