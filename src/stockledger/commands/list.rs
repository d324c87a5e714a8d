use crate::analytics::filter_records;
use crate::commands::{CmdResult, RecordFilter};
use crate::error::Result;
use crate::index::DisplayRecord;
use crate::store::{LedgerBackend, LedgerStore};

/// Records matching `filter`, in ledger order. Reversing for display is up to the client.
pub fn run<B: LedgerBackend>(store: &LedgerStore<B>, filter: &RecordFilter) -> Result<CmdResult> {
    let listed = filter_records(
        store.all_records(),
        filter.name.as_deref(),
        filter.date.as_deref(),
    )
    .into_iter()
    .map(|(index, record)| DisplayRecord::new(index, record.clone()))
    .collect();

    Ok(CmdResult::default().with_listed_records(listed))
}
