use crate::commands::{CmdResult, RecordUpdate};
use crate::error::{LedgerError, Result};
use crate::index::{resolve, DisplayRecord, RecordSelector};
use crate::store::{LedgerBackend, LedgerStore};

pub fn run<B: LedgerBackend>(
    store: &mut LedgerStore<B>,
    selector: &RecordSelector,
    update: &RecordUpdate,
) -> Result<CmdResult> {
    if update.is_empty() {
        return Err(LedgerError::Api("Nothing to update".to_string()));
    }

    let index = resolve(store.all_records(), selector)?;
    let current = store.get(index)?;
    let name = update
        .product_name
        .clone()
        .unwrap_or_else(|| current.product_name.clone());
    let count = update
        .count
        .clone()
        .unwrap_or_else(|| current.count.to_string());

    let record = store.update_from_text(index, &name, &count)?;
    Ok(CmdResult::default().with_affected_records(vec![DisplayRecord::new(index, record)]))
}
