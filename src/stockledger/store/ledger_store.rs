use super::LedgerBackend;
use crate::error::{LedgerError, Result};
use crate::model::{
    now, parse_count, validate_count, validate_product_name, ConfirmedCounts, StockRecord,
};
use log::{debug, info};
use std::path::PathBuf;
use uuid::Uuid;

/// Owner of the ledger: the ordered record sequence plus its persisted form.
///
/// Every mutation is staged on a copy, persisted through the backend, and only then
/// committed in memory. A failed write therefore leaves both sides as they were.
pub struct LedgerStore<B: LedgerBackend> {
    backend: B,
    records: Vec<StockRecord>,
}

impl<B: LedgerBackend> LedgerStore<B> {
    /// Load the ledger from `backend`. Nothing persisted yet means an empty ledger.
    pub fn open(backend: B) -> Result<Self> {
        let records = backend.load_records()?;
        info!(
            "opened ledger at {} ({} records)",
            backend.location().display(),
            records.len()
        );
        Ok(Self { backend, records })
    }

    /// Re-read persisted state. On failure the current snapshot is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.records = self.backend.load_records()?;
        Ok(())
    }

    /// Read-only snapshot in insertion order, most recent last.
    pub fn all_records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&StockRecord> {
        self.records.get(index).ok_or(LedgerError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn get_by_id(&self, id: &Uuid) -> Result<&StockRecord> {
        let index = self.position_of(id)?;
        Ok(&self.records[index])
    }

    pub fn position_of(&self, id: &Uuid) -> Result<usize> {
        self.records
            .iter()
            .position(|r| &r.id == id)
            .ok_or(LedgerError::RecordNotFound(*id))
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append a record stamped now. Returns its index and a copy of it.
    pub fn add(&mut self, product_name: &str, count: i64) -> Result<(usize, StockRecord)> {
        let name = validate_product_name(product_name)?;
        let count = validate_count(count)?;
        let record = StockRecord::new(name, count);

        let mut staged = self.records.clone();
        staged.push(record.clone());
        self.commit(staged)?;

        info!("added {} x{}", record.product_name, record.count);
        Ok((self.records.len() - 1, record))
    }

    /// Append the confirmed output of one reviewed capture.
    ///
    /// Zeroed entries are dropped. Everything else must be valid or nothing is added.
    /// All added records share one timestamp and one write. An all-zero batch adds
    /// nothing and does not touch storage.
    pub fn record_detections(&mut self, batch: &ConfirmedCounts) -> Result<Vec<StockRecord>> {
        let timestamp = now();
        let mut added = Vec::new();
        for (label, &count) in batch {
            if count == 0 {
                debug!("dropping zeroed detection '{}'", label);
                continue;
            }
            let name = validate_product_name(label)?;
            added.push(StockRecord::with_timestamp(name, count, timestamp));
        }

        if added.is_empty() {
            return Ok(added);
        }

        let mut staged = self.records.clone();
        staged.extend(added.iter().cloned());
        self.commit(staged)?;

        info!("recorded {} detections", added.len());
        Ok(added)
    }

    /// Replace name and count of the record at `index`; the timestamp is kept.
    pub fn update(
        &mut self,
        index: usize,
        new_product_name: &str,
        new_count: i64,
    ) -> Result<StockRecord> {
        self.get(index)?;
        let name = validate_product_name(new_product_name)?;
        let count = validate_count(new_count)?;

        let mut staged = self.records.clone();
        staged[index].product_name = name;
        staged[index].count = count;
        self.commit(staged)?;

        info!("updated record {}", index);
        Ok(self.records[index].clone())
    }

    /// Like [`Self::update`], with the count still in its user-entered text form.
    pub fn update_from_text(
        &mut self,
        index: usize,
        new_product_name: &str,
        new_count: &str,
    ) -> Result<StockRecord> {
        self.get(index)?;
        let count = parse_count(new_count)?;
        self.update(index, new_product_name, i64::from(count))
    }

    pub fn update_by_id(
        &mut self,
        id: &Uuid,
        new_product_name: &str,
        new_count: i64,
    ) -> Result<StockRecord> {
        let index = self.position_of(id)?;
        self.update(index, new_product_name, new_count)
    }

    /// Remove the record at `index`. Later records shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<StockRecord> {
        self.get(index)?;

        let mut staged = self.records.clone();
        let removed = staged.remove(index);
        self.commit(staged)?;

        info!("deleted record {} ({})", index, removed.product_name);
        Ok(removed)
    }

    pub fn delete_by_id(&mut self, id: &Uuid) -> Result<StockRecord> {
        let index = self.position_of(id)?;
        self.delete(index)
    }

    /// Remove every record in `ids` with a single write. Duplicate ids are ignored.
    ///
    /// Returns the removed records with the positions they had, in `ids` order.
    /// Any unknown id fails the whole call before anything is staged.
    pub fn delete_many(&mut self, ids: &[Uuid]) -> Result<Vec<(usize, StockRecord)>> {
        let mut positions = Vec::with_capacity(ids.len());
        for id in ids {
            let index = self.position_of(id)?;
            if !positions.contains(&index) {
                positions.push(index);
            }
        }
        if positions.is_empty() {
            return Ok(Vec::new());
        }

        let removed: Vec<(usize, StockRecord)> = positions
            .iter()
            .map(|&index| (index, self.records[index].clone()))
            .collect();
        let staged = self
            .records
            .iter()
            .enumerate()
            .filter(|(index, _)| !positions.contains(index))
            .map(|(_, record)| record.clone())
            .collect();
        self.commit(staged)?;

        info!("deleted {} records", removed.len());
        Ok(removed)
    }

    fn commit(&mut self, staged: Vec<StockRecord>) -> Result<()> {
        self.backend.save_records(&staged)?;
        self.records = staged;
        Ok(())
    }
}
