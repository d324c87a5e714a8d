use super::{decode_records, encode_records, LedgerBackend};
use crate::error::{LedgerError, Result};
use crate::model::StockRecord;
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

const MEMORY_LOCATION: &str = "memory://stock_data.json";

/// In-memory ledger backend for testing.
///
/// Keeps the encoded JSON text rather than the records themselves so that decoding,
/// corruption and legacy-format paths behave exactly as with [`super::fs_backend::FsBackend`].
/// Uses `RefCell` because the ledger is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    raw: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with raw persisted text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.raw.borrow_mut() = Some(raw.into());
        backend
    }

    /// Enable write error simulation for testing rollback.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl LedgerBackend for MemBackend {
    fn load_records(&self) -> Result<Vec<StockRecord>> {
        match self.raw.borrow().as_deref() {
            None => Ok(Vec::new()),
            Some(text) => decode_records(&self.location(), text),
        }
    }

    fn save_records(&self, records: &[StockRecord]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(LedgerError::Io(io::Error::other("Simulated write error")));
        }
        let text = encode_records(records)?;
        *self.raw.borrow_mut() = Some(text);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(MEMORY_LOCATION)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::parse_timestamp;
    use crate::store::LedgerStore;

    /// Builds a ledger with records at fixed timestamps.
    pub struct LedgerFixture {
        records: Vec<StockRecord>,
    }

    impl Default for LedgerFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LedgerFixture {
        pub fn new() -> Self {
            Self {
                records: Vec::new(),
            }
        }

        /// Append a record; `at` uses `YYYY-MM-DD HH:MM:SS`.
        pub fn with_record(mut self, product_name: &str, count: u32, at: &str) -> Self {
            let ts = parse_timestamp(at).unwrap();
            self.records
                .push(StockRecord::with_timestamp(product_name, count, ts));
            self
        }

        pub fn records(&self) -> &[StockRecord] {
            &self.records
        }

        pub fn backend(&self) -> MemBackend {
            MemBackend::with_raw(encode_records(&self.records).unwrap())
        }

        pub fn store(&self) -> LedgerStore<MemBackend> {
            LedgerStore::open(self.backend()).unwrap()
        }
    }
}
