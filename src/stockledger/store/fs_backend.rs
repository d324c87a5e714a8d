use super::{decode_records, encode_records, LedgerBackend};
use crate::error::{LedgerError, Result};
use crate::model::StockRecord;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_LEDGER_FILE: &str = "stock_data.json";

pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `file_name` inside `data_dir`.
    pub fn in_dir(data_dir: &Path, file_name: &str) -> Self {
        Self::new(data_dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(LedgerError::Io)?;
        }
        Ok(parent)
    }

    /// Hidden sibling named after the ledger file, e.g. `.shop-<uuid>.tmp` for `shop.json`.
    fn tmp_path(&self, parent: &Path) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ledger".to_string());
        parent.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()))
    }
}

impl LedgerBackend for FsBackend {
    fn load_records(&self) -> Result<Vec<StockRecord>> {
        if !self.path.exists() {
            debug!("no ledger at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(LedgerError::Io)?;
        let records = decode_records(&self.path, &content)?;
        debug!(
            "loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save_records(&self, records: &[StockRecord]) -> Result<()> {
        let parent = self.ensure_parent()?;
        let content = encode_records(records)?;

        // Atomic write: a crash mid-write must not leave a truncated ledger
        let tmp_file = self.tmp_path(&parent);
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(LedgerError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(LedgerError::Io(e));
        }

        debug!("persisted {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FsBackend) {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::in_dir(dir.path(), DEFAULT_LEDGER_FILE);
        (dir, backend)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, backend) = setup();
        assert!(backend.load_records().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, backend) = setup();
        let ts = parse_timestamp("2026-10-17 10:11:12").unwrap();
        let records = vec![
            StockRecord::with_timestamp("milk", 3, ts),
            StockRecord::with_timestamp("bread", 2, ts),
        ];
        backend.save_records(&records).unwrap();
        assert_eq!(backend.load_records().unwrap(), records);
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().join("nested/deeper/ledger.json"));
        backend.save_records(&[StockRecord::new("milk", 1)]).unwrap();
        assert!(backend.path().exists());
    }

    #[test]
    fn leaves_no_tmp_files() {
        let (dir, backend) = setup();
        backend.save_records(&[StockRecord::new("milk", 1)]).unwrap();
        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "leftover tmp file: {}", name);
        }
    }

    #[test]
    fn tmp_file_is_named_after_ledger() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::in_dir(dir.path(), "shop.json");
        let tmp = backend.tmp_path(dir.path());
        let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".shop-"), "unexpected tmp name: {}", name);
        assert!(name.ends_with(".tmp"));
        assert_eq!(tmp.parent(), Some(dir.path()));
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let (_dir, backend) = setup();
        fs::write(backend.path(), "not json at all").unwrap();
        let err = backend.load_records().unwrap_err();
        assert!(matches!(err, LedgerError::StorageCorrupt { .. }));
    }

    #[test]
    fn reads_legacy_file_without_ids() {
        let (_dir, backend) = setup();
        fs::write(
            backend.path(),
            r#"[
  {"product_name": "milk", "count": 3, "timestamp": "2026-10-16 08:00:00"},
  {"product_name": "bread", "count": 2, "timestamp": "2026-10-17 08:00:00"}
]"#,
        )
        .unwrap();
        let records = backend.load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        assert_eq!(records[1].product_name, "bread");
    }
}
