//! # API Facade
//!
//! The single entry point for ledger operations, whatever the client. It owns the one
//! [`LedgerStore`] of the session, turns user-facing selector strings into
//! [`RecordSelector`]s, and dispatches to `commands/*.rs`.
//!
//! The facade holds no business logic and produces no text. Every method returns
//! `Result<CmdResult>`.
//!
//! `StockApi<B: LedgerBackend>` is generic over the backend:
//! - Production: `StockApi<FsBackend>`
//! - Testing: `StockApi<MemBackend>`

use crate::commands;
use crate::config::StockConfig;
use crate::error::Result;
use crate::index::RecordSelector;
use crate::model::ConfirmedCounts;
use crate::store::{LedgerBackend, LedgerStore};
use std::path::PathBuf;

pub struct StockApi<B: LedgerBackend> {
    store: LedgerStore<B>,
    paths: commands::StockPaths,
}

impl<B: LedgerBackend> StockApi<B> {
    pub fn new(store: LedgerStore<B>, paths: commands::StockPaths) -> Self {
        Self { store, paths }
    }

    pub fn add_record(&mut self, product_name: &str, count: i64) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, product_name, count)
    }

    pub fn record_detections(&mut self, batch: &ConfirmedCounts) -> Result<commands::CmdResult> {
        commands::add::record(&mut self.store, batch)
    }

    pub fn list_records(&self, filter: &RecordFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn update_record(
        &mut self,
        selector: &str,
        update: &RecordUpdate,
    ) -> Result<commands::CmdResult> {
        let selector: RecordSelector = selector.parse()?;
        commands::update::run(&mut self.store, &selector, update)
    }

    pub fn delete_records<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn summary(&self) -> Result<commands::CmdResult> {
        commands::report::summary(&self.store)
    }

    pub fn daily(&self) -> Result<commands::CmdResult> {
        commands::report::daily(&self.store)
    }

    pub fn trends(&self, product: Option<&str>) -> Result<commands::CmdResult> {
        commands::report::trends(&self.store, product)
    }

    /// Export to `dest_dir`, else the configured export dir, else the working directory.
    pub fn export(&self, dest_dir: Option<PathBuf>) -> Result<commands::CmdResult> {
        let dest = match dest_dir {
            Some(dir) => dir,
            None => StockConfig::load(self.paths.data_dir()?)?.export_dir_or(&self.paths.work_dir),
        };
        commands::export::run(&self.store, &dest)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn store(&self) -> &LedgerStore<B> {
        &self.store
    }

    pub fn paths(&self) -> &commands::StockPaths {
        &self.paths
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RecordSelector>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdResult, RecordFilter, RecordUpdate, StockPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::export::ExportOutcome;
    use crate::store::mem_backend::MemBackend;
    use tempfile::TempDir;

    fn api(dir: &TempDir) -> StockApi<MemBackend> {
        let store = LedgerStore::open(MemBackend::new()).unwrap();
        StockApi::new(
            store,
            StockPaths {
                data_dir: dir.path().join("data"),
                work_dir: dir.path().join("work"),
            },
        )
    }

    #[test]
    fn add_then_list() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_record("milk", 3).unwrap();
        api.add_record("bread", 2).unwrap();

        let listed = api.list_records(&RecordFilter::default()).unwrap();
        assert_eq!(listed.listed_records.len(), 2);
    }

    #[test]
    fn update_parses_one_based_selector() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_record("milk", 3).unwrap();
        api.add_record("bread", 2).unwrap();

        api.update_record("2", &RecordUpdate::new(None, Some("4".into())))
            .unwrap();
        assert_eq!(api.store().all_records()[1].count, 4);
    }

    #[test]
    fn delete_rejects_garbage_selector() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_record("milk", 3).unwrap();
        assert!(matches!(
            api.delete_records(&["first"]),
            Err(LedgerError::Api(_))
        ));
        assert_eq!(api.store().len(), 1);
    }

    #[test]
    fn delete_scenario() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_record("milk", 3).unwrap();
        api.add_record("bread", 2).unwrap();
        api.add_record("milk", 1).unwrap();

        api.delete_records(&["2"]).unwrap();
        let summary = api.summary().unwrap().summary.unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary["milk"], 4);
    }

    #[test]
    fn export_defaults_to_work_dir() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_record("milk", 3).unwrap();

        let result = api.export(None).unwrap();
        match result.export {
            Some(ExportOutcome::Written(path)) => {
                assert!(path.starts_with(dir.path().join("work")));
                assert!(path.exists());
            }
            other => panic!("unexpected export outcome: {:?}", other),
        }
    }

    #[test]
    fn export_honours_configured_dir() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_record("milk", 3).unwrap();
        let target = dir.path().join("reports");
        api.config(ConfigAction::Set(
            "export-dir".into(),
            target.to_string_lossy().into_owned(),
        ))
        .unwrap();

        let result = api.export(None).unwrap();
        assert!(matches!(
            result.export,
            Some(ExportOutcome::Written(path)) if path.starts_with(&target)
        ));
    }
}
