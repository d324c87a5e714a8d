use crate::commands::{CmdResult, StockPaths};
use crate::config::StockConfig;
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    Set(String, String),
}

pub const CONFIG_KEYS: [&str; 2] = ["ledger-file", "export-dir"];

pub fn run(paths: &StockPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.data_dir()?;
    let mut config = StockConfig::load(dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::Set(key, value) => {
            match key.as_str() {
                "ledger-file" => config.set_ledger_file(&value)?,
                "export-dir" => config.set_export_dir(&value),
                other => {
                    return Err(LedgerError::Config(format!(
                        "Unknown config key: {} (expected one of {})",
                        other,
                        CONFIG_KEYS.join(", ")
                    )))
                }
            }
            config.save(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
    }
}
