use crate::error::{LedgerError, Result};
use crate::store::fs_backend::DEFAULT_LEDGER_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for stockledger, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockConfig {
    /// Ledger file name, relative to the data directory
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,

    /// Where exports are written. `None` means the current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_ledger_file() -> String {
    DEFAULT_LEDGER_FILE.to_string()
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            ledger_file: default_ledger_file(),
            export_dir: None,
        }
    }
}

impl StockConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LedgerError::Io)?;
        let config: StockConfig = serde_json::from_str(&content).map_err(|e| {
            LedgerError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LedgerError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LedgerError::Serialization)?;
        fs::write(config_path, content).map_err(LedgerError::Io)?;
        Ok(())
    }

    /// Set the ledger file name. Must be a bare file name.
    pub fn set_ledger_file(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        let is_bare = Path::new(name).file_name().map(|f| f == name).unwrap_or(false);
        if name.is_empty() || !is_bare {
            return Err(LedgerError::Config(format!(
                "ledger-file must be a plain file name, got '{}'",
                name
            )));
        }
        self.ledger_file = name.to_string();
        Ok(())
    }

    /// Set the export directory; an empty value resets to the current directory.
    pub fn set_export_dir(&mut self, dir: &str) {
        let dir = dir.trim();
        self.export_dir = if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        };
    }

    pub fn export_dir_or(&self, fallback: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.ledger_file, "stock_data.json");
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = StockConfig::load(dir.path()).unwrap();
        assert_eq!(config, StockConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = StockConfig::default();
        config.set_ledger_file("warehouse.json").unwrap();
        config.set_export_dir("/tmp/exports");
        config.save(dir.path()).unwrap();

        let loaded = StockConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        let loaded = StockConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, StockConfig::default());
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ledger_file:").unwrap();
        assert!(matches!(
            StockConfig::load(dir.path()),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn test_ledger_file_must_be_bare() {
        let mut config = StockConfig::default();
        assert!(config.set_ledger_file("../escape.json").is_err());
        assert!(config.set_ledger_file("a/b.json").is_err());
        assert!(config.set_ledger_file("").is_err());
        assert_eq!(config.ledger_file, "stock_data.json");
    }

    #[test]
    fn test_empty_export_dir_resets() {
        let mut config = StockConfig::default();
        config.set_export_dir("out");
        config.set_export_dir("  ");
        assert_eq!(config.export_dir_or(Path::new(".")), PathBuf::from("."));
    }
}
