use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger storage is corrupt ({}): {source}", path.display())]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("No record at position {} (ledger has {len} records)", index + 1)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),

    #[error("Export failed ({}): {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
