//! # Stockledger Architecture
//!
//! Stockledger is the **ledger and analytics core** of a detection-driven inventory
//! counter. A camera and a detection model produce counts, a person reviews them, and the
//! confirmed counts land here as timestamped records. Everything else (history lists,
//! trend charts, spreadsheet exports) is derived from that ledger.
//!
//! The crate is a library first. The bundled `stockledger` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session's single LedgerStore                    │
//! │  - Parses selectors ("3", "#3f9c2a") and dispatches         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, typed CmdResult out            │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                              │
//!                  ▼                              ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────┐
//! │  Storage (store/)             │  │  analytics.rs, export.rs │
//! │  LedgerStore over a backend   │  │  pure, read-only         │
//! └───────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Ledger Rules
//!
//! - Records are kept in insertion order; that order is the chronology.
//! - Every stored record has a non-empty name and a count of at least 1.
//! - A mutation that returns `Ok` has already been written to storage. A mutation that
//!   returns `Err` changed nothing, in memory or on disk.
//! - A missing ledger file is an empty ledger. An unreadable one is an error
//!   ([`error::LedgerError::StorageCorrupt`]), never silently replaced.
//!
//! ## Concurrency
//!
//! Single-threaded. The host serializes all mutations on one context; the in-memory test
//! backend uses `RefCell` accordingly.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic per operation
//! - [`store`]: `LedgerStore` and its backends
//! - [`analytics`]: per-product totals, daily totals, trend series, history filter
//! - [`export`]: CSV export
//! - [`model`]: `StockRecord`, timestamp format, input validation
//! - [`index`]: positional and id-based record selectors
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod analytics;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod model;
pub mod store;
