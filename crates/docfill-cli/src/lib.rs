//! docfill command-line interface
//!
//! The binary entry point lives in `src/bin/main.rs`; the actual
//! argument handling and command dispatch is here so it can be
//! exercised from tests.

pub mod app;

pub use app::run_cli;
