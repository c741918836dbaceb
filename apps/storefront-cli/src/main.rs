//! # Storefront CLI Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront <command> [flags]                                           │
//! │                                                                         │
//! │  main.rs ────► storefront_cli::run()                                    │
//! │  lib.rs ─────► config, logging, cart store, dispatch                    │
//! │  commands/ ──► show, add, remove, set, clear, match, checkout, ...      │
//! │                                                                         │
//! │  stdout: JSON response       stderr: logs       exit 1 on ApiError      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    storefront_cli::run()
}
