//! # Rolodex CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/rolodexapp/` — UI-agnostic library: validation, stores, commands
//! - `crates/rolodex/` — this terminal client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/rolodex/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - dispatch + logging setup (commands.rs)                   │
//! │  - interactive prompt loop (session.rs)                     │
//! │  - colored tables and messages (render.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (rolodexapp::api)                                │
//! │  - Dispatches to command modules, tracks unsaved changes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (rolodexapp::commands)                       │
//! │  - Business logic over AddressBook / Notebook               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from the API inward returns structured values. The CLI owns
//! every user-facing concern: prompting, rendering, error reporting and exit
//! codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
