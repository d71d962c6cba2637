//! # CLI Behavior
//!
//! This is **one possible UI client** for rolodex, not the application itself.
//!
//! ## Naked Execution (`rolodex`)
//!
//! Running `rolodex` with no subcommand opens the interactive session, the
//! same as `rolodex session`. The session asks for a command, then for each
//! field that command needs. Blank answers are skipped. `close`, `exit` or
//! end of input saves and quits.
//!
//! ## One-shot Commands
//!
//! `rolodex all`, `rolodex birthdays --days N` and `rolodex notes` print and
//! exit without a prompt, for scripting. `rolodex config` shows the
//! effective settings and where they came from.
//!
//! ## Module Structure
//!
//! - `commands`: entry point, logging setup, one-shot handlers
//! - `session`: the prompt loop and per-command field questions
//! - `render`: tables, colors, messages
//! - `setup`: argument parsing via clap

mod commands;
mod render;
mod session;
pub mod setup;

pub use commands::run;
