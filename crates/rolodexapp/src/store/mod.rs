//! # Storage Layer
//!
//! The address book and the notebook are each persisted as one JSON
//! document. [`StorageBackend`] hides where those documents live:
//!
//! - [`fs_backend::FsBackend`]: files in a data directory, written atomically.
//! - [`mem_backend::MemBackend`]: strings in memory, for tests.
//!
//! A missing document loads as an empty store. A document that exists but
//! cannot be parsed is an error; it is never silently replaced.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── addressbook.json   # {"records": [...]}
//! └── notebook.json      # {"last_id": N, "notes": [...]}
//! ```
//!
//! [`autosave::AutosaveGate`] decides when a long-running session should
//! write its state back between commands.

pub mod autosave;
pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use autosave::AutosaveGate;
pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

pub const BOOK_FILE: &str = "addressbook.json";
pub const NOTEBOOK_FILE: &str = "notebook.json";
