//! # rolodexapp
//!
//! A personal contact book and tagged notebook, with plain JSON storage.
//!
//! The library is UI-agnostic: it never prints and never reads from the
//! terminal. Front ends (the `rolodex` binary) collect raw field values,
//! call the [`api::RolodexApi`] facade and render the returned
//! [`commands::CmdResult`].
//!
//! ## Layers
//!
//! ```text
//! front end  ──►  api::RolodexApi  ──►  commands::{contacts, notes}
//!                      │                        │
//!                      ▼                        ▼
//!               store::StorageBackend    book / notebook / record / note
//!               (FsBackend, MemBackend)          │
//!                                                ▼
//!                                   fields (validated values), pattern,
//!                                   birthdays
//! ```
//!
//! ## Errors
//!
//! Every fallible call returns [`error::Result`]. Rule violations on a field
//! value are [`error::RolodexError::Validation`]; misuse of an operation
//! (missing parameters, unknown fields, malformed queries) is
//! [`error::RolodexError::Input`]. Lookups that find nothing are not errors.

pub mod api;
pub mod birthdays;
pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod fields;
pub mod init;
pub mod note;
pub mod notebook;
pub mod pattern;
pub mod record;
pub mod store;
