//! # Configuration
//!
//! Rolodex configuration is loaded with [`confique`], layering environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `ROLODEX_DATA_DIR`, `ROLODEX_BIRTHDAY_DAYS`,
//!    `ROLODEX_AUTOSAVE_SECS`.
//! 2. **Config file**: `rolodex.toml` in the OS config directory (via the
//!    `directories` crate, see [`crate::init::config_file`]).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! The `--data` command line flag overrides `data_dir` on top of all of these.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where `addressbook.json` and `notebook.json` live |
//! | `birthday_days` | `7` | Window for `birthdays` when no day count is given |
//! | `autosave_secs` | `300` | Seconds between autosaves in a session, `0` disables |

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BIRTHDAY_DAYS: u32 = 7;
pub const DEFAULT_AUTOSAVE_SECS: u64 = 300;

/// Configuration for rolodex, stored in `rolodex.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RolodexConfig {
    /// Directory holding the data files.
    #[config(env = "ROLODEX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Default look-ahead window for upcoming birthdays, in days.
    #[config(env = "ROLODEX_BIRTHDAY_DAYS", default = 7)]
    pub birthday_days: u32,

    /// Interval between automatic saves during a session, in seconds.
    #[config(env = "ROLODEX_AUTOSAVE_SECS", default = 300)]
    pub autosave_secs: u64,
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            birthday_days: DEFAULT_BIRTHDAY_DAYS,
            autosave_secs: DEFAULT_AUTOSAVE_SECS,
        }
    }
}

impl RolodexConfig {
    /// Loads from the environment and, when given and present, a TOML file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    /// `key = value` lines describing the effective settings.
    pub fn entries(&self) -> Vec<(String, String)> {
        vec![
            (
                "data_dir".to_string(),
                self.data_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(default)".to_string()),
            ),
            ("birthday_days".to_string(), self.birthday_days.to_string()),
            ("autosave_secs".to_string(), self.autosave_secs.to_string()),
        ]
    }
}
