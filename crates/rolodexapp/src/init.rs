//! # Startup
//!
//! Works out where configuration and data live, loads the configuration and
//! opens the stores.
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the `--data` flag), when given.
//! 2. `data_dir` from the configuration (file or `ROLODEX_DATA_DIR`).
//! 3. The OS data directory for `rolodex` (via the `directories` crate).
//!
//! ## Config File Location
//!
//! `ROLODEX_CONFIG` names the file explicitly; otherwise `rolodex.toml` in the
//! OS config directory. A missing file is fine; defaults apply.

use crate::api::RolodexApi;
use crate::config::RolodexConfig;
use crate::error::{RolodexError, Result};
use crate::store::{AutosaveGate, FsBackend};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "rolodex.toml";
pub const CONFIG_ENV: &str = "ROLODEX_CONFIG";

pub struct RolodexContext {
    pub api: RolodexApi<FsBackend>,
    pub config: RolodexConfig,
    pub config_file: Option<PathBuf>,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rolodex", "rolodex")
}

/// Path of the config file, whether or not it exists.
pub fn config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn resolve_data_dir(data_override: Option<&Path>, config: &RolodexConfig) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = &config.data_dir {
        return Ok(path.clone());
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            RolodexError::Store(
                "Could not determine a data directory; pass --data or set ROLODEX_DATA_DIR"
                    .to_string(),
            )
        })
}

/// Loads configuration and both stores.
pub fn initialize(data_override: Option<PathBuf>) -> Result<RolodexContext> {
    let config_file = config_file();
    let config = RolodexConfig::load(config_file.as_deref())?;
    let data_dir = resolve_data_dir(data_override.as_deref(), &config)?;
    tracing::debug!(
        data_dir = %data_dir.display(),
        config_file = ?config_file,
        "initializing"
    );

    let backend = FsBackend::new(data_dir.clone());
    let autosave = AutosaveGate::from_secs(config.autosave_secs);
    let api = RolodexApi::load(backend, config.birthday_days, autosave)?;

    Ok(RolodexContext {
        api,
        config,
        config_file,
        data_dir,
    })
}
