//! Location of the database file

use std::path::{Path, PathBuf};

use crate::error::{HerokronError, Result};

/// Platforms with a known data directory layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// The platform this binary was built for
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Platform::MacOs)
        } else {
            None
        }
    }
}

/// Database file under `home` for `platform`
pub fn database_file(platform: Platform, home: &Path) -> PathBuf {
    let dir = match platform {
        Platform::Windows => home.join("AppData").join("Roaming"),
        Platform::Linux => home.join(".local").join("share"),
        Platform::MacOs => home.join("Library").join("Application Support"),
    };
    dir.join("Herokron").join("db.json")
}

/// Database file for the current user on the current platform
pub fn default_database_file() -> Result<PathBuf> {
    let platform = Platform::current()
        .ok_or_else(|| HerokronError::UnsupportedPlatform(std::env::consts::OS.to_string()))?;
    let dirs = directories::BaseDirs::new().ok_or_else(|| {
        HerokronError::UnsupportedPlatform("no home directory for the current user".to_string())
    })?;
    Ok(database_file(platform, dirs.home_dir()))
}
