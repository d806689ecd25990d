//! Configuration file persistence for htmlsmith
//!
//! This module handles loading and saving the settings and session files in
//! the platform-specific configuration directory, with graceful fallback to
//! defaults when a file is missing or corrupt.

use crate::config::{Session, Settings};
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "htmlsmith";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Session file name (last input)
const SESSION_FILE_NAME: &str = "session.json";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\htmlsmith\`
/// - **macOS**: `~/Library/Application Support/htmlsmith/`
/// - **Linux**: `~/.config/htmlsmith/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Ensure `dir` exists, creating it if necessary.
fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!("Creating config directory: {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
            path: dir.to_path_buf(),
            source: Box::new(e),
        })?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Generic JSON files
// ─────────────────────────────────────────────────────────────────────────────

/// Read a JSON file; a missing or empty file yields `None`.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        debug!("{} not found, using defaults", path.display());
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("{} is empty, using defaults", path.display());
        return Ok(None);
    }

    let value = serde_json::from_str(&contents).map_err(|e| {
        warn!("{} contains invalid JSON: {}", path.display(), e);
        Error::ConfigParse {
            message: format!("Failed to parse {}: {}", path.display(), e),
            source: Some(Box::new(e)),
        }
    })?;
    Ok(Some(value))
}

/// Write `value` as pretty JSON to `dir/file_name`.
///
/// Writes to a `.bak` sibling first, then renames it over the target.
fn write_json_file<T: Serialize>(dir: &Path, file_name: &str, value: &T) -> Result<()> {
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    let backup_path = dir.join(format!("{}.bak", file_name));

    let json = serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSave {
        path: path.clone(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, &path).map_err(|e| Error::ConfigSave {
        path: path.clone(),
        source: Box::new(e),
    })?;

    debug!("Saved {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `dir`.
///
/// A missing or corrupted file falls back to defaults with a warning.
pub fn load_config(dir: &Path) -> Settings {
    load_config_from(dir)
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load and sanitize settings stored in `dir`.
pub fn load_config_from(dir: &Path) -> Result<Settings> {
    let path = dir.join(CONFIG_FILE_NAME);
    let Some(mut settings) = read_json_file::<Settings>(&path)? else {
        return Ok(Settings::default());
    };
    settings.sanitize();
    info!("Configuration loaded from {}", path.display());
    Ok(settings)
}

/// Save settings into `dir`.
pub fn save_config_to(dir: &Path, settings: &Settings) -> Result<()> {
    write_json_file(dir, CONFIG_FILE_NAME, settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Load the last session from `dir`, falling back to an empty one.
pub fn load_session(dir: &Path) -> Session {
    load_session_from(dir).unwrap_or_warn_default(Session::default(), "Failed to load session")
}

/// Load the session stored in `dir`.
pub fn load_session_from(dir: &Path) -> Result<Session> {
    Ok(read_json_file(&dir.join(SESSION_FILE_NAME))?.unwrap_or_default())
}

/// Save the session into `dir`.
pub fn save_session_to(dir: &Path, session: &Session) -> Result<()> {
    write_json_file(dir, SESSION_FILE_NAME, session)
}

/// Save settings and session into `dir`, logging failures instead of
/// returning them.
///
/// Returns `true` if both were saved.
pub fn save_state_silent(dir: &Path, settings: &Settings, session: &Session) -> bool {
    let mut saved = true;
    if let Err(e) = save_config_to(dir, settings) {
        warn!("Failed to save configuration: {}", e);
        saved = false;
    }
    if let Err(e) = save_session_to(dir, session) {
        warn!("Failed to save session: {}", e);
        saved = false;
    }
    saved
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
