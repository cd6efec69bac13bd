//! Start-menu shortcut locations.
//!
//! Unpackaged apps need a Start-menu shortcut carrying their AUMI before the
//! shell will show their toasts. These helpers compute where that shortcut
//! lives; creating it is left to the installer.

use crate::error::{Result, ToastError};
use crate::payload::MAX_PATH;
use std::path::{Path, PathBuf};

const SHELL_LINKS_SUBDIR: &str = r"\Microsoft\Windows\Start Menu\Programs\";
const LINK_EXTENSION: &str = ".lnk";

pub fn default_executable_path() -> Result<PathBuf> {
    Ok(std::env::current_exe()?)
}

/// Start-menu programs folder under the roaming app-data directory `appdata`
pub fn shell_links_directory(appdata: &Path) -> Result<PathBuf> {
    let appdata = appdata.to_string_lossy();
    if appdata.is_empty() {
        return Err(ToastError::InvalidArgument(
            "app-data directory is empty".to_string(),
        ));
    }
    bounded(format!("{}{}", appdata.trim_end_matches('\\'), SHELL_LINKS_SUBDIR))
}

pub fn default_shell_links_directory() -> Result<PathBuf> {
    let appdata = dirs::data_dir().ok_or_else(|| {
        ToastError::InvalidArgument("roaming app-data directory is not set".to_string())
    })?;
    shell_links_directory(&appdata)
}

/// `<links directory>\<app_name>.lnk`
pub fn shell_link_path(appdata: &Path, app_name: &str) -> Result<PathBuf> {
    let directory = shell_links_directory(appdata)?;
    bounded(format!("{}{}{}", directory.display(), app_name, LINK_EXTENSION))
}

pub fn default_shell_link_path(app_name: &str) -> Result<PathBuf> {
    let appdata = dirs::data_dir().ok_or_else(|| {
        ToastError::InvalidArgument("roaming app-data directory is not set".to_string())
    })?;
    shell_link_path(&appdata, app_name)
}

fn bounded(path: String) -> Result<PathBuf> {
    let units = path.encode_utf16().count() + 1;
    if units > MAX_PATH {
        return Err(ToastError::PathTooLong(units));
    }
    Ok(PathBuf::from(path))
}
