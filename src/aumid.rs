//! AUMID (Application User Model ID) registration for Windows notifications.
//!
//! Unpackaged apps need a registered AUMID for toasts to show the right app
//! name and icon. Without registration, notifications show the parent process
//! name (e.g., "Windows PowerShell" in development mode).

#[cfg(windows)]
use std::path::Path;

/// Background behind the toast icon (slate-800)
pub const ICON_BACKGROUND_COLOR: &str = "FF1e293b";

/// Registry path under `HKEY_CURRENT_USER` for `aumi`
pub fn registry_key_path(aumi: &str) -> String {
    format!(r"Software\Classes\AppUserModelId\{}", aumi)
}

/// Ensures the AUMID is registered in the Windows Registry.
///
/// Creates or updates `HKEY_CURRENT_USER\Software\Classes\AppUserModelId\<aumi>`
/// with values:
/// - DisplayName: `display_name`
/// - IconUri: `icon_path`, only if the file exists
/// - IconBackgroundColor: [`ICON_BACKGROUND_COLOR`]
#[cfg(windows)]
pub fn register_app_user_model_id(
    aumi: &str,
    display_name: &str,
    icon_path: Option<&Path>,
) -> crate::error::Result<()> {
    use winreg::enums::*;
    use winreg::RegKey;

    if aumi.is_empty() {
        return Err(crate::error::ToastError::MissingAppIdentity);
    }

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let path = registry_key_path(aumi);

    let (key, disposition) = hkcu.create_subkey(&path)?;

    let action = match disposition {
        RegDisposition::REG_CREATED_NEW_KEY => "Created",
        RegDisposition::REG_OPENED_EXISTING_KEY => "Updated",
    };

    key.set_value("DisplayName", &display_name)?;

    match icon_path {
        Some(icon) if icon.exists() => {
            let icon_path_str = icon.to_string_lossy().to_string();
            key.set_value("IconUri", &icon_path_str)?;
            tracing::debug!("AUMID icon set to: {}", icon_path_str);
        }
        Some(icon) => tracing::warn!("Icon file not found at: {:?}", icon),
        None => {}
    }

    key.set_value("IconBackgroundColor", &ICON_BACKGROUND_COLOR)?;

    tracing::info!("{} AUMID registry entry: {}", action, path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_key_path() {
        assert_eq!(
            registry_key_path("com.example.app"),
            r"Software\Classes\AppUserModelId\com.example.app"
        );
    }
}
