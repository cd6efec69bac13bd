use crate::error::{Result, ToastError};
use crate::platform::Platform;
use crate::service::ToastService;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME_VAR: &str = "WINTOAST_APP_NAME";
pub const AUMID_VAR: &str = "WINTOAST_AUMID";
pub const ICON_VAR: &str = "WINTOAST_ICON";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub app_user_model_id: String,
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
    /// Write the AUMID registry entry before initializing
    #[serde(default = "default_register_aumid")]
    pub register_aumid: bool,
}

fn default_register_aumid() -> bool {
    true
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            app_user_model_id: String::new(),
            icon_path: None,
            register_aumid: true,
        }
    }
}

impl ToastConfig {
    /// Read `path` if it exists, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No toast config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| ToastError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded toast config from {:?}", path);
        Ok(config)
    }

    /// Override fields from `lookup`, keyed by the `WINTOAST_*` variable names
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(app_name) = lookup(APP_NAME_VAR) {
            tracing::info!("Using {} from environment", APP_NAME_VAR);
            self.app_name = app_name;
        }
        if let Some(aumi) = lookup(AUMID_VAR) {
            tracing::info!("Using {} from environment", AUMID_VAR);
            self.app_user_model_id = aumi;
        }
        if let Some(icon) = lookup(ICON_VAR) {
            self.icon_path = Some(PathBuf::from(icon));
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Copy the application identity into `service`
    pub fn apply<P: Platform>(&self, service: &mut ToastService<P>) {
        service.set_app_name(self.app_name.clone());
        service.set_app_user_model_id(self.app_user_model_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingPlatform;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToastConfig::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ToastConfig::default());
        assert!(config.register_aumid);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toast.json");
        let config = ToastConfig {
            app_name: "Example".to_string(),
            app_user_model_id: "Example.App".to_string(),
            icon_path: Some(PathBuf::from("icons/32x32.png")),
            register_aumid: false,
        };
        config.save(&path).unwrap();
        assert_eq!(ToastConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toast.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ToastConfig::from_file(&path), Err(ToastError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(AUMID_VAR, "Override.App"), (ICON_VAR, "icon.png")]
            .into_iter()
            .collect();
        let mut config = ToastConfig {
            app_name: "Example".to_string(),
            app_user_model_id: "Example.App".to_string(),
            ..Default::default()
        };
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.app_name, "Example");
        assert_eq!(config.app_user_model_id, "Override.App");
        assert_eq!(config.icon_path, Some(PathBuf::from("icon.png")));
    }

    #[test]
    fn test_apply_copies_identity() {
        let config = ToastConfig {
            app_name: "Example".to_string(),
            app_user_model_id: "Example.App".to_string(),
            ..Default::default()
        };
        let mut service = ToastService::new(RecordingPlatform::new());
        config.apply(&mut service);
        assert_eq!(service.app_name(), "Example");
        assert_eq!(service.app_user_model_id(), "Example.App");
    }
}
