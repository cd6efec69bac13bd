use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToastError {
    #[error("Application name and AUMI must both be set")]
    MissingAppIdentity,

    #[error("Platform is missing required entry points: {}", .0.join(", "))]
    Incompatible(Vec<String>),

    #[error("Toast service is not initialized")]
    NotInitialized,

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Payload error: {0}")]
    Payload(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Path exceeds MAX_PATH ({0} UTF-16 units)")]
    PathTooLong(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl serde::Serialize for ToastError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for ToastError {
    fn from(err: windows::core::Error) -> Self {
        ToastError::Platform(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ToastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_lists_entry_points() {
        let err = ToastError::Incompatible(vec![
            "RoGetActivationFactory".to_string(),
            "WindowsDeleteString".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Platform is missing required entry points: RoGetActivationFactory, WindowsDeleteString"
        );
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&ToastError::NotInitialized).unwrap();
        assert_eq!(json, "\"Toast service is not initialized\"");
    }
}
