use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastLevel::Info => write!(f, "info"),
            ToastLevel::Success => write!(f, "success"),
            ToastLevel::Warning => write!(f, "warning"),
            ToastLevel::Error => write!(f, "error"),
        }
    }
}

/// Ephemeral toast pushed by the server (`type = "toast"`).
///
/// Toasts are not persisted in the notification store; they flow straight to
/// the UI signal surface and are dropped if nobody is listening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    /// Text displayed to the user.
    pub message: String,

    /// Severity, defaults to `info` when the server omits it.
    #[serde(default)]
    pub level: ToastLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_defaults_to_info() {
        let t: Toast = serde_json::from_str(r#"{"message":"saved"}"#).unwrap();
        assert_eq!(t.level, ToastLevel::Info);
    }

    #[test]
    fn test_level_parses_lowercase() {
        let t: Toast =
            serde_json::from_str(r#"{"message":"boom","level":"error"}"#).unwrap();
        assert_eq!(t.level, ToastLevel::Error);
    }
}
