//! Load result codes surfaced to the calling CLI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::ConfigsBundle;

/// Terminal status of a load attempt. Stable constants; the CLI layer maps
/// them to exit codes and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum LoadCode {
    /// Configuration loaded and selected cleanly.
    Success = 0,
    /// No document at the given path or the conventional fallback.
    MissingConfig = 1,
    /// Malformed document, broken inheritance chain, or fatal validation.
    InvalidConfig = 2,
    /// Caller named a device absent from the `devices` section.
    UnknownDevice = 3,
    /// Validation flagged deprecated-but-usable content. Historical spelling,
    /// kept for wire/CLI compatibility.
    DepricatedConfig = 4,
}

impl LoadCode {
    /// Integer form consumed by the CLI exit path.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Whether the load produced usable payloads.
    pub fn is_usable(self) -> bool {
        matches!(self, LoadCode::Success | LoadCode::DepricatedConfig)
    }
}

/// Outcome of a load: a code plus payloads. Every failure path carries `None`
/// payloads; no partial structure leaks to the caller.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub code: LoadCode,
    /// The fully merged document.
    pub config: Option<Value>,
    /// The derived per-purpose bundle.
    pub configs: Option<ConfigsBundle>,
}

impl LoadResult {
    pub(crate) fn failure(code: LoadCode) -> Self {
        Self {
            code,
            config: None,
            configs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(LoadCode::Success.as_i32(), 0);
        assert_eq!(LoadCode::MissingConfig.as_i32(), 1);
        assert_eq!(LoadCode::InvalidConfig.as_i32(), 2);
        assert_eq!(LoadCode::UnknownDevice.as_i32(), 3);
        assert_eq!(LoadCode::DepricatedConfig.as_i32(), 4);
    }

    #[test]
    fn test_usable_codes() {
        assert!(LoadCode::Success.is_usable());
        assert!(LoadCode::DepricatedConfig.is_usable());
        assert!(!LoadCode::InvalidConfig.is_usable());
    }

    #[test]
    fn test_failure_has_no_payloads() {
        let result = LoadResult::failure(LoadCode::MissingConfig);
        assert!(result.config.is_none());
        assert!(result.configs.is_none());
    }
}
