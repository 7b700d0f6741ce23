//! Seam to the external validation collaborator.
//!
//! The rule set itself lives elsewhere; this crate only interprets the
//! severity list it returns. Negative severities are non-fatal deprecation
//! warnings, positive severities are fatal, zero means fully valid.

use serde_json::Value;

use crate::options::LoadOptions;

/// External validation collaborator.
pub trait ConfigValidator {
    /// Validate a resolved document, returning rule severities.
    fn validate(&self, config: &Value, options: &LoadOptions) -> Vec<i32>;
}

impl<F> ConfigValidator for F
where
    F: Fn(&Value, &LoadOptions) -> Vec<i32>,
{
    fn validate(&self, config: &Value, options: &LoadOptions) -> Vec<i32> {
        self(config, options)
    }
}

/// Overall reading of a severity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No findings, or zeros only.
    Valid,
    /// At least one deprecation warning, nothing fatal.
    Deprecated,
    /// At least one fatal finding.
    Fatal,
}

/// Collapse a severity list into a [`Verdict`]. Any positive severity is
/// fatal regardless of accompanying warnings.
pub fn interpret(severities: &[i32]) -> Verdict {
    if severities.iter().any(|&s| s > 0) {
        Verdict::Fatal
    } else if severities.iter().any(|&s| s < 0) {
        Verdict::Deprecated
    } else {
        Verdict::Valid
    }
}
