//! Severity levels of audit findings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a finding, in ascending order of actionability.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Diagnostic detail (skipped files and the like).
    Debug,
    /// Informational, nothing to fix.
    #[default]
    Info,
    /// A check that passed.
    Notice,
    /// A problem that should be fixed.
    Warning,
    /// A problem that must be fixed.
    Error,
}

impl Severity {
    /// All levels, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
    ];

    /// Lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Whether this level meets `threshold`.
    pub fn at_least(self, threshold: Severity) -> bool {
        self >= threshold
    }

    /// Whether this level fails an audit under the default failure threshold.
    pub fn is_failure(self) -> bool {
        self.at_least(Severity::Warning)
    }

    /// Icon used when rendering the level.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Debug => "⚙️",
            Self::Info => "ℹ️",
            Self::Notice => "✅",
            Self::Warning => "⚠️",
            Self::Error => "❌",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid severity '{0}' (expected one of: debug, info, notice, warning, error)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "notice" => Ok(Self::Notice),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
