//! Path globs excluded from content scanning.

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;

/// Default globs: vendored dependencies and Python virtualenvs.
pub const DEFAULT_IGNORE_FILES: &[&str] = &["vendor/**", "venv/**", "virtualenv/**"];

/// An ignore glob failed to compile.
#[derive(Debug, Error)]
#[error("invalid ignore pattern '{pattern}': {source}")]
pub struct IgnorePatternError {
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// Compiled set of ignore globs matched against repository paths.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<String>,
    globs: GlobSet,
}

impl IgnoreSet {
    /// Compile `patterns`; blank patterns are skipped.
    pub fn new<I, S>(patterns: I) -> Result<Self, IgnorePatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            let glob = Glob::new(pattern).map_err(|source| IgnorePatternError {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }
        let globs = builder.build().map_err(|source| IgnorePatternError {
            pattern: kept.join(";"),
            source,
        })?;
        Ok(Self {
            patterns: kept,
            globs,
        })
    }

    /// Parse a `;`-separated list such as `vendor/**;venv/**`.
    pub fn parse_list(list: &str) -> Result<Self, IgnorePatternError> {
        Self::new(list.split(';'))
    }

    /// A set that matches nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
        }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.globs.is_match(path)
    }

    /// The source patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_FILES).unwrap_or_else(|_| Self::empty())
    }
}
