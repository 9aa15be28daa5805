//! Run configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML or
//! YAML file, `HUBCHECK_*` environment variables, then command-line flags.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use hubcheck_core::{OutputFormat, Severity};
use hubcheck_github::DEFAULT_API_URL;
use hubcheck_rules::{IgnoreSet, RepoRuleOptions, DEFAULT_IGNORE_FILES};
use serde::{Deserialize, Serialize};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "HUBCHECK";

/// Settings of one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Organization to audit; required when the token sees several.
    pub organization: Option<String>,
    /// GitHub API base URL.
    pub api_url: String,
    /// Lowest severity shown in the report.
    pub log_level: Severity,
    /// Lowest severity that fails the audit.
    pub fail_level: Severity,
    /// Globs excluded from content scanning.
    pub ignore_files: Vec<String>,
    /// Term reported by the `containing` rule; empty disables it.
    pub report_files_containing: String,
    /// Report format.
    pub format: OutputFormat,
    /// Disable terminal colors.
    pub no_color: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            organization: None,
            api_url: DEFAULT_API_URL.to_string(),
            log_level: Severity::Info,
            fail_level: Severity::Warning,
            ignore_files: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
            report_files_containing: String::new(),
            format: OutputFormat::Markdown,
            no_color: false,
        }
    }
}

impl AuditConfig {
    /// Layer defaults, `file` and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("failed to encode default configuration")?,
        );
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(";")
                .with_list_parse_key("ignore_files")
                .source(env),
        );

        let config = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize::<Self>()
            .context("invalid configuration")?;
        Ok(config)
    }

    /// Options of the configurable repository rules.
    pub fn repo_rule_options(&self) -> Result<RepoRuleOptions> {
        let ignore = IgnoreSet::new(&self.ignore_files)?;
        Ok(RepoRuleOptions {
            report_files_containing: self.report_files_containing.clone(),
            ignore,
        })
    }
}

/// Split a `;`-separated pattern list.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Option<HashMap<String, String>> {
        Some(HashMap::new())
    }

    #[test]
    fn test_defaults() {
        let config = AuditConfig::load_from(None, no_env()).unwrap();
        assert_eq!(config, AuditConfig::default());
        assert_eq!(config.log_level, Severity::Info);
        assert_eq!(config.fail_level, Severity::Warning);
        assert_eq!(config.ignore_files, ["vendor/**", "venv/**", "virtualenv/**"]);
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
organization = "acme"
fail_level = "error"
ignore_files = ["third_party/**"]
format = "json"
"#
        )
        .unwrap();

        let config = AuditConfig::load_from(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.organization.as_deref(), Some("acme"));
        assert_eq!(config.fail_level, Severity::Error);
        assert_eq!(config.log_level, Severity::Info);
        assert_eq!(config.ignore_files, ["third_party/**"]);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "report_files_containing: password\nno_color: true").unwrap();

        let config = AuditConfig::load_from(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.report_files_containing, "password");
        assert!(config.no_color);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "organization = \"acme\"\nlog_level = \"notice\"").unwrap();

        let env = HashMap::from([
            ("HUBCHECK_ORGANIZATION".to_string(), "globex".to_string()),
            ("HUBCHECK_IGNORE_FILES".to_string(), "a/**;b/**".to_string()),
        ]);
        let config = AuditConfig::load_from(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.organization.as_deref(), Some("globex"));
        assert_eq!(config.log_level, Severity::Notice);
        assert_eq!(config.ignore_files, ["a/**", "b/**"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AuditConfig::load_from(Some(&path), no_env()).is_err());
    }

    #[test]
    fn test_invalid_severity_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "fail_level = \"critical\"").unwrap();
        assert!(AuditConfig::load_from(Some(file.path()), no_env()).is_err());
    }

    #[test]
    fn test_invalid_ignore_glob() {
        let config = AuditConfig {
            ignore_files: vec!["src/[".to_string()],
            ..Default::default()
        };
        let err = config.repo_rule_options().unwrap_err();
        assert!(err.to_string().contains("src/["));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("vendor/**; venv/** ;;"), ["vendor/**", "venv/**"]);
        assert!(split_list("").is_empty());
    }
}
