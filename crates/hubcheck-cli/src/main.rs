//! hubcheck - audit a GitHub organization against governance rules.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use hubcheck_core::{OutputFormat, Severity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod commands;
mod config;

use crate::commands::Outcome;
use crate::config::{split_list, AuditConfig};

/// Check a GitHub organization and its repositories against security and
/// hygiene rules.
#[derive(Parser, Debug)]
#[command(name = "hubcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Organization login (required if the token has access to more than one)
    #[arg(long)]
    org: Option<String>,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// List all rules and exit
    #[arg(long)]
    rules: bool,

    /// Minimum severity shown in the report (debug, info, notice, warning, error)
    #[arg(long)]
    log_level: Option<Severity>,

    /// Minimum severity that fails the audit
    #[arg(long)]
    fail_level: Option<Severity>,

    /// `;`-separated globs of files to skip during content analysis
    #[arg(long)]
    ignore_files: Option<String>,

    /// Report files containing this term
    #[arg(long)]
    report_files_containing: Option<String>,

    /// GitHub API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Configuration file (TOML or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Diagnostic log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Load the layered configuration and apply explicit flags on top.
    fn resolve_config(&self) -> Result<AuditConfig> {
        let mut config = AuditConfig::load(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut AuditConfig) {
        if let Some(org) = &self.org {
            config.organization = Some(org.clone());
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(level) = self.fail_level {
            config.fail_level = level;
        }
        if let Some(list) = &self.ignore_files {
            config.ignore_files = split_list(list);
        }
        if let Some(term) = &self.report_files_containing {
            config.report_files_containing = term.clone();
        }
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(format) = self.format {
            config.format = format.into();
        }
        if self.no_color {
            config.no_color = true;
        }
    }
}

fn tracing_directive(verbose: u8, display: Severity) -> String {
    let level = match verbose {
        0 if display == Severity::Debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("hubcheck={level}")
}

fn init_tracing(verbose: u8, display: Severity, format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_directive(verbose, display).into());

    let fmt_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}

fn run(cli: &Cli, config: &AuditConfig) -> Result<Outcome> {
    if cli.rules {
        commands::list_rules(config)?;
        return Ok(Outcome::Passed);
    }

    let token = match cli.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token,
        _ => bail!("{}", hubcheck_core::AuditError::MissingToken),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(commands::audit(config, token))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };

    init_tracing(cli.verbose, config.log_level, cli.log_format);

    match run(&cli, &config) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Fatal error");
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "hubcheck",
            "--org",
            "acme",
            "--log-level",
            "debug",
            "--fail-level",
            "error",
            "--ignore-files",
            "node_modules/**;dist/**",
            "--report-files-containing",
            "password",
            "--format",
            "json",
            "--no-color",
        ])
        .unwrap();

        let mut config = AuditConfig {
            organization: Some("globex".into()),
            ..Default::default()
        };
        cli.apply(&mut config);

        assert_eq!(config.organization.as_deref(), Some("acme"));
        assert_eq!(config.log_level, Severity::Debug);
        assert_eq!(config.fail_level, Severity::Error);
        assert_eq!(config.ignore_files, ["node_modules/**", "dist/**"]);
        assert_eq!(config.report_files_containing, "password");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.no_color);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let cli = Cli::try_parse_from(["hubcheck", "--rules"]).unwrap();
        let mut config = AuditConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, AuditConfig::default());
        assert!(cli.rules);
    }

    #[test]
    fn test_invalid_severity_flag() {
        assert!(Cli::try_parse_from(["hubcheck", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_tracing_directive() {
        assert_eq!(tracing_directive(0, Severity::Info), "hubcheck=warn");
        assert_eq!(tracing_directive(0, Severity::Debug), "hubcheck=debug");
        assert_eq!(tracing_directive(1, Severity::Info), "hubcheck=info");
        assert_eq!(tracing_directive(5, Severity::Info), "hubcheck=trace");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let cli = Cli::try_parse_from(["hubcheck", "--token", " "]).unwrap();
        let err = run(&cli, &AuditConfig::default()).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_rule_listing_needs_no_token() {
        let cli = Cli::try_parse_from(["hubcheck", "--rules"]).unwrap();
        let outcome = run(&cli, &AuditConfig::default()).unwrap();
        assert_eq!(outcome, Outcome::Passed);
    }
}
