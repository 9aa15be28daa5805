//! Command implementations.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use hubcheck_core::{Auditor, Reporter};
use hubcheck_github::{GitHubApi, GitHubClient};
use tracing::{error, info};

use crate::config::AuditConfig;

/// Exit status of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No finding reached the failure threshold.
    Passed,
    /// At least one finding reached the failure threshold.
    Failed,
    /// The run stopped early; a partial report was written.
    Aborted,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::Aborted => ExitCode::from(2),
        }
    }
}

fn reporter(config: &AuditConfig) -> Reporter {
    Reporter::new(config.log_level, config.fail_level)
        .with_format(config.format)
        .with_colors(!config.no_color && console::colors_enabled())
}

/// Print the rule catalog.
pub fn list_rules(config: &AuditConfig) -> Result<()> {
    let catalog = hubcheck_rules::catalog(&config.repo_rule_options()?);
    let mut out = io::stdout().lock();
    reporter(config)
        .write_rule_listing(&catalog, &mut out)
        .context("failed to write rule listing")?;
    out.flush()?;
    Ok(())
}

/// Audit the configured organization and print the report.
pub async fn audit(config: &AuditConfig, token: &str) -> Result<Outcome> {
    let catalog = hubcheck_rules::catalog(&config.repo_rule_options()?);
    let client = GitHubClient::new(token, &config.api_url).context("failed to create GitHub client")?;
    let api: Arc<dyn GitHubApi> = Arc::new(client);

    let auditor = Auditor::connect(api, config.organization.as_deref())
        .await
        .context("failed to resolve organization")?;
    let org = auditor.organization().login().to_string();
    let reporter = reporter(config);

    let (results, outcome) = match auditor.run(&catalog).await {
        Ok(results) => {
            let outcome = if reporter.is_failure(&results) {
                Outcome::Failed
            } else {
                Outcome::Passed
            };
            (results, outcome)
        }
        Err(aborted) => {
            error!(error = %aborted.source, "Audit aborted, reporting partial results");
            (aborted.partial, Outcome::Aborted)
        }
    };

    let mut out = io::stdout().lock();
    reporter
        .write_report(&org, &results, &mut out)
        .context("failed to write report")?;
    out.flush()?;

    info!(org = %org, outcome = ?outcome, "Finished");
    Ok(outcome)
}
