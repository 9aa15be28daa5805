//! Report rendering and the pass/fail decision.

use std::io::{self, Write};

use console::Style;
use serde::Serialize;

use crate::result::{AuditResults, RuleResult};
use crate::rule::RuleCatalog;
use crate::severity::Severity;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown, optionally with terminal colors.
    #[default]
    Markdown,
    /// One JSON document.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected markdown or json)")),
        }
    }
}

/// Renders audit results and decides whether the audit failed.
///
/// What gets displayed and what fails the audit are decided by two
/// independent thresholds: a finding hidden from the report still fails the
/// audit when it reaches the failure threshold.
#[derive(Debug, Clone)]
pub struct Reporter {
    display_threshold: Severity,
    failure_threshold: Severity,
    format: OutputFormat,
    colored: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self {
            display_threshold: Severity::Info,
            failure_threshold: Severity::Warning,
            format: OutputFormat::Markdown,
            colored: false,
        }
    }
}

impl Reporter {
    /// Create a plain Markdown reporter with the given thresholds.
    pub fn new(display_threshold: Severity, failure_threshold: Severity) -> Self {
        Self {
            display_threshold,
            failure_threshold,
            ..Default::default()
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable terminal colors in Markdown output.
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn display_threshold(&self) -> Severity {
        self.display_threshold
    }

    pub fn failure_threshold(&self) -> Severity {
        self.failure_threshold
    }

    /// Whether any finding, displayed or not, reaches the failure threshold.
    pub fn is_failure(&self, results: &AuditResults) -> bool {
        results.any_at_least(self.failure_threshold)
    }

    /// Write every finding at or above the display threshold.
    pub fn write_report<W: Write>(
        &self,
        org: &str,
        results: &AuditResults,
        writer: &mut W,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Markdown => self.write_markdown(org, results, writer),
            OutputFormat::Json => self.write_json(org, results, writer),
        }
    }

    /// Write the name, description and documentation link of every rule.
    pub fn write_rule_listing<W: Write>(&self, catalog: &RuleCatalog, writer: &mut W) -> io::Result<()> {
        for rule in catalog.summaries() {
            write!(writer, "## {}\n\n{}\n\n", rule.name, rule.description)?;
            if !rule.doc_url.is_empty() {
                write!(writer, "Read more: {}\n\n", rule.doc_url)?;
            }
        }
        Ok(())
    }

    fn displayed<'a>(&'a self, results: &'a AuditResults) -> impl Iterator<Item = (&'a str, &'a RuleResult)> {
        results
            .findings()
            .filter(move |(_, result)| result.severity.at_least(self.display_threshold))
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.colored {
            style.clone().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        self.paint(&Style::new().bold(), &format!("**{text}:**"))
    }

    fn write_markdown<W: Write>(&self, org: &str, results: &AuditResults, w: &mut W) -> io::Result<()> {
        write!(w, "# Report for the {org} GitHub organization\n\n")?;

        for (rule_id, result) in self.displayed(results) {
            let heading = format!(
                "## {} {} (`{}`)",
                result.severity.icon(),
                result.title,
                rule_id
            );
            write!(w, "{}\n\n", self.paint(&severity_style(result.severity), &heading))?;
            if !result.description.is_empty() {
                write!(w, "{}\n\n", result.description)?;
            }

            match &result.repository {
                Some(repo) => writeln!(
                    w,
                    "- {} [{org}/{repo}](https://github.com/{org}/{repo})",
                    self.label("Repository")
                )?,
                None => writeln!(
                    w,
                    "- {} [{org}](https://github.com/{org})",
                    self.label("Organization")
                )?,
            }
            if let Some(url) = &result.fix_url {
                writeln!(w, "- {} {url}", self.label("Quick fix"))?;
            }
            if let Some(url) = &result.doc_url {
                writeln!(w, "- {} {url}", self.label("Documentation"))?;
            }
            write!(w, "\n---\n\n")?;
        }
        Ok(())
    }

    fn write_json<W: Write>(&self, org: &str, results: &AuditResults, w: &mut W) -> io::Result<()> {
        let report = JsonReport {
            organization: org,
            failed: self.is_failure(results),
            results: self
                .displayed(results)
                .map(|(rule_id, result)| JsonFinding { rule_id, result })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *w, &report)?;
        writeln!(w)
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Debug => Style::new().white(),
        Severity::Info => Style::new().cyan(),
        Severity::Notice => Style::new().green(),
        Severity::Warning => Style::new().yellow(),
        Severity::Error => Style::new().red(),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    organization: &'a str,
    failed: bool,
    results: Vec<JsonFinding<'a>>,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    rule_id: &'a str,
    #[serde(flatten)]
    result: &'a RuleResult,
}
