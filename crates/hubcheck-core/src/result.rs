//! Findings produced by rules and their aggregation per rule.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// One finding of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Severity of the finding.
    pub severity: Severity,
    /// Repository the finding is about; `None` for organization findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Short title.
    pub title: String,
    /// Longer explanation.
    pub description: String,
    /// Link to the page where the problem can be fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_url: Option<String>,
    /// Link to background documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl RuleResult {
    /// Create a new organization-level finding.
    pub fn new(severity: Severity, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity,
            repository: None,
            title: title.into(),
            description: description.into(),
            fix_url: None,
            doc_url: None,
        }
    }

    /// Attribute the finding to a repository.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Set the remediation URL.
    pub fn with_fix_url(mut self, url: impl Into<String>) -> Self {
        self.fix_url = Some(url.into());
        self
    }

    /// Set the documentation URL; empty strings are ignored.
    pub fn with_doc_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.doc_url = Some(url);
        }
        self
    }

    /// Synthetic finding recorded when a rule itself fails.
    pub fn execution_failed(error: impl std::fmt::Display) -> Self {
        Self::new(Severity::Warning, "Rule execution failed", error.to_string())
    }
}

/// Results of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResults {
    /// ID of the rule that produced the results.
    pub rule_id: String,
    /// Findings in production order.
    pub results: Vec<RuleResult>,
}

/// Results of an audit, keyed by rule ID in the order rules were run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditResults {
    entries: Vec<RuleResults>,
}

impl AuditResults {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable result list of a rule, created on first access.
    pub fn entry(&mut self, rule_id: &str) -> &mut Vec<RuleResult> {
        let index = match self.entries.iter().position(|e| e.rule_id == rule_id) {
            Some(index) => index,
            None => {
                self.entries.push(RuleResults {
                    rule_id: rule_id.to_string(),
                    results: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].results
    }

    /// Append findings to a rule's list.
    pub fn extend(&mut self, rule_id: &str, results: impl IntoIterator<Item = RuleResult>) {
        self.entry(rule_id).extend(results);
    }

    /// Findings of a rule, if it has an entry.
    pub fn get(&self, rule_id: &str) -> Option<&[RuleResult]> {
        self.entries
            .iter()
            .find(|e| e.rule_id == rule_id)
            .map(|e| e.results.as_slice())
    }

    /// Iterate over rule entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleResults> {
        self.entries.iter()
    }

    /// Iterate over `(rule ID, finding)` pairs in report order.
    pub fn findings(&self) -> impl Iterator<Item = (&str, &RuleResult)> {
        self.entries
            .iter()
            .flat_map(|e| e.results.iter().map(move |r| (e.rule_id.as_str(), r)))
    }

    /// Rule IDs in insertion order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.rule_id.as_str())
    }

    /// Number of rule entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no rule has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of findings across all rules.
    pub fn total_findings(&self) -> usize {
        self.entries.iter().map(|e| e.results.len()).sum()
    }

    /// Highest severity of any finding.
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings().map(|(_, r)| r.severity).max()
    }

    /// Whether any finding reaches `threshold`.
    pub fn any_at_least(&self, threshold: Severity) -> bool {
        self.findings().any(|(_, r)| r.severity.at_least(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let result = RuleResult::new(Severity::Error, "Title", "Description")
            .with_repository("widgets")
            .with_fix_url("https://github.com/acme/widgets/settings")
            .with_doc_url("");

        assert_eq!(result.repository.as_deref(), Some("widgets"));
        assert!(result.fix_url.is_some());
        assert!(result.doc_url.is_none());
    }

    #[test]
    fn test_execution_failed() {
        let result = RuleResult::execution_failed("HTTP request failed: timeout");
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.title, "Rule execution failed");
        assert_eq!(result.description, "HTTP request failed: timeout");
        assert!(result.repository.is_none());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut results = AuditResults::new();
        results.extend("two-factor", [RuleResult::new(Severity::Notice, "a", "")]);
        results.entry("readme");
        results.extend("two-factor", [RuleResult::new(Severity::Error, "b", "")]);

        assert_eq!(results.rule_ids().collect::<Vec<_>>(), ["two-factor", "readme"]);
        assert_eq!(results.get("two-factor").unwrap().len(), 2);
        assert_eq!(results.get("readme").unwrap().len(), 0);
        assert!(results.get("ide").is_none());
        assert_eq!(results.total_findings(), 2);
    }

    #[test]
    fn test_severity_queries() {
        let mut results = AuditResults::new();
        assert_eq!(results.max_severity(), None);

        results.extend("a", [RuleResult::new(Severity::Info, "", "")]);
        results.extend("b", [RuleResult::new(Severity::Notice, "", "")]);
        assert_eq!(results.max_severity(), Some(Severity::Notice));
        assert!(!results.any_at_least(Severity::Warning));

        results.extend("b", [RuleResult::new(Severity::Warning, "", "")]);
        assert!(results.any_at_least(Severity::Warning));
    }
}
