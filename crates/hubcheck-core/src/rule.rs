//! Rule interfaces and the rule catalog.
//!
//! Organization rules and repository rules operate on different data, so
//! they are two capability traits sharing the [`RuleInfo`] identity contract
//! rather than one trait with an optional repository argument.

use async_trait::async_trait;
use hubcheck_github::{Organization, Repository};

use crate::error::Result;
use crate::result::RuleResult;

/// Identity of a rule, available without running it.
pub trait RuleInfo {
    /// Stable kebab-case identifier, used as the results key.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// What the rule checks and why.
    fn description(&self) -> &str;

    /// Link to background documentation; may be empty.
    fn doc_url(&self) -> &str;
}

/// A check run once per audit against the organization.
///
/// An empty result list means the rule did not apply.
#[async_trait]
pub trait OrgRule: RuleInfo + Send + Sync {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>>;
}

/// A check run once per repository of the organization.
#[async_trait]
pub trait RepoRule: RuleInfo + Send + Sync {
    async fn run(&self, org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>>;
}

/// Ordered organization and repository rules.
#[derive(Default)]
pub struct RuleCatalog {
    pub org_rules: Vec<Box<dyn OrgRule>>,
    pub repo_rules: Vec<Box<dyn RepoRule>>,
}

impl RuleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an organization rule.
    pub fn with_org_rule(mut self, rule: impl OrgRule + 'static) -> Self {
        self.org_rules.push(Box::new(rule));
        self
    }

    /// Append a repository rule.
    pub fn with_repo_rule(mut self, rule: impl RepoRule + 'static) -> Self {
        self.repo_rules.push(Box::new(rule));
        self
    }

    /// Identities of all rules, organization rules first.
    pub fn summaries(&self) -> Vec<RuleSummary<'_>> {
        let org = self.org_rules.iter().map(|rule| RuleSummary::of(rule.as_ref()));
        let repo = self.repo_rules.iter().map(|rule| RuleSummary::of(rule.as_ref()));
        org.chain(repo).collect()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.org_rules.len() + self.repo_rules.len()
    }

    /// Check if the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.summaries().iter().map(|summary| summary.id))
            .finish()
    }
}

/// Borrowed copy of a rule's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub doc_url: &'a str,
}

impl<'a> RuleSummary<'a> {
    fn of<R: RuleInfo + ?Sized>(rule: &'a R) -> Self {
        Self {
            id: rule.id(),
            name: rule.name(),
            description: rule.description(),
            doc_url: rule.doc_url(),
        }
    }
}
