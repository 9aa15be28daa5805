//! Rule dispatch.
//!
//! The [`Auditor`] resolves the organization once, then runs every
//! organization rule followed by every repository rule against every
//! repository. A failing rule never stops the run; it is recorded as a
//! synthetic warning instead. Only a failed repository listing aborts.

use std::sync::Arc;

use hubcheck_github::{GitHubApi, Organization};
use tracing::{debug, info, warn};

use crate::error::{AuditAborted, AuditError, Result};
use crate::result::{AuditResults, RuleResult};
use crate::rule::RuleCatalog;

/// Runs a rule catalog against one organization.
#[derive(Debug)]
pub struct Auditor {
    org: Organization,
}

impl Auditor {
    /// Resolve the organization to audit.
    ///
    /// With a selector the organization is fetched by login. Without one, or
    /// with a blank one, the credential must see exactly one organization.
    pub async fn connect(api: Arc<dyn GitHubApi>, selector: Option<&str>) -> Result<Self> {
        let selector = selector.map(str::trim).filter(|login| !login.is_empty());
        let org = match selector {
            Some(login) => {
                debug!(org = %login, "Fetching organization");
                Organization::fetch(api, login).await?
            }
            None => {
                debug!("Resolving organization from token");
                let mut orgs = Organization::list_visible(api).await?;
                match orgs.len() {
                    0 => return Err(AuditError::NoOrganization),
                    1 => orgs.remove(0),
                    _ => {
                        return Err(AuditError::AmbiguousOrganization(
                            orgs.iter().map(|org| org.login().to_string()).collect(),
                        ))
                    }
                }
            }
        };

        info!(org = %org.login(), "Auditing organization");
        Ok(Self { org })
    }

    /// Wrap an already resolved organization.
    pub fn new(org: Organization) -> Self {
        Self { org }
    }

    /// The organization under audit.
    pub fn organization(&self) -> &Organization {
        &self.org
    }

    /// Run every rule of `catalog`, organization rules first.
    pub async fn run(&self, catalog: &RuleCatalog) -> std::result::Result<AuditResults, AuditAborted> {
        let mut results = AuditResults::new();

        for rule in &catalog.org_rules {
            debug!(rule = rule.id(), "Running organization rule");
            let outcome = match rule.run(&self.org).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(rule = rule.id(), error = %e, "Rule failed");
                    vec![RuleResult::execution_failed(&e)]
                }
            };
            results.extend(rule.id(), outcome);
        }

        let repos = match self.org.list_repositories().await {
            Ok(repos) => repos,
            Err(e) => {
                return Err(AuditAborted {
                    partial: results,
                    source: AuditError::GitHub(e),
                })
            }
        };
        info!(count = repos.len(), "Listed repositories");

        for rule in &catalog.repo_rules {
            for repo in &repos {
                debug!(rule = rule.id(), repo = %repo.name(), "Running repository rule");
                let outcome = match rule.run(&self.org, repo).await {
                    Ok(found) => found,
                    Err(e) => {
                        warn!(rule = rule.id(), repo = %repo.name(), error = %e, "Rule failed");
                        vec![RuleResult::execution_failed(&e).with_repository(repo.name())]
                    }
                };
                results.extend(rule.id(), outcome);
            }
        }

        info!(
            rules = results.len(),
            findings = results.total_findings(),
            "Audit complete"
        );
        Ok(results)
    }
}
