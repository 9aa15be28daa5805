//! # hubcheck rules
//!
//! The governance rules hubcheck runs against a GitHub organization.
//!
//! Organization rules ([`org`]) check settings of the organization itself;
//! repository rules ([`repo`]) run once per repository. [`catalog`] builds
//! the full, ordered [`RuleCatalog`].

use hubcheck_core::{RuleCatalog, RuleResult, Severity};
use hubcheck_github::ActionsPermissions;

/// Implements [`hubcheck_core::RuleInfo`] from constant strings and exposes
/// them as associated constants.
macro_rules! rule_info {
    (
        $ty:ident,
        id: $id:expr,
        name: $name:expr,
        description: $description:expr,
        doc_url: $doc_url:expr $(,)?
    ) => {
        impl $ty {
            pub const ID: &'static str = $id;
            pub const NAME: &'static str = $name;
            pub const DESCRIPTION: &'static str = $description;
            pub const DOC_URL: &'static str = $doc_url;
        }

        impl hubcheck_core::RuleInfo for $ty {
            fn id(&self) -> &str {
                Self::ID
            }

            fn name(&self) -> &str {
                Self::NAME
            }

            fn description(&self) -> &str {
                Self::DESCRIPTION
            }

            fn doc_url(&self) -> &str {
                Self::DOC_URL
            }
        }
    };
}

pub mod ignore;
pub mod links;
pub mod org;
pub mod repo;

pub use ignore::{IgnorePatternError, IgnoreSet, DEFAULT_IGNORE_FILES};

const ACTIONS_DESCRIPTION: &str = "Allowing all GitHub Actions to run introduces the risk of accidentally exposing sensitive credentials to untrusted, or even malicious developers.";
const ACTIONS_DOC_URL: &str = "https://docs.github.com/en/organizations/managing-organization-settings/disabling-or-limiting-github-actions-for-your-organization";

/// Shared verdict of the organization and repository Actions rules.
fn actions_result(permissions: &ActionsPermissions, fix_url: String) -> RuleResult {
    let (severity, title) = if permissions.is_restricted() {
        (Severity::Notice, "GitHub Actions are limited")
    } else {
        (Severity::Error, "GitHub Actions are not limited")
    };
    RuleResult::new(severity, title, ACTIONS_DESCRIPTION)
        .with_fix_url(fix_url)
        .with_doc_url(ACTIONS_DOC_URL)
}

/// Settings of the configurable repository rules.
#[derive(Debug, Clone, Default)]
pub struct RepoRuleOptions {
    /// Term the `containing` rule searches for; empty disables the rule.
    pub report_files_containing: String,
    /// Paths the `containing` rule skips.
    pub ignore: IgnoreSet,
}

/// Build the full rule catalog in reporting order.
pub fn catalog(options: &RepoRuleOptions) -> RuleCatalog {
    RuleCatalog::new()
        .with_org_rule(org::TwoFactor)
        .with_org_rule(org::DefaultRepositoryPermission)
        .with_org_rule(org::ActionsPermissionsRule)
        .with_org_rule(org::WorkflowApprovals)
        .with_org_rule(org::OrganizationAdmins)
        .with_repo_rule(repo::RepoActionsPermissions)
        .with_repo_rule(repo::VulnerabilityAlerts)
        .with_repo_rule(repo::License)
        .with_repo_rule(repo::Readme)
        .with_repo_rule(repo::Gitignore)
        .with_repo_rule(repo::IdeArtifacts)
        .with_repo_rule(repo::Containing::new(
            &options.report_files_containing,
            options.ignore.clone(),
        ))
}
