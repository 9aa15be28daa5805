//! Rules evaluated once per repository.

mod actions;
mod containing;
mod gitignore;
mod ide;
mod license;
mod readme;
mod vulnerability_alerts;

pub use actions::RepoActionsPermissions;
pub use containing::{Containing, MAX_SCAN_SIZE};
pub use gitignore::Gitignore;
pub use ide::IdeArtifacts;
pub use license::License;
pub use readme::Readme;
pub use vulnerability_alerts::VulnerabilityAlerts;

use hubcheck_core::{RuleResult, Severity};
use hubcheck_github::{GitHubError, Repository};

/// Warning recorded by content-based rules when the file tree is unavailable.
fn listing_failed(title: &str, repo: &Repository, error: &GitHubError) -> RuleResult {
    RuleResult::new(
        Severity::Warning,
        title,
        format!("Failed to list repository contents. ({error})"),
    )
    .with_repository(repo.name())
}
