//! Dispatch engine tests against the in-memory GitHub API.

use std::sync::Arc;

use async_trait::async_trait;
use hubcheck_core::{
    AuditError, Auditor, OrgRule, RepoRule, Reporter, Result, RuleCatalog, RuleInfo, RuleResult,
    Severity,
};
use hubcheck_github::testing::{org_data, repo_data, StaticApi};
use hubcheck_github::{GitHubError, Organization, Repository};

/// Reports whether the organization enforces two-factor authentication.
struct TwoFactorCheck;

impl RuleInfo for TwoFactorCheck {
    fn id(&self) -> &str {
        "check-two-factor"
    }
    fn name(&self) -> &str {
        "Two-factor check"
    }
    fn description(&self) -> &str {
        "Checks the two-factor flag."
    }
    fn doc_url(&self) -> &str {
        "https://docs.example.com/two-factor"
    }
}

#[async_trait]
impl OrgRule for TwoFactorCheck {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        let severity = match org.data().two_factor_requirement_enabled {
            Some(true) => Severity::Notice,
            _ => Severity::Error,
        };
        Ok(vec![RuleResult::new(severity, "Two-factor", "")])
    }
}

/// Lists admins, failing when the API does.
struct AdminCount;

impl RuleInfo for AdminCount {
    fn id(&self) -> &str {
        "count-admins"
    }
    fn name(&self) -> &str {
        "Admin count"
    }
    fn description(&self) -> &str {
        "Counts admins."
    }
    fn doc_url(&self) -> &str {
        ""
    }
}

#[async_trait]
impl OrgRule for AdminCount {
    async fn run(&self, org: &Organization) -> Result<Vec<RuleResult>> {
        let admins = org.list_admins().await?;
        Ok(vec![RuleResult::new(
            Severity::Info,
            format!("{} admins", admins.len()),
            "",
        )])
    }
}

/// Reports the vulnerability alert status of each repository.
struct AlertsCheck;

impl RuleInfo for AlertsCheck {
    fn id(&self) -> &str {
        "check-alerts"
    }
    fn name(&self) -> &str {
        "Alerts check"
    }
    fn description(&self) -> &str {
        "Checks vulnerability alerts."
    }
    fn doc_url(&self) -> &str {
        ""
    }
}

#[async_trait]
impl RepoRule for AlertsCheck {
    async fn run(&self, _org: &Organization, repo: &Repository) -> Result<Vec<RuleResult>> {
        let severity = if repo.vulnerability_alerts_enabled().await? {
            Severity::Notice
        } else {
            Severity::Error
        };
        Ok(vec![RuleResult::new(severity, "Alerts", "").with_repository(repo.name())])
    }
}

/// Applies to nothing.
struct NeverApplies;

impl RuleInfo for NeverApplies {
    fn id(&self) -> &str {
        "never-applies"
    }
    fn name(&self) -> &str {
        "Never applies"
    }
    fn description(&self) -> &str {
        "Returns no results."
    }
    fn doc_url(&self) -> &str {
        ""
    }
}

#[async_trait]
impl RepoRule for NeverApplies {
    async fn run(&self, _org: &Organization, _repo: &Repository) -> Result<Vec<RuleResult>> {
        Ok(Vec::new())
    }
}

fn catalog() -> RuleCatalog {
    RuleCatalog::new()
        .with_org_rule(TwoFactorCheck)
        .with_org_rule(AdminCount)
        .with_repo_rule(AlertsCheck)
        .with_repo_rule(NeverApplies)
}

fn acme() -> StaticApi {
    let mut org = org_data("acme");
    org.two_factor_requirement_enabled = Some(true);
    StaticApi::new()
        .with_organization(org)
        .with_admins("acme", &["alice", "bob"])
        .with_repository("acme", repo_data("widgets"))
        .with_repository("acme", repo_data("gadgets"))
        .with_vulnerability_alerts("acme", "widgets", true)
        .with_vulnerability_alerts("acme", "gadgets", false)
}

#[tokio::test]
async fn test_explicit_selector_fetches_by_login() {
    let api = Arc::new(acme().with_organization(org_data("globex")));
    let auditor = Auditor::connect(api.clone(), Some("globex")).await.unwrap();

    assert_eq!(auditor.organization().login(), "globex");
    assert_eq!(api.calls(), ["get_organization globex"]);
}

#[tokio::test]
async fn test_single_visible_organization_is_used() {
    let api = Arc::new(acme());
    let auditor = Auditor::connect(api.clone(), None).await.unwrap();

    assert_eq!(auditor.organization().login(), "acme");
    assert_eq!(api.calls(), ["list_organizations "]);
}

#[tokio::test]
async fn test_blank_selector_resolves_from_token() {
    for selector in ["", "  "] {
        let api = Arc::new(acme());
        let auditor = Auditor::connect(api.clone(), Some(selector)).await.unwrap();

        assert_eq!(auditor.organization().login(), "acme");
        assert_eq!(api.calls(), ["list_organizations "]);
    }
}

#[tokio::test]
async fn test_no_organization_fails_before_rules() {
    let api = Arc::new(StaticApi::new());
    let err = Auditor::connect(api.clone(), None).await.unwrap_err();

    assert!(matches!(err, AuditError::NoOrganization));
    assert_eq!(api.calls(), ["list_organizations "]);
}

#[tokio::test]
async fn test_ambiguous_organization_fails_before_rules() {
    let api = Arc::new(acme().with_organization(org_data("globex")));
    let err = Auditor::connect(api.clone(), None).await.unwrap_err();

    match err {
        AuditError::AmbiguousOrganization(logins) => assert_eq!(logins, ["acme", "globex"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(api.calls(), ["list_organizations "]);
}

#[tokio::test]
async fn test_unknown_organization_is_fatal() {
    let api = Arc::new(acme());
    let err = Auditor::connect(api, Some("initech")).await.unwrap_err();

    match err {
        AuditError::GitHub(e) => assert_eq!(e.status(), Some(404)),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_rules_run_rule_major() {
    let api = Arc::new(acme());
    let auditor = Auditor::connect(api.clone(), Some("acme")).await.unwrap();
    let results = auditor.run(&catalog()).await.unwrap();

    assert_eq!(
        results.rule_ids().collect::<Vec<_>>(),
        ["check-two-factor", "count-admins", "check-alerts", "never-applies"]
    );
    assert_eq!(results.get("count-admins").unwrap()[0].title, "2 admins");

    let alerts = results.get("check-alerts").unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].repository.as_deref(), Some("widgets"));
    assert_eq!(alerts[0].severity, Severity::Notice);
    assert_eq!(alerts[1].repository.as_deref(), Some("gadgets"));
    assert_eq!(alerts[1].severity, Severity::Error);

    assert!(results.get("never-applies").unwrap().is_empty());

    assert_eq!(
        api.calls(),
        [
            "get_organization acme",
            "list_org_admins acme",
            "list_org_repositories acme",
            "vulnerability_alerts_enabled acme/widgets",
            "vulnerability_alerts_enabled acme/gadgets",
        ]
    );
}

#[tokio::test]
async fn test_failing_org_rule_becomes_warning() {
    let api = Arc::new(acme().failing(
        "list_org_admins",
        "acme",
        GitHubError::api(403, r#"{"message":"Must have admin rights"}"#),
    ));
    let auditor = Auditor::connect(api, Some("acme")).await.unwrap();
    let results = auditor.run(&catalog()).await.unwrap();

    let admins = results.get("count-admins").unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].severity, Severity::Warning);
    assert_eq!(admins[0].title, "Rule execution failed");
    assert!(admins[0].description.contains("Must have admin rights"));
    assert!(admins[0].repository.is_none());

    // Later rules still ran.
    assert_eq!(results.get("check-alerts").unwrap().len(), 2);
}

#[tokio::test]
async fn test_failing_repo_rule_is_isolated() {
    let api = Arc::new(acme().failing(
        "vulnerability_alerts_enabled",
        "acme/widgets",
        GitHubError::Network("connection reset".into()),
    ));
    let auditor = Auditor::connect(api, Some("acme")).await.unwrap();
    let results = auditor.run(&catalog()).await.unwrap();

    let alerts = results.get("check-alerts").unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert_eq!(alerts[0].title, "Rule execution failed");
    assert_eq!(alerts[0].repository.as_deref(), Some("widgets"));
    assert!(alerts[0].description.contains("connection reset"));
    assert_eq!(alerts[1].repository.as_deref(), Some("gadgets"));
    assert_eq!(alerts[1].severity, Severity::Error);
}

#[tokio::test]
async fn test_repository_listing_failure_aborts_with_partial_results() {
    let api = Arc::new(acme().failing(
        "list_org_repositories",
        "acme",
        GitHubError::api(500, "boom"),
    ));
    let auditor = Auditor::connect(api.clone(), Some("acme")).await.unwrap();
    let aborted = auditor.run(&catalog()).await.unwrap_err();

    assert!(matches!(aborted.source, AuditError::GitHub(_)));
    assert_eq!(
        aborted.partial.rule_ids().collect::<Vec<_>>(),
        ["check-two-factor", "count-admins"]
    );
    assert_eq!(api.call_count("vulnerability_alerts_enabled"), 0);
}

#[tokio::test]
async fn test_no_repositories_leaves_repo_rules_without_entries() {
    let api = Arc::new(StaticApi::new().with_organization(org_data("acme")));
    let auditor = Auditor::connect(api, Some("acme")).await.unwrap();
    let catalog = RuleCatalog::new().with_repo_rule(AlertsCheck);
    let results = auditor.run(&catalog).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_failure_threshold_gates_exit() {
    let api = Arc::new(acme());
    let auditor = Auditor::connect(api, Some("acme")).await.unwrap();
    let results = auditor.run(&catalog()).await.unwrap();

    // gadgets has alerts disabled, which is an error.
    assert!(Reporter::new(Severity::Info, Severity::Warning).is_failure(&results));
    assert!(Reporter::new(Severity::Error, Severity::Error).is_failure(&results));

    let api = Arc::new(acme().with_vulnerability_alerts("acme", "gadgets", true));
    let auditor = Auditor::connect(api, Some("acme")).await.unwrap();
    let results = auditor.run(&catalog()).await.unwrap();
    assert!(!Reporter::new(Severity::Debug, Severity::Warning).is_failure(&results));
}

#[test]
fn test_rule_listing_needs_no_network() {
    let mut out = Vec::new();
    Reporter::default()
        .write_rule_listing(&catalog(), &mut out)
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with(
        "## Two-factor check\n\nChecks the two-factor flag.\n\nRead more: https://docs.example.com/two-factor\n\n## Admin count\n\nCounts admins.\n\n## "
    ));
    assert!(!out.contains("Read more: \n"));
    let org = out.find("## Admin count").unwrap();
    let repo = out.find("## Alerts check").unwrap();
    assert!(org < repo);
}
