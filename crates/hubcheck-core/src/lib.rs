//! # hubcheck core
//!
//! Rule interfaces, the dispatch engine that runs them against an
//! organization, and the reporter that renders the outcome.
//!
//! ## Overview
//!
//! - [`OrgRule`] and [`RepoRule`] are the two rule capabilities; both expose
//!   their identity through [`RuleInfo`]
//! - [`Auditor`] resolves the organization and runs a [`RuleCatalog`],
//!   turning rule failures into warnings
//! - [`Reporter`] renders [`AuditResults`] and applies the failure threshold

pub mod engine;
pub mod error;
pub mod report;
pub mod result;
pub mod rule;
pub mod severity;

pub use engine::Auditor;
pub use error::{AuditAborted, AuditError, Result};
pub use report::{OutputFormat, Reporter};
pub use result::{AuditResults, RuleResult, RuleResults};
pub use rule::{OrgRule, RepoRule, RuleCatalog, RuleInfo, RuleSummary};
pub use severity::{ParseSeverityError, Severity};
