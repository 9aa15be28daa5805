//! Rules evaluated once against the organization.

mod actions;
mod admins;
mod default_permission;
mod two_factor;
mod workflow_approvals;

pub use actions::ActionsPermissionsRule;
pub use admins::OrganizationAdmins;
pub use default_permission::DefaultRepositoryPermission;
pub use two_factor::TwoFactor;
pub use workflow_approvals::WorkflowApprovals;
