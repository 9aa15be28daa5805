//! Links into the GitHub web UI used as remediation URLs.

use url::form_urlencoded;

const WEB: &str = "https://github.com";

fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// An organization settings page, e.g. `security` or `actions`.
pub fn org_settings(org: &str, page: &str) -> String {
    format!("{WEB}/organizations/{}/settings/{page}", escape(org))
}

/// The organization's member list.
pub fn org_people(org: &str) -> String {
    format!("{WEB}/orgs/{}/people", escape(org))
}

/// A repository settings page.
pub fn repo_settings(org: &str, repo: &str, page: &str) -> String {
    format!("{WEB}/{}/{}/settings/{page}", escape(org), escape(repo))
}

/// The license picker of a repository.
pub fn new_license(org: &str, repo: &str) -> String {
    format!("{WEB}/{}/{}/community/license/new", escape(org), escape(repo))
}

/// The "new file" form on a branch, with a raw query appended.
pub fn new_file(org: &str, repo: &str, branch: &str, query: &str) -> String {
    format!(
        "{WEB}/{}/{}/new/{}?{query}",
        escape(org),
        escape(repo),
        escape(branch)
    )
}

/// The web editor for a file; `action` is `edit` or `delete`.
pub fn file_action(org: &str, repo: &str, branch: &str, action: &str, path: &str) -> String {
    format!(
        "{WEB}/{}/{}/{action}/{}/{path}",
        escape(org),
        escape(repo),
        escape(branch)
    )
}
