//! GitHub-style pagination with Link headers.

/// Number of items requested per page on paginated listings.
pub const PER_PAGE: u32 = 100;

/// Pagination links parsed from a `Link` response header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// URL to the first page.
    pub first: Option<String>,
    /// URL to the previous page.
    pub prev: Option<String>,
    /// URL to the next page.
    pub next: Option<String>,
    /// URL to the last page.
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Parse a `Link` header value such as
    /// `<https://api.github.com/orgs/acme/repos?page=2>; rel="next", <...>; rel="last"`.
    ///
    /// Unknown relations and malformed parts are ignored.
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();

        for part in header.split(',') {
            let Some((target, params)) = part.split_once(';') else {
                continue;
            };
            let target = target.trim();
            let Some(url) = target
                .strip_prefix('<')
                .and_then(|rest| rest.strip_suffix('>'))
            else {
                continue;
            };

            for param in params.split(';') {
                let Some((key, value)) = param.trim().split_once('=') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("rel") {
                    continue;
                }
                // A rel value may list several space-separated relations.
                for rel in value.trim().trim_matches('"').split_whitespace() {
                    let slot = match rel {
                        "first" => &mut links.first,
                        "prev" => &mut links.prev,
                        "next" => &mut links.next,
                        "last" => &mut links.last,
                        _ => continue,
                    };
                    *slot = Some(url.to_string());
                }
            }
        }

        links
    }

    /// Check if there are any links.
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.prev.is_none() && self.next.is_none() && self.last.is_none()
    }

    /// Check if there are more pages.
    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_full_header() {
        let header = "<https://api.github.com/orgs/acme/repos?page=1>; rel=\"first\", \
                      <https://api.github.com/orgs/acme/repos?page=1>; rel=\"prev\", \
                      <https://api.github.com/orgs/acme/repos?page=3>; rel=\"next\", \
                      <https://api.github.com/orgs/acme/repos?page=5>; rel=\"last\"";
        let links = PaginationLinks::parse(header);

        assert_eq!(
            links.first.as_deref(),
            Some("https://api.github.com/orgs/acme/repos?page=1")
        );
        assert_eq!(
            links.next.as_deref(),
            Some("https://api.github.com/orgs/acme/repos?page=3")
        );
        assert_eq!(
            links.last.as_deref(),
            Some("https://api.github.com/orgs/acme/repos?page=5")
        );
        assert!(links.has_next_page());
    }

    #[test]
    fn test_parse_last_page() {
        let header = "<https://api.github.com/orgs/acme/repos?page=1>; rel=\"first\", \
                      <https://api.github.com/orgs/acme/repos?page=4>; rel=\"prev\"";
        let links = PaginationLinks::parse(header);

        assert!(links.first.is_some());
        assert!(links.prev.is_some());
        assert!(!links.has_next_page());
        assert!(links.last.is_none());
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(PaginationLinks::parse("").is_empty());
        assert!(PaginationLinks::parse("garbage").is_empty());
        assert!(PaginationLinks::parse("https://x; rel=\"next\"").is_empty());
        assert!(PaginationLinks::parse("<https://x>; title=\"next\"").is_empty());
    }

    #[test]
    fn test_parse_multiple_relations_and_spacing() {
        let links = PaginationLinks::parse("  <https://x/?page=2> ;  rel=\"next last\"");
        assert_eq!(links.next.as_deref(), Some("https://x/?page=2"));
        assert_eq!(links.last.as_deref(), Some("https://x/?page=2"));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(header in ".{0,200}") {
            let _ = PaginationLinks::parse(&header);
        }

        #[test]
        fn prop_next_link_is_recovered(page in 2u32..10_000, org in "[a-z][a-z0-9-]{0,20}") {
            let url = format!("https://api.github.com/orgs/{org}/repos?per_page=100&page={page}");
            let header = format!("<{url}>; rel=\"next\", <https://api.github.com/x>; rel=\"last\"");
            let links = PaginationLinks::parse(&header);
            prop_assert_eq!(links.next, Some(url));
        }
    }
}
