//! Fuzz target for `Link` header parsing.
//!
//! Tests that arbitrary header values never panic and that every parsed
//! link is one of the targets present in the input.

#![no_main]

use hubcheck_github::PaginationLinks;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(header) = std::str::from_utf8(data) else {
        return;
    };

    let links = PaginationLinks::parse(header);
    for link in [&links.first, &links.prev, &links.next, &links.last]
        .into_iter()
        .flatten()
    {
        assert!(header.contains(link.as_str()));
    }
    assert_eq!(links.has_next_page(), links.next.is_some());
});
