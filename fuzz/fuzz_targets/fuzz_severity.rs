//! Fuzz target for severity name parsing.

#![no_main]

use hubcheck_core::Severity;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(severity) = input.parse::<Severity>() {
        // Accepted names always render to a name that parses back.
        assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
    }
});
