//! Registrable-domain reduction for hostnames.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref GENERIC_WWW: Regex = Regex::new("^www[0-9]*$").unwrap();
    static ref COMPOUND_SUFFIXES: HashSet<&'static str> = [
        "ac.uk", "co.uk", "gov.uk", "ltd.uk", "me.uk", "net.uk", "nhs.uk", "org.uk", "plc.uk",
        "police.uk", "sch.uk", "ac.jp", "co.jp", "go.jp", "ne.jp", "or.jp", "com.au", "edu.au",
        "gov.au", "net.au", "org.au", "co.nz", "govt.nz", "net.nz", "org.nz", "co.za", "gov.za",
        "org.za", "com.br", "net.br", "org.br", "com.cn", "gov.cn", "net.cn", "org.cn", "com.mx",
        "com.ar", "com.sg", "com.tr", "com.tw", "co.in", "net.in", "org.in", "co.kr", "or.kr",
    ]
    .iter()
    .copied()
    .collect();
}

/// Reduces a hostname to its registrable domain.
///
/// Leading generic-www labels (`www`, `www2`, ...) are stripped first. A
/// name ending in a compound public suffix (e.g. `co.uk`) keeps three
/// labels, anything else keeps two. Names that cannot be reduced (a single
/// label, or a name that IS a compound suffix after stripping) come back as
/// the original input. Empty in, empty out.
pub fn extract_domain(hostname: &str) -> String {
    let labels: Vec<&str> = hostname.split('.').collect();

    let mut start = 0;
    while start + 1 < labels.len() && GENERIC_WWW.is_match(labels[start]) {
        start += 1;
    }
    let stripped = &labels[start..];

    match stripped.len() {
        0 | 1 => hostname.to_string(),
        2 => {
            let tail = stripped.join(".");
            if COMPOUND_SUFFIXES.contains(tail.as_str()) {
                hostname.to_string()
            } else {
                tail
            }
        }
        len => {
            let suffix = format!("{}.{}", stripped[len - 2], stripped[len - 1]);
            if COMPOUND_SUFFIXES.contains(suffix.as_str()) {
                stripped[len - 3..].join(".")
            } else {
                suffix
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        let cases = [
            ("www.bunchy.co.uk", "bunchy.co.uk"),
            ("www2.www.bunchy.co.uk", "bunchy.co.uk"),
            ("www.acid-house.bunchy.com", "bunchy.com"),
            ("www.gov.uk", "www.gov.uk"),
            ("das.house.de", "house.de"),
            ("das.house", "das.house"),
            ("example.org", "example.org"),
            ("a.b.example.org", "example.org"),
            ("localhost", "localhost"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(extract_domain(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_www_is_never_stripped_to_nothing() {
        assert_eq!(extract_domain("www"), "www");
        assert_eq!(extract_domain("www.www2"), "www.www2");
    }
}
