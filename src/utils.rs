use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse runs of whitespace into single spaces and trim both ends.
///
/// Generated output is compared this way so tests don't depend on layout.
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("\n  interface A {\n\tage: number;\n}\n\n"),
            "interface A { age: number; }"
        );
        assert_eq!(normalize_whitespace(""), "");
    }
}
