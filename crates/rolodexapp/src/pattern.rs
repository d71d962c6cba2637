//! SQL `LIKE`-style wildcard matching.
//!
//! Every search in rolodex (contact names, emails, addresses, phones, note
//! titles and texts) goes through [`WildcardPattern`]:
//!
//! - `%` matches any run of characters, including the empty run
//! - `_` matches exactly one character
//! - every other character matches itself, case-insensitively
//!
//! Patterns are anchored at both ends, so `J%` means "starts with J" and
//! `Jon` only matches the whole value `Jon`.

use crate::error::{RolodexError, Result};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        let mut literal = String::new();
        expr.push('^');

        for ch in pattern.chars() {
            let wildcard = match ch {
                '%' => ".*",
                '_' => ".",
                _ => {
                    literal.push(ch);
                    continue;
                }
            };
            expr.push_str(&regex::escape(&literal));
            literal.clear();
            expr.push_str(wildcard);
        }
        expr.push_str(&regex::escape(&literal));
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| {
                RolodexError::input(format!("Search pattern '{}' is not usable: {}", pattern, e))
            })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(pattern: &str, value: &str) -> bool {
        WildcardPattern::new(pattern).unwrap().matches(value)
    }

    #[test]
    fn percent_matches_prefix() {
        assert!(like("J%", "John"));
        assert!(like("J%", "jane"));
        assert!(like("J%", "J"));
        assert!(!like("J%", "Ajax"));
    }

    #[test]
    fn underscore_matches_single_character() {
        assert!(like("J_n", "Jon"));
        assert!(like("J_n", "Jan"));
        assert!(!like("J_n", "Jaan"));
        assert!(!like("J_n", "Jn"));
    }

    #[test]
    fn match_is_anchored() {
        assert!(!like("ohn", "John"));
        assert!(like("%ohn", "John"));
        assert!(!like("Jo", "John"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(like("a.c", "a.c"));
        assert!(!like("a.c", "abc"));
        assert!(like("j@x.com", "J@X.COM"));
        assert!(like("(050)%", "(050) 123"));
        assert!(!like("+380%", "380501234567"));
        assert!(like("+380%", "+380501234567"));
    }

    #[test]
    fn percent_matches_empty_and_newlines() {
        assert!(like("%", ""));
        assert!(like("Buy%milk", "Buy bread\nand milk"));
    }

    #[test]
    fn non_ascii_is_case_insensitive() {
        assert!(like("київ%", "Київ, Хрещатик 1"));
        assert!(like("_ван", "Іван"));
    }

    #[test]
    fn keeps_pattern_text() {
        let pattern = WildcardPattern::new("J_n%").unwrap();
        assert_eq!(pattern.as_str(), "J_n%");
    }
}
