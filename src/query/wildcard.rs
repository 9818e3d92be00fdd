//! Tag-syntax wildcards used when matching titles outside of SQL.
//!
//! Plain `*` and `?` are literal characters in tag names, so wildcards are
//! spelled `$*` (any run of characters) and `$?` (exactly one character).

use super::error::QueryError;
use regex::{Regex, RegexBuilder};

pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' {
            let token = match chars.peek() {
                Some('*') => Some(".*"),
                Some('?') => Some("."),
                _ => None,
            };
            if let Some(token) = token {
                chars.next();
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(token);
                continue;
            }
        }
        literal.push(ch);
    }
    out.push_str(&regex::escape(&literal));
    out
}

/// Case-insensitive matcher over whole values.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self, QueryError> {
        let anchored = format!("^(?:{})$", wildcard_to_regex(pattern));
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .build()
            .map_err(|error| QueryError::invalid_pattern(pattern, error))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}
