//! Lenient tag matching: a non-exact clause is split on word delimiters and
//! each piece becomes its own substring pattern, OR'd together by the compiler.

use super::ast::{Text, TextComponent};
use crate::sql::escape::push_like_escaped;

pub fn tag_patterns(text: &Text) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    for component in text.components() {
        match component {
            TextComponent::Literal(value) => {
                for ch in value.chars() {
                    if is_delimiter(ch) {
                        push_token(&mut tokens, &mut current);
                    } else {
                        push_like_escaped(&mut current, ch);
                    }
                }
            }
            TextComponent::SingleWildcard => current.push('_'),
            TextComponent::MultiWildcard => current.push('%'),
        }
    }
    push_token(&mut tokens, &mut current);

    if tokens.len() <= 1 {
        return vec![text.as_substring_pattern()];
    }
    tokens.into_iter().map(|token| format!("%{token}%")).collect()
}

/// Titles are matched as one substring regardless of delimiters.
pub fn title_pattern(text: &Text) -> String {
    text.as_substring_pattern()
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() && !tokens.contains(current) {
        tokens.push(current.clone());
    }
    current.clear();
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '-' | '.' | ',' | ':' | ';' | '/' | '|' | '!' | '(' | ')' | '[' | ']' | '~' | '+'
        )
}
