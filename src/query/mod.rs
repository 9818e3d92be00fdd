//! Search query language: `artist:"jane doe" -yaoi $exact title*`.

mod alias;
mod ast;
mod error;
mod lenient;
mod parser;
mod wildcard;

pub use alias::{resolve_namespace, NamespaceAlias, NAMESPACE_ALIASES};
pub use ast::{QueryComponent, Text, TextComponent};
pub use error::{QueryError, QueryErrorCode};
pub use lenient::{tag_patterns, title_pattern};
pub use wildcard::{wildcard_to_regex, WildcardPattern};

pub fn parse_query(input: &str, enable_wildcard: bool) -> Vec<QueryComponent> {
    parser::parse(input, enable_wildcard)
}
