use super::{
    alias::resolve_namespace,
    ast::{QueryComponent, Text, TextComponent},
};

/// Scans a search string into clauses. Never fails: unterminated quotes,
/// dangling modifiers and trailing colons all degrade to a best-effort result.
pub fn parse(input: &str, enable_wildcard: bool) -> Vec<QueryComponent> {
    let mut scanner = Scanner::default();
    for ch in input.to_lowercase().chars() {
        scanner.feed(ch, enable_wildcard);
    }
    scanner.finish()
}

#[derive(Default)]
struct Scanner {
    out: Vec<QueryComponent>,
    in_quotes: bool,
    raw: String,
    queued: Vec<TextComponent>,
    namespace: Option<String>,
    next_is_excluded: bool,
    next_is_exact: bool,
}

impl Scanner {
    fn feed(&mut self, ch: char, enable_wildcard: bool) {
        match ch {
            '"' => self.in_quotes = !self.in_quotes,
            '?' | '_' if enable_wildcard => self.push_wildcard(TextComponent::SingleWildcard),
            '*' | '%' if enable_wildcard => self.push_wildcard(TextComponent::MultiWildcard),
            '-' if !self.in_quotes && self.accepts_modifier() => self.next_is_excluded = true,
            '$' => self.next_is_exact = true,
            ':' if !self.in_quotes => self.start_namespace(),
            c if !self.in_quotes && is_separator(c) => self.flush_clause(),
            c => self.raw.push(c),
        }
    }

    fn finish(mut self) -> Vec<QueryComponent> {
        self.flush_clause();
        self.out
    }

    /// `-` excludes when no literal run is open or the run ends in a space; `spider-man` keeps it.
    fn accepts_modifier(&self) -> bool {
        self.raw.is_empty() || self.raw.ends_with(' ')
    }

    fn push_wildcard(&mut self, wildcard: TextComponent) {
        self.flush_literal();
        self.queued.push(wildcard);
    }

    fn flush_literal(&mut self) {
        if !self.raw.is_empty() {
            let value = std::mem::take(&mut self.raw);
            self.queued.push(TextComponent::Literal(value));
        }
    }

    fn take_text(&mut self) -> Option<Text> {
        self.flush_literal();
        Text::new(std::mem::take(&mut self.queued))
    }

    /// A later colon rescopes the clause; a colon with no name before it is ignored.
    fn start_namespace(&mut self) {
        if let Some(name) = self.take_text() {
            self.namespace = Some(resolve_namespace(&name.raw_text()).to_string());
        }
    }

    fn flush_clause(&mut self) {
        let text = self.take_text();
        let component = match (self.namespace.take(), text) {
            (Some(namespace), tag) => Some(QueryComponent::namespace(namespace, tag)),
            (None, Some(text)) => Some(QueryComponent::text(text)),
            (None, None) => None,
        };
        if let Some(component) = component {
            self.out
                .push(component.with_flags(self.next_is_excluded, self.next_is_exact));
        }
        self.next_is_excluded = false;
        self.next_is_exact = false;
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::query::ast::{QueryComponent, Text, TextComponent};

    #[test]
    fn empty_and_blank_queries_yield_nothing() {
        assert!(parse("", true).is_empty());
        assert!(parse("   , ,  ", true).is_empty());
    }

    #[test]
    fn parses_artist_and_excluded_text() {
        let parsed = parse("artist:\"jane doe\" -yaoi", true);
        assert_eq!(
            parsed,
            vec![
                QueryComponent::namespace("artist", Some(Text::literal("jane doe"))),
                QueryComponent::text(Text::literal("yaoi")).with_flags(true, false),
            ]
        );
    }

    #[test]
    fn single_excluded_clause() {
        let parsed = parse("-yaoi", true);
        assert_eq!(parsed.len(), 1);
        assert!(matches!(&parsed[0], QueryComponent::Text { excluded: true, .. }));
    }

    #[test]
    fn resolves_namespace_alias() {
        let parsed = parse("a:clamp", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("artist", Some(Text::literal("clamp")))]
        );
    }

    #[test]
    fn lowercases_input_before_scanning() {
        let parsed = parse("LANG:English", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("language", Some(Text::literal("english")))]
        );
    }

    #[test]
    fn dash_inside_a_word_is_literal() {
        let parsed = parse("spider-man", true);
        assert_eq!(parsed, vec![QueryComponent::text(Text::literal("spider-man"))]);
    }

    #[test]
    fn dash_inside_quotes_is_literal() {
        let parsed = parse("\"-ish\"", true);
        assert_eq!(parsed, vec![QueryComponent::text(Text::literal("-ish"))]);
    }

    #[test]
    fn dash_after_namespace_excludes_the_clause() {
        let parsed = parse("f:-catgirl", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("female", Some(Text::literal("catgirl")))
                .with_flags(true, false)]
        );
    }

    #[test]
    fn dash_after_a_wildcard_excludes_the_clause() {
        let parsed = parse("x*-y", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::text(
                Text::new(vec![
                    TextComponent::Literal("x".into()),
                    TextComponent::MultiWildcard,
                    TextComponent::Literal("y".into()),
                ])
                .unwrap()
            )
            .with_flags(true, false)]
        );
    }

    #[test]
    fn dash_after_closed_quote_ending_in_space_excludes() {
        let parsed = parse("\"big \"-x", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::text(Text::literal("big x")).with_flags(true, false)]
        );
    }

    #[test]
    fn exact_and_excluded_modifiers_combine() {
        let parsed = parse("-$f:catgirl", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("female", Some(Text::literal("catgirl")))
                .with_flags(true, true)]
        );
    }

    #[test]
    fn modifiers_reset_between_clauses() {
        let parsed = parse("$title other", true);
        assert!(parsed[0].exact());
        assert!(!parsed[1].exact());
        assert!(!parsed[1].excluded());
    }

    #[test]
    fn splits_wildcards_from_literals() {
        let parsed = parse("title*x?y", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::text(Text::new(vec![
                TextComponent::Literal("title".into()),
                TextComponent::MultiWildcard,
                TextComponent::Literal("x".into()),
                TextComponent::SingleWildcard,
                TextComponent::Literal("y".into()),
            ])
            .unwrap())]
        );
    }

    #[test]
    fn sql_style_wildcards_are_recognized() {
        let parsed = parse("a_b%", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::text(Text::new(vec![
                TextComponent::Literal("a".into()),
                TextComponent::SingleWildcard,
                TextComponent::Literal("b".into()),
                TextComponent::MultiWildcard,
            ])
            .unwrap())]
        );
    }

    #[test]
    fn wildcards_stay_literal_when_disabled() {
        let parsed = parse("100%_done*", false);
        assert_eq!(parsed, vec![QueryComponent::text(Text::literal("100%_done*"))]);
    }

    #[test]
    fn namespace_without_value_has_no_tag() {
        let parsed = parse("female:", true);
        assert_eq!(parsed, vec![QueryComponent::namespace("female", None)]);
    }

    #[test]
    fn comma_separates_clauses() {
        let parsed = parse("lang:english,-yaoi", true);
        assert_eq!(parsed.len(), 2);
        assert!(parsed[1].excluded());
    }

    #[test]
    fn unterminated_quote_keeps_remaining_text() {
        let parsed = parse("p:\"touhou project", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("parody", Some(Text::literal("touhou project")))]
        );
    }

    #[test]
    fn dangling_modifiers_emit_nothing() {
        assert!(parse("-", true).is_empty());
        assert!(parse("$ -", true).is_empty());
        let parsed = parse("- yaoi", true);
        assert_eq!(parsed, vec![QueryComponent::text(Text::literal("yaoi"))]);
    }

    #[test]
    fn later_colon_rescopes_the_clause() {
        let parsed = parse("parody:re:zero", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("re", Some(Text::literal("zero")))]
        );
    }

    #[test]
    fn colon_inside_quotes_is_literal() {
        let parsed = parse("p:\"re:zero\"", true);
        assert_eq!(
            parsed,
            vec![QueryComponent::namespace("parody", Some(Text::literal("re:zero")))]
        );
    }

    #[test]
    fn leading_colon_is_ignored() {
        let parsed = parse(":foo", true);
        assert_eq!(parsed, vec![QueryComponent::text(Text::literal("foo"))]);
    }

    #[test]
    fn preserves_clause_order() {
        let parsed = parse("c d e", true);
        let raws: Vec<String> = parsed
            .iter()
            .map(|c| match c {
                QueryComponent::Text { text, .. } => text.raw_text(),
                QueryComponent::Namespace { namespace, .. } => namespace.clone(),
            })
            .collect();
        assert_eq!(raws, vec!["c", "d", "e"]);
    }
}
