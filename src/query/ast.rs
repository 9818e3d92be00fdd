use crate::sql::escape::push_like_escaped;

/// One parsed clause of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryComponent {
    /// Free text, matched against tag names and titles.
    Text {
        text: Text,
        excluded: bool,
        exact: bool,
    },
    /// `namespace:value`. `tag == None` matches any value in the namespace.
    Namespace {
        namespace: String,
        tag: Option<Text>,
        excluded: bool,
        exact: bool,
    },
}

impl QueryComponent {
    pub fn text(text: Text) -> Self {
        Self::Text {
            text,
            excluded: false,
            exact: false,
        }
    }

    pub fn namespace(namespace: impl Into<String>, tag: Option<Text>) -> Self {
        Self::Namespace {
            namespace: namespace.into(),
            tag,
            excluded: false,
            exact: false,
        }
    }

    pub fn excluded(&self) -> bool {
        match self {
            Self::Text { excluded, .. } | Self::Namespace { excluded, .. } => *excluded,
        }
    }

    pub fn exact(&self) -> bool {
        match self {
            Self::Text { exact, .. } | Self::Namespace { exact, .. } => *exact,
        }
    }

    pub fn with_flags(mut self, excluded_flag: bool, exact_flag: bool) -> Self {
        match &mut self {
            Self::Text { excluded, exact, .. } | Self::Namespace { excluded, exact, .. } => {
                *excluded = excluded_flag;
                *exact = exact_flag;
            }
        }
        self
    }

    pub fn set_exact(&mut self, value: bool) {
        match self {
            Self::Text { exact, .. } | Self::Namespace { exact, .. } => *exact = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextComponent {
    Literal(String),
    SingleWildcard,
    MultiWildcard,
}

impl TextComponent {
    fn raw_text(&self) -> &str {
        match self {
            Self::Literal(value) => value,
            Self::SingleWildcard => "?",
            Self::MultiWildcard => "*",
        }
    }
}

/// Ordered atoms of a free-text clause; concatenated they form the match pattern.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    components: Vec<TextComponent>,
}

impl Text {
    /// `None` when there are no components.
    pub fn new(components: Vec<TextComponent>) -> Option<Self> {
        (!components.is_empty()).then_some(Self { components })
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            components: vec![TextComponent::Literal(value.into())],
        }
    }

    pub fn components(&self) -> &[TextComponent] {
        &self.components
    }

    /// Text as typed, wildcards rendered as `?` and `*`.
    pub fn raw_text(&self) -> String {
        self.components.iter().map(TextComponent::raw_text).collect()
    }

    /// Single LIKE pattern: literal runs escaped, wildcards mapped to `_` and `%`.
    pub fn as_exact_pattern(&self) -> String {
        let mut out = String::new();
        for component in &self.components {
            match component {
                TextComponent::Literal(value) => {
                    for ch in value.chars() {
                        push_like_escaped(&mut out, ch);
                    }
                }
                TextComponent::SingleWildcard => out.push('_'),
                TextComponent::MultiWildcard => out.push('%'),
            }
        }
        out
    }

    /// Substring match of the exact pattern.
    pub fn as_substring_pattern(&self) -> String {
        format!("%{}%", self.as_exact_pattern())
    }
}
