#[derive(Clone, Copy, Debug)]
pub struct NamespaceAlias {
    pub short: &'static str,
    pub canonical: &'static str,
}

pub const NAMESPACE_ALIASES: [NamespaceAlias; 13] = [
    NamespaceAlias {
        short: "a",
        canonical: "artist",
    },
    NamespaceAlias {
        short: "c",
        canonical: "character",
    },
    NamespaceAlias {
        short: "char",
        canonical: "character",
    },
    NamespaceAlias {
        short: "f",
        canonical: "female",
    },
    NamespaceAlias {
        short: "g",
        canonical: "group",
    },
    NamespaceAlias {
        short: "creator",
        canonical: "group",
    },
    NamespaceAlias {
        short: "circle",
        canonical: "group",
    },
    NamespaceAlias {
        short: "l",
        canonical: "language",
    },
    NamespaceAlias {
        short: "lang",
        canonical: "language",
    },
    NamespaceAlias {
        short: "m",
        canonical: "male",
    },
    NamespaceAlias {
        short: "p",
        canonical: "parody",
    },
    NamespaceAlias {
        short: "series",
        canonical: "parody",
    },
    NamespaceAlias {
        short: "r",
        canonical: "reclass",
    },
];

/// Canonical namespace for `name`; unknown names pass through unchanged.
pub fn resolve_namespace(name: &str) -> &str {
    NAMESPACE_ALIASES
        .iter()
        .find(|alias| alias.short.eq_ignore_ascii_case(name))
        .map(|alias| alias.canonical)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::resolve_namespace;

    #[test]
    fn resolves_short_forms() {
        assert_eq!(resolve_namespace("a"), "artist");
        assert_eq!(resolve_namespace("char"), "character");
        assert_eq!(resolve_namespace("circle"), "group");
        assert_eq!(resolve_namespace("lang"), "language");
        assert_eq!(resolve_namespace("series"), "parody");
        assert_eq!(resolve_namespace("r"), "reclass");
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(resolve_namespace("F"), "female");
        assert_eq!(resolve_namespace("Creator"), "group");
    }

    #[test]
    fn unknown_and_reserved_names_pass_through() {
        assert_eq!(resolve_namespace("artist"), "artist");
        assert_eq!(resolve_namespace("uploader"), "uploader");
        assert_eq!(resolve_namespace("cosplayer"), "cosplayer");
    }
}
