//! Compiles parsed query components into one SELECT over the search tables.
//!
//! Included clauses become INNER JOINs (intersection), excluded clauses become
//! `NOT IN` sub-queries, and the `uploader` namespace is a scalar predicate on
//! the metadata row.

pub mod builder;
pub mod escape;

pub use builder::{CompiledQuery, Fragment, QueryBuilder};
pub use escape::escape_like;

use crate::query::{tag_patterns, title_pattern, QueryComponent, Text};
use tracing::debug;

pub const METADATA_TABLE: &str = "search_metadata";
pub const TAGS_TABLE: &str = "search_tags";
pub const TITLES_TABLE: &str = "search_titles";

pub const COL_MANGA_ID: &str = "manga_id";
pub const COL_UPLOADER: &str = "uploader";
pub const COL_NAMESPACE: &str = "namespace";
pub const COL_NAME: &str = "name";
pub const COL_TITLE: &str = "title";

/// Namespace stored on the metadata row instead of the tag table.
pub const UPLOADER_NAMESPACE: &str = "uploader";

const MATCH_ID: &str = "mid";
const META_ID: &str = "meta.manga_id";
const LIKE: &str = "LIKE ? ESCAPE '\\'";

/// Sub-query yielding matching manga ids as `mid`, or `None` when there is
/// nothing to match on.
pub fn text_to_sub_query(namespace: Option<&str>, text: Option<&Text>, exact: bool) -> Option<Fragment> {
    let tag_predicate = text.map(|text| tag_name_predicate(text, exact));
    match (namespace, text) {
        (Some(namespace), _) => {
            let mut sql = format!(
                "(SELECT DISTINCT {COL_MANGA_ID} AS {MATCH_ID} FROM {TAGS_TABLE}\n    \
                 WHERE {COL_NAMESPACE} IS NOT NULL\n    \
                 AND {COL_NAMESPACE} {LIKE}"
            );
            let mut params = vec![escape_like(namespace)];
            if let Some(predicate) = tag_predicate {
                sql.push_str("\n    AND ");
                sql.push_str(predicate.sql());
                params.extend_from_slice(predicate.params());
            }
            sql.push(')');
            Some(Fragment::new(sql, params))
        }
        (None, Some(text)) => {
            let predicate = tag_predicate?;
            let title = if exact {
                text.as_exact_pattern()
            } else {
                title_pattern(text)
            };
            let sql = format!(
                "(SELECT {COL_MANGA_ID} AS {MATCH_ID} FROM {TAGS_TABLE}\n    \
                 WHERE {tags}\n\
                 UNION\n\
                 SELECT {COL_MANGA_ID} AS {MATCH_ID} FROM {TITLES_TABLE}\n    \
                 WHERE {COL_TITLE} {LIKE})",
                tags = predicate.sql(),
            );
            let mut params = predicate.params().to_vec();
            params.push(title);
            Some(Fragment::new(sql, params))
        }
        (None, None) => None,
    }
}

/// `(name LIKE ? OR name LIKE ? ...)`, one pattern when exact.
fn tag_name_predicate(text: &Text, exact: bool) -> Fragment {
    let patterns = if exact {
        vec![text.as_exact_pattern()]
    } else {
        tag_patterns(text)
    };
    let alternatives = vec![format!("{COL_NAME} {LIKE}"); patterns.len()];
    Fragment::new(format!("({})", alternatives.join(" OR ")), patterns)
}

fn uploader_predicate(tag: Option<&Text>, excluded: bool) -> Fragment {
    let column = format!("meta.{COL_UPLOADER}");
    match (tag, excluded) {
        (Some(text), false) => Fragment::new(format!("{column} {LIKE}"), vec![text.as_exact_pattern()]),
        (Some(text), true) => Fragment::new(
            format!("({column} IS NULL OR {column} NOT {LIKE})"),
            vec![text.as_exact_pattern()],
        ),
        (None, false) => Fragment::new(format!("{column} IS NOT NULL"), Vec::new()),
        (None, true) => Fragment::new(format!("{column} IS NULL"), Vec::new()),
    }
}

pub fn compile(components: &[QueryComponent]) -> CompiledQuery {
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    let mut scalar = Vec::new();

    for component in components {
        let sub_query = match component {
            QueryComponent::Text { text, exact, .. } => text_to_sub_query(None, Some(text), *exact),
            QueryComponent::Namespace {
                namespace,
                tag,
                excluded,
                ..
            } if namespace == UPLOADER_NAMESPACE => {
                scalar.push(uploader_predicate(tag.as_ref(), *excluded));
                continue;
            }
            QueryComponent::Namespace {
                namespace, tag, exact, ..
            } => text_to_sub_query(Some(namespace.as_str()), tag.as_ref(), *exact),
        };

        match sub_query {
            Some(fragment) if component.excluded() => exclude.push(fragment),
            Some(fragment) => include.push(fragment),
            None => debug!(?component, "dropping clause with nothing to match"),
        }
    }

    let mut builder = QueryBuilder::select(format!("SELECT {META_ID}\nFROM {METADATA_TABLE} meta"));
    for fragment in include {
        builder.inner_join(fragment, MATCH_ID, META_ID);
    }
    for fragment in exclude {
        builder.and_where(fragment.map_sql(|sql| format!("({META_ID} NOT IN {sql})")));
    }
    for fragment in scalar {
        builder.and_where(fragment);
    }
    builder.order_by(META_ID);

    let joins = builder.join_count();
    let wheres = builder.where_count();
    let compiled = builder.build();
    debug!(
        components = components.len(),
        joins,
        wheres,
        params = compiled.params.len(),
        "compiled search query"
    );
    compiled
}
