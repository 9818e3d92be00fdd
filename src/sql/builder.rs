//! Assembles query text from fragments that each own their parameters, so
//! placeholder order and parameter order cannot drift apart.

use serde::Serialize;

/// SQL text with `?` placeholders and the values bound to them, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub text: String,
    pub params: Vec<String>,
}

impl CompiledQuery {
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    sql: String,
    params: Vec<String>,
}

impl Fragment {
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        let sql = sql.into();
        debug_assert_eq!(
            count_placeholders(&sql),
            params.len(),
            "placeholder/parameter mismatch in {sql}"
        );
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Wraps the fragment's text, keeping its parameters.
    pub fn map_sql(self, f: impl FnOnce(&str) -> String) -> Self {
        Self::new(f(&self.sql), self.params)
    }
}

#[derive(Debug)]
struct Join {
    fragment: Fragment,
    column: &'static str,
    target: &'static str,
}

#[derive(Debug)]
pub struct QueryBuilder {
    select: String,
    joins: Vec<Join>,
    wheres: Vec<Fragment>,
    order_by: Option<&'static str>,
}

impl QueryBuilder {
    pub fn select(select: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            joins: Vec::new(),
            wheres: Vec::new(),
            order_by: None,
        }
    }

    /// `INNER JOIN <fragment> iN ON iN.<column> = <target>`; aliases are numbered in call order.
    pub fn inner_join(&mut self, fragment: Fragment, column: &'static str, target: &'static str) {
        self.joins.push(Join {
            fragment,
            column,
            target,
        });
    }

    /// Predicates are AND'd in call order.
    pub fn and_where(&mut self, fragment: Fragment) {
        self.wheres.push(fragment);
    }

    pub fn order_by(&mut self, column: &'static str) {
        self.order_by = Some(column);
    }

    pub fn join_count(&self) -> usize {
        self.joins.len()
    }

    pub fn where_count(&self) -> usize {
        self.wheres.len()
    }

    pub fn build(self) -> CompiledQuery {
        let mut text = self.select;
        let mut params = Vec::new();

        for (index, join) in self.joins.into_iter().enumerate() {
            text.push_str(&format!(
                "\nINNER JOIN {sql} i{index}\nON i{index}.{column} = {target}",
                sql = join.fragment.sql,
                column = join.column,
                target = join.target,
            ));
            params.extend(join.fragment.params);
        }

        if !self.wheres.is_empty() {
            let mut clauses = Vec::with_capacity(self.wheres.len());
            for fragment in self.wheres {
                clauses.push(fragment.sql);
                params.extend(fragment.params);
            }
            text.push_str("\nWHERE\n");
            text.push_str(&clauses.join("\nAND\n"));
        }

        if let Some(column) = self.order_by {
            text.push_str("\nORDER BY ");
            text.push_str(column);
        }

        CompiledQuery { text, params }
    }
}

fn count_placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

#[cfg(test)]
mod tests {
    use super::{Fragment, QueryBuilder};

    #[test]
    fn bare_select_has_no_join_or_where() {
        let mut builder = QueryBuilder::select("SELECT id FROM t");
        builder.order_by("id");
        let q = builder.build();
        assert_eq!(q.text, "SELECT id FROM t\nORDER BY id");
        assert!(q.params.is_empty());
    }

    #[test]
    fn params_follow_join_then_where_order() {
        let mut builder = QueryBuilder::select("SELECT t.id FROM t");
        builder.and_where(Fragment::new("t.a = ?", vec!["w1".into()]));
        builder.inner_join(
            Fragment::new("(SELECT id AS mid FROM u WHERE x = ? OR y = ?)", vec!["j1".into(), "j2".into()]),
            "mid",
            "t.id",
        );
        builder.inner_join(Fragment::new("(SELECT id AS mid FROM v WHERE z = ?)", vec!["j3".into()]), "mid", "t.id");
        builder.and_where(Fragment::new("t.b = ?", vec!["w2".into()]));
        assert_eq!(builder.join_count(), 2);
        assert_eq!(builder.where_count(), 2);

        let q = builder.build();
        assert_eq!(q.params, vec!["j1", "j2", "j3", "w1", "w2"]);
        assert_eq!(q.placeholder_count(), q.params.len());
        assert!(q.text.contains("i0\nON i0.mid = t.id"));
        assert!(q.text.contains("i1\nON i1.mid = t.id"));
        assert!(q.text.ends_with("WHERE\nt.a = ?\nAND\nt.b = ?"));
    }

    #[test]
    fn map_sql_keeps_params() {
        let f = Fragment::new("x LIKE ?", vec!["p".into()]).map_sql(|sql| format!("NOT ({sql})"));
        assert_eq!(f.sql(), "NOT (x LIKE ?)");
        assert_eq!(f.params(), ["p".to_string()]);
    }
}
