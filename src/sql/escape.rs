/// Escape character paired with every generated `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Escapes `\`, `_` and `%` so `value` matches only itself under LIKE.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        push_like_escaped(&mut out, ch);
    }
    out
}

pub(crate) fn push_like_escaped(out: &mut String, ch: char) {
    if matches!(ch, '\\' | '_' | '%') {
        out.push(LIKE_ESCAPE);
    }
    out.push(ch);
}
