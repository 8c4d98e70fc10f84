//! Update-or-insert of `key=value` pairs in a raw query string.
//!
//! The uri is never parsed into a structured object. A pair is located by scanning for `?` or `&`
//! followed by the key (compared case-insensitively) and a `=`. The pair's value runs up to the
//! next `&` or the end of the input. Values are written as given, no percent-encoding is applied.

/// Byte range of an existing `key=value` pair, excluding the introducing `?`/`&` and the
/// terminating `&`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairSpan {
    start: usize,
    end: usize,
}

/// Sets `key` to `value` in the query string of `uri`.
///
/// - A `None` value leaves `uri` untouched.
/// - The first existing pair for `key` is replaced in place. The characters surrounding it are kept.
/// - Otherwise `key=value` is appended, separated by `?` if `uri` has no `?` yet, `&` otherwise.
///
/// ```
/// use leptos_query_sync::query::upsert;
///
/// assert_eq!(upsert("", "x", Some("5")), "?x=5");
/// assert_eq!(upsert("?x=5", "x", Some("7")), "?x=7");
/// assert_eq!(upsert("?a=1", "b", Some("2")), "?a=1&b=2");
/// assert_eq!(upsert("?a=1&b=2", "a", None), "?a=1&b=2");
/// ```
#[must_use]
pub fn upsert(uri: &str, key: &str, value: Option<&str>) -> String {
    let Some(value) = value else {
        return uri.to_owned();
    };

    let mut out = String::with_capacity(uri.len() + key.len() + value.len() + 2);
    match find_pair(uri, key) {
        Some(PairSpan { start, end }) => {
            out.push_str(&uri[..start]);
            push_pair(&mut out, key, value);
            out.push_str(&uri[end..]);
        }
        None => {
            out.push_str(uri);
            out.push(if uri.contains('?') { '&' } else { '?' });
            push_pair(&mut out, key, value);
        }
    }
    out
}

/// Folds [`upsert`] over `pairs`, left to right, starting from `uri`.
///
/// Pairs with a `None` value are skipped.
#[must_use]
pub fn upsert_all<K, V>(uri: &str, pairs: impl IntoIterator<Item = (K, Option<V>)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs.into_iter().fold(uri.to_owned(), |acc, (key, value)| {
        let value: Option<&str> = value.as_ref().map(|it| it.as_ref());
        upsert(&acc, key.as_ref(), value)
    })
}

/// Returns the current value of `key` in `uri`, using the same matching rules as [`upsert`].
#[must_use]
pub fn get<'a>(uri: &'a str, key: &str) -> Option<&'a str> {
    find_pair(uri, key).map(|PairSpan { start, end }| {
        let pair = &uri[start..end];
        match pair.find('=') {
            Some(eq) => &pair[eq + 1..],
            None => "",
        }
    })
}

/// Chainable upsert on owned strings.
pub trait QueryStringExt {
    /// Sets `key` to `value`, see [`upsert`].
    #[must_use]
    fn upsert_param(self, key: impl AsRef<str>, value: Option<impl AsRef<str>>) -> Self;
}

impl QueryStringExt for String {
    fn upsert_param(self, key: impl AsRef<str>, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(value) => upsert(&self, key.as_ref(), Some(value.as_ref())),
            None => self,
        }
    }
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push('=');
    out.push_str(value);
}

fn find_pair(uri: &str, key: &str) -> Option<PairSpan> {
    uri.char_indices()
        .filter(|(_, c)| matches!(c, '?' | '&'))
        .find_map(|(idx, _)| {
            let start = idx + 1;
            let after_key = strip_prefix_ignore_case(&uri[start..], key)?;
            let value = after_key.strip_prefix('=')?;
            let value_start = uri.len() - value.len();
            // A value may not span a line break, matching `.` semantics.
            match value.find(|c: char| c == '&' || is_line_terminator(c)) {
                Some(pos) if value[pos..].starts_with('&') => Some(PairSpan {
                    start,
                    end: value_start + pos,
                }),
                Some(_) => None,
                None => Some(PairSpan {
                    start,
                    end: uri.len(),
                }),
            }
        })
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = s.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
    }
    Some(&s[chars.offset()..])
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || canonicalize(a) == canonicalize(b)
}

/// Simple uppercase mapping of `c`. Multi-char expansions and non-ASCII to ASCII mappings keep
/// `c` itself, so `ß` never matches `SS` and the Kelvin sign never matches `k`.
fn canonicalize(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if c.is_ascii() || !u.is_ascii() => u,
        _ => c,
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
