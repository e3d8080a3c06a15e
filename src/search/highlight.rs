//! HTML escaping and query highlighting for result snippets.

use regex::RegexBuilder;
use std::borrow::Cow;

/// Opening tag wrapped around each highlighted match.
pub const MARK_OPEN: &str = "<mark>";
/// Closing tag wrapped around each highlighted match.
pub const MARK_CLOSE: &str = "</mark>";

/// Escapes `&`, `<`, `>`, `"` and `'` for safe inclusion in HTML.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escapes `text` and wraps every case-insensitive occurrence of `query` in
/// `<mark>` tags.
///
/// The query is matched literally against the raw text; matched and unmatched
/// segments are escaped separately, so marks never split an entity. An empty
/// query returns the escaped text unchanged.
pub fn highlight(text: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return escape_html(text).into_owned();
    }

    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Failed to build highlight pattern for {:?}: {}", query, e);
            return escape_html(text).into_owned();
        }
    };

    let mut output = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        output.push_str(&escape_html(&text[last..m.start()]));
        output.push_str(MARK_OPEN);
        output.push_str(&escape_html(m.as_str()));
        output.push_str(MARK_CLOSE);
        last = m.end();
    }
    output.push_str(&escape_html(&text[last..]));
    output
}
