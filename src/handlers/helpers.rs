//! Small helpers shared by several handlers.

use std::borrow::Cow;

fn is_line_break(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\0')
}

/// Remove CR, LF and NUL from free text before it is relayed.
///
/// The framer only splits on LF, so a bare CR inside a trailing parameter
/// would otherwise reach the recipient and end the line early there.
pub fn strip_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains(is_line_break) {
        Cow::Owned(text.chars().filter(|c| !is_line_break(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Parse an optional part/quit reason message.
/// Returns None if the reason is empty or whitespace-only once line breaks
/// are removed.
pub fn parse_reason(reason: Option<&str>) -> Option<Cow<'_, str>> {
    match strip_line_breaks(reason?.trim()) {
        Cow::Borrowed(r) => (!r.is_empty()).then_some(Cow::Borrowed(r)),
        Cow::Owned(r) => {
            let r = r.trim();
            (!r.is_empty()).then(|| Cow::Owned(r.to_string()))
        }
    }
}
