//! HTML text helpers shared by the normalizer fallbacks and the card renderer.

use v_htmlescape::escape;

/// Escapes `& < > " '` to their entity forms. Apply to every value sourced
/// from a response, never to markup this crate emits.
///
/// `v_htmlescape` also escapes `/` and writes `'` as `&#x27;`; both are
/// mapped back. Input `&` is always `&amp;` by then, so these entities can
/// only come from the escaper.
pub fn escape_html(raw: &str) -> String {
    escape(raw)
        .to_string()
        .replace("&#x2f;", "/")
        .replace("&#x2F;", "/")
        .replace("&#x27;", "&#39;")
}

/// Escapes and turns line breaks into `<br>`.
pub fn text_to_html(raw: &str) -> String {
    escape_html(raw)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}
