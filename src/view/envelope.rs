//! Envelope handling - the `<tag-helper ...>` root wrapping raw templates
//!
//! Component templates are authored inside a root element so they are valid
//! standalone HTML. Composition places `<style>`/`<script>` blocks relative
//! to it and finally strips it, leaving only the inner markup.

/// Opening tag prefix of the template root (attributes may follow)
pub const ENVELOPE_OPEN: &str = "<tag-helper";
/// Closing tag of the template root
pub const ENVELOPE_CLOSE: &str = "</tag-helper>";

/// ASCII case-insensitive `find`, starting at byte offset `from`
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || from > hay.len() || hay.len() - from < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Byte offset just past the `>` closing the envelope's opening tag
fn open_tag_end(html: &str, open: &str) -> Option<usize> {
    let start = find_ci(html, open, 0)?;
    html[start..].find('>').map(|gt| start + gt + 1)
}

/// Everything between the envelope's opening and closing tags, trimmed.
/// Returns the input unchanged when the envelope cannot be located.
pub fn extract_inner(html: &str, open: &str, close: &str) -> String {
    let Some(content_start) = open_tag_end(html, open) else {
        return html.to_string();
    };
    let Some(content_end) = find_ci(html, close, content_start) else {
        return html.to_string();
    };
    html[content_start..content_end].trim().to_string()
}

/// Insert `block` right after the envelope's opening tag, or prepend it
pub fn insert_after_open(html: &str, open: &str, block: &str) -> String {
    match open_tag_end(html, open) {
        Some(at) => format!("{}\n{}{}", &html[..at], block, &html[at..]),
        None => format!("{}\n{}", block, html),
    }
}

/// Insert `block` right before the envelope's closing tag, or append it
pub fn insert_before_close(html: &str, close: &str, block: &str) -> String {
    match find_ci(html, close, 0) {
        Some(at) => format!("{}{}\n{}", &html[..at], block, &html[at..]),
        None => format!("{}\n{}", html, block),
    }
}
