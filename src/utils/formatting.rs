//! Formatting utilities used for CLI and HTML outputs.

pub const ELLIPSIS: char = '…';

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// First `max` characters of `text`, and whether anything was cut.
pub fn snippet(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}

/// Like [`snippet`], with an ellipsis appended when the text was cut.
pub fn snippet_with_ellipsis(text: &str, max: usize) -> String {
    let (head, cut) = snippet(text, max);
    if cut {
        format!("{head}{ELLIPSIS}")
    } else {
        head.to_string()
    }
}
