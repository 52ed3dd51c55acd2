//! HTML helpers for Telegram's HTML parse mode.
//!
//! Lengths are counted in `char`s, which matches Telegram's limits for
//! everything outside the astral planes.

use std::fmt::Write as _;

/// Longest text message the transport accepts.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Longest photo caption the transport accepts.
pub const MAX_CAPTION_LEN: usize = 1024;

/// Escape the three characters Telegram's HTML mode treats specially.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// The first `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Like [`truncate_chars`] but ends with `…` when something was cut.
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = truncate_chars(s, max - 1).trim_end().to_string();
    out.push('…');
    out
}

/// A clickable mention of a user.
pub fn mention_html(user_id: i64, display_name: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<a href=\"tg://user?id={user_id}\">{}</a>",
        escape_html(display_name)
    );
    out
}

/// Split `text` into chunks of at most `limit` characters.
///
/// Splits happen on line boundaries; a single line longer than `limit` is
/// hard-split. Empty input yields no chunks.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if current.is_empty() {
            line_len
        } else {
            line_len + 1
        };

        if current_len + needed <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            current_len += needed;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        let mut rest = line;
        while rest.chars().count() > limit {
            let head = truncate_chars(rest, limit);
            chunks.push(head.to_string());
            rest = &rest[head.len()..];
        }
        current.push_str(rest);
        current_len = rest.chars().count();
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
