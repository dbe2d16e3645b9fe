// src/core/sanitize.rs

/// Collapse whitespace runs (including `&nbsp;`) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Trim surrounding whitespace and non-breaking spaces; inner text untouched.
pub fn trim_cell(s: &str) -> String {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}').to_string()
}

/// "Obec: Benešov" → Some("Benešov") for label "Obec:".
/// The label is a fixed-length prefix; anything not starting with it yields None.
pub fn strip_label(text: &str, label: &str) -> Option<String> {
    let t = text.trim_start();
    t.strip_prefix(label).map(normalize_ws)
}
