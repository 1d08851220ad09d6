// src/core/sanitize.rs

/// Line `n` (0-based) of a multi-line cell text, as rendered.
pub fn nth_line(s: &str, n: usize) -> Option<&str> {
    s.lines().nth(n)
}

/// First whitespace-delimited token, e.g. `"123.45 km"` → `"123.45"`.
pub fn first_token(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

/// Make a `<date>_<site>` stem safe to use as a single path component.
/// Only separators and control characters are replaced; the rest is kept verbatim.
pub fn sanitize_file_stem(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let out = out.trim().to_string();
    if out.is_empty() { s!("event") } else { out }
}
