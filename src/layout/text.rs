/// Greedily wraps `text` into lines of at most `max_chars` characters.
///
/// While the remaining text is too long, it is broken at the last space among its
/// first `max_chars` characters. If there is no such space the text is broken at
/// exactly `max_chars`, splitting the word. Whitespace at the start of the input
/// and of each continuation is dropped. Lengths are counted in `char`s, so
/// Cyrillic and Latin text wrap alike.
///
/// Empty input gives no lines. A `max_chars` of 0 is treated as 1.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut rest: &str = text.trim_start();

    while rest.chars().count() > max_chars {
        // byte offset just past the first `max_chars` chars
        let window_end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let window = &rest[..window_end];

        // `rest` never starts with whitespace, so a found space is always past index 0
        let split = match window.rfind(' ') {
            Some(idx) => idx,
            None => window_end,
        };
        lines.push(window[..split].to_string());
        rest = rest[split..].trim_start();
    }

    if !rest.is_empty() {
        lines.push(rest.to_string());
    }

    lines
}
