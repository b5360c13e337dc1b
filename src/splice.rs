//! Text splicer - rewrites one segment of a raw line in place

/// Replace the text between `start_keyword` and `end_keyword`
///
/// Both keywords are matched case-insensitively as whole words. Without an
/// `end_keyword` after the start, the replacement runs to the end of the
/// line. Without a `start_keyword`, `raw` comes back unchanged.
///
/// ```
/// use entry_parser::replace_segment;
///
/// let line = replace_segment("30 cement @100 from site A carting @50 truck", "from", "carting", "Depot B");
/// assert_eq!(line, "30 cement @100 from Depot B carting @50 truck");
/// ```
pub fn replace_segment(
    raw: &str,
    start_keyword: &str,
    end_keyword: &str,
    replacement: &str,
) -> String {
    let Some(start) = find_word(raw, start_keyword, 0) else {
        return raw.to_string();
    };
    let after_start = start + start_keyword.len();
    let replacement = replacement.trim();

    match (find_word(raw, end_keyword, after_start), replacement.is_empty()) {
        (Some(end), false) => format!("{} {} {}", &raw[..after_start], replacement, &raw[end..]),
        (Some(end), true) => format!("{} {}", &raw[..after_start], &raw[end..]),
        (None, false) => format!("{} {}", &raw[..after_start], replacement),
        (None, true) => raw[..after_start].to_string(),
    }
}

/// Replace the byte range `start..end` of `raw`
pub(crate) fn splice(raw: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(raw.len() + replacement.len());
    out.push_str(&raw[..start]);
    out.push_str(replacement);
    out.push_str(&raw[end..]);
    out
}

/// Byte offset of the first whole-word, ASCII case-insensitive `word` at or after `from`
fn find_word(haystack: &str, word: &str, from: usize) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    let first_alnum = word.chars().next().is_some_and(char::is_alphanumeric);
    let last_alnum = word.chars().last().is_some_and(char::is_alphanumeric);

    haystack
        .char_indices()
        .map(|(i, _)| i)
        .filter(|&i| i >= from)
        .find(|&i| {
            let end = i + word.len();
            let Some(candidate) = haystack.get(i..end) else {
                return false;
            };
            if !candidate.eq_ignore_ascii_case(word) {
                return false;
            }
            let before_ok = !first_alnum
                || haystack[..i].chars().next_back().map_or(true, |c| !c.is_alphanumeric());
            let after_ok = !last_alnum
                || haystack[end..].chars().next().map_or(true, |c| !c.is_alphanumeric());
            before_ok && after_ok
        })
}
