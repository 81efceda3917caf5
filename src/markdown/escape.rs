//! Markdown escaping utilities.

/// Escape characters that would otherwise start Markdown syntax.
///
/// `#` is only special at the start of a line and `!` only before `[`; both
/// are left alone elsewhere.
///
/// # Examples
///
/// ```
/// use tiptree::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("a*b*c"), "a\\*b\\*c");
/// assert_eq!(escape_markdown("x | y"), "x \\| y");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut chars = text.chars().peekable();
    let mut at_line_start = true;

    while let Some(c) = chars.next() {
        let escape = match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '|' | '<' | '>' | '~' | '$' => true,
            '#' => at_line_start,
            '!' => chars.peek() == Some(&'['),
            _ => false,
        };
        if escape {
            result.push('\\');
        }
        result.push(c);
        at_line_start = c == '\n';
    }

    result
}

/// Shortest fence (at least 3) longer than any run of `fence_char` in
/// `content`.
///
/// ```
/// use tiptree::markdown::calculate_fence_length;
///
/// assert_eq!(calculate_fence_length("x = 1", '`'), 3);
/// assert_eq!(calculate_fence_length("````", '`'), 5);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    let longest_run = content
        .split(|c: char| c != fence_char)
        .map(|run| run.chars().count())
        .max()
        .unwrap_or(0);

    longest_run.max(2) + 1
}
