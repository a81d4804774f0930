//! Line fitting for card text: word wrapping and ellipsis truncation.
//!
//! Helpers take a `measure` closure returning the rendered pixel width of a
//! string so they work with any font.

/// Suffix appended to text that was cut short.
pub const ELLIPSIS: &str = "...";

/// Greedy word wrap into at most `max_lines` lines no wider than `max_width`.
///
/// Words wider than the column are broken at character boundaries. When the
/// text does not fit in `max_lines`, the last kept line ends with `ELLIPSIS`.
/// Runs of spaces collapse to one.
pub fn wrap_text<F>(measure: F, text: &str, max_width: u32, max_lines: usize) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    if max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure(word) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = break_word(&measure, word, max_width);
            // The final piece may still take following words.
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(&measure, last, max_width);
        }
    }
    lines
}

/// Cut `text` to fit `max_width`, ending with `ELLIPSIS` if anything was removed.
pub fn truncate_to_width<F>(measure: F, text: &str, max_width: u32) -> String
where
    F: Fn(&str) -> u32,
{
    if measure(text) <= max_width {
        return text.to_string();
    }
    with_ellipsis(&measure, text, max_width)
}

/// Append `ELLIPSIS` to the longest prefix of `text` that still fits.
///
/// Widths grow with prefix length, so the cut point is binary searched over
/// character counts.
fn with_ellipsis<F>(measure: &F, text: &str, max_width: u32) -> String
where
    F: Fn(&str) -> u32,
{
    let text = text.trim_end();
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let candidate =
        |chars: usize| format!("{}{}", text[..boundaries[chars]].trim_end(), ELLIPSIS);

    if measure(&candidate(0)) > max_width {
        return String::new();
    }
    // Invariant: `lo` chars fit, more than `hi` chars do not.
    let (mut lo, mut hi) = (0, boundaries.len() - 1);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if measure(&candidate(mid)) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    candidate(lo)
}

/// Split one over-wide word into column-width pieces. Each piece holds at
/// least one character so progress is always made.
fn break_word<F>(measure: &F, word: &str, max_width: u32) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if measure(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
