// file: src/extractor/context.rs
// description: surrounding-text windows with safe UTF-8 handling for emoji and multi-byte characters

/// Returns up to `window` bytes either side of `start..end`, snapped outward
/// to char boundaries and collapsed onto a single line.
pub fn surrounding(text: &str, start: usize, end: usize, window: usize) -> String {
    let context_start = char_boundary_before(text, start.saturating_sub(window));
    let context_end = char_boundary_after(text, end.saturating_add(window).min(text.len()));

    text[context_start..context_end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn char_boundary_before(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

pub fn char_boundary_after(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
