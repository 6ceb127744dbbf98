/// Deterministic, backend-independent text width estimate in pixels.
///
/// Used for tooltip boxes, legend rows and axis bands before any backend is
/// involved, so SVG and Cairo output share one layout.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' | '|' | 'i' | 'l' | 'j' => 0.30,
            '-' | '+' | '%' | '(' | ')' => 0.42,
            ' ' => 0.33,
            'A'..='Z' | 'm' | 'w' => 0.68,
            _ => 0.56,
        }
    });
    (units * font_size_px).max(font_size_px * 0.5)
}

/// Line box height for a font size, matching a 1.4 line-height.
#[must_use]
pub fn line_height_px(font_size_px: f64) -> f64 {
    font_size_px * 1.4
}

/// Greedy word wrap against the width estimate. Words wider than
/// `max_width_px` get a line of their own.
#[must_use]
pub fn wrap_text(text: &str, font_size_px: f64, max_width_px: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if estimate_text_width_px(&candidate, font_size_px) <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
