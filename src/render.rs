//! # Render — Bounded Previews and Digit Palette
//!
//! Pure formatting for the console preview. Digits 2 through 8 each map to
//! one color of a fixed seven-entry palette; '0', '1', '9', the blank, and
//! anything else are left uncolored. The mapping depends only on the
//! character, never on its position.
//!
//! Previews are bounded by visible characters. Escape sequences are added
//! after truncation, so a 500-character preview shows 500 digits no matter
//! how many of them carry color.

/// Characters shown in the console preview.
pub const PREVIEW_CHARS: usize = 500;

/// Appended to a preview that was cut short.
pub const TRUNCATION_MARKER: &str = "...";

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Magenta,
    Cyan,
    White,
    Uncolored,
}

impl Color {
    /// Bright-foreground SGR sequence, or `None` for [`Color::Uncolored`].
    pub fn ansi_code(self) -> Option<&'static str> {
        match self {
            Color::Red => Some("\x1b[91m"),
            Color::Green => Some("\x1b[92m"),
            Color::Yellow => Some("\x1b[93m"),
            Color::Blue => Some("\x1b[94m"),
            Color::Magenta => Some("\x1b[95m"),
            Color::Cyan => Some("\x1b[96m"),
            Color::White => Some("\x1b[97m"),
            Color::Uncolored => None,
        }
    }
}

pub fn color_for(c: char) -> Color {
    match c {
        '2' => Color::Red,
        '3' => Color::Yellow,
        '4' => Color::Green,
        '5' => Color::Blue,
        '6' => Color::Magenta,
        '7' => Color::Cyan,
        '8' => Color::White,
        _ => Color::Uncolored,
    }
}

/// Pair every character of `text` with its palette color, in order.
pub fn colorize(text: &str) -> Vec<(char, Color)> {
    text.chars().map(|c| (c, color_for(c))).collect()
}

/// First `limit` characters of `text`, followed by [`TRUNCATION_MARKER`] if
/// anything was cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
            out.push_str(&text[..cut]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
        None => text.to_string(),
    }
}

/// Wrap each colored character in its escape sequence and a reset.
pub fn render_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (c, color) in colorize(text) {
        match color.ansi_code() {
            Some(code) => {
                out.push_str(code);
                out.push(c);
                out.push_str(RESET);
            }
            None => out.push(c),
        }
    }
    out
}

/// Bounded preview with palette escapes applied to the visible characters.
/// With `color == false` this is [`preview`].
pub fn colored_preview(text: &str, limit: usize, color: bool) -> String {
    let bounded = preview(text, limit);
    if !color {
        return bounded;
    }
    match bounded.strip_suffix(TRUNCATION_MARKER) {
        Some(body) if text.chars().count() > limit => {
            let mut out = render_ansi(body);
            out.push_str(TRUNCATION_MARKER);
            out
        }
        _ => render_ansi(&bounded),
    }
}
