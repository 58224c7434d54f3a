use leitner_lib::flashcards::GRADUATED_BOX;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when color output is enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Color used for a box in listings
pub fn box_color(box_number: u8) -> &'static str {
    match box_number {
        GRADUATED_BOX => Color::GREEN,
        1 => Color::RED,
        2 => Color::YELLOW,
        3 => Color::BLUE,
        _ => Color::GRAY,
    }
}

pub fn box_label(box_number: u8) -> String {
    if box_number == GRADUATED_BOX {
        "graduated".to_string()
    } else {
        format!("box {}", box_number)
    }
}

/// Cut text to `width` characters, ending in "..." when shortened
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
