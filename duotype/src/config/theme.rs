use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::QueryOptions;

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub cursor: CursorTheme,
}

/// Foreground color of the terminal, or its default color if the terminal doesn't say
fn terminal_foreground() -> Color {
    terminal_colorsaurus::color_palette(QueryOptions::default())
        .map(|palette| {
            let (red, green, blue) = palette.foreground.scale_to_8bit();
            Color::Rgb(red, green, blue)
        })
        .unwrap_or(Color::Reset)
}

/// The cell at the cursor
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorTheme {
    pub background: Color,
    pub foreground: Color,
}

impl Default for CursorTheme {
    fn default() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
        }
    }
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    /// Not typed yet
    pub untyped: Color,
    /// Typed and matching the reference
    pub correct: Color,
    /// Typed and not matching the reference
    pub incorrect: Color,
    /// Placeholders, hints and disabled controls
    pub muted: Color,
    /// Focused elements and enabled controls
    pub highlight: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            untyped: terminal_foreground(),
            correct: Color::Green,
            incorrect: Color::Red,
            muted: Color::DarkGray,
            highlight: Color::Blue,
        }
    }
}
