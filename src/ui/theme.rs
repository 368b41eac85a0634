//! Color theme for the renderer.
//!
//! One immutable value, constructed at startup and passed into every draw
//! call.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(255, 215, 0),
            accent: Color::Rgb(255, 193, 7),
            success: Color::Rgb(129, 199, 132),
            error: Color::Rgb(229, 115, 115),
            text: Color::Rgb(224, 224, 224),
            dim: Color::Rgb(158, 158, 158),
            border: Color::Rgb(66, 66, 66),
        }
    }
}
