//! Color themes for the terminal UI.
//!
//! A theme names the colors for each UI role. Themes are serializable so a
//! custom one can ship in a configuration file later. The default is the
//! green-phosphor "classified" look; an amber preset is included for CRT
//! purists.

use serde::{Deserialize, Serialize};

/// A named color, resolved to the terminal palette at render time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Magenta,
    White,
    DarkGray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Resolve to the ratatui color type.
    pub fn to_tui(self) -> ratatui::style::Color {
        use ratatui::style::Color as Tui;
        match self {
            Color::Default => Tui::Reset,
            Color::Black => Tui::Black,
            Color::Red => Tui::Red,
            Color::Green => Tui::Green,
            Color::Yellow => Tui::Yellow,
            Color::Blue => Tui::Blue,
            Color::Cyan => Tui::Cyan,
            Color::Magenta => Tui::Magenta,
            Color::White => Tui::White,
            Color::DarkGray => Tui::DarkGray,
            Color::BrightRed => Tui::LightRed,
            Color::BrightGreen => Tui::LightGreen,
            Color::BrightYellow => Tui::LightYellow,
            Color::Rgb(r, g, b) => Tui::Rgb(r, g, b),
        }
    }
}

/// Colors for each role the views use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    /// Body text.
    pub text: Color,
    /// Titles, the focused cursor row, key hints.
    pub accent: Color,
    /// De-emphasized text (labels, sources, disabled columns).
    pub dim: Color,
    /// Error and warning messages.
    pub alert: Color,
    /// Badges (LOAD / KIT / UNDER CONSTRUCTION).
    pub badge: Color,
}

impl Theme {
    /// The green-phosphor default.
    pub fn classified() -> Theme {
        Theme {
            text: Color::Green,
            accent: Color::BrightGreen,
            dim: Color::DarkGray,
            alert: Color::BrightRed,
            badge: Color::BrightYellow,
        }
    }

    /// Amber CRT variant.
    pub fn amber() -> Theme {
        Theme {
            text: Color::Rgb(255, 176, 0),
            accent: Color::Rgb(255, 208, 96),
            dim: Color::DarkGray,
            alert: Color::BrightRed,
            badge: Color::Rgb(255, 232, 160),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::classified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classified() {
        assert_eq!(Theme::default(), Theme::classified());
    }

    #[test]
    fn presets_differ() {
        assert_ne!(Theme::classified(), Theme::amber());
    }

    #[test]
    fn color_serde_round_trip() {
        let colors = [
            Color::Default,
            Color::Green,
            Color::BrightYellow,
            Color::Rgb(255, 176, 0),
        ];
        for color in colors {
            let json = serde_json::to_string(&color).unwrap();
            let back: Color = serde_json::from_str(&json).unwrap();
            assert_eq!(back, color);
        }
    }

    #[test]
    fn theme_serde_round_trip() {
        let theme = Theme::amber();
        let json = serde_json::to_string(&theme).unwrap();
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }

    #[test]
    fn rgb_resolves_to_rgb() {
        assert_eq!(
            Color::Rgb(1, 2, 3).to_tui(),
            ratatui::style::Color::Rgb(1, 2, 3)
        );
    }
}
