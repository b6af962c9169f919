//! Colours for the light and dark themes.
use ratatui::style::{Color, Modifier, Style};

use crate::theme::Theme;

/// Styles used across the UI for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette
{
    /// Regular text and backgrounds
    pub base: Style,
    /// Secondary text: dates, borders, disabled controls
    pub muted: Style,
    /// Highlights: active filter, active page, selection
    pub accent: Style,
}

/// Dark text on a white background.
const LIGHT: Palette = Palette {
    base: Style::new().fg(Color::Black).bg(Color::White),
    muted: Style::new().fg(Color::DarkGray).bg(Color::White),
    accent: Style::new()
        .fg(Color::Blue)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD),
};

/// Light text on a black background.
const DARK: Palette = Palette {
    base: Style::new().fg(Color::Gray).bg(Color::Black),
    muted: Style::new().fg(Color::DarkGray).bg(Color::Black),
    accent: Style::new()
        .fg(Color::LightYellow)
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD),
};

impl Palette
{
    /// The palette for `theme`.
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self
    {
        match theme
        {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}
