//! Background themes
//!
//! The page background is the only thing the theme changes; particles and
//! connection lines keep their indigo hue in both themes.

use super::color::Rgba;

/// Color scheme of the window background
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Color the surface is cleared to before shapes are drawn
    pub fn background(self) -> Rgba {
        match self {
            Theme::Dark => Rgba::from_rgb8(15, 23, 42),
            Theme::Light => Rgba::from_rgb8(248, 250, 252),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}
