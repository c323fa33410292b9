//! # Palette
//!
//! The fixed colour palette and pen states accepted by the language.
//! Names are matched case-sensitively, exactly as typed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// Drawing colour of a turtle.
///
/// Every name is also a CSS/SVG colour keyword, so surfaces can use
/// [`Colour::as_str`] directly as a stroke value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Colour {
    Azure,
    Beige,
    #[default]
    Black,
    Blue,
    Brown,
    Chartreuse,
    Chocolate,
    Coral,
    Cyan,
    Firebrick,
    Gainsboro,
    Gold,
    Gray,
    Green,
    Indigo,
    Lavender,
    Lime,
    Magenta,
    Maroon,
    Olive,
    Orange,
    Pink,
    Plum,
    Purple,
    Red,
    Salmon,
    Tan,
    Thistle,
    Tomato,
    Violet,
    White,
    Yellow,
}

impl Colour {
    /// Parse a palette name. Returns `None` for anything outside the palette.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Palette name as typed in a program
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// All palette entries, in alphabetical order
    pub fn all() -> impl Iterator<Item = Colour> {
        Colour::iter()
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a turtle's moves leave a line behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PenState {
    Down,
    Up,
}

impl PenState {
    /// Parse `up` or `down`
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn from_down(down: bool) -> Self {
        if down {
            PenState::Down
        } else {
            PenState::Up
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, PenState::Down)
    }

    /// Upper-case label used in status reports
    pub fn label(&self) -> &'static str {
        match self {
            PenState::Down => "DOWN",
            PenState::Up => "UP",
        }
    }
}

impl std::fmt::Display for PenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_32_colours() {
        assert_eq!(Colour::all().count(), 32);
        assert_eq!(Colour::all().next(), Some(Colour::Azure));
        assert_eq!(Colour::all().last(), Some(Colour::Yellow));
    }

    #[test]
    fn test_colour_parse_is_case_sensitive() {
        assert_eq!(Colour::from_str("red"), Some(Colour::Red));
        assert_eq!(Colour::from_str("firebrick"), Some(Colour::Firebrick));
        assert_eq!(Colour::from_str("Red"), None);
        assert_eq!(Colour::from_str("teal"), None);
        assert_eq!(Colour::from_str(""), None);
    }

    #[test]
    fn test_colour_default_and_display() {
        assert_eq!(Colour::default(), Colour::Black);
        assert_eq!(Colour::Chartreuse.to_string(), "chartreuse");
        assert_eq!(serde_json::to_string(&Colour::Gainsboro).unwrap(), "\"gainsboro\"");
    }

    #[test]
    fn test_pen_state() {
        assert_eq!(PenState::from_str("up"), Some(PenState::Up));
        assert_eq!(PenState::from_str("down"), Some(PenState::Down));
        assert_eq!(PenState::from_str("UP"), None);
        assert!(PenState::from_down(true).is_down());
        assert_eq!(PenState::Up.label(), "UP");
        assert_eq!(PenState::Down.to_string(), "down");
    }
}
