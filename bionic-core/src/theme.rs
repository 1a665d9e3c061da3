//! Theme resolver — fixed (theme, box) → colors table.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::brand::{BrandConstants, Color, PaletteColor};
use crate::config::BoxIndex;

/// Color theme of the headline pair.
///
/// Unknown names resolve to [`Theme::Primary`] instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Primary,
    Alt,
    Blue,
    Grey,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Primary, Theme::Alt, Theme::Blue, Theme::Grey];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Alt => "alt",
            Self::Blue => "blue",
            Self::Grey => "grey",
        }
    }

    /// Palette entries `(background, text)` for a box.
    pub fn palette_pair(&self, index: BoxIndex) -> (PaletteColor, PaletteColor) {
        use PaletteColor::*;
        match (self, index) {
            (Self::Primary, BoxIndex::One) => (Orange, Navy),
            (Self::Primary, BoxIndex::Two) => (Navy, White),
            (Self::Alt, BoxIndex::One) => (Navy, White),
            (Self::Alt, BoxIndex::Two) => (Orange, Navy),
            (Self::Blue, BoxIndex::One) => (Blue, White),
            (Self::Blue, BoxIndex::Two) => (Navy, White),
            (Self::Grey, BoxIndex::One) => (Grey, Navy),
            (Self::Grey, BoxIndex::Two) => (White, Navy),
        }
    }
}

impl FromStr for Theme {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match Self::ALL.into_iter().find(|t| t.name() == wanted) {
            Some(theme) => Ok(theme),
            None => {
                log::warn!("Unknown theme '{s}', falling back to primary");
                Ok(Self::Primary)
            }
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(theme) => theme,
            Err(never) => match never {},
        }
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved colors of one box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxColors {
    pub background: Color,
    pub text: Color,
}

/// Look up the colors of a box under a theme.
pub fn resolve(brand: &BrandConstants, theme: Theme, index: BoxIndex) -> BoxColors {
    let (background, text) = theme.palette_pair(index);
    BoxColors {
        background: brand.color(background),
        text: brand.color(text),
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_pair(theme: Theme, index: BoxIndex) -> (String, String) {
        let colors = resolve(&BrandConstants::default(), theme, index);
        (colors.background.to_hex(), colors.text.to_hex())
    }

    #[test]
    fn test_primary_theme() {
        assert_eq!(
            hex_pair(Theme::Primary, BoxIndex::One),
            ("#ff6741".into(), "#182865".into())
        );
        assert_eq!(
            hex_pair(Theme::Primary, BoxIndex::Two),
            ("#182865".into(), "#ffffff".into())
        );
    }

    #[test]
    fn test_alt_theme_swaps_primary() {
        assert_eq!(
            hex_pair(Theme::Alt, BoxIndex::One),
            hex_pair(Theme::Primary, BoxIndex::Two)
        );
        assert_eq!(
            hex_pair(Theme::Alt, BoxIndex::Two),
            hex_pair(Theme::Primary, BoxIndex::One)
        );
    }

    #[test]
    fn test_blue_and_grey_themes() {
        assert_eq!(
            hex_pair(Theme::Blue, BoxIndex::One),
            ("#0a6bff".into(), "#ffffff".into())
        );
        assert_eq!(
            hex_pair(Theme::Grey, BoxIndex::One),
            ("#f3f3f3".into(), "#182865".into())
        );
        assert_eq!(
            hex_pair(Theme::Grey, BoxIndex::Two),
            ("#ffffff".into(), "#182865".into())
        );
    }

    #[test]
    fn test_unknown_theme_falls_back_to_primary() {
        assert_eq!("sunset".parse::<Theme>().unwrap(), Theme::Primary);
        assert_eq!(Theme::from(String::from("ALT")), Theme::Alt);
        let parsed: Theme = serde_json::from_str("\"neon\"").unwrap();
        assert_eq!(parsed, Theme::Primary);
    }
}
