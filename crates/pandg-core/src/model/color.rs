// ── Tag colors ──
//
// PAN-OS stores tag colors as opaque codes (`color1` .. `color16`). The
// table below is fixed; codes outside it are shown as-is.

use std::fmt;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The sixteen predefined tag colors, keyed by their configuration code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
pub enum TagColor {
    #[strum(serialize = "color1")]
    Red,
    #[strum(serialize = "color2")]
    Green,
    #[strum(serialize = "color3")]
    Blue,
    #[strum(serialize = "color4")]
    Yellow,
    #[strum(serialize = "color5")]
    Copper,
    #[strum(serialize = "color6")]
    Orange,
    #[strum(serialize = "color7")]
    Purple,
    #[strum(serialize = "color8")]
    Gray,
    #[strum(serialize = "color9")]
    LightGreen,
    #[strum(serialize = "color10")]
    Cyan,
    #[strum(serialize = "color11")]
    LightGray,
    #[strum(serialize = "color12")]
    BlueGray,
    #[strum(serialize = "color13")]
    Lime,
    #[strum(serialize = "color14")]
    Black,
    #[strum(serialize = "color15")]
    Gold,
    #[strum(serialize = "color16")]
    Brown,
}

impl TagColor {
    /// Every color in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Look up a configuration code. Case-sensitive, like the device.
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// The configuration code (`color1` ..).
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Copper => "copper",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Gray => "gray",
            Self::LightGreen => "light green",
            Self::Cyan => "cyan",
            Self::LightGray => "light gray",
            Self::BlueGray => "blue gray",
            Self::Lime => "lime",
            Self::Black => "black",
            Self::Gold => "gold",
            Self::Brown => "brown",
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a color code, or the code itself when unknown.
pub fn resolve_color_label(code: &str) -> &str {
    TagColor::from_code(code).map_or(code, |c| c.label())
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn table_covers_sixteen_codes_in_order() {
        let codes: Vec<&str> = TagColor::iter().map(TagColor::code).collect();
        let expected: Vec<String> = (1..=16).map(|n| format!("color{n}")).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn known_codes_resolve_to_labels() {
        assert_eq!(resolve_color_label("color1"), "red");
        assert_eq!(resolve_color_label("color3"), "blue");
        assert_eq!(resolve_color_label("color9"), "light green");
        assert_eq!(resolve_color_label("color12"), "blue gray");
        assert_eq!(resolve_color_label("color16"), "brown");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(resolve_color_label("colorX"), "colorX");
        assert_eq!(resolve_color_label("color17"), "color17");
        assert_eq!(resolve_color_label("Color3"), "Color3");
        assert_eq!(resolve_color_label(""), "");
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(TagColor::LightGray.to_string(), "light gray");
        assert_eq!(TagColor::from_code("color5"), Some(TagColor::Copper));
    }
}
