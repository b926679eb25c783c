//! Typed CSS values.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Every declaration value is parsed into the [`Value`] sum type at
//! ingestion; nothing downstream ever re-interprets a raw string. Unknown
//! or unparseable values fall back to the raw keyword string, which layout
//! and painting simply ignore.

use serde::Serialize;

/// A typed CSS value.
///
/// The tagged union the whole engine dispatches on. The coercion ladder in
/// the parser decides which variant a raw declaration value becomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Raw keyword string — the fallback for anything not recognized.
    Keyword(String),
    /// Absolute length in pixels.
    ///
    /// `px` is the only unit the engine models.
    Length(f32),
    /// sRGB color.
    Color(Color),
    /// `display` property value.
    Display(Display),
    /// `flex-direction` property value.
    FlexDirection(FlexDirection),
    /// `justify-content` property value.
    Justify(Justify),
}

impl Value {
    /// The length in pixels, or `None` for non-length values.
    #[must_use]
    pub fn as_length(&self) -> Option<f32> {
        match self {
            Self::Length(px) => Some(*px),
            _ => None,
        }
    }

    /// The color, or `None` for non-color values.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
///
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// Parse the six-digit `#rrggbb` notation. Returns `None` when the
    /// shape is wrong (no `#`, not seven characters), so the caller can
    /// fall back to a keyword. A channel that is not valid hex parses as
    /// 0 rather than rejecting the whole color.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&digits[0..2], 16).unwrap_or(0),
            g: u8::from_str_radix(&digits[2..4], 16).unwrap_or(0),
            b: u8::from_str_radix(&digits[4..6], 16).unwrap_or(0),
            a: 255,
        })
    }

    /// Render as `#rrggbb` (alpha omitted when fully opaque).
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The display modes the layout engine distinguishes. Everything the
/// parser does not recognize as `flex` or `none` computes to `Block`;
/// an element with no `display` declaration at all generates an inline
/// box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Display {
    /// Block-level box; children stack vertically.
    Block,
    /// Inline box (laid out by the block rule in this engine).
    Inline,
    /// Flex container; children distribute along one axis.
    Flex,
    /// No box; the subtree is pruned at layout time.
    None,
}

/// [§ 5.1 flex-direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
///
/// Main-axis direction of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FlexDirection {
    /// Horizontal main axis (the default).
    Row,
    /// Vertical main axis.
    Column,
}

/// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Main-axis alignment of flex items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Justify {
    /// "Flex items are packed toward the start of the line."
    FlexStart,
    /// "Flex items are packed toward the end of the line."
    FlexEnd,
    /// "Flex items are packed toward the center of the line."
    Center,
    /// "Flex items are evenly distributed in the line."
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size
    /// spaces on either end."
    SpaceAround,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_channels() {
        let c = Color::from_hex("#336699").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0x33, 0x66, 0x99, 255));
    }

    #[test]
    fn hex_wrong_shape_rejected() {
        assert!(Color::from_hex("336699").is_none());
        assert!(Color::from_hex("#fff").is_none());
        assert!(Color::from_hex("#12345678").is_none());
    }

    #[test]
    fn hex_bad_channel_defaults_to_zero() {
        let c = Color::from_hex("#zz66 9").unwrap_or(Color::BLACK);
        assert_eq!(c.r, 0);
    }

    #[test]
    fn keywords_render_kebab_case() {
        assert_eq!(Justify::SpaceBetween.to_string(), "space-between");
        assert_eq!(Display::None.to_string(), "none");
        assert_eq!(FlexDirection::Row.to_string(), "row");
    }
}
