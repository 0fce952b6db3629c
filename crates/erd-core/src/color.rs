//! Color handling for diagram styling.
//!
//! [`Color`] wraps [`color::DynamicColor`] so that style settings such as
//! table header fills or line colors can be written as CSS color strings in
//! configuration files.

use std::str::FromStr;

use color::{DynamicColor, Srgb};

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use erd_core::color::Color;
    ///
    /// let header = Color::new("#dde6f0").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// `#rrggbb` form, or `#rrggbbaa` when not fully opaque.
    ///
    /// Graphviz only understands hexadecimal colors.
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
