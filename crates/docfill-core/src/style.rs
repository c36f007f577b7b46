//! Optional styling for replaced text
//!
//! Every field of [`StyleOverride`] is an `Option`; unset fields must
//! not alter the formatting the rebuilt run inherits. No sentinel
//! values.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors from parsing style values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    /// Color string was not 6 hex digits (with optional `#` prefix)
    #[error("invalid color '{0}': expected RRGGBB hex")]
    InvalidColor(String),
}

/// An RGB font color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Render as uppercase `RRGGBB` hex, the form OOXML expects
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StyleError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        Ok(Rgb(channel(0), channel(2), channel(4)))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Font overrides applied to the run that replaces a placeholder.
///
/// The font name covers the ascii, hAnsi and eastAsia channels so
/// non-Latin text picks up the override too. The size is in points
/// and serialized as half-points by the OOXML layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverride {
    /// Font family name, or `None` to keep the inherited font
    pub font_name: Option<String>,
    /// Font size in points, or `None` to keep the inherited size
    pub size_pt: Option<f32>,
    /// Font color, or `None` to keep the inherited color
    pub color: Option<Rgb>,
}

impl StyleOverride {
    /// An override that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set the font size in points
    pub fn with_size(mut self, points: f32) -> Self {
        self.size_pt = Some(points);
        self
    }

    /// Set the font color
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Whether every field is unset
    pub fn is_empty(&self) -> bool {
        self.font_name.is_none() && self.size_pt.is_none() && self.color.is_none()
    }

    /// The size in OOXML half-points (`w:sz`), if set
    pub fn half_points(&self) -> Option<u32> {
        self.size_pt.map(|pt| (pt * 2.0).round().max(0.0) as u32)
    }
}
