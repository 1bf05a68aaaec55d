//! Palette data model: the user's query and the validated palette that comes back.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::FailureCause;

/// Number of colors in every palette
pub const PALETTE_SIZE: usize = 5;

/// A mood or keyword, trimmed and guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodQuery(String);

impl MoodQuery {
    /// Returns `None` for empty or whitespace-only input
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoodQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `#RRGGBB` color code, kept exactly as the service returned it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(code: &str) -> Option<Self> {
        let digits = code.strip_prefix('#')?;
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(code.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels
    pub fn rgb(&self) -> (u8, u8, u8) {
        // Validated in `parse`, so every slice is two hex digits.
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or_default()
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code).ok_or_else(|| format!("not a #RRGGBB color: {:?}", code))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Five distinct colors plus a one-sentence justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct ColorPalette {
    colors: [HexColor; PALETTE_SIZE],
    justification: String,
}

/// Palette as it appears on the wire, before any checks
#[derive(Debug, Deserialize)]
struct RawPalette {
    colors: Option<Vec<String>>,
    justification: Option<String>,
}

impl ColorPalette {
    pub fn new(colors: Vec<String>, justification: String) -> Result<Self, FailureCause> {
        if colors.len() != PALETTE_SIZE {
            return Err(FailureCause::invalid(format!(
                "expected {} colors, got {}",
                PALETTE_SIZE,
                colors.len()
            )));
        }

        let mut parsed: Vec<HexColor> = Vec::with_capacity(PALETTE_SIZE);
        for code in &colors {
            let color = HexColor::parse(code).ok_or_else(|| {
                FailureCause::invalid(format!("not a #RRGGBB color: {:?}", code))
            })?;
            if parsed
                .iter()
                .any(|seen| seen.as_str().eq_ignore_ascii_case(color.as_str()))
            {
                return Err(FailureCause::invalid(format!("duplicate color {}", code)));
            }
            parsed.push(color);
        }

        if justification.trim().is_empty() {
            return Err(FailureCause::invalid("empty justification"));
        }

        let colors = parsed
            .try_into()
            .map_err(|_| FailureCause::invalid("palette size changed during validation"))?;

        Ok(Self {
            colors,
            justification,
        })
    }

    /// Decodes the JSON text produced by the generation service
    pub fn from_json(text: &str) -> Result<Self, FailureCause> {
        let raw: RawPalette = serde_json::from_str(text.trim())
            .map_err(|e| FailureCause::invalid(format!("malformed JSON: {}", e)))?;
        Self::try_from(raw)
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }
}

impl TryFrom<RawPalette> for ColorPalette {
    type Error = FailureCause;

    fn try_from(raw: RawPalette) -> Result<Self, Self::Error> {
        let colors = raw
            .colors
            .ok_or_else(|| FailureCause::invalid("missing colors"))?;
        let justification = raw
            .justification
            .ok_or_else(|| FailureCause::invalid("missing justification"))?;
        Self::new(colors, justification)
    }
}
