//! Brand colour value

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Grey placeholder the backend sends for brands without a real colour
const PLACEHOLDER_COLOR: &str = "#6c757d";

/// A validated `#rrggbb` brand colour.
///
/// Stored lowercase. The backend's grey placeholder counts as "no colour"
/// and parses to `None`, as does anything that is not a six-digit hex code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BrandColor(String);

impl BrandColor {
    /// Parse a colour, `None` for invalid input or the grey placeholder
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let re = Regex::new(r"^#[0-9a-fA-F]{6}$").expect("Invalid regex");
        let value = value.trim();
        if !re.is_match(value) {
            return None;
        }
        let canonical = value.to_ascii_lowercase();
        if canonical == PLACEHOLDER_COLOR {
            return None;
        }
        Some(Self(canonical))
    }

    /// Hex string form, always lowercase
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for BrandColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid brand colour: {raw}")))
    }
}

/// Deserialize an optional colour field, degrading bad values to `None`.
///
/// Backend rows carry empty strings and the grey placeholder where no brand
/// colour exists; a display row is never rejected over its colour.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<BrandColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(BrandColor::parse))
}
