use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorCodeError {
    #[error("Color code is empty")]
    Empty,
    #[error("Invalid color code: {0}")]
    Invalid(String),
}

/// A 24-bit RGB color.
///
/// Parses `rgb` or `rrggbb` hex digits, with or without a leading `#`, in any case.
/// Always displays as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorCode {
    r: u8,
    g: u8,
    b: u8,
}

impl ColorCode {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// Lenient parse: anything that isn't a complete code yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    #[must_use]
    pub const fn red(&self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn green(&self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.b
    }

    #[must_use]
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Euclidean distance in the RGB cube.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        rgb_distance(self.channels(), other.channels())
    }

    /// `#RRGGBB`, as used in collection names.
    #[must_use]
    pub fn to_upper_hex(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// Euclidean distance between two RGB triples.
#[must_use]
pub fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

impl FromStr for ColorCode {
    type Err = ColorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ColorCodeError::Empty);
        }
        let digits = value.strip_prefix('#').unwrap_or(value);
        let invalid = || ColorCodeError::Invalid(value.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        // All digits are ASCII from here on, so byte slicing is safe.
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        match digits.len() {
            3 => Ok(Self {
                r: channel(0..1)? * 17,
                g: channel(1..2)? * 17,
                b: channel(2..3)? * 17,
            }),
            6 => Ok(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for ColorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
