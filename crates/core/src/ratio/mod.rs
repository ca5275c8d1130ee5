use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ParamsError, Result};

/// Ratio tokens whose ordering already encodes the orientation.
pub const ORIENTED_RATIOS: [&str; 7] = ["16:9", "9:16", "4:3", "3:4", "3:2", "2:3", "1:1"];

/// Ratio tokens written long side first. Orientation is picked separately.
pub const LANDSCAPE_RATIOS: [&str; 6] = ["16:9", "21:9", "4:3", "3:2", "5:4", "1:1"];

/// Which way the long side of a frame points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub const CHOICES: [&'static str; 2] = ["landscape", "portrait"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }
}

impl FromStr for Orientation {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            _ => Err(ParamsError::InvalidChoice {
                field: "orientation".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aspect ratio parsed from a `W:H` token. Both components are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    numerator: u32,
    denominator: u32,
}

impl AspectRatio {
    /// Builds a ratio from its components, rejecting zeros.
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        (numerator > 0 && denominator > 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    /// Parses a `W:H` token such as `"16:9"`.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || ParamsError::InvalidRatioFormat {
            token: token.to_string(),
        };

        let (w, h) = token.split_once(':').ok_or_else(invalid)?;
        let numerator = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let denominator = h.trim().parse::<u32>().map_err(|_| invalid())?;

        Self::new(numerator, denominator).ok_or_else(invalid)
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Long side over short side, always `>= 1.0`.
    pub fn long_over_short(&self) -> f64 {
        let long = self.numerator.max(self.denominator);
        let short = self.numerator.min(self.denominator);
        long as f64 / short as f64
    }

    /// Orientation implied by the component order, `None` for square ratios.
    pub fn orientation(&self) -> Option<Orientation> {
        match self.numerator.cmp(&self.denominator) {
            std::cmp::Ordering::Greater => Some(Orientation::Landscape),
            std::cmp::Ordering::Less => Some(Orientation::Portrait),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl FromStr for AspectRatio {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}
