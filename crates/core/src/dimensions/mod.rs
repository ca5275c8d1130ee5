use serde::{Deserialize, Serialize};

use crate::{AspectRatio, Orientation};

/// Every produced dimension is a multiple of this value.
pub const DIMENSION_MULTIPLE: u32 = 8;

/// How fractional dimensions are snapped to [`DIMENSION_MULTIPLE`].
///
/// The two policies give different results for the same inputs (`16:9` at a
/// short side of 480 yields 856 wide with `Nearest` and 848 with `Floor`), so
/// callers pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Round to the nearest multiple, ties to even.
    #[default]
    Nearest,
    /// Round down to the previous multiple.
    Floor,
}

impl std::str::FromStr for RoundingPolicy {
    type Err = crate::ParamsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "floor" => Ok(Self::Floor),
            _ => Err(crate::ParamsError::InvalidChoice {
                field: "rounding".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Which side the caller-supplied length fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllingSide {
    #[default]
    Short,
    Long,
}

impl ControllingSide {
    pub fn from_is_long(is_long: bool) -> Self {
        if is_long {
            Self::Long
        } else {
            Self::Short
        }
    }
}

/// Pixel dimensions, each a multiple of [`DIMENSION_MULTIPLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionPair {
    pub width: u32,
    pub height: u32,
}

/// Snaps a raw dimension onto the multiple-of-8 grid.
pub fn round_to_multiple(value: f64, policy: RoundingPolicy) -> u32 {
    let step = DIMENSION_MULTIPLE as f64;
    let units = match policy {
        RoundingPolicy::Nearest => (value / step).round_ties_even(),
        RoundingPolicy::Floor => (value / step).floor(),
    };
    (units.max(0.0) * step) as u32
}

/// Converts an aspect ratio plus one side length into frame dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionCalculator {
    rounding: RoundingPolicy,
}

impl DimensionCalculator {
    pub fn new(rounding: RoundingPolicy) -> Self {
        Self { rounding }
    }

    /// Computes `(width, height)` for `ratio` with `length` fixing the
    /// `controlling` side.
    ///
    /// The ratio is read as long side over short side, so `16:9` and `9:16`
    /// describe the same shape and `orientation` alone decides which side
    /// becomes the width. A square ratio yields equal sides.
    pub fn compute(
        &self,
        length: u32,
        ratio: AspectRatio,
        orientation: Orientation,
        controlling: ControllingSide,
    ) -> DimensionPair {
        let ratio_value = ratio.long_over_short();
        let length = length as f64;

        let (long, short) = match controlling {
            ControllingSide::Long => {
                let short = match self.rounding {
                    RoundingPolicy::Nearest => (length / ratio_value).round_ties_even(),
                    RoundingPolicy::Floor => (length / ratio_value).floor(),
                };
                (length, short)
            }
            ControllingSide::Short => (length * ratio_value, length),
        };

        let (width, height) = match orientation {
            Orientation::Landscape => (long, short),
            Orientation::Portrait => (short, long),
        };

        let pair = DimensionPair {
            width: round_to_multiple(width, self.rounding),
            height: round_to_multiple(height, self.rounding),
        };

        tracing::debug!(
            length,
            %ratio,
            %orientation,
            ?controlling,
            rounding = ?self.rounding,
            width = pair.width,
            height = pair.height,
            "computed frame dimensions"
        );

        pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::{LANDSCAPE_RATIOS, ORIENTED_RATIOS};

    fn ratio(token: &str) -> AspectRatio {
        AspectRatio::parse(token).unwrap()
    }

    #[test]
    fn widescreen_short_side_rounds_per_policy() {
        let nearest = DimensionCalculator::new(RoundingPolicy::Nearest).compute(
            480,
            ratio("16:9"),
            Orientation::Landscape,
            ControllingSide::Short,
        );
        assert_eq!(nearest, DimensionPair { width: 856, height: 480 });

        let floor = DimensionCalculator::new(RoundingPolicy::Floor).compute(
            480,
            ratio("16:9"),
            Orientation::Landscape,
            ControllingSide::Short,
        );
        assert_eq!(floor, DimensionPair { width: 848, height: 480 });
    }

    #[test]
    fn portrait_swaps_width_and_height() {
        let calc = DimensionCalculator::default();
        let pair = calc.compute(720, ratio("4:3"), Orientation::Portrait, ControllingSide::Short);
        assert_eq!(pair, DimensionPair { width: 720, height: 960 });
    }

    #[test]
    fn long_side_controls_when_requested() {
        let calc = DimensionCalculator::default();
        let pair = calc.compute(1280, ratio("16:9"), Orientation::Landscape, ControllingSide::Long);
        assert_eq!(pair, DimensionPair { width: 1280, height: 720 });

        let pair = calc.compute(1024, ratio("21:9"), Orientation::Portrait, ControllingSide::Long);
        // 1024 / (21 / 9) = 438.86 -> 439 -> 440
        assert_eq!(pair, DimensionPair { width: 440, height: 1024 });

        let floored = DimensionCalculator::new(RoundingPolicy::Floor).compute(
            1024,
            ratio("21:9"),
            Orientation::Portrait,
            ControllingSide::Long,
        );
        assert_eq!(floored, DimensionPair { width: 432, height: 1024 });
    }

    #[test]
    fn square_ratio_yields_equal_sides() {
        for policy in [RoundingPolicy::Nearest, RoundingPolicy::Floor] {
            let calc = DimensionCalculator::new(policy);
            for length in [64, 100, 480, 1001, 8192] {
                for controlling in [ControllingSide::Short, ControllingSide::Long] {
                    let pair = calc.compute(length, ratio("1:1"), Orientation::Landscape, controlling);
                    assert_eq!(pair.width, pair.height);
                    assert_eq!(pair.width % DIMENSION_MULTIPLE, 0);
                }
            }
        }
    }

    #[test]
    fn every_dimension_is_a_multiple_of_eight() {
        for policy in [RoundingPolicy::Nearest, RoundingPolicy::Floor] {
            let calc = DimensionCalculator::new(policy);
            for token in ORIENTED_RATIOS.iter().chain(LANDSCAPE_RATIOS.iter()) {
                for length in (64..=8192).step_by(40) {
                    for orientation in [Orientation::Landscape, Orientation::Portrait] {
                        for controlling in [ControllingSide::Short, ControllingSide::Long] {
                            let pair = calc.compute(length, ratio(token), orientation, controlling);
                            assert_eq!(pair.width % DIMENSION_MULTIPLE, 0, "{token} {length}");
                            assert_eq!(pair.height % DIMENSION_MULTIPLE, 0, "{token} {length}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn toggling_controlling_side_moves_the_exact_length() {
        let calc = DimensionCalculator::default();
        let short = calc.compute(480, ratio("3:2"), Orientation::Landscape, ControllingSide::Short);
        assert_eq!(short.height, 480);
        assert_ne!(short.width, 480);

        let long = calc.compute(480, ratio("3:2"), Orientation::Landscape, ControllingSide::Long);
        assert_eq!(long.width, 480);
        assert_eq!(long.height, 320);
    }

    #[test]
    fn nearest_rounding_breaks_ties_to_even() {
        assert_eq!(round_to_multiple(68.0, RoundingPolicy::Nearest), 64);
        assert_eq!(round_to_multiple(76.0, RoundingPolicy::Nearest), 80);
        assert_eq!(round_to_multiple(853.33, RoundingPolicy::Nearest), 856);
        assert_eq!(round_to_multiple(855.9, RoundingPolicy::Floor), 848);
    }
}
