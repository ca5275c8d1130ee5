use serde::{Deserialize, Serialize};

use crate::DimensionPair;

/// Total number of frames for a clip: `floor(fps * duration) + 1`.
///
/// The extra frame covers the closing boundary so that a 5 second clip at
/// 24 fps spans frames `0..=120`. Saturates at `u32::MAX`.
pub fn frame_count(fps: f64, duration: u32) -> u32 {
    let frames = (fps * duration as f64).floor().max(0.0);
    (frames as u32).saturating_add(1)
}

/// Every scalar a video generation graph needs, computed in one place so a
/// single node can feed many downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoParamBundle {
    pub fps: f64,
    pub duration: u32,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    pub steps: u32,
    pub shift_value: f64,
    pub motion_amplitude: f64,
}

impl VideoParamBundle {
    /// Builds the bundle. `steps`, `shift_value` and `motion_amplitude` are
    /// carried through untouched.
    pub fn assemble(
        fps: f64,
        duration: u32,
        dimensions: DimensionPair,
        steps: u32,
        shift_value: f64,
        motion_amplitude: f64,
    ) -> Self {
        Self {
            fps,
            duration,
            width: dimensions.width,
            height: dimensions.height,
            frame_count: frame_count(fps, duration),
            steps,
            shift_value,
            motion_amplitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_closing_frame() {
        assert_eq!(frame_count(24.0, 5), 121);
        assert_eq!(frame_count(1.0, 1), 2);
        assert_eq!(frame_count(120.0, 10_000), 1_200_001);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(frame_count(1.0e12, 1), u32::MAX);
        assert_eq!(frame_count(f64::INFINITY, 10), u32::MAX);
        assert_eq!(frame_count(f64::NAN, 10), 1);
    }

    #[test]
    fn truncates_fractional_frame_rates() {
        // 23.976 * 10 = 239.76
        assert_eq!(frame_count(23.976, 10), 240);
        // 29.97 * 3 = 89.91
        assert_eq!(frame_count(29.97, 3), 90);
    }

    #[test]
    fn passes_auxiliary_values_through_bit_identical() {
        let shift = 0.1_f64 + 0.2_f64;
        let motion = f64::MIN_POSITIVE;
        let bundle = VideoParamBundle::assemble(
            12.5,
            4,
            DimensionPair {
                width: 832,
                height: 480,
            },
            37,
            shift,
            motion,
        );

        assert_eq!(bundle.steps, 37);
        assert_eq!(bundle.shift_value.to_bits(), shift.to_bits());
        assert_eq!(bundle.motion_amplitude.to_bits(), motion.to_bits());
        assert_eq!(bundle.fps.to_bits(), 12.5_f64.to_bits());
        assert_eq!(bundle.frame_count, 51);
        assert_eq!(bundle.width, 832);
    }
}
