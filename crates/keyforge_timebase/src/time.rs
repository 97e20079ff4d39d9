// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame times and time-base conversion.

use crate::rate::{FrameRate, RateError};
use serde::{Deserialize, Serialize};

/// Tolerance below which a fractional tick remainder counts as zero.
const TICK_EPSILON: f64 = 1e-9;

/// A point in time measured in frames of some [`FrameRate`].
///
/// The sub-frame component is kept in `[0, 1)`; constructors normalize any
/// overflow into the frame number. Sub-frame precision is only meaningful
/// relative to the timeline's tick resolution; once a time is expressed in
/// ticks the sub-frame must be exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Whole frame number
    pub frame: i64,
    /// Fractional offset into the frame, in `[0, 1)`
    pub subframe: f64,
}

impl FrameTime {
    /// Create a frame time, normalizing the sub-frame into `[0, 1)`.
    pub fn new(frame: i64, subframe: f64) -> Self {
        let carry = subframe.floor();
        let mut frame = frame + carry as i64;
        let mut subframe = subframe - carry;
        // Float rounding can leave the fraction at exactly 1.0.
        if subframe >= 1.0 {
            frame += 1;
            subframe = 0.0;
        }
        Self { frame, subframe }
    }

    /// A whole-frame time with zero sub-frame.
    pub fn from_frame(frame: i64) -> Self {
        Self {
            frame,
            subframe: 0.0,
        }
    }

    /// The time as a decimal frame count.
    pub fn as_decimal(&self) -> f64 {
        self.frame as f64 + self.subframe
    }

    /// The time in seconds at the given rate.
    pub fn as_seconds(&self, rate: FrameRate) -> f64 {
        self.as_decimal() * rate.frame_interval_seconds()
    }
}

impl From<i64> for FrameTime {
    fn from(frame: i64) -> Self {
        Self::from_frame(frame)
    }
}

impl std::fmt::Display for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.subframe == 0.0 {
            write!(f, "{}", self.frame)
        } else {
            write!(f, "{}+{:.4}", self.frame, self.subframe)
        }
    }
}

/// Result of snapping a converted time onto the tick grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSnap {
    /// Nearest whole tick
    pub tick: i64,
    /// Whether rounding discarded a nonzero remainder
    pub precision_loss: bool,
}

/// Convert a frame time from one rate into the equivalent time in another,
/// preserving the real-valued instant.
///
/// The whole-frame part is converted with 128-bit integer arithmetic, so the
/// result is exact whenever the sub-frame is zero and one rate divides the
/// other evenly. Any remainder is carried in the returned sub-frame.
pub fn transform_time(
    time: FrameTime,
    from_rate: FrameRate,
    to_rate: FrameRate,
) -> Result<FrameTime, RateError> {
    let (whole, frac) = transform_parts(time, from_rate, to_rate);
    Ok(FrameTime::new(whole, frac))
}

/// Convert a frame time into tick-resolution units and round to the nearest
/// whole tick.
///
/// Ticks are atomic, so a conversion that lands between ticks must round;
/// round-to-nearest avoids the systematic drift a truncating conversion
/// accumulates over repeated edits. The discarded remainder is reported via
/// [`TickSnap::precision_loss`] rather than dropped silently.
pub fn snap_to_ticks(
    time: FrameTime,
    from_rate: FrameRate,
    tick_resolution: FrameRate,
) -> Result<TickSnap, RateError> {
    let (whole, frac) = transform_parts(time, from_rate, tick_resolution);
    let rounded = frac.round();
    let tick = whole + rounded as i64;
    let precision_loss = (frac - rounded).abs() > TICK_EPSILON;
    Ok(TickSnap {
        tick,
        precision_loss,
    })
}

/// Shared conversion core: returns the exact whole-frame part plus a
/// fractional remainder in target units.
fn transform_parts(time: FrameTime, from_rate: FrameRate, to_rate: FrameRate) -> (i64, f64) {
    // to_frames = (frame + subframe) * (to_num * from_den) / (from_num * to_den)
    let num = i128::from(to_rate.numerator()) * i128::from(from_rate.denominator());
    let den = i128::from(from_rate.numerator()) * i128::from(to_rate.denominator());

    let scaled = i128::from(time.frame) * num;
    let whole = scaled.div_euclid(den);
    let rem = scaled.rem_euclid(den);

    let frac = rem as f64 / den as f64 + time.subframe * (num as f64 / den as f64);
    (whole as i64, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_frame_to_tick() {
        // 30 fps display, 24 000 tick resolution: 800 ticks per display frame.
        let t = transform_time(
            FrameTime::from_frame(5),
            FrameRate::FPS_30,
            FrameRate::TICKS_24000,
        )
        .unwrap();
        assert_eq!(t, FrameTime::from_frame(4000));
    }

    #[test]
    fn test_round_trip_is_exact_for_integer_multiples() {
        let pairs = [
            (FrameRate::FPS_30, FrameRate::TICKS_24000),
            (FrameRate::FILM_24, FrameRate::TICKS_24000),
            (FrameRate::FPS_60, FrameRate::TICKS_24000),
            (FrameRate::fps(10).unwrap(), FrameRate::fps(30).unwrap()),
        ];
        for (display, ticks) in pairs {
            for frame in [0, 1, 5, 17, 1000, 123_456] {
                let t = FrameTime::from_frame(frame);
                let there = transform_time(t, display, ticks).unwrap();
                let back = transform_time(there, ticks, display).unwrap();
                assert_eq!(back, t, "{display} -> {ticks} round trip");
                assert_eq!(back.subframe, 0.0);
            }
        }
    }

    #[test]
    fn test_subframe_converts_exactly_when_representable() {
        // 5.5 display frames at 30 fps is tick 4400 exactly.
        let t = transform_time(
            FrameTime::new(5, 0.5),
            FrameRate::FPS_30,
            FrameRate::TICKS_24000,
        )
        .unwrap();
        assert_eq!(t.frame, 4400);
        assert_eq!(t.subframe, 0.0);
    }

    #[test]
    fn test_subframe_normalization() {
        assert_eq!(FrameTime::new(3, 1.25), FrameTime::new(4, 0.25));
        assert_eq!(FrameTime::new(3, -0.25), FrameTime::new(2, 0.75));
        assert_eq!(FrameTime::new(0, -1.0), FrameTime::from_frame(-1));
    }

    #[test]
    fn test_snap_without_loss() {
        let snap = snap_to_ticks(
            FrameTime::from_frame(20),
            FrameRate::FPS_30,
            FrameRate::TICKS_24000,
        )
        .unwrap();
        assert_eq!(snap.tick, 16_000);
        assert!(!snap.precision_loss);
    }

    #[test]
    fn test_snap_reports_loss() {
        // 3 fps -> 7 "ticks"/sec: frame 1 lands at 7/3 = 2.33 ticks.
        let from = FrameRate::fps(3).unwrap();
        let to = FrameRate::fps(7).unwrap();
        let snap = snap_to_ticks(FrameTime::from_frame(1), from, to).unwrap();
        assert_eq!(snap.tick, 2);
        assert!(snap.precision_loss);
    }

    #[test]
    fn test_negative_frames() {
        // Negative positions arise transiently while applying a negative
        // offset; conversion must stay consistent through zero.
        let t = transform_time(
            FrameTime::from_frame(-3),
            FrameRate::FPS_30,
            FrameRate::TICKS_24000,
        )
        .unwrap();
        assert_eq!(t, FrameTime::from_frame(-2400));
    }
}
