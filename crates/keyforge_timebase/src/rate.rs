// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rational frame rates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by rate construction and conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RateError {
    /// Zero or negative frame rate component
    #[error("Invalid frame rate {numerator}/{denominator}: components must be positive")]
    InvalidRate {
        /// Offending numerator
        numerator: i32,
        /// Offending denominator
        denominator: i32,
    },
}

/// A frame rate expressed as a rational number of frames per second.
///
/// Stored as a numerator/denominator pair rather than a float so that
/// conversions between rates can be carried out without drift. Both
/// components are kept positive; [`FrameRate::new`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    numerator: i32,
    denominator: i32,
}

impl FrameRate {
    /// 24 fps (film)
    pub const FILM_24: FrameRate = FrameRate { numerator: 24, denominator: 1 };
    /// 25 fps (PAL)
    pub const PAL_25: FrameRate = FrameRate { numerator: 25, denominator: 1 };
    /// 30 fps
    pub const FPS_30: FrameRate = FrameRate { numerator: 30, denominator: 1 };
    /// 60 fps
    pub const FPS_60: FrameRate = FrameRate { numerator: 60, denominator: 1 };
    /// Default internal tick resolution (24 000 ticks per second)
    pub const TICKS_24000: FrameRate = FrameRate { numerator: 24_000, denominator: 1 };

    /// Create a frame rate from a numerator/denominator pair.
    pub fn new(numerator: i32, denominator: i32) -> Result<Self, RateError> {
        if numerator <= 0 || denominator <= 0 {
            return Err(RateError::InvalidRate {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Create a whole-number frames-per-second rate.
    pub fn fps(frames_per_second: i32) -> Result<Self, RateError> {
        Self::new(frames_per_second, 1)
    }

    /// Numerator (frames)
    pub fn numerator(&self) -> i32 {
        self.numerator
    }

    /// Denominator (seconds)
    pub fn denominator(&self) -> i32 {
        self.denominator
    }

    /// Frames per second as a decimal.
    pub fn as_decimal(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_interval_seconds(&self) -> f64 {
        f64::from(self.denominator) / f64::from(self.numerator)
    }

    /// Whether `self` is an exact integer multiple of `other`.
    ///
    /// A tick resolution of 24 000/1 is a multiple of a 30/1 display rate
    /// (800 ticks per display frame) but not of 29.97 (30 000/1001).
    pub fn is_multiple_of(&self, other: FrameRate) -> bool {
        // self / other = (self.num * other.den) / (self.den * other.num)
        let num = i64::from(self.numerator) * i64::from(other.denominator);
        let den = i64::from(self.denominator) * i64::from(other.numerator);
        num % den == 0
    }

    /// Number of `self` units per single `other` frame, if integral.
    ///
    /// Returns `None` when the ratio is not a whole number.
    pub fn units_per_frame_of(&self, other: FrameRate) -> Option<i64> {
        let num = i64::from(self.numerator) * i64::from(other.denominator);
        let den = i64::from(self.denominator) * i64::from(other.numerator);
        (num % den == 0).then_some(num / den)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denominator == 1 {
            write!(f, "{} fps", self.numerator)
        } else {
            write!(f, "{}/{} fps", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_components() {
        assert!(FrameRate::new(0, 1).is_err());
        assert!(FrameRate::new(30, 0).is_err());
        assert!(FrameRate::new(-24, 1).is_err());
        assert!(FrameRate::new(24, -1).is_err());
        assert!(FrameRate::new(30, 1).is_ok());
    }

    #[test]
    fn test_decimal_and_interval() {
        let ntsc = FrameRate::new(30_000, 1001).unwrap();
        assert!((ntsc.as_decimal() - 29.97).abs() < 0.01);
        assert!((FrameRate::FPS_30.frame_interval_seconds() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_multiple_of() {
        assert!(FrameRate::TICKS_24000.is_multiple_of(FrameRate::FPS_30));
        assert!(FrameRate::TICKS_24000.is_multiple_of(FrameRate::FILM_24));
        assert!(!FrameRate::FPS_30.is_multiple_of(FrameRate::TICKS_24000));

        let ntsc = FrameRate::new(30_000, 1001).unwrap();
        assert!(!FrameRate::TICKS_24000.is_multiple_of(ntsc));
    }

    #[test]
    fn test_units_per_frame() {
        assert_eq!(
            FrameRate::TICKS_24000.units_per_frame_of(FrameRate::FPS_30),
            Some(800)
        );
        assert_eq!(
            FrameRate::TICKS_24000.units_per_frame_of(FrameRate::FILM_24),
            Some(1000)
        );
        assert_eq!(
            FrameRate::FPS_30.units_per_frame_of(FrameRate::TICKS_24000),
            None
        );
    }
}
