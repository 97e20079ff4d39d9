// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-key edit operations.
//!
//! Every operation here mutates exactly one key and is atomic for that key:
//! it either fully updates the key's fields or fails without touching them.
//! Batch processing over many keys lives in [`crate::batch`], which keeps
//! going past per-key failures and aggregates outcomes into an
//! [`EditReport`].

use crate::key::{InterpMode, Key, KeyId, KeyValue, TangentMode, TangentWeightMode};
use keyforge_timebase::{snap_to_ticks, transform_time, FrameRate, FrameTime, RateError};
use thiserror::Error;

/// Hard edit failures. These abort the single key's operation; batch sweeps
/// record them and continue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Operation does not apply to the key's value type
    #[error("{op} is not supported on {value} keys")]
    UnsupportedOperation {
        /// Operation name
        op: &'static str,
        /// Value variant the key holds
        value: &'static str,
    },

    /// Invalid frame rate
    #[error(transparent)]
    InvalidRate(#[from] RateError),

    /// Tangent weight factor outside the permitted domain
    #[error("Tangent weight factor {0} is negative")]
    InvalidFactor(f64),
}

/// Advisory conditions. Warnings never abort an edit; they are collected in
/// the report so bulk edits over large key sets stay auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditWarning {
    /// A time conversion required rounding onto the tick grid
    PrecisionLoss {
        /// Key whose position was rounded
        key: KeyId,
    },
    /// Tangent mutation attempted while the key's interpolation or tangent
    /// mode makes tangent data inert
    InactiveTangents {
        /// Key that was skipped
        key: KeyId,
    },
    /// A weight scale factor of zero collapses tangent influence entirely
    ZeroWeightFactor,
}

/// Aggregated outcome of an edit over one or more keys.
#[derive(Debug, Default)]
pub struct EditReport {
    /// Keys fully updated
    pub modified: usize,
    /// Keys intentionally left untouched (e.g. inert tangent data)
    pub skipped: usize,
    /// Advisory conditions encountered
    pub warnings: Vec<EditWarning>,
    /// Per-key hard failures; the batch continued past each of these
    pub failures: Vec<(KeyId, EditError)>,
}

impl EditReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the edit completed with no failures
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record a successful key update
    pub fn record_modified(&mut self) {
        self.modified += 1;
    }

    /// Record a skipped key, optionally with the warning explaining why
    pub fn record_skipped(&mut self, warning: Option<EditWarning>) {
        self.skipped += 1;
        if let Some(warning) = warning {
            self.warnings.push(warning);
        }
    }

    /// Record a per-key failure
    pub fn record_failure(&mut self, key: KeyId, error: EditError) {
        self.failures.push((key, error));
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: EditReport) {
        self.modified += other.modified;
        self.skipped += other.skipped;
        self.warnings.extend(other.warnings);
        self.failures.extend(other.failures);
    }
}

impl std::fmt::Display for EditReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} modified, {} skipped, {} warnings, {} failures",
            self.modified,
            self.skipped,
            self.warnings.len(),
            self.failures.len()
        )
    }
}

/// Move a key by a whole number of frames at `base_rate`.
///
/// The key's tick position is converted into `base_rate` units, the delta is
/// added, and the result is converted back onto the tick grid
/// (round-to-nearest) and clamped at tick 0. Returns a
/// [`EditWarning::PrecisionLoss`] when the round trip required rounding,
/// which can only happen when the tick resolution is not an exact multiple
/// of `base_rate`.
///
/// Sibling ordering is not validated: shifting a key past a neighbor can
/// produce duplicate or reordered positions, which the caller resolves
/// (typically by re-sorting the channel after a sweep).
pub fn shift_time(
    key: &mut Key,
    delta_frames: i64,
    base_rate: FrameRate,
    tick_resolution: FrameRate,
) -> Result<Option<EditWarning>, EditError> {
    let in_base = transform_time(
        FrameTime::from_frame(key.tick),
        tick_resolution,
        base_rate,
    )?;
    let shifted = FrameTime::new(in_base.frame + delta_frames, in_base.subframe);
    let snap = snap_to_ticks(shifted, base_rate, tick_resolution)?;

    key.tick = snap.tick.max(0);
    Ok(snap
        .precision_loss
        .then_some(EditWarning::PrecisionLoss { key: key.id }))
}

/// Add `delta` to a numeric key's value.
///
/// Integer keys add the nearest-integer rounding of the delta. Bool and
/// text keys reject the operation; bool channels support
/// [`toggle_value`] and text channels [`append_suffix`] instead.
pub fn shift_value(key: &mut Key, delta: f64) -> Result<(), EditError> {
    match &mut key.value {
        KeyValue::Integer(v) => {
            *v += delta.round() as i64;
            Ok(())
        }
        KeyValue::Float(v) => {
            *v += delta;
            Ok(())
        }
        other => Err(EditError::UnsupportedOperation {
            op: "shift_value",
            value: other.kind_name(),
        }),
    }
}

/// Flip a bool key's value.
pub fn toggle_value(key: &mut Key) -> Result<(), EditError> {
    match &mut key.value {
        KeyValue::Bool(v) => {
            *v = !*v;
            Ok(())
        }
        other => Err(EditError::UnsupportedOperation {
            op: "toggle_value",
            value: other.kind_name(),
        }),
    }
}

/// Append a suffix to a text key's value.
pub fn append_suffix(key: &mut Key, suffix: &str) -> Result<(), EditError> {
    match &mut key.value {
        KeyValue::Text(v) => {
            v.push_str(suffix);
            Ok(())
        }
        other => Err(EditError::UnsupportedOperation {
            op: "append_suffix",
            value: other.kind_name(),
        }),
    }
}

/// Set every float key to Cubic interpolation with Auto tangents.
///
/// Idempotent: applying twice leaves the same state as applying once.
/// Non-float keys carry no curve attributes and are counted as skipped.
pub fn normalize_to_cubic_auto(keys: &mut [Key]) -> EditReport {
    let mut report = EditReport::new();
    for key in keys {
        match &mut key.curve {
            Some(curve) => {
                curve.interp = InterpMode::Cubic;
                curve.tangent_mode = TangentMode::Auto;
                report.record_modified();
            }
            None => report.record_skipped(Some(EditWarning::InactiveTangents { key: key.id })),
        }
    }
    report
}

/// Multiply the arrive and leave tangent weights of eligible keys by
/// `factor`.
///
/// A key is eligible when its interpolation is Cubic, its tangent mode is
/// User, and its tangent weight mode is Both; every other key is skipped
/// and counted in the report so bulk edits stay auditable. Negative factors
/// are rejected; a factor of zero is permitted but reported, since it
/// collapses tangent influence entirely.
pub fn scale_tangent_weights(keys: &mut [Key], factor: f64) -> Result<EditReport, EditError> {
    if factor < 0.0 {
        return Err(EditError::InvalidFactor(factor));
    }

    let mut report = EditReport::new();
    if factor == 0.0 {
        report.warnings.push(EditWarning::ZeroWeightFactor);
    }

    for key in keys {
        let eligible = key.curve.as_mut().filter(|c| {
            c.interp == InterpMode::Cubic
                && c.tangent_mode == TangentMode::User
                && c.weight_mode == TangentWeightMode::Both
        });
        match eligible {
            Some(curve) => {
                curve.arrive_weight *= factor;
                curve.leave_weight *= factor;
                report.record_modified();
            }
            None => report.record_skipped(Some(EditWarning::InactiveTangents { key: key.id })),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::CurveAttributes;

    fn float_key(tick: i64, value: f64) -> Key {
        Key::new(tick, KeyValue::Float(value))
    }

    #[test]
    fn test_shift_time_scenario() {
        // Display 30 fps, ticks 24 000/s: a key at display frame 5 sits on
        // tick 4000; +15 display frames moves it to frame 20 / tick 16 000.
        let mut key = float_key(4000, 1.0);
        let warning = shift_time(&mut key, 15, FrameRate::FPS_30, FrameRate::TICKS_24000).unwrap();
        assert_eq!(key.tick, 16_000);
        assert!(warning.is_none());
    }

    #[test]
    fn test_shift_time_clamps_at_zero() {
        let mut key = float_key(800, 1.0);
        shift_time(&mut key, -5, FrameRate::FPS_30, FrameRate::TICKS_24000).unwrap();
        assert_eq!(key.tick, 0);
    }

    #[test]
    fn test_shift_time_reports_precision_loss() {
        // 7 ticks per second over a 3 fps base is not an integer ratio, so
        // moving by one base frame must round.
        let base = FrameRate::fps(3).unwrap();
        let ticks = FrameRate::fps(7).unwrap();
        let mut key = float_key(1, 1.0);
        let warning = shift_time(&mut key, 1, base, ticks).unwrap();
        assert!(matches!(warning, Some(EditWarning::PrecisionLoss { .. })));
    }

    #[test]
    fn test_shift_value_composition() {
        let mut once = float_key(0, 10.0);
        shift_value(&mut once, 7.5).unwrap();

        let mut twice = float_key(0, 10.0);
        shift_value(&mut twice, 3.0).unwrap();
        shift_value(&mut twice, 4.5).unwrap();

        assert_eq!(once.value, twice.value);
    }

    #[test]
    fn test_shift_value_on_integer_rounds_delta() {
        let mut key = Key::new(0, KeyValue::Integer(10));
        shift_value(&mut key, 25.0).unwrap();
        assert_eq!(key.value, KeyValue::Integer(35));
    }

    #[test]
    fn test_shift_value_rejects_text_and_bool() {
        let mut text = Key::new(0, KeyValue::Text("name".into()));
        let err = shift_value(&mut text, 1.0).unwrap_err();
        assert!(matches!(err, EditError::UnsupportedOperation { .. }));
        assert_eq!(text.value, KeyValue::Text("name".into()));

        let mut flag = Key::new(0, KeyValue::Bool(false));
        assert!(shift_value(&mut flag, 1.0).is_err());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut key = Key::new(0, KeyValue::Bool(true));
        toggle_value(&mut key).unwrap();
        assert_eq!(key.value, KeyValue::Bool(false));
        toggle_value(&mut key).unwrap();
        assert_eq!(key.value, KeyValue::Bool(true));
    }

    #[test]
    fn test_append_suffix() {
        let mut key = Key::new(0, KeyValue::Text("Take1".into()));
        append_suffix(&mut key, "_Modified").unwrap();
        assert_eq!(key.value, KeyValue::Text("Take1_Modified".into()));

        let mut num = float_key(0, 1.0);
        assert!(append_suffix(&mut num, "_x").is_err());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut keys = vec![
            float_key(0, 1.0).with_curve(CurveAttributes {
                interp: InterpMode::Linear,
                tangent_mode: TangentMode::User,
                ..CurveAttributes::default()
            }),
            float_key(800, 2.0),
        ];

        let first = normalize_to_cubic_auto(&mut keys);
        assert_eq!(first.modified, 2);
        let after_once = keys.clone();

        let second = normalize_to_cubic_auto(&mut keys);
        assert_eq!(second.modified, 2);
        assert_eq!(keys, after_once);

        for key in &keys {
            let curve = key.curve.unwrap();
            assert_eq!(curve.interp, InterpMode::Cubic);
            assert_eq!(curve.tangent_mode, TangentMode::Auto);
        }
    }

    #[test]
    fn test_normalize_skips_non_float_keys() {
        let mut keys = vec![Key::new(0, KeyValue::Bool(true))];
        let report = normalize_to_cubic_auto(&mut keys);
        assert_eq!(report.modified, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_scale_tangent_weights_scenario() {
        let weighted = CurveAttributes {
            interp: InterpMode::Cubic,
            tangent_mode: TangentMode::User,
            weight_mode: TangentWeightMode::Both,
            arrive_weight: 2.0,
            leave_weight: 3.0,
            ..CurveAttributes::default()
        };
        let mut keys = vec![
            float_key(0, 1.0).with_curve(weighted),
            // Auto tangents: inert, must be skipped untouched.
            float_key(800, 2.0),
        ];

        let report = scale_tangent_weights(&mut keys, 0.5).unwrap();
        assert_eq!(report.modified, 1);
        assert_eq!(report.skipped, 1);

        let scaled = keys[0].curve.unwrap();
        assert_eq!(scaled.arrive_weight, 1.0);
        assert_eq!(scaled.leave_weight, 1.5);

        let untouched = keys[1].curve.unwrap();
        assert_eq!(untouched.arrive_weight, 0.0);
        assert_eq!(untouched.leave_weight, 0.0);
    }

    #[test]
    fn test_scale_tangent_weights_factor_domain() {
        let mut keys = vec![float_key(0, 1.0)];
        assert!(matches!(
            scale_tangent_weights(&mut keys, -1.0),
            Err(EditError::InvalidFactor(_))
        ));

        let report = scale_tangent_weights(&mut keys, 0.0).unwrap();
        assert!(report.warnings.contains(&EditWarning::ZeroWeightFactor));
    }
}
