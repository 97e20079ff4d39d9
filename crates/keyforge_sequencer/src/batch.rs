// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence-wide batch sweeps.
//!
//! Each sweep walks every track (master tracks first, then each binding's
//! tracks), every section, and every channel of the relevant kind, applying
//! a single-key operation from [`crate::edit`] to each key. Sweeps never
//! abort on a per-key failure: failures are recorded in the returned
//! [`EditReport`] and the sweep continues, so one mistyped channel cannot
//! sink a bulk edit across a large document.
//!
//! Locked tracks are skipped by every sweep.

use crate::channel::{Channel, ChannelKind};
use crate::edit::{self, EditError, EditReport, EditWarning};
use crate::key::KeyValue;
use crate::sequence::Sequence;
use tracing::{debug, info, warn};

/// Apply `f` to every channel of every unlocked track.
fn for_each_channel(sequence: &mut Sequence, mut f: impl FnMut(&mut Channel)) {
    for track in sequence.all_tracks_mut() {
        if track.locked {
            debug!(track = %track.name, "skipping locked track");
            continue;
        }
        for section in track.sections_mut() {
            for channel in section.channels_mut() {
                f(channel);
            }
        }
    }
}

/// Flip the value of every bool key in the sequence.
pub fn toggle_bool_keys(sequence: &mut Sequence) -> EditReport {
    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        if channel.kind() != ChannelKind::Bool {
            return;
        }
        debug!(channel = %channel.name, "flipping bool keys");
        for key in channel.keys_mut() {
            match edit::toggle_value(key) {
                Ok(()) => report.record_modified(),
                Err(e) => report.record_failure(key.id, e),
            }
        }
    });
    info!("toggled bool keys: {report}");
    report
}

/// Add `delta` to every integer and float key in the sequence.
pub fn shift_numeric_keys(sequence: &mut Sequence, delta: f64) -> EditReport {
    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        if !matches!(channel.kind(), ChannelKind::Integer | ChannelKind::Float) {
            return;
        }
        for key in channel.keys_mut() {
            match edit::shift_value(key, delta) {
                Ok(()) => report.record_modified(),
                Err(e) => report.record_failure(key.id, e),
            }
        }
    });
    info!(delta, "shifted numeric keys: {report}");
    report
}

/// Add `delta` to every key of every channel, regardless of kind.
///
/// Bool and text keys reject the shift; those failures are aggregated while
/// the sweep keeps going.
pub fn shift_all_values(sequence: &mut Sequence, delta: f64) -> EditReport {
    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        for key in channel.keys_mut() {
            match edit::shift_value(key, delta) {
                Ok(()) => report.record_modified(),
                Err(e) => report.record_failure(key.id, e),
            }
        }
    });
    if !report.is_clean() {
        warn!(
            failures = report.failures.len(),
            "value shift skipped non-numeric keys"
        );
    }
    info!(delta, "shifted all values: {report}");
    report
}

/// Move every key by a whole number of display-rate frames.
///
/// Positions are converted per key through the sequence's display rate and
/// back onto the tick grid; each channel is re-sorted afterwards so the
/// ascending-tick invariant holds even when keys pass each other.
pub fn retime_keys(sequence: &mut Sequence, delta_frames: i64) -> EditReport {
    let display_rate = sequence.display_rate;
    let tick_resolution = sequence.tick_resolution;

    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        for key in channel.keys_mut() {
            match edit::shift_time(key, delta_frames, display_rate, tick_resolution) {
                Ok(warning) => {
                    report.record_modified();
                    if let Some(warning) = warning {
                        report.warnings.push(warning);
                    }
                }
                Err(e) => report.record_failure(key.id, e),
            }
        }
        channel.sort_keys();
    });
    info!(delta_frames, "retimed keys: {report}");
    report
}

/// Set every float key in the sequence to Cubic interpolation with Auto
/// tangents.
pub fn normalize_float_keys(sequence: &mut Sequence) -> EditReport {
    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        if channel.kind() != ChannelKind::Float {
            return;
        }
        report.merge(edit::normalize_to_cubic_auto(channel.keys_mut()));
    });
    info!("normalized float keys to cubic/auto: {report}");
    report
}

/// Scale the tangent weights of every eligible float key by `factor`.
///
/// Only keys with Cubic interpolation, User tangent mode and Both weight
/// mode are touched; the skipped count reports everything else.
pub fn scale_float_tangent_weights(
    sequence: &mut Sequence,
    factor: f64,
) -> Result<EditReport, EditError> {
    if factor < 0.0 {
        return Err(EditError::InvalidFactor(factor));
    }

    let mut report = EditReport::new();
    if factor == 0.0 {
        warn!("weight scale factor of zero collapses tangent influence entirely");
        report.warnings.push(EditWarning::ZeroWeightFactor);
    }

    let mut failure = None;
    for_each_channel(sequence, |channel| {
        if channel.kind() != ChannelKind::Float || failure.is_some() {
            return;
        }
        match edit::scale_tangent_weights(channel.keys_mut(), factor) {
            Ok(mut sub) => {
                // The factor warning is already recorded once above.
                sub.warnings.retain(|w| *w != EditWarning::ZeroWeightFactor);
                report.merge(sub);
            }
            Err(e) => failure = Some(e),
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    info!(factor, "scaled tangent weights: {report}");
    Ok(report)
}

/// Append `suffix` to every text key in the sequence.
pub fn append_text_suffix(sequence: &mut Sequence, suffix: &str) -> EditReport {
    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        if channel.kind() != ChannelKind::Text {
            return;
        }
        for key in channel.keys_mut() {
            match edit::append_suffix(key, suffix) {
                Ok(()) => report.record_modified(),
                Err(e) => report.record_failure(key.id, e),
            }
        }
    });
    info!(suffix, "appended text suffix: {report}");
    report
}

/// For every bool key, insert a new key at half its tick position carrying
/// the opposite value.
///
/// Keys already at tick 0 are skipped (their midpoint is themselves).
/// Insertion follows the channel's replace-on-collision contract.
pub fn insert_midpoint_bool_keys(sequence: &mut Sequence) -> EditReport {
    let mut report = EditReport::new();
    for_each_channel(sequence, |channel| {
        if channel.kind() != ChannelKind::Bool {
            return;
        }

        let midpoints: Vec<(i64, bool)> = channel
            .keys()
            .iter()
            .filter_map(|k| {
                let value = k.value.as_bool()?;
                (k.tick > 0).then_some((k.tick / 2, !value))
            })
            .collect();

        for (tick, value) in midpoints {
            match channel.add_key(tick, KeyValue::Bool(value)) {
                Ok(_) => report.record_modified(),
                Err(e) => {
                    warn!(channel = %channel.name, tick, "midpoint insert failed: {e}");
                    report.record_skipped(None);
                }
            }
        }
    });
    info!("inserted midpoint bool keys: {report}");
    report
}
