// SPDX-License-Identifier: MIT OR Apache-2.0
//! Key definitions for the sequencer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyId(pub Uuid);

impl KeyId {
    /// Create a new random key ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyId {
    fn default() -> Self {
        Self::new()
    }
}

/// How values are interpolated between a key and its successor.
///
/// Linear and Constant ignore user-specified tangent data; only Cubic
/// respects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterpMode {
    /// Linear interpolation
    Linear,
    /// Constant (step)
    Constant,
    /// Cubic curve interpolation
    #[default]
    Cubic,
}

/// How tangents are calculated when interpolation is Cubic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TangentMode {
    /// Tangents are computed automatically; user tangent data is ignored
    #[default]
    Auto,
    /// Both sides of the tangent are unified to the last set slope
    User,
    /// Arrive and leave tangents are respected independently
    Broken,
}

/// Which of a key's tangent weights are respected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TangentWeightMode {
    /// Weights fall back to automatically calculated values
    #[default]
    None,
    /// Only the arrive weight is respected
    Arrive,
    /// Only the leave weight is respected
    Leave,
    /// Both weights are respected
    Both,
}

/// Curve shape data carried by float-valued keys.
///
/// Tangent slopes are geometric tangents (value delta over seconds, relative
/// to the key); tangent weights are the hypotenuse length of that same
/// triangle. Slopes and weights only affect playback when
/// [`CurveAttributes::tangents_active`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CurveAttributes {
    /// Interpolation mode to the next key
    pub interp: InterpMode,
    /// Tangent calculation mode
    pub tangent_mode: TangentMode,
    /// Tangent weight mode
    pub weight_mode: TangentWeightMode,
    /// Incoming tangent slope
    pub arrive_tangent: f64,
    /// Outgoing tangent slope
    pub leave_tangent: f64,
    /// Incoming tangent weight
    pub arrive_weight: f64,
    /// Outgoing tangent weight
    pub leave_weight: f64,
}

impl CurveAttributes {
    /// Whether user tangent data participates in evaluation:
    /// interpolation must be Cubic and the tangent mode User or Broken.
    pub fn tangents_active(&self) -> bool {
        self.interp == InterpMode::Cubic
            && matches!(self.tangent_mode, TangentMode::User | TangentMode::Broken)
    }
}

/// Value stored in a key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyValue {
    /// Boolean value
    Bool(bool),
    /// Integer value (byte-width host channels fold into this)
    Integer(i64),
    /// Float value
    Float(f64),
    /// Text value
    Text(String),
}

impl KeyValue {
    /// Get as float if possible
    pub fn as_float(&self) -> Option<f64> {
        match self {
            KeyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            KeyValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            KeyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            KeyValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Variant name, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            KeyValue::Bool(_) => "Bool",
            KeyValue::Integer(_) => "Integer",
            KeyValue::Float(_) => "Float",
            KeyValue::Text(_) => "Text",
        }
    }
}

/// A key in a channel.
///
/// Positions are stored on the timeline's integer tick clock and are always
/// non-negative; ticks are the finest granularity, so there is no sub-frame
/// component here. Curve attributes are present exactly on float-valued keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Unique key ID
    pub id: KeyId,
    /// Position in ticks
    pub tick: i64,
    /// Value at this key
    pub value: KeyValue,
    /// Curve shape data (float keys only)
    pub curve: Option<CurveAttributes>,
}

impl Key {
    /// Create a new key. Float values receive default curve attributes.
    pub fn new(tick: i64, value: KeyValue) -> Self {
        let curve = matches!(value, KeyValue::Float(_)).then(CurveAttributes::default);
        Self {
            id: KeyId::new(),
            tick,
            value,
            curve,
        }
    }

    /// Set curve attributes
    pub fn with_curve(mut self, curve: CurveAttributes) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Whether this key's user tangent data participates in evaluation.
    pub fn tangents_active(&self) -> bool {
        self.curve.is_some_and(|c| c.tangents_active())
    }
}
