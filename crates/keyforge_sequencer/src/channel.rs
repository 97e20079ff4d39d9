// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed key channels.

use crate::key::{Key, KeyId, KeyValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub Uuid);

impl ChannelId {
    /// Create a new random channel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

/// Value type a channel carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Boolean keys
    Bool,
    /// Integer keys
    Integer,
    /// Float keys (the only kind with curve attributes)
    Float,
    /// Text keys
    Text,
}

impl ChannelKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Text => "Text",
        }
    }

    /// Whether a value matches this channel kind.
    pub fn matches(&self, value: &KeyValue) -> bool {
        matches!(
            (self, value),
            (Self::Bool, KeyValue::Bool(_))
                | (Self::Integer, KeyValue::Integer(_))
                | (Self::Float, KeyValue::Float(_))
                | (Self::Text, KeyValue::Text(_))
        )
    }
}

/// Channel errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Value type does not match the channel kind
    #[error("Channel '{channel}' holds {expected:?} keys, got {actual}")]
    KindMismatch {
        /// Channel name
        channel: String,
        /// Kind the channel holds
        expected: ChannelKind,
        /// Variant name of the rejected value
        actual: &'static str,
    },

    /// Key positions must be non-negative ticks
    #[error("Key position {0} is negative")]
    NegativeTick(i64),
}

/// An ordered sequence of keys of one value type.
///
/// Keys are kept sorted by ascending tick and no two keys share a tick:
/// adding a key at an occupied position replaces the resident key's value in
/// place, retaining its id and curve attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel ID
    pub id: ChannelId,
    /// Channel name (e.g. a bound property name)
    pub name: String,
    /// Value type of every key in this channel
    kind: ChannelKind,
    /// Keys ordered by ascending tick
    keys: Vec<Key>,
}

impl Channel {
    /// Create a new empty channel
    pub fn new(name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id: ChannelId::new(),
            name: name.into(),
            kind,
            keys: Vec::new(),
        }
    }

    /// Value type of this channel
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Add a key at the given tick.
    ///
    /// The value must match the channel kind and the tick must be
    /// non-negative. If a key already occupies the tick, its value is
    /// replaced and its id returned.
    pub fn add_key(&mut self, tick: i64, value: KeyValue) -> Result<KeyId, ChannelError> {
        if !self.kind.matches(&value) {
            return Err(ChannelError::KindMismatch {
                channel: self.name.clone(),
                expected: self.kind,
                actual: value.kind_name(),
            });
        }
        if tick < 0 {
            return Err(ChannelError::NegativeTick(tick));
        }

        if let Some(existing) = self.keys.iter_mut().find(|k| k.tick == tick) {
            existing.value = value;
            return Ok(existing.id);
        }

        let key = Key::new(tick, value);
        let id = key.id;
        self.keys.push(key);
        self.sort_keys();
        Ok(id)
    }

    /// Remove a key
    pub fn remove_key(&mut self, key_id: KeyId) {
        self.keys.retain(|k| k.id != key_id);
    }

    /// Restore ascending-tick order after an edit moved keys around.
    pub fn sort_keys(&mut self) {
        self.keys.sort_by_key(|k| k.tick);
    }

    /// Get key at an exact tick (if present)
    pub fn key_at(&self, tick: i64) -> Option<&Key> {
        self.keys.iter().find(|k| k.tick == tick)
    }

    /// Get key by ID
    pub fn key(&self, key_id: KeyId) -> Option<&Key> {
        self.keys.iter().find(|k| k.id == key_id)
    }

    /// Get mutable key by ID
    pub fn key_mut(&mut self, key_id: KeyId) -> Option<&mut Key> {
        self.keys.iter_mut().find(|k| k.id == key_id)
    }

    /// All keys, ordered by tick
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Mutable access to all keys.
    ///
    /// Callers that change tick positions are responsible for calling
    /// [`Channel::sort_keys`] afterwards.
    pub fn keys_mut(&mut self) -> &mut [Key] {
        &mut self.keys
    }

    /// Keys within a tick range (inclusive)
    pub fn keys_in_range(&self, start: i64, end: i64) -> impl Iterator<Item = &Key> {
        self.keys.iter().filter(move |k| k.tick >= start && k.tick <= end)
    }

    /// Tick of the last key, if any
    pub fn last_tick(&self) -> Option<i64> {
        self.keys.last().map(|k| k.tick)
    }

    /// Key count
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Whether the channel has no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_stay_ordered() {
        let mut channel = Channel::new("value", ChannelKind::Integer);
        channel.add_key(800, KeyValue::Integer(2)).unwrap();
        channel.add_key(0, KeyValue::Integer(1)).unwrap();
        channel.add_key(400, KeyValue::Integer(3)).unwrap();

        let ticks: Vec<i64> = channel.keys().iter().map(|k| k.tick).collect();
        assert_eq!(ticks, vec![0, 400, 800]);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut channel = Channel::new("visible", ChannelKind::Bool);
        let err = channel.add_key(0, KeyValue::Float(1.0)).unwrap_err();
        assert!(matches!(err, ChannelError::KindMismatch { .. }));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_negative_tick_rejected() {
        let mut channel = Channel::new("value", ChannelKind::Float);
        let err = channel.add_key(-5, KeyValue::Float(1.0)).unwrap_err();
        assert_eq!(err, ChannelError::NegativeTick(-5));
    }

    #[test]
    fn test_collision_replaces_in_place() {
        let mut channel = Channel::new("fov", ChannelKind::Float);
        let first = channel.add_key(4000, KeyValue::Float(60.0)).unwrap();
        let second = channel.add_key(4000, KeyValue::Float(90.0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(channel.key_count(), 1);
        assert_eq!(channel.key_at(4000).unwrap().value, KeyValue::Float(90.0));
        // Curve attributes of the resident key survive the replacement.
        assert!(channel.key_at(4000).unwrap().curve.is_some());
    }

    #[test]
    fn test_keys_in_range() {
        let mut channel = Channel::new("value", ChannelKind::Integer);
        for tick in [0, 100, 200, 300] {
            channel.add_key(tick, KeyValue::Integer(tick)).unwrap();
        }
        let hits: Vec<i64> = channel.keys_in_range(100, 200).map(|k| k.tick).collect();
        assert_eq!(hits, vec![100, 200]);
    }
}
