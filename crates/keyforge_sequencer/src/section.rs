// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track sections.

use crate::channel::{Channel, ChannelKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub Uuid);

impl SectionId {
    /// Create a new random section ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A section of a track: a tick range holding the channels with the actual
/// key data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section ID
    pub id: SectionId,
    /// Section name
    pub name: String,
    /// Active range in ticks, `[start, end)`; `None` means unbounded
    pub range: Option<(i64, i64)>,
    /// Channels in this section
    channels: Vec<Channel>,
}

impl Section {
    /// Create a new section with no channels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            name: name.into(),
            range: None,
            channels: Vec::new(),
        }
    }

    /// Set the active range in ticks
    pub fn set_range(&mut self, start: i64, end: i64) {
        self.range = Some((start, end));
    }

    /// Add a channel, returning a mutable reference to it
    pub fn add_channel(&mut self, channel: Channel) -> &mut Channel {
        self.channels.push(channel);
        self.channels.last_mut().expect("just pushed")
    }

    /// All channels
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Mutable access to all channels
    pub fn channels_mut(&mut self) -> &mut [Channel] {
        &mut self.channels
    }

    /// Channels of one value kind
    pub fn channels_by_kind(&self, kind: ChannelKind) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(move |c| c.kind() == kind)
    }

    /// Mutable channels of one value kind
    pub fn channels_by_kind_mut(
        &mut self,
        kind: ChannelKind,
    ) -> impl Iterator<Item = &mut Channel> {
        self.channels.iter_mut().filter(move |c| c.kind() == kind)
    }

    /// Find a channel by name
    pub fn channel_named(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Total number of keys across all channels
    pub fn key_count(&self) -> usize {
        self.channels.iter().map(Channel::key_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyValue;

    #[test]
    fn test_channels_by_kind() {
        let mut section = Section::new("transform");
        section.add_channel(Channel::new("visible", ChannelKind::Bool));
        section.add_channel(Channel::new("x", ChannelKind::Float));
        section.add_channel(Channel::new("y", ChannelKind::Float));

        assert_eq!(section.channels_by_kind(ChannelKind::Float).count(), 2);
        assert_eq!(section.channels_by_kind(ChannelKind::Bool).count(), 1);
        assert_eq!(section.channels_by_kind(ChannelKind::Text).count(), 0);
    }

    #[test]
    fn test_key_count_spans_channels() {
        let mut section = Section::new("s");
        let channel = section.add_channel(Channel::new("x", ChannelKind::Float));
        channel.add_key(0, KeyValue::Float(0.0)).unwrap();
        channel.add_key(800, KeyValue::Float(1.0)).unwrap();
        let channel = section.add_channel(Channel::new("visible", ChannelKind::Bool));
        channel.add_key(0, KeyValue::Bool(true)).unwrap();

        assert_eq!(section.key_count(), 3);
    }
}
