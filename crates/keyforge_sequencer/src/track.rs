// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for the sequencer.

use crate::section::Section;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// A track in the sequencer.
///
/// Tracks are composed of sections; sections are composed of channels which
/// contain the actual key data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Whether the track is muted
    pub muted: bool,
    /// Whether the track is locked against edits
    pub locked: bool,
    /// Sections in this track
    sections: Vec<Section>,
}

impl Track {
    /// Create a new track with no sections
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            muted: false,
            locked: false,
            sections: Vec::new(),
        }
    }

    /// Add a section, returning a mutable reference to it
    pub fn add_section(&mut self, section: Section) -> &mut Section {
        self.sections.push(section);
        self.sections.last_mut().expect("just pushed")
    }

    /// All sections
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Mutable access to all sections
    pub fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    /// Total number of keys across all sections
    pub fn key_count(&self) -> usize {
        self.sections.iter().map(Section::key_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, ChannelKind};
    use crate::key::KeyValue;

    #[test]
    fn test_key_count_spans_sections() {
        let mut track = Track::new("Visibility");
        for _ in 0..2 {
            let section = track.add_section(Section::new("clip"));
            let channel = section.add_channel(Channel::new("visible", ChannelKind::Bool));
            channel.add_key(0, KeyValue::Bool(true)).unwrap();
        }
        assert_eq!(track.key_count(), 2);
    }
}
