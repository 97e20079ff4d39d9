// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence documents.

use crate::binding::{BindingId, ObjectBinding};
use crate::track::{Track, TrackId};
use indexmap::IndexMap;
use keyforge_timebase::FrameRate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Current sequence document format version
pub const SEQUENCE_FORMAT_VERSION: u32 = 1;

/// Unique identifier for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub Uuid);

impl SequenceId {
    /// Create a new random sequence ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequence document errors
#[derive(Debug, Error)]
pub enum DocumentError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Document could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    /// Document was written by a newer version of the format
    #[error("Document version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },
}

/// A cinematic sequence: master tracks plus object bindings, with the two
/// time bases every key position is interpreted against.
///
/// All key positions in the document are stored on the tick clock; the
/// display rate only affects how positions are presented and how
/// frame-denominated edits are converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    /// Document format version
    pub version: u32,
    /// Unique sequence ID
    pub id: SequenceId,
    /// Sequence name
    pub name: String,
    /// User-facing frame rate
    pub display_rate: FrameRate,
    /// Internal tick clock all key positions are stored on
    pub tick_resolution: FrameRate,
    /// Tracks not bound to any object
    master_tracks: IndexMap<TrackId, Track>,
    /// Object bindings and their tracks
    bindings: IndexMap<BindingId, ObjectBinding>,
}

impl Sequence {
    /// Create a new empty sequence at 30 fps over a 24 000/s tick clock.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SEQUENCE_FORMAT_VERSION,
            id: SequenceId::new(),
            name: name.into(),
            display_rate: FrameRate::FPS_30,
            tick_resolution: FrameRate::TICKS_24000,
            master_tracks: IndexMap::new(),
            bindings: IndexMap::new(),
        }
    }

    /// Set the display rate
    pub fn with_display_rate(mut self, rate: FrameRate) -> Self {
        self.display_rate = rate;
        self
    }

    /// Ticks per display frame, when the tick resolution is an exact
    /// multiple of the display rate.
    pub fn ticks_per_display_frame(&self) -> Option<i64> {
        self.tick_resolution.units_per_frame_of(self.display_rate)
    }

    /// Add a master track
    pub fn add_master_track(&mut self, track: Track) -> TrackId {
        let id = track.id;
        self.master_tracks.insert(id, track);
        id
    }

    /// Add an object binding
    pub fn add_binding(&mut self, binding: ObjectBinding) -> BindingId {
        let id = binding.id;
        self.bindings.insert(id, binding);
        id
    }

    /// Get a master track
    pub fn master_track(&self, track_id: TrackId) -> Option<&Track> {
        self.master_tracks.get(&track_id)
    }

    /// Get a binding
    pub fn binding(&self, binding_id: BindingId) -> Option<&ObjectBinding> {
        self.bindings.get(&binding_id)
    }

    /// Get a mutable binding
    pub fn binding_mut(&mut self, binding_id: BindingId) -> Option<&mut ObjectBinding> {
        self.bindings.get_mut(&binding_id)
    }

    /// All bindings, in insertion order
    pub fn bindings(&self) -> impl Iterator<Item = &ObjectBinding> {
        self.bindings.values()
    }

    /// All tracks: master tracks first, then each binding's tracks.
    ///
    /// This is the traversal order batch edits use.
    pub fn all_tracks(&self) -> impl Iterator<Item = &Track> {
        self.master_tracks
            .values()
            .chain(self.bindings.values().flat_map(ObjectBinding::tracks))
    }

    /// Mutable traversal over every track
    pub fn all_tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.master_tracks
            .values_mut()
            .chain(self.bindings.values_mut().flat_map(ObjectBinding::tracks_mut))
    }

    /// Total number of keys in the document
    pub fn key_count(&self) -> usize {
        self.all_tracks().map(Track::key_count).sum()
    }

    /// Load a sequence document from a RON file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let sequence: Sequence = ron::from_str(&content)?;

        if sequence.version > SEQUENCE_FORMAT_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: sequence.version,
                supported: SEQUENCE_FORMAT_VERSION,
            });
        }

        Ok(sequence)
    }

    /// Save the sequence document to a RON file
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new("Untitled Sequence")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, ChannelKind};
    use crate::key::KeyValue;
    use crate::section::Section;

    fn sample_sequence() -> Sequence {
        let mut sequence = Sequence::new("Test");
        let mut track = Track::new("Fade");
        let section = track.add_section(Section::new("clip"));
        let channel = section.add_channel(Channel::new("alpha", ChannelKind::Float));
        channel.add_key(0, KeyValue::Float(0.0)).unwrap();
        channel.add_key(16_000, KeyValue::Float(1.0)).unwrap();
        sequence.add_master_track(track);

        let mut binding = ObjectBinding::new("Hero");
        let mut track = Track::new("Visibility");
        let section = track.add_section(Section::new("clip"));
        let channel = section.add_channel(Channel::new("visible", ChannelKind::Bool));
        channel.add_key(8_000, KeyValue::Bool(true)).unwrap();
        binding.add_track(track);
        sequence.add_binding(binding);

        sequence
    }

    #[test]
    fn test_ticks_per_display_frame() {
        let sequence = Sequence::new("s");
        assert_eq!(sequence.ticks_per_display_frame(), Some(800));

        let odd = Sequence::new("odd").with_display_rate(FrameRate::new(30_000, 1001).unwrap());
        assert_eq!(odd.ticks_per_display_frame(), None);
    }

    #[test]
    fn test_all_tracks_visits_masters_then_bindings() {
        let sequence = sample_sequence();
        let names: Vec<&str> = sequence.all_tracks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Fade", "Visibility"]);
        assert_eq!(sequence.key_count(), 3);
    }

    #[test]
    fn test_ron_round_trip() {
        let sequence = sample_sequence();
        let text = ron::ser::to_string_pretty(&sequence, ron::ser::PrettyConfig::default())
            .unwrap();
        let loaded: Sequence = ron::from_str(&text).unwrap();
        assert_eq!(loaded.name, "Test");
        assert_eq!(loaded.key_count(), 3);
        assert_eq!(loaded.display_rate, FrameRate::FPS_30);
    }

    #[test]
    fn test_version_check() {
        let mut sequence = Sequence::new("future");
        sequence.version = SEQUENCE_FORMAT_VERSION + 1;
        let dir = std::env::temp_dir().join("keyforge_sequence_version_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("future.ron");
        sequence.save(&path).unwrap();

        let err = Sequence::load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedVersion { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
