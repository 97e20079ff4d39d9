// SPDX-License-Identifier: MIT OR Apache-2.0
//! Object bindings for sequences.

use crate::track::{Track, TrackId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an object binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingId(pub Uuid);

impl BindingId {
    /// Create a new random binding ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BindingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Binding of a set of tracks to an animated object.
///
/// The target is identified by an explicit property path rather than a live
/// object handle; resolution against a scene is the embedding application's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectBinding {
    /// Unique binding ID
    pub id: BindingId,
    /// Human-readable label (e.g. the bound actor's name)
    pub label: String,
    /// Property path on the bound object, if the binding animates one
    pub target_path: Option<String>,
    /// Tracks owned by this binding
    tracks: IndexMap<TrackId, Track>,
}

impl ObjectBinding {
    /// Create a new binding with no tracks
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: BindingId::new(),
            label: label.into(),
            target_path: None,
            tracks: IndexMap::new(),
        }
    }

    /// Set the target property path
    pub fn with_target_path(mut self, path: impl Into<String>) -> Self {
        self.target_path = Some(path.into());
        self
    }

    /// Add a track
    pub fn add_track(&mut self, track: Track) -> TrackId {
        let id = track.id;
        self.tracks.insert(id, track);
        id
    }

    /// Remove a track
    pub fn remove_track(&mut self, track_id: TrackId) -> Option<Track> {
        self.tracks.swap_remove(&track_id)
    }

    /// Get a track
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// All tracks, in insertion order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Mutable access to all tracks
    pub fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.values_mut()
    }

    /// Track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
