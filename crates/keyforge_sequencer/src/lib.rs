// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence document model and keyframe editing for KeyForge.
//!
//! This crate provides cinematic sequence editing:
//! - Typed key channels (bool, integer, float, text)
//! - Sections, tracks and object bindings
//! - Single-key edit operations with per-key atomicity
//! - Sequence-wide batch sweeps with aggregated diagnostics
//! - RON document persistence
//!
//! ## Architecture
//!
//! The document model is plain data: a [`Sequence`] owns master tracks and
//! object bindings, tracks own sections, sections own channels, channels own
//! keys stored on an integer tick clock. Edit operations in [`edit`] mutate
//! one key at a time; the sweeps in [`batch`] walk a whole sequence and
//! aggregate per-key outcomes into an [`EditReport`] instead of aborting on
//! the first failure. Nothing here is a singleton: every operation takes
//! the document objects it works on by reference.

pub mod batch;
pub mod binding;
pub mod channel;
pub mod edit;
pub mod key;
pub mod section;
pub mod sequence;
pub mod track;

pub use binding::{BindingId, ObjectBinding};
pub use channel::{Channel, ChannelError, ChannelId, ChannelKind};
pub use edit::{EditError, EditReport, EditWarning};
pub use key::{CurveAttributes, InterpMode, Key, KeyId, KeyValue, TangentMode, TangentWeightMode};
pub use section::{Section, SectionId};
pub use sequence::{DocumentError, Sequence, SequenceId, SEQUENCE_FORMAT_VERSION};
pub use track::{Track, TrackId};
