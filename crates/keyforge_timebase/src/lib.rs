// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timebase primitives for KeyForge.
//!
//! This crate provides the time arithmetic the sequencer is built on:
//! - Rational frame rates (display rates and tick resolutions)
//! - Frame times with sub-frame precision
//! - Exact conversion between time bases
//! - Snapping onto the integer tick grid
//!
//! ## Architecture
//!
//! Every timeline carries two rates: a *display rate* (what the user sees,
//! e.g. 30 fps) and a *tick resolution* (the fine-grained integer clock all
//! key positions are stored on, e.g. 24 000 ticks per second). Conversions
//! between the two use integer arithmetic wherever possible so that
//! round-trips between evenly divisible rates are exact.

pub mod rate;
pub mod time;

pub use rate::{FrameRate, RateError};
pub use time::{snap_to_ticks, transform_time, FrameTime, TickSnap};
