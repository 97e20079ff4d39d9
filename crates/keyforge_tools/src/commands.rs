// SPDX-License-Identifier: MIT OR Apache-2.0
//! CLI commands.

use clap::{Parser, Subcommand};
use keyforge_sequencer::{
    batch, Channel, ChannelError, ChannelKind, CurveAttributes, DocumentError, EditError,
    EditReport, InterpMode, Key, KeyValue, ObjectBinding, Section, Sequence, TangentMode,
    TangentWeightMode, Track,
};
use keyforge_timebase::{transform_time, FrameTime};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Command-line interface for KeyForge
#[derive(Parser)]
#[command(name = "keyforge", version, about = "Batch keyframe editing for sequence documents")]
pub struct Cli {
    /// Apply the sweep but do not save the document
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Exit with an error when a sweep reports per-key failures
    #[arg(long, global = true)]
    pub strict: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Write a demo sequence document exercising every channel kind
    Init {
        /// Destination path for the `.ron` document
        path: PathBuf,
    },
    /// Print the tracks, channels and keys of a document
    Inspect {
        /// Sequence document to read
        path: PathBuf,
    },
    /// Flip the value of every bool key
    FlipBools {
        /// Sequence document to edit
        path: PathBuf,
    },
    /// Add a delta to every numeric key's value
    ShiftValues {
        /// Sequence document to edit
        path: PathBuf,
        /// Amount to add to each key
        #[arg(long, allow_hyphen_values = true)]
        delta: f64,
        /// Sweep every channel kind, aggregating failures on bool/text keys
        #[arg(long)]
        all: bool,
    },
    /// Move every key by a number of display-rate frames
    Retime {
        /// Sequence document to edit
        path: PathBuf,
        /// Frame delta at the sequence's display rate (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        frames: i64,
    },
    /// Set every float key to Cubic interpolation with Auto tangents
    NormalizeTangents {
        /// Sequence document to edit
        path: PathBuf,
    },
    /// Scale the tangent weights of eligible float keys
    ScaleWeights {
        /// Sequence document to edit
        path: PathBuf,
        /// Multiplier for arrive/leave weights (must be >= 0)
        #[arg(long)]
        factor: f64,
    },
    /// Append a suffix to every text key
    AppendSuffix {
        /// Sequence document to edit
        path: PathBuf,
        /// Suffix to append
        #[arg(long)]
        suffix: String,
    },
    /// Insert a flipped key at half of each bool key's position
    InsertMidpoints {
        /// Sequence document to edit
        path: PathBuf,
    },
}

/// CLI command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Document could not be loaded or saved
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Edit operation failed outright
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Key insertion was rejected while building the demo document
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// `--strict` was set and the sweep reported per-key failures
    #[error("{0} keys failed during the sweep")]
    SweepFailures(usize),
}

/// Run the parsed command
pub fn run(cli: Cli) -> Result<(), CommandError> {
    let dry_run = cli.dry_run;
    let strict = cli.strict;

    match cli.command {
        Command::Init { path } => init(&path),
        Command::Inspect { path } => inspect(&path),
        Command::FlipBools { path } => {
            apply_sweep(&path, dry_run, strict, |s| Ok(batch::toggle_bool_keys(s)))
        }
        Command::ShiftValues { path, delta, all } => {
            apply_sweep(&path, dry_run, strict, |s| {
                Ok(if all {
                    batch::shift_all_values(s, delta)
                } else {
                    batch::shift_numeric_keys(s, delta)
                })
            })
        }
        Command::Retime { path, frames } => {
            apply_sweep(&path, dry_run, strict, |s| Ok(batch::retime_keys(s, frames)))
        }
        Command::NormalizeTangents { path } => {
            apply_sweep(&path, dry_run, strict, |s| Ok(batch::normalize_float_keys(s)))
        }
        Command::ScaleWeights { path, factor } => {
            apply_sweep(&path, dry_run, strict, |s| {
                batch::scale_float_tangent_weights(s, factor)
            })
        }
        Command::AppendSuffix { path, suffix } => {
            apply_sweep(&path, dry_run, strict, |s| {
                Ok(batch::append_text_suffix(s, &suffix))
            })
        }
        Command::InsertMidpoints { path } => {
            apply_sweep(&path, dry_run, strict, |s| {
                Ok(batch::insert_midpoint_bool_keys(s))
            })
        }
    }
}

/// Load, sweep, report, save.
fn apply_sweep(
    path: &Path,
    dry_run: bool,
    strict: bool,
    sweep: impl FnOnce(&mut Sequence) -> Result<EditReport, EditError>,
) -> Result<(), CommandError> {
    let mut sequence = Sequence::load(path)?;
    info!(sequence = %sequence.name, keys = sequence.key_count(), "loaded {}", path.display());

    let report = sweep(&mut sequence)?;
    for (key, error) in &report.failures {
        warn!("key {:?}: {error}", key.0);
    }
    if strict && !report.is_clean() {
        return Err(CommandError::SweepFailures(report.failures.len()));
    }

    if dry_run {
        info!("dry run, document not saved");
    } else {
        sequence.save(path)?;
        info!("saved {}", path.display());
    }
    Ok(())
}

/// Write the demo document.
fn init(path: &Path) -> Result<(), CommandError> {
    let sequence = demo_sequence()?;
    sequence.save(path)?;
    info!(
        keys = sequence.key_count(),
        "wrote demo sequence to {}",
        path.display()
    );
    Ok(())
}

/// A small document exercising every channel kind, including one key with
/// user-weighted tangents so the weight-scaling sweep has a target.
fn demo_sequence() -> Result<Sequence, ChannelError> {
    let mut sequence = Sequence::new("Demo Sequence");
    let ticks_per_frame = sequence.ticks_per_display_frame().unwrap_or(1);

    let mut track = Track::new("Fade");
    let section = track.add_section(Section::new("fade_in"));
    section.set_range(0, 10 * ticks_per_frame);
    let channel = section.add_channel(Channel::new("alpha", ChannelKind::Float));
    channel.add_key(0, KeyValue::Float(0.0))?;
    let mid = channel.add_key(5 * ticks_per_frame, KeyValue::Float(0.5))?;
    channel.add_key(10 * ticks_per_frame, KeyValue::Float(1.0))?;
    if let Some(key) = channel.key_mut(mid) {
        key.curve = Some(CurveAttributes {
            interp: InterpMode::Cubic,
            tangent_mode: TangentMode::User,
            weight_mode: TangentWeightMode::Both,
            arrive_tangent: 0.1,
            leave_tangent: 0.1,
            arrive_weight: 2.0,
            leave_weight: 3.0,
        });
    }
    sequence.add_master_track(track);

    let mut binding = ObjectBinding::new("Hero").with_target_path("Hero.Properties");
    let mut track = Track::new("Properties");
    let section = track.add_section(Section::new("clip"));
    let channel = section.add_channel(Channel::new("visible", ChannelKind::Bool));
    channel.add_key(2 * ticks_per_frame, KeyValue::Bool(true))?;
    channel.add_key(8 * ticks_per_frame, KeyValue::Bool(false))?;
    let channel = section.add_channel(Channel::new("health", ChannelKind::Integer));
    channel.add_key(0, KeyValue::Integer(100))?;
    channel.add_key(6 * ticks_per_frame, KeyValue::Integer(50))?;
    let channel = section.add_channel(Channel::new("caption", ChannelKind::Text));
    channel.add_key(ticks_per_frame, KeyValue::Text("Take1".into()))?;
    binding.add_track(track);
    sequence.add_binding(binding);

    Ok(sequence)
}

/// Dump the document to stdout.
fn inspect(path: &Path) -> Result<(), CommandError> {
    let sequence = Sequence::load(path)?;

    println!("Sequence: {}", sequence.name);
    println!(
        "  display rate {}, tick resolution {}",
        sequence.display_rate, sequence.tick_resolution
    );
    if let Some(ticks) = sequence.ticks_per_display_frame() {
        println!("  {ticks} ticks per display frame");
    }

    for track in sequence.all_tracks() {
        println!("Track: {} ({} keys)", track.name, track.key_count());
        for section in track.sections() {
            match section.range {
                Some((start, end)) => {
                    println!("  Section: {} [{start}..{end})", section.name);
                }
                None => println!("  Section: {}", section.name),
            }
            for channel in section.channels() {
                println!(
                    "    Channel: {} ({}, {} keys)",
                    channel.name,
                    channel.kind().name(),
                    channel.key_count()
                );
                for key in channel.keys() {
                    print_key(&sequence, key)?;
                }
            }
        }
    }
    Ok(())
}

fn print_key(sequence: &Sequence, key: &Key) -> Result<(), CommandError> {
    let display = transform_time(
        FrameTime::from_frame(key.tick),
        sequence.tick_resolution,
        sequence.display_rate,
    )
    .map_err(EditError::from)?;

    let value = match &key.value {
        KeyValue::Bool(v) => v.to_string(),
        KeyValue::Integer(v) => v.to_string(),
        KeyValue::Float(v) => format!("{v:.3}"),
        KeyValue::Text(v) => format!("{v:?}"),
    };

    match key.curve {
        Some(c) => println!(
            "      frame {display} (tick {}) = {value} \
             [{:?}/{:?}/{:?} arrive {:+.4}w{:.2} leave {:+.4}w{:.2}]",
            key.tick,
            c.interp,
            c.tangent_mode,
            c.weight_mode,
            c.arrive_tangent,
            c.arrive_weight,
            c.leave_tangent,
            c.leave_weight
        ),
        None => println!("      frame {display} (tick {}) = {value}", key.tick),
    }
    Ok(())
}
