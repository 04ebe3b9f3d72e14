// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Trance pattern generator.
//!
//! Turns a key, scale, tempo and length into a four-track Standard MIDI
//! File: lead, pad, bass and drums.
//!
//! ```no_run
//! use trancegen::{export, GenerationParams, RoleSet, Session};
//!
//! let params = GenerationParams::default();
//! let session = Session::compose(&params, RoleSet::all(), 42)?;
//! export::export(&session, "trance_track.mid")?;
//! # Ok::<(), trancegen::GenError>(())
//! ```

pub mod arrangement;
pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod music;

pub use arrangement::{RoleSet, Session};
pub use config::{GenerationParams, DEFAULT_PARAMS};
pub use error::{GenError, Result};
pub use export::MidiExporter;
pub use generators::{NoteEvent, Role, Track};
pub use music::ScaleType;
