// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory tables for the generator.
//!
//! Scale resolution and the small chord-degree model used by the pad.

pub mod chord;
pub mod scale;

pub use chord::{triad, ChordDegree, Progression, PROGRESSIONS};
pub use scale::{resolve, resolve_named, MidiNote, Note, ScaleNotes, ScaleType};
