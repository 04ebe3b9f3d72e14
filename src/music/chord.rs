// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord degrees and triad lookup.
//!
//! Only four diatonic degrees are modelled. VI and VII take their upper
//! tones from the start of the scale array without moving them up an
//! octave, so those triads are voiced below their root.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scale::{MidiNote, ScaleNotes};
use crate::error::{GenError, Result};

/// Scale degree a pad chord is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordDegree {
    /// Tonic (minor) triad, written `i`
    #[serde(rename = "i")]
    I,
    III,
    VI,
    VII,
}

impl ChordDegree {
    /// Scale-array indices of the triad tones
    pub fn indices(self) -> [usize; 3] {
        match self {
            ChordDegree::I => [0, 2, 4],
            ChordDegree::III => [2, 4, 6],
            ChordDegree::VI => [5, 0, 2],
            ChordDegree::VII => [6, 1, 3],
        }
    }

    /// Parse a degree symbol. Symbols are case-sensitive.
    pub fn parse(symbol: &str) -> Result<Self> {
        match symbol.trim() {
            "i" => Ok(ChordDegree::I),
            "III" => Ok(ChordDegree::III),
            "VI" => Ok(ChordDegree::VI),
            "VII" => Ok(ChordDegree::VII),
            other => Err(GenError::UnsupportedDegree(other.to_string())),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChordDegree::I => "i",
            ChordDegree::III => "III",
            ChordDegree::VI => "VI",
            ChordDegree::VII => "VII",
        }
    }
}

impl FromStr for ChordDegree {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        ChordDegree::parse(s)
    }
}

impl fmt::Display for ChordDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Four-chord cycle used by the pad
pub type Progression = [ChordDegree; 4];

/// Trance progressions the pad picks from
pub const PROGRESSIONS: [Progression; 3] = [
    // Classic
    [ChordDegree::I, ChordDegree::VI, ChordDegree::III, ChordDegree::VII],
    // Uplifting
    [ChordDegree::I, ChordDegree::VII, ChordDegree::VI, ChordDegree::VII],
    // Progressive
    [ChordDegree::I, ChordDegree::III, ChordDegree::VII, ChordDegree::VI],
];

/// Parse a progression from four degree symbols
pub fn parse_progression(symbols: &[&str]) -> Result<Progression> {
    if symbols.len() != 4 {
        return Err(GenError::InvalidParameterRange {
            field: "progression length",
            value: symbols.len() as i64,
            min: 4,
            max: 4,
        });
    }
    let mut progression = [ChordDegree::I; 4];
    for (slot, symbol) in progression.iter_mut().zip(symbols) {
        *slot = ChordDegree::parse(symbol)?;
    }
    Ok(progression)
}

/// Look up the three pitches of `degree` within resolved scale notes
pub fn triad(scale_notes: &ScaleNotes, degree: ChordDegree) -> [MidiNote; 3] {
    degree.indices().map(|i| scale_notes[i % scale_notes.len()])
}
