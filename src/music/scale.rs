// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale table for pitch resolution.
//!
//! Maps the four supported scale names to their seven intervals and
//! resolves a root pitch into the ordered pitch collection the
//! composers draw from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Number of tones in every supported scale
pub const SCALE_LEN: usize = 7;

/// Resolved scale pitches, lowest first
pub type ScaleNotes = [MidiNote; SCALE_LEN];

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse a note name (e.g., "C", "C#", "Db")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" => Some(Note::C),
            "C#" | "CS" | "DB" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" | "DS" | "EB" => Some(Note::Ds),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" => Some(Note::F),
            "F#" | "FS" | "GB" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" | "GS" | "AB" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" | "AS" | "BB" => Some(Note::As),
            "B" | "CB" => Some(Note::B),
            _ => None,
        }
    }

    /// MIDI key in the octave starting at middle C (60-71)
    pub fn middle_octave_key(self) -> MidiNote {
        60 + self.pitch_class()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        };
        write!(f, "{}", name)
    }
}

/// Scale types supported by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    /// Natural minor (Aeolian)
    Minor,
    Major,
    HarmonicMinor,
    /// Minor with lowered 2nd
    Phrygian,
}

impl ScaleType {
    /// Every supported scale
    pub const ALL: [ScaleType; 4] = [
        ScaleType::Minor,
        ScaleType::Major,
        ScaleType::HarmonicMinor,
        ScaleType::Phrygian,
    ];

    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> [u8; SCALE_LEN] {
        match self {
            ScaleType::Minor => [0, 2, 3, 5, 7, 8, 10],
            ScaleType::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleType::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
            ScaleType::Phrygian => [0, 1, 3, 5, 7, 8, 10],
        }
    }

    /// Parse a scale name, failing with `UnknownScale`
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "minor" => Ok(ScaleType::Minor),
            "major" => Ok(ScaleType::Major),
            "harmonic_minor" => Ok(ScaleType::HarmonicMinor),
            "phrygian" => Ok(ScaleType::Phrygian),
            _ => Err(GenError::UnknownScale(name.to_string())),
        }
    }

    /// Name as used in parameter files
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Minor => "minor",
            ScaleType::Major => "major",
            ScaleType::HarmonicMinor => "harmonic_minor",
            ScaleType::Phrygian => "phrygian",
        }
    }
}

impl FromStr for ScaleType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        ScaleType::parse(s)
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolve a root pitch and scale into its seven pitches.
///
/// Each entry is `root + interval[i]`. Fails when the top of the scale
/// would leave the MIDI range.
pub fn resolve(root: MidiNote, scale: ScaleType) -> Result<ScaleNotes> {
    let intervals = scale.intervals();
    let top = root as i64 + intervals[SCALE_LEN - 1] as i64;
    if root > 127 || top > 127 {
        return Err(GenError::InvalidParameterRange {
            field: "key",
            value: root as i64,
            min: 0,
            max: 127 - intervals[SCALE_LEN - 1] as i64,
        });
    }

    let mut notes = [0u8; SCALE_LEN];
    for (note, interval) in notes.iter_mut().zip(intervals) {
        *note = root + interval;
    }
    Ok(notes)
}

/// Resolve using a scale name
pub fn resolve_named(root: MidiNote, name: &str) -> Result<ScaleNotes> {
    resolve(root, ScaleType::parse(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_shape() {
        for scale in ScaleType::ALL {
            let intervals = scale.intervals();
            assert_eq!(intervals[0], 0);
            assert!(intervals.windows(2).all(|w| w[0] < w[1]));
            assert!(intervals.iter().all(|&i| i < 12));
        }
    }

    #[test]
    fn test_resolve_c_minor() {
        let notes = resolve(60, ScaleType::Minor).unwrap();
        assert_eq!(notes, [60, 62, 63, 65, 67, 68, 70]);
    }

    #[test]
    fn test_resolve_all_scales_offsets() {
        for scale in ScaleType::ALL {
            let notes = resolve(64, scale).unwrap();
            assert_eq!(notes.len(), 7);
            assert_eq!(notes[0], 64);
            assert!(notes.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_resolve_named() {
        assert_eq!(
            resolve_named(57, "harmonic_minor").unwrap(),
            [57, 59, 60, 62, 64, 65, 68]
        );
        assert_eq!(
            resolve_named(60, "phrygian").unwrap(),
            [60, 61, 63, 65, 67, 68, 70]
        );
    }

    #[test]
    fn test_unknown_scale() {
        let err = resolve_named(60, "dorian").unwrap_err();
        assert!(matches!(err, GenError::UnknownScale(ref s) if s == "dorian"));
    }

    #[test]
    fn test_resolve_out_of_range() {
        assert!(resolve(117, ScaleType::Major).is_err());
        assert!(resolve(116, ScaleType::Major).is_ok());
    }

    #[test]
    fn test_scale_name_round_trip() {
        for scale in ScaleType::ALL {
            assert_eq!(scale.name().parse::<ScaleType>().unwrap(), scale);
        }
    }

    #[test]
    fn test_note_parse() {
        assert_eq!(Note::parse("C#"), Some(Note::Cs));
        assert_eq!(Note::parse("db"), Some(Note::Cs));
        assert_eq!(Note::parse("H"), None);
        assert_eq!(Note::A.middle_octave_key(), 69);
        assert_eq!(Note::from_pitch_class(11), Note::B);
        assert_eq!(Note::Fs.to_string(), "F#");
    }
}
