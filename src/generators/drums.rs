// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Drum composer.
//!
//! Plays the fixed kick/snare/hat templates every bar on the percussion
//! channel. No randomness is involved.

use tracing::debug;

use super::patterns::{RhythmPattern, HIHAT_PATTERN, KICK_PATTERN, PATTERN_STEPS, SNARE_PATTERN};
use super::{Role, Track, STEP_BEATS};

/// Standard General MIDI drum notes
pub mod gm_drums {
    pub const KICK: u8 = 36;
    pub const SNARE: u8 = 38;
    pub const CLOSED_HAT: u8 = 42;
}

/// One drum instrument and its template
#[derive(Debug, Clone, Copy)]
struct DrumVoice {
    /// MIDI note number
    note: u8,
    /// Hit pattern (8 steps, true = hit)
    pattern: &'static RhythmPattern,
    /// Fixed velocity
    velocity: u8,
}

/// Voices in the order they sound within a step
const VOICES: [DrumVoice; 3] = [
    DrumVoice {
        note: gm_drums::KICK,
        pattern: &KICK_PATTERN,
        velocity: 100,
    },
    DrumVoice {
        note: gm_drums::SNARE,
        pattern: &SNARE_PATTERN,
        velocity: 90,
    },
    DrumVoice {
        note: gm_drums::CLOSED_HAT,
        pattern: &HIHAT_PATTERN,
        velocity: 80,
    },
];

/// Compose `bars` bars of the trance beat
pub fn compose_drums(bars: u32) -> Track {
    let mut track = Track::new(Role::Drums);

    for _ in 0..bars {
        for step in 0..PATTERN_STEPS {
            for voice in VOICES.iter().filter(|v| v.pattern[step]) {
                track.note_at_cursor(voice.note, STEP_BEATS, voice.velocity);
            }
            track.advance(STEP_BEATS);
        }
    }

    debug!(bars, hits = track.len(), "drums composed");
    track
}

/// Drum hits per bar across all voices
pub fn hits_per_bar() -> usize {
    VOICES
        .iter()
        .map(|v| v.pattern.iter().filter(|&&on| on).count())
        .sum()
}
