// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fixed rhythm templates.
//!
//! Every pattern is eight sixteenth-note steps. The melodic catalogue is
//! shared by lead and bass; the drum templates never change.

use rand::seq::SliceRandom;
use rand::Rng;

/// Steps per pattern
pub const PATTERN_STEPS: usize = 8;

/// Trigger flags, one per sixteenth step
pub type RhythmPattern = [bool; PATTERN_STEPS];

const fn pattern(bits: [u8; PATTERN_STEPS]) -> RhythmPattern {
    let mut out = [false; PATTERN_STEPS];
    let mut i = 0;
    while i < PATTERN_STEPS {
        out[i] = bits[i] != 0;
        i += 1;
    }
    out
}

/// Melodic/bass catalogue
pub static MELODIC_PATTERNS: [RhythmPattern; 3] = [
    // Straight
    pattern([1, 0, 1, 0, 1, 0, 1, 0]),
    // Syncopated
    pattern([1, 0, 0, 1, 1, 0, 0, 1]),
    // Double notes
    pattern([1, 1, 0, 0, 1, 1, 0, 0]),
];

/// Kick on steps 1 and 5
pub const KICK_PATTERN: RhythmPattern = pattern([1, 0, 0, 0, 1, 0, 0, 0]);

/// Snare on steps 3 and 7
pub const SNARE_PATTERN: RhythmPattern = pattern([0, 0, 1, 0, 0, 0, 1, 0]);

/// Continuous closed hat
pub const HIHAT_PATTERN: RhythmPattern = pattern([1; PATTERN_STEPS]);

/// Pick one melodic pattern uniformly
pub fn choose_pattern<R: Rng + ?Sized>(rng: &mut R) -> &'static RhythmPattern {
    MELODIC_PATTERNS
        .choose(rng)
        .unwrap_or(&MELODIC_PATTERNS[0])
}

/// Number of triggered steps
pub fn hits(pattern: &RhythmPattern) -> usize {
    pattern.iter().filter(|&&on| on).count()
}
