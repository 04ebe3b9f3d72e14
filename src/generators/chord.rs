// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pad composer.
//!
//! Holds one triad per bar, cycling through a four-chord progression
//! chosen once for the whole track.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::{jittered_velocity, Role, Track, BAR_BEATS};
use crate::error::Result;
use crate::music::chord::{triad, Progression, PROGRESSIONS};
use crate::music::scale::{resolve, MidiNote, ScaleType};

/// Base pad velocity
const PAD_VELOCITY: u8 = 80;

/// Maximum velocity deviation either way
const PAD_VELOCITY_JITTER: i16 = 5;

/// Compose the pad with a randomly chosen progression
pub fn compose_pad<R: Rng + ?Sized>(
    root: MidiNote,
    scale: ScaleType,
    bars: u32,
    rng: &mut R,
) -> Result<Track> {
    let progression = PROGRESSIONS.choose(rng).copied().unwrap_or(PROGRESSIONS[0]);
    compose_pad_with(root, scale, bars, &progression, rng)
}

/// Compose the pad over a given progression.
///
/// Bar `b` plays `progression[b % 4]`: all three tones start on the bar
/// line and ring for the whole bar.
pub fn compose_pad_with<R: Rng + ?Sized>(
    root: MidiNote,
    scale: ScaleType,
    bars: u32,
    progression: &Progression,
    rng: &mut R,
) -> Result<Track> {
    let notes = resolve(root, scale)?;
    let mut track = Track::new(Role::Pad);
    debug!(?progression, bars, "pad progression");

    for bar in 0..bars as usize {
        let degree = progression[bar % progression.len()];
        for pitch in triad(&notes, degree) {
            let jitter = rng.gen_range(-PAD_VELOCITY_JITTER..=PAD_VELOCITY_JITTER);
            track.note_at_cursor(pitch, BAR_BEATS, jittered_velocity(PAD_VELOCITY, jitter));
        }
        track.advance(BAR_BEATS);
    }

    Ok(track)
}
