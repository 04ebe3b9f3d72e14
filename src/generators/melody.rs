// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lead and bass composers.
//!
//! Both walk the bar grid one pattern at a time: a triggered step plays a
//! sixteenth-note pitch drawn from the scale, an empty step is a rest.
//! They differ only in the pitch pool and velocity settings.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::patterns::choose_pattern;
use super::{jittered_velocity, Role, Track, STEP_BEATS};
use crate::error::Result;
use crate::music::scale::{resolve, MidiNote, ScaleNotes, ScaleType};

/// Which scale tones a melodic voice may play
#[derive(Debug, Clone, Copy, PartialEq)]
enum PitchPool {
    /// Any of the seven scale tones
    FullScale,
    /// Root and fifth only
    RootAndFifth,
}

impl PitchPool {
    fn pick<R: Rng + ?Sized>(self, notes: &ScaleNotes, rng: &mut R) -> MidiNote {
        let choice = match self {
            PitchPool::FullScale => notes.choose(rng),
            PitchPool::RootAndFifth => [&notes[0], &notes[4]].choose(rng).copied(),
        };
        choice.copied().unwrap_or(notes[0])
    }
}

/// Settings for one melodic voice
#[derive(Debug, Clone)]
struct MelodicVoice {
    role: Role,
    pool: PitchPool,
    /// Base velocity
    velocity: u8,
    /// Maximum velocity deviation either way
    velocity_jitter: i16,
}

const LEAD: MelodicVoice = MelodicVoice {
    role: Role::Lead,
    pool: PitchPool::FullScale,
    velocity: 100,
    velocity_jitter: 10,
};

const BASS: MelodicVoice = MelodicVoice {
    role: Role::Bass,
    pool: PitchPool::RootAndFifth,
    velocity: 110,
    velocity_jitter: 5,
};

impl MelodicVoice {
    fn compose<R: Rng + ?Sized>(
        &self,
        root: MidiNote,
        scale: ScaleType,
        bars: u32,
        rng: &mut R,
    ) -> Result<Track> {
        let notes = resolve(root, scale)?;
        let mut track = Track::new(self.role);

        for bar in 0..bars {
            let pattern = choose_pattern(rng);
            debug!(role = %self.role, bar, ?pattern, "bar pattern");

            for &triggered in pattern.iter() {
                if triggered {
                    let pitch = self.pool.pick(&notes, rng);
                    let jitter = rng.gen_range(-self.velocity_jitter..=self.velocity_jitter);
                    let velocity = jittered_velocity(self.velocity, jitter);
                    track.note_at_cursor(pitch, STEP_BEATS, velocity);
                }
                // Rests still take up their step
                track.advance(STEP_BEATS);
            }
        }

        Ok(track)
    }
}

/// Compose the lead line.
///
/// `root` is the session key; any scale tone may sound on a triggered step.
pub fn compose_lead<R: Rng + ?Sized>(
    root: MidiNote,
    scale: ScaleType,
    bars: u32,
    rng: &mut R,
) -> Result<Track> {
    LEAD.compose(root, scale, bars, rng)
}

/// Compose the bassline.
///
/// `root` must already be shifted down to the bass register (the session
/// key minus two octaves). Only the root and fifth are played.
pub fn compose_bass<R: Rng + ?Sized>(
    root: MidiNote,
    scale: ScaleType,
    bars: u32,
    rng: &mut R,
) -> Result<Track> {
    BASS.compose(root, scale, bars, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::patterns::MELODIC_PATTERNS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_lead_pitches_in_scale() {
        let mut rng = StdRng::seed_from_u64(42);
        let track = compose_lead(60, ScaleType::Minor, 8, &mut rng).unwrap();
        let notes = resolve(60, ScaleType::Minor).unwrap();

        assert!(!track.is_empty());
        for event in track.events() {
            assert!(notes.contains(&event.pitch));
            assert!((90..=110).contains(&event.velocity));
            assert_eq!(event.duration, STEP_BEATS);
            assert_eq!(event.channel, 0);
            assert_eq!(event.track, 0);
        }
    }

    #[test]
    fn test_lead_cursor_advances_through_rests() {
        let mut rng = StdRng::seed_from_u64(3);
        let track = compose_lead(60, ScaleType::Major, 4, &mut rng).unwrap();
        // 8 steps of a sixteenth per bar, triggered or not
        assert_eq!(track.cursor(), 4.0 * 8.0 * STEP_BEATS);
        // Every catalogue pattern has four hits
        assert_eq!(track.len(), 4 * 4);
    }

    #[test]
    fn test_lead_starts_monotonic_and_on_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        let track = compose_lead(62, ScaleType::Phrygian, 16, &mut rng).unwrap();
        let events = track.events();
        for pair in events.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        for event in events {
            let step = event.start / STEP_BEATS;
            assert_eq!(step.fract(), 0.0);
            let bar = (step as usize) / 8;
            let within = (step as usize) % 8;
            assert!(bar < 16);
            assert!(MELODIC_PATTERNS.iter().any(|p| p[within]));
        }
    }

    #[test]
    fn test_bass_root_and_fifth() {
        let mut rng = StdRng::seed_from_u64(5);
        let track = compose_bass(36, ScaleType::Minor, 8, &mut rng).unwrap();
        assert!(!track.is_empty());
        for event in track.events() {
            assert!(event.pitch == 36 || event.pitch == 43, "pitch {}", event.pitch);
            assert!((105..=115).contains(&event.velocity));
            assert_eq!(event.channel, 2);
        }
    }

    #[test]
    fn test_same_seed_same_notes() {
        let a = compose_lead(60, ScaleType::HarmonicMinor, 8, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = compose_lead(60, ScaleType::HarmonicMinor, 8, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);

        let a = compose_bass(36, ScaleType::Minor, 8, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = compose_bass(36, ScaleType::Minor, 8, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_bars_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let track = compose_lead(60, ScaleType::Minor, 0, &mut rng).unwrap();
        assert!(track.is_empty());
        assert_eq!(track.cursor(), 0.0);
    }

    #[test]
    fn test_out_of_range_root() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(compose_bass(125, ScaleType::Minor, 4, &mut rng).is_err());
    }
}
