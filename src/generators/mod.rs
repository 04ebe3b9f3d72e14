// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track composers for the four instrument roles.
//!
//! Each composer builds one [`Track`] of [`NoteEvent`]s on an advancing
//! time cursor measured in beats. Randomness comes only from the `Rng`
//! handed in by the caller, so a seeded generator reproduces a track
//! exactly.

pub mod chord;
pub mod drums;
pub mod melody;
pub mod patterns;

use std::fmt;

pub use chord::compose_pad;
pub use drums::compose_drums;
pub use melody::{compose_bass, compose_lead};
pub use patterns::RhythmPattern;

/// Length of one pattern step (a sixteenth note) in beats
pub const STEP_BEATS: f64 = 0.25;

/// Beats covered by one pad bar
pub const BAR_BEATS: f64 = 4.0;

/// MIDI channel reserved for percussion (channel 10, zero-based)
pub const DRUM_CHANNEL: u8 = 9;

/// Instrument role of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Lead,
    Pad,
    Bass,
    Drums,
}

impl Role {
    /// All roles in file order
    pub const ALL: [Role; 4] = [Role::Lead, Role::Pad, Role::Bass, Role::Drums];

    /// Track index in the output file (0-3)
    pub fn index(self) -> usize {
        match self {
            Role::Lead => 0,
            Role::Pad => 1,
            Role::Bass => 2,
            Role::Drums => 3,
        }
    }

    /// MIDI channel (0-15) used by this role
    pub fn channel(self) -> u8 {
        match self {
            Role::Lead => 0,
            Role::Pad => 1,
            Role::Bass => 2,
            Role::Drums => DRUM_CHANNEL,
        }
    }

    /// Parse a role name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lead" => Some(Role::Lead),
            "pad" => Some(Role::Pad),
            "bass" | "bassline" => Some(Role::Bass),
            "drums" | "drum" => Some(Role::Drums),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Lead => "Lead",
            Role::Pad => "Pad",
            Role::Bass => "Bass",
            Role::Drums => "Drums",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single timed note produced by a composer
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    /// Track index (0-3)
    pub track: u8,
    /// MIDI channel (0-15)
    pub channel: u8,
    /// MIDI note number (0-127)
    pub pitch: u8,
    /// Start time in beats
    pub start: f64,
    /// Duration in beats
    pub duration: f64,
    /// Velocity (0-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// End time in beats
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Base velocity plus jitter, clamped to the MIDI range
pub fn jittered_velocity(base: u8, jitter: i16) -> u8 {
    (base as i16 + jitter).clamp(0, 127) as u8
}

/// Append-only note list for one role
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    role: Role,
    events: Vec<NoteEvent>,
    /// Time cursor in beats
    cursor: f64,
}

impl Track {
    /// Create an empty track for a role
    pub fn new(role: Role) -> Self {
        Self {
            role,
            events: Vec::new(),
            cursor: 0.0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// MIDI channel all notes on this track use
    pub fn channel(&self) -> u8 {
        self.role.channel()
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Current time cursor in beats
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Add a note at the cursor
    pub fn note_at_cursor(&mut self, pitch: u8, duration: f64, velocity: u8) {
        self.events.push(NoteEvent {
            track: self.role.index() as u8,
            channel: self.role.channel(),
            pitch,
            start: self.cursor,
            duration,
            velocity: velocity.min(127),
        });
    }

    /// Move the cursor forward
    pub fn advance(&mut self, beats: f64) {
        if beats > 0.0 {
            self.cursor += beats;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_layout() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
        assert_eq!(Role::Drums.channel(), DRUM_CHANNEL);
        assert_eq!(Role::Lead.channel(), 0);
        assert_eq!(Role::Pad.channel(), 1);
        assert_eq!(Role::Bass.channel(), 2);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Lead"), Some(Role::Lead));
        assert_eq!(Role::parse(" bassline "), Some(Role::Bass));
        assert_eq!(Role::parse("drum"), Some(Role::Drums));
        assert_eq!(Role::parse("vocals"), None);
    }

    #[test]
    fn test_track_cursor() {
        let mut track = Track::new(Role::Bass);
        track.note_at_cursor(36, STEP_BEATS, 110);
        track.advance(STEP_BEATS);
        track.advance(-1.0);
        track.note_at_cursor(43, STEP_BEATS, 200);

        assert_eq!(track.len(), 2);
        assert_eq!(track.cursor(), 0.25);
        let events = track.events();
        assert_eq!(events[0].start, 0.0);
        assert_eq!(events[1].start, 0.25);
        assert_eq!(events[1].velocity, 127);
        assert_eq!(events[1].track, 2);
        assert_eq!(events[1].channel, 2);
        assert_eq!(events[1].end(), 0.5);
    }

    #[test]
    fn test_jittered_velocity() {
        assert_eq!(jittered_velocity(100, -10), 90);
        assert_eq!(jittered_velocity(120, 10), 127);
        assert_eq!(jittered_velocity(3, -5), 0);
    }
}
