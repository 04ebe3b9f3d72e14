// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file writer.
//!
//! Writes a session as a Type 1 file with one chunk per role. The first
//! chunk also carries the tempo and time signature for the whole file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::arrangement::Session;
use crate::error::{GenError, Result};
use crate::generators::{NoteEvent, Track};

/// Largest delta a variable-length quantity can hold
const MAX_VLQ: u64 = 0x0FFF_FFFF;

/// Largest microseconds-per-quarter a tempo event can hold
const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// A track ready for encoding
#[derive(Debug, Clone)]
struct ExportTrack {
    /// Track name
    name: String,
    /// MIDI channel (0-15)
    channel: u8,
    /// Notes in this track
    notes: Vec<ExportNote>,
}

impl ExportTrack {
    /// Convert a composed track, checking every note
    fn from_track(track: &Track, ppqn: u16) -> Result<Self> {
        let channel = track.channel();
        if channel > 15 {
            return Err(GenError::SerializationError(format!(
                "channel {} on {} track",
                channel,
                track.role()
            )));
        }

        let notes = track
            .events()
            .iter()
            .map(|event| ExportNote::from_event(event, track, ppqn))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: track.role().name().to_string(),
            channel,
            notes,
        })
    }
}

/// A note in ticks, clamped to legal byte values
#[derive(Debug, Clone, PartialEq)]
struct ExportNote {
    /// Start tick
    tick: u64,
    /// Note number (0-127)
    note: u8,
    /// Velocity (1-127)
    velocity: u8,
    /// Duration in ticks
    duration: u64,
}

impl ExportNote {
    fn from_event(event: &NoteEvent, track: &Track, ppqn: u16) -> Result<Self> {
        if event.track as usize != track.role().index() || event.channel != track.channel() {
            return Err(GenError::SerializationError(format!(
                "note on track {} channel {} filed under {} track",
                event.track,
                event.channel,
                track.role()
            )));
        }
        if !event.start.is_finite() || event.start < 0.0 {
            return Err(GenError::SerializationError(format!(
                "note start {} is not a non-negative beat position",
                event.start
            )));
        }
        if !event.duration.is_finite() || event.duration <= 0.0 {
            return Err(GenError::SerializationError(format!(
                "note duration {} must be positive",
                event.duration
            )));
        }

        let tick = beats_to_ticks(event.start, ppqn);
        let end = beats_to_ticks(event.end(), ppqn).max(tick + 1);

        Ok(Self {
            tick,
            // A zero-velocity note-on would read back as a note-off
            note: event.pitch.min(127),
            velocity: event.velocity.clamp(1, 127),
            duration: end - tick,
        })
    }

    /// End tick
    fn end_tick(&self) -> u64 {
        self.tick + self.duration
    }
}

fn beats_to_ticks(beats: f64, ppqn: u16) -> u64 {
    (beats * ppqn as f64).round() as u64
}

/// MIDI event for export
#[derive(Debug, Clone)]
struct MidiExportEvent {
    /// Absolute tick
    tick: u64,
    /// Ordering among events on the same tick
    order: u8,
    /// Event data
    data: Vec<u8>,
}

impl MidiExportEvent {
    const META: u8 = 0;
    const OFF: u8 = 1;
    const ON: u8 = 2;

    fn note_on(tick: u64, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            tick,
            order: Self::ON,
            data: vec![0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
        }
    }

    fn note_off(tick: u64, channel: u8, note: u8) -> Self {
        Self {
            tick,
            order: Self::OFF,
            data: vec![0x80 | (channel & 0x0F), note & 0x7F, 0],
        }
    }

    fn tempo(tick: u64, bpm: u32) -> Result<Self> {
        // Tempo data is three bytes of microseconds per quarter note
        let microseconds = match 60_000_000u32.checked_div(bpm) {
            Some(us) if us <= MAX_TEMPO_MICROS => us,
            _ => {
                return Err(GenError::SerializationError(format!(
                    "tempo {} BPM does not fit a tempo event",
                    bpm
                )))
            }
        };
        Ok(Self {
            tick,
            order: Self::META,
            data: vec![
                0xFF, 0x51, 0x03,
                ((microseconds >> 16) & 0xFF) as u8,
                ((microseconds >> 8) & 0xFF) as u8,
                (microseconds & 0xFF) as u8,
            ],
        })
    }

    fn time_signature(tick: u64, numerator: u8, denominator: u8) -> Self {
        // Denominator is expressed as power of 2
        let denom_power = denominator.max(1).trailing_zeros() as u8;
        Self {
            tick,
            order: Self::META,
            data: vec![
                0xFF, 0x58, 0x04,
                numerator,
                denom_power,
                24, // MIDI clocks per metronome click
                8,  // 32nd notes per MIDI quarter note
            ],
        }
    }

    fn track_name(tick: u64, name: &str) -> Self {
        let bytes = &name.as_bytes()[..name.len().min(127)];
        let mut data = vec![0xFF, 0x03, bytes.len() as u8];
        data.extend_from_slice(bytes);
        Self {
            tick,
            order: Self::META,
            data,
        }
    }

    fn end_of_track() -> Self {
        Self {
            tick: 0, // Written with a zero delta after the last event
            order: Self::META,
            data: vec![0xFF, 0x2F, 0x00],
        }
    }
}

/// Session-to-SMF writer
#[derive(Debug, Clone)]
pub struct MidiExporter {
    /// PPQN (ticks per quarter note)
    ppqn: u16,
    /// Time signature
    time_sig: (u8, u8),
}

impl MidiExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self {
            ppqn: 480,
            time_sig: (4, 4),
        }
    }

    /// Get PPQN
    pub fn ppqn(&self) -> u16 {
        self.ppqn
    }

    /// Get time signature
    pub fn time_signature(&self) -> (u8, u8) {
        self.time_sig
    }

    /// Export to file
    pub fn export<P: AsRef<Path>>(&self, session: &Session, path: P) -> Result<()> {
        // Encode fully before touching the file
        let bytes = self.to_bytes(session)?;
        let mut file = BufWriter::new(File::create(path.as_ref())?);
        file.write_all(&bytes)?;
        file.flush()?;
        info!(path = ?path.as_ref(), bytes = bytes.len(), "sequence written");
        Ok(())
    }

    /// Export to bytes
    pub fn to_bytes(&self, session: &Session) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(session, &mut buffer)?;
        Ok(buffer)
    }

    /// Write MIDI data to writer
    pub fn write<W: Write>(&self, session: &Session, writer: &mut W) -> Result<()> {
        let tempo = MidiExportEvent::tempo(0, session.tempo())?;
        let tracks = session
            .tracks()
            .iter()
            .map(|t| ExportTrack::from_track(t, self.ppqn))
            .collect::<Result<Vec<_>>>()?;

        self.write_header(writer, 1, tracks.len() as u16)?;

        for (i, track) in tracks.iter().enumerate() {
            let mut events = vec![MidiExportEvent::track_name(0, &track.name)];

            if i == 0 {
                events.push(tempo.clone());
                events.push(MidiExportEvent::time_signature(
                    0,
                    self.time_sig.0,
                    self.time_sig.1,
                ));
            }

            for note in &track.notes {
                events.push(MidiExportEvent::note_on(
                    note.tick,
                    track.channel,
                    note.note,
                    note.velocity,
                ));
                events.push(MidiExportEvent::note_off(
                    note.end_tick(),
                    track.channel,
                    note.note,
                ));
            }

            // Stable: same-tick events keep insertion order within a class
            events.sort_by_key(|e| (e.tick, e.order));
            debug!(track = %track.name, events = events.len(), "encoding track");
            self.write_track(writer, &events)?;
        }

        Ok(())
    }

    /// Write MIDI file header chunk
    fn write_header<W: Write>(&self, writer: &mut W, format: u16, num_tracks: u16) -> Result<()> {
        // MThd
        writer.write_all(b"MThd")?;
        // Chunk length (always 6)
        writer.write_all(&[0, 0, 0, 6])?;
        writer.write_all(&format.to_be_bytes())?;
        writer.write_all(&num_tracks.to_be_bytes())?;
        writer.write_all(&self.ppqn.to_be_bytes())?;
        Ok(())
    }

    /// Write a track chunk
    fn write_track<W: Write>(&self, writer: &mut W, events: &[MidiExportEvent]) -> Result<()> {
        let mut track_data = Vec::new();
        let mut last_tick = 0u64;

        for event in events {
            let delta = event.tick.saturating_sub(last_tick);
            write_variable_length(&mut track_data, delta)?;
            track_data.extend_from_slice(&event.data);
            last_tick = event.tick;
        }

        let end_event = MidiExportEvent::end_of_track();
        write_variable_length(&mut track_data, end_event.tick)?;
        track_data.extend_from_slice(&end_event.data);

        // MTrk
        writer.write_all(b"MTrk")?;
        let length = u32::try_from(track_data.len()).map_err(|_| {
            GenError::SerializationError(format!("track chunk of {} bytes", track_data.len()))
        })?;
        writer.write_all(&length.to_be_bytes())?;
        writer.write_all(&track_data)?;

        Ok(())
    }
}

impl Default for MidiExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a variable-length quantity
fn write_variable_length(buf: &mut Vec<u8>, value: u64) -> Result<()> {
    if value > MAX_VLQ {
        return Err(GenError::SerializationError(format!(
            "delta of {} ticks exceeds the variable-length limit",
            value
        )));
    }
    let mut value = value as u32;
    let mut bytes = Vec::with_capacity(4);

    bytes.push((value & 0x7F) as u8);
    value >>= 7;

    while value > 0 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }

    bytes.reverse();
    buf.extend_from_slice(&bytes);
    Ok(())
}
