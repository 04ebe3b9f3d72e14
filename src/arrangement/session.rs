// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One generation request: tempo, length and the four composed tracks.
//!
//! A session is built once from validated parameters, handed to the
//! exporter, then dropped. Each role gets its own RNG stream derived from
//! the request seed, so the result does not depend on which roles were
//! requested or on the order (or threads) they were composed in.
//!
//! A role that cannot be composed is left empty and recorded in
//! [`Session::failures`]; the other roles are unaffected.

use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::GenerationParams;
use crate::error::{GenError, Result};
use crate::generators::{compose_bass, compose_drums, compose_lead, compose_pad, Role, Track};

/// Semitones the bass sits below the session key
pub const BASS_OCTAVE_SHIFT: u8 = 24;

/// Which roles to compose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet([bool; 4]);

impl RoleSet {
    /// All four roles
    pub fn all() -> Self {
        Self([true; 4])
    }

    /// No roles
    pub fn none() -> Self {
        Self([false; 4])
    }

    /// Add a role
    pub fn with(mut self, role: Role) -> Self {
        self.0[role.index()] = true;
        self
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0[role.index()]
    }

    /// Requested roles in file order
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }

    /// Parse a comma-separated list such as `lead,pad,drums`
    pub fn parse(list: &str) -> Option<Self> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .try_fold(Self::none(), |set, name| Role::parse(name).map(|r| set.with(r)))
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::all()
    }
}

/// A role whose composition was aborted
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFailure {
    pub role: Role,
    pub reason: String,
}

/// Composed tracks ready for export
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    params: GenerationParams,
    tracks: [Track; 4],
    failures: Vec<TrackFailure>,
}

impl Session {
    /// Empty session; every track is present but has no notes
    pub fn new(params: GenerationParams) -> Self {
        Self {
            params,
            tracks: Role::ALL.map(Track::new),
            failures: Vec::new(),
        }
    }

    /// Compose the requested roles one after another.
    ///
    /// Fails only when `params` do not validate. A role that fails on its
    /// own (a bass line below MIDI note 0) stays empty and is listed in
    /// [`Session::failures`].
    pub fn compose(params: &GenerationParams, roles: RoleSet, seed: u64) -> Result<Self> {
        params.validate()?;
        let mut session = Session::new(params.clone());

        for role in roles.iter() {
            session.accept(role, compose_role(params, role, seed));
        }

        session.log_summary();
        Ok(session)
    }

    /// Compose the requested roles on worker threads.
    ///
    /// Produces the same session as [`Session::compose`] for the same seed.
    pub fn compose_parallel(params: &GenerationParams, roles: RoleSet, seed: u64) -> Result<Self> {
        params.validate()?;
        let mut session = Session::new(params.clone());

        let results: Vec<(Role, Result<Track>)> = thread::scope(|scope| {
            let handles: Vec<_> = roles
                .iter()
                .map(|role| (role, scope.spawn(move || compose_role(params, role, seed))))
                .collect();

            // All roles finish before anything is written
            handles
                .into_iter()
                .map(|(role, h)| {
                    (role, h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                })
                .collect()
        });

        // Role order, so failures match the sequential path
        for (role, result) in results {
            session.accept(role, result);
        }

        session.log_summary();
        Ok(session)
    }

    fn accept(&mut self, role: Role, result: Result<Track>) {
        match result {
            Ok(track) => self.set_track(track),
            Err(e) => {
                warn!(%role, error = %e, "track aborted");
                self.failures.push(TrackFailure {
                    role,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Replace the track for `track.role()`
    pub fn set_track(&mut self, track: Track) {
        let idx = track.role().index();
        self.tracks[idx] = track;
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Tempo in BPM
    pub fn tempo(&self) -> u32 {
        self.params.bpm
    }

    /// Length in bars
    pub fn bars(&self) -> u32 {
        self.params.duration
    }

    pub fn track(&self, role: Role) -> &Track {
        &self.tracks[role.index()]
    }

    /// Tracks in file order
    pub fn tracks(&self) -> &[Track; 4] {
        &self.tracks
    }

    /// Roles that were requested but could not be composed
    pub fn failures(&self) -> &[TrackFailure] {
        &self.failures
    }

    /// Number of notes composed for a role
    pub fn note_count(&self, role: Role) -> usize {
        self.track(role).len()
    }

    fn log_summary(&self) {
        info!(
            key = self.params.key,
            scale = %self.params.scale,
            bpm = self.params.bpm,
            bars = self.params.duration,
            lead = self.note_count(Role::Lead),
            pad = self.note_count(Role::Pad),
            bass = self.note_count(Role::Bass),
            drums = self.note_count(Role::Drums),
            "session composed"
        );
    }
}

/// RNG seed for one role's stream
fn role_seed(seed: u64, role: Role) -> u64 {
    seed ^ (role.index() as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn compose_role(params: &GenerationParams, role: Role, seed: u64) -> Result<Track> {
    let mut rng = StdRng::seed_from_u64(role_seed(seed, role));
    let bars = params.duration;
    debug!(%role, bars, "composing");

    match role {
        Role::Lead => compose_lead(params.key, params.scale, bars, &mut rng),
        Role::Pad => compose_pad(params.key, params.scale, bars, &mut rng),
        Role::Bass => {
            let root = params.key.checked_sub(BASS_OCTAVE_SHIFT).ok_or(
                GenError::InvalidParameterRange {
                    field: "key",
                    value: params.key as i64,
                    min: BASS_OCTAVE_SHIFT as i64,
                    max: 127,
                },
            )?;
            compose_bass(root, params.scale, bars, &mut rng)
        }
        Role::Drums => Ok(compose_drums(bars)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PARAMS;
    use crate::generators::BAR_BEATS;
    use crate::music::scale::ScaleType;

    fn params(duration: u32) -> GenerationParams {
        GenerationParams {
            key: 60,
            scale: ScaleType::Minor,
            bpm: 140,
            duration,
            ..DEFAULT_PARAMS
        }
    }

    #[test]
    fn test_role_set() {
        let set = RoleSet::none().with(Role::Pad).with(Role::Drums);
        assert!(set.contains(Role::Pad));
        assert!(!set.contains(Role::Lead));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Role::Pad, Role::Drums]);

        assert_eq!(RoleSet::parse("lead, bass"), Some(RoleSet::none().with(Role::Lead).with(Role::Bass)));
        assert_eq!(RoleSet::parse("lead,pad,bass,drums"), Some(RoleSet::all()));
        assert_eq!(RoleSet::parse("lead,kazoo"), None);
        assert_eq!(RoleSet::parse(""), Some(RoleSet::none()));
    }

    #[test]
    fn test_compose_all_roles() {
        let session = Session::compose(&params(4), RoleSet::all(), 1).unwrap();
        assert_eq!(session.tempo(), 140);
        assert_eq!(session.bars(), 4);
        assert_eq!(session.note_count(Role::Drums), 48);
        assert_eq!(session.note_count(Role::Pad), 12);
        assert_eq!(session.track(Role::Pad).cursor(), 4.0 * BAR_BEATS);
        assert_eq!(session.note_count(Role::Lead), 16);
        assert_eq!(session.note_count(Role::Bass), 16);
        assert!(session.failures().is_empty());
    }

    #[test]
    fn test_bass_two_octaves_down() {
        let session = Session::compose(&params(4), RoleSet::none().with(Role::Bass), 5).unwrap();
        for event in session.track(Role::Bass).events() {
            assert!(event.pitch == 36 || event.pitch == 43);
        }
    }

    #[test]
    fn test_subset_leaves_tracks_empty() {
        let roles = RoleSet::none().with(Role::Drums);
        let session = Session::compose(&params(8), roles, 0).unwrap();
        assert!(session.track(Role::Lead).is_empty());
        assert!(session.track(Role::Pad).is_empty());
        assert!(session.track(Role::Bass).is_empty());
        assert_eq!(session.note_count(Role::Drums), 96);
    }

    #[test]
    fn test_role_streams_independent_of_subset() {
        let full = Session::compose(&params(8), RoleSet::all(), 77).unwrap();
        let lead_only = Session::compose(&params(8), RoleSet::none().with(Role::Lead), 77).unwrap();
        assert_eq!(full.track(Role::Lead), lead_only.track(Role::Lead));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let seq = Session::compose(&params(16), RoleSet::all(), 2024).unwrap();
        let par = Session::compose_parallel(&params(16), RoleSet::all(), 2024).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut bad = params(4);
        bad.bpm = 100;
        assert!(matches!(
            Session::compose(&bad, RoleSet::all(), 0),
            Err(GenError::InvalidParameterRange { field: "bpm", .. })
        ));
        assert!(Session::compose_parallel(&bad, RoleSet::all(), 0).is_err());
    }

    #[test]
    fn test_low_key_aborts_bass_only() {
        let mut low = params(4);
        low.key = 10;

        let session = Session::compose(&low, RoleSet::all(), 0).unwrap();
        assert!(session.track(Role::Bass).is_empty());
        assert_eq!(session.note_count(Role::Lead), 16);
        assert_eq!(session.note_count(Role::Pad), 12);
        assert_eq!(session.note_count(Role::Drums), 48);
        assert_eq!(session.failures().len(), 1);
        assert_eq!(session.failures()[0].role, Role::Bass);
        assert!(session.failures()[0].reason.contains("key"));

        let par = Session::compose_parallel(&low, RoleSet::all(), 0).unwrap();
        assert_eq!(par, session);

        let lead_only = Session::compose(&low, RoleSet::none().with(Role::Lead), 0).unwrap();
        assert!(lead_only.failures().is_empty());
    }
}
