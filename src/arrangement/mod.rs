// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session assembly.
//!
//! Builds the four tracks for one request from a parameter set.

pub mod session;

pub use session::{RoleSet, Session, TrackFailure, BASS_OCTAVE_SHIFT};
