// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generation parameters.
//!
//! This module defines the parameter set consumed by the composers, its
//! range checks, the single default set, and YAML load/save. Replies from
//! the mood-analysis service are adapted in [`mood`].

pub mod mood;

pub use mood::{from_reply, from_reply_opt};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{check_range, Result as GenResult};
use crate::music::scale::{MidiNote, ScaleType};

/// Allowed key range
pub const KEY_RANGE: (i64, i64) = (0, 127);
/// Allowed tempo range in BPM
pub const BPM_RANGE: (i64, i64) = (120, 160);
/// Allowed length in bars
pub const DURATION_RANGE: (i64, i64) = (4, 32);
/// Allowed energy level
pub const ENERGY_RANGE: (i64, i64) = (1, 10);

/// Shown when the parameters carry no explanation of their own
pub const DEFAULT_EXPLANATION: &str = "Default parameters for classic trance";

/// Lead character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStyle {
    Melodic,
    Rhythmic,
    Atmospheric,
}

/// Pad colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadStyle {
    Warm,
    Bright,
    Dark,
}

/// Bass character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BassStyle {
    Punchy,
    Deep,
    Melodic,
}

/// Drum feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrumStyle {
    Energetic,
    Progressive,
    Minimal,
}

/// Overall atmosphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Atmosphere {
    Dreamy,
    Uplifting,
    Dark,
    Euphoric,
}

/// Parameters for one generation request.
///
/// Field names follow the mood-analysis reply. The style tags, energy
/// level and atmosphere are advisory: they are carried through but do not
/// change what the composers emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Root MIDI key (60-71 from the usual front ends)
    pub key: MidiNote,
    pub scale: ScaleType,
    /// Tempo in BPM
    pub bpm: u32,
    /// Length in bars
    pub duration: u32,
    #[serde(default = "default_lead_style")]
    pub lead_style: LeadStyle,
    #[serde(default = "default_pad_style")]
    pub pad_style: PadStyle,
    #[serde(default = "default_bass_style")]
    pub bass_style: BassStyle,
    #[serde(default = "default_drum_style")]
    pub drum_style: DrumStyle,
    #[serde(default = "default_energy_level")]
    pub energy_level: u8,
    #[serde(default = "default_atmosphere")]
    pub atmosphere: Atmosphere,
    /// Free-text reasoning returned with a mood reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Used whenever no usable parameters are available
pub const DEFAULT_PARAMS: GenerationParams = GenerationParams {
    key: 60,
    scale: ScaleType::Minor,
    bpm: 140,
    duration: 8,
    lead_style: LeadStyle::Melodic,
    pad_style: PadStyle::Warm,
    bass_style: BassStyle::Punchy,
    drum_style: DrumStyle::Energetic,
    energy_level: 7,
    atmosphere: Atmosphere::Uplifting,
    explanation: None,
};

fn default_lead_style() -> LeadStyle {
    DEFAULT_PARAMS.lead_style
}
fn default_pad_style() -> PadStyle {
    DEFAULT_PARAMS.pad_style
}
fn default_bass_style() -> BassStyle {
    DEFAULT_PARAMS.bass_style
}
fn default_drum_style() -> DrumStyle {
    DEFAULT_PARAMS.drum_style
}
fn default_energy_level() -> u8 {
    DEFAULT_PARAMS.energy_level
}
fn default_atmosphere() -> Atmosphere {
    DEFAULT_PARAMS.atmosphere
}

impl Default for GenerationParams {
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

impl GenerationParams {
    /// Check every ranged field, failing with `InvalidParameterRange`
    pub fn validate(&self) -> GenResult<()> {
        check_range("key", self.key as i64, KEY_RANGE.0, KEY_RANGE.1)?;
        check_range("bpm", self.bpm as i64, BPM_RANGE.0, BPM_RANGE.1)?;
        check_range(
            "duration",
            self.duration as i64,
            DURATION_RANGE.0,
            DURATION_RANGE.1,
        )?;
        check_range(
            "energy_level",
            self.energy_level as i64,
            ENERGY_RANGE.0,
            ENERGY_RANGE.1,
        )?;
        Ok(())
    }

    /// Explanation text, or the stock one
    pub fn explanation(&self) -> &str {
        self.explanation.as_deref().unwrap_or(DEFAULT_EXPLANATION)
    }

    /// Load parameters from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read parameter file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate parameters from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let params: Self =
            serde_yaml::from_str(yaml).context("Failed to parse YAML parameters")?;
        params.validate().context("Invalid parameters")?;
        Ok(params)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize parameters to YAML")
    }

    /// Save parameters to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write parameter file: {:?}", path.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.key, 60);
        assert_eq!(params.scale, ScaleType::Minor);
        assert_eq!(params.bpm, 140);
        assert_eq!(params.duration, 8);
        assert_eq!(params.lead_style, LeadStyle::Melodic);
        assert_eq!(params.pad_style, PadStyle::Warm);
        assert_eq!(params.bass_style, BassStyle::Punchy);
        assert_eq!(params.drum_style, DrumStyle::Energetic);
        assert_eq!(params.energy_level, 7);
        assert_eq!(params.atmosphere, Atmosphere::Uplifting);
        assert_eq!(params.explanation(), DEFAULT_EXPLANATION);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_boundaries() {
        let mut params = DEFAULT_PARAMS;
        for bpm in [120, 160] {
            params.bpm = bpm;
            assert!(params.validate().is_ok());
        }
        params.bpm = 119;
        assert!(matches!(
            params.validate(),
            Err(GenError::InvalidParameterRange { field: "bpm", .. })
        ));

        let mut params = DEFAULT_PARAMS;
        for duration in [4, 32] {
            params.duration = duration;
            assert!(params.validate().is_ok());
        }
        params.duration = 33;
        assert!(params.validate().is_err());
        params.duration = 3;
        assert!(params.validate().is_err());

        let mut params = DEFAULT_PARAMS;
        params.key = 128;
        assert!(matches!(
            params.validate(),
            Err(GenError::InvalidParameterRange { field: "key", .. })
        ));

        let mut params = DEFAULT_PARAMS;
        params.energy_level = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
key: 69
scale: harmonic_minor
bpm: 150
duration: 16
"#;
        let params = GenerationParams::from_yaml(yaml).unwrap();
        assert_eq!(params.key, 69);
        assert_eq!(params.scale, ScaleType::HarmonicMinor);
        assert_eq!(params.bpm, 150);
        assert_eq!(params.duration, 16);
        assert_eq!(params.pad_style, PadStyle::Warm);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(GenerationParams::from_yaml("key: 60\nscale: dorian\nbpm: 140\nduration: 8\n").is_err());
        assert!(GenerationParams::from_yaml("key: 60\nscale: minor\nbpm: 200\nduration: 8\n").is_err());
    }

    #[test]
    fn test_round_trip() {
        let original = GenerationParams {
            key: 62,
            scale: ScaleType::Phrygian,
            bpm: 132,
            duration: 12,
            lead_style: LeadStyle::Atmospheric,
            pad_style: PadStyle::Dark,
            bass_style: BassStyle::Deep,
            drum_style: DrumStyle::Minimal,
            energy_level: 4,
            atmosphere: Atmosphere::Dark,
            explanation: Some("brooding".to_string()),
        };

        let yaml = original.to_yaml().unwrap();
        let parsed = GenerationParams::from_yaml(&yaml).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.yaml");

        DEFAULT_PARAMS.save(&path).unwrap();
        let loaded = GenerationParams::load(&path).unwrap();
        assert_eq!(loaded, DEFAULT_PARAMS);

        assert!(GenerationParams::load(dir.path().join("missing.yaml")).is_err());
    }
}
