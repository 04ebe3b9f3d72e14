// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the generation pipeline.

use std::io;

use thiserror::Error;

/// Errors raised while resolving, composing or writing a session
#[derive(Debug, Error)]
pub enum GenError {
    /// Scale name outside the supported set
    #[error("unknown scale: {0}")]
    UnknownScale(String),

    /// Chord symbol outside {i, III, VI, VII}
    #[error("unsupported chord degree: {0}")]
    UnsupportedDegree(String),

    /// A parameter fell outside its allowed range
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    InvalidParameterRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A note event could not be encoded
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File write failure, passed through unchanged
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias for the generation pipeline
pub type Result<T> = std::result::Result<T, GenError>;

/// Check that `value` lies in `min..=max`
pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(GenError::InvalidParameterRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
