// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequence file export.

pub mod smf;

pub use smf::MidiExporter;

use std::path::Path;

use crate::arrangement::Session;
use crate::error::Result;

/// Encode a session with the default exporter settings
pub fn write(session: &Session) -> Result<Vec<u8>> {
    MidiExporter::new().to_bytes(session)
}

/// Encode a session and write it to `path`
pub fn export<P: AsRef<Path>>(session: &Session, path: P) -> Result<()> {
    MidiExporter::new().export(session, path)
}
