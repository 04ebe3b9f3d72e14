// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mood-analysis reply adapter.
//!
//! The mood service answers free text with a JSON object, sometimes
//! wrapped in prose. This adapter pulls the parameters out of such a reply
//! and falls back to [`DEFAULT_PARAMS`] on any failure, so nothing the
//! service does can stop a generation request.

use tracing::{debug, warn};

use super::{GenerationParams, DEFAULT_PARAMS};

/// Parse a reply, falling back to the defaults
pub fn from_reply(reply: &str) -> GenerationParams {
    match parse_reply(reply) {
        Some(params) => {
            debug!(?params, "mood reply accepted");
            params
        }
        None => {
            warn!("unusable mood reply, using default parameters");
            DEFAULT_PARAMS
        }
    }
}

/// Like [`from_reply`], where `None` means the service gave no reply
pub fn from_reply_opt(reply: Option<&str>) -> GenerationParams {
    match reply {
        Some(text) => from_reply(text),
        None => {
            warn!("no mood reply, using default parameters");
            DEFAULT_PARAMS
        }
    }
}

/// Strict JSON first, then the outermost brace-delimited span
fn parse_reply(reply: &str) -> Option<GenerationParams> {
    let params = serde_json::from_str::<GenerationParams>(reply.trim())
        .ok()
        .or_else(|| {
            let body = embedded_object(reply)?;
            match serde_json::from_str::<GenerationParams>(body) {
                Ok(params) => Some(params),
                Err(e) => {
                    debug!(error = %e, "embedded object did not parse");
                    None
                }
            }
        })?;

    match params.validate() {
        Ok(()) => Some(params),
        Err(e) => {
            warn!(error = %e, "mood reply out of range");
            None
        }
    }
}

/// Text from the first `{` to the last `}`
fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
