//! Codec services: the client and server state-saving strategies.

pub mod client;
pub mod server;

pub use client::ClientStateCodec;
pub use server::ServerStateCodec;

use crate::errors::StateError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use shared_types::{fields, RequestContext};
use std::io::{Read, Write};

/// Emits the token and the auxiliary postback fields, or appends the bare
/// token to `capture` when the caller wants it without markup.
///
/// Common tail of both codecs' `write_state`.
pub(crate) fn write_postback_fields(
    ctx: &mut RequestContext,
    token: &str,
    capture: Option<&mut String>,
    autocomplete_off: bool,
) {
    if let Some(capture) = capture {
        capture.push_str(token);
        return;
    }

    ctx.response
        .write_hidden_input(fields::VIEW_STATE_PARAM, token, autocomplete_off);

    if let Some(window) = ctx.client_window().map(str::to_owned) {
        ctx.response
            .write_hidden_input(fields::CLIENT_WINDOW_PARAM, &window, autocomplete_off);
    }

    // The render kit field only matters when a non-default kit rendered the
    // view; the default is implied otherwise.
    if let Some(kit) = ctx.render_kit_id().map(str::to_owned) {
        if kit != fields::DEFAULT_RENDER_KIT {
            ctx.response
                .write_hidden_input(fields::RENDER_KIT_ID_PARAM, &kit, false);
        }
    }
}

pub(crate) fn gzip(bytes: &[u8]) -> Result<Vec<u8>, StateError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .and_then(|_| encoder.finish())
        .map_err(|e| StateError::Compression(e.to_string()))
}

pub(crate) fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, StateError> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| StateError::Compression(e.to_string()))?;
    Ok(out)
}
