//! Client-side state saving.
//!
//! The whole `(structure, saved state)` tuple travels to the client inside
//! the view-state hidden field and comes back verbatim on postback. Nothing
//! is retained server-side; the cost is token size, which is bounded only by
//! what the transport tolerates.

use crate::adapters::BincodeProvider;
use crate::errors::StateError;
use crate::ports::{RestoredState, SerializationProvider, StateCodec};
use crate::service::{gunzip, gzip, write_postback_fields};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sc_02_state_guard::{KeySource, StateGuard};
use shared_types::{fields, RequestContext, ViewTuple, WebConfig};
use std::sync::Arc;
use tracing::{debug, warn};

/// Encodes view state directly into the response.
///
/// Pipeline: serialize → gzip (optional) → encrypt+MAC (optional) →
/// base64-url. `get_state` is the exact inverse.
pub struct ClientStateCodec {
    provider: Arc<dyn SerializationProvider>,
    keys: KeySource,
    compress: bool,
    encrypt: bool,
    autocomplete_off: bool,
}

impl ClientStateCodec {
    pub fn new(config: &WebConfig) -> Result<Self, StateError> {
        Self::with_provider(config, Arc::new(BincodeProvider))
    }

    pub fn with_provider(
        config: &WebConfig,
        provider: Arc<dyn SerializationProvider>,
    ) -> Result<Self, StateError> {
        Ok(Self {
            provider,
            keys: KeySource::from_config(
                config.client_state_secret_key.as_deref(),
                config.pin_state_key_in_session,
            )?,
            compress: config.compress_view_state,
            encrypt: config.encrypt_client_state,
            autocomplete_off: config.auto_complete_off_on_view_state,
        })
    }

    fn encode(&self, ctx: &RequestContext, tuple: &ViewTuple) -> Result<String, StateError> {
        let mut bytes = self.provider.serialize_tuple(tuple)?;
        if self.compress {
            bytes = gzip(&bytes)?;
        }
        if self.encrypt {
            let key = self.keys.key_for(ctx.session().map(Arc::as_ref));
            bytes = StateGuard::new(key).encrypt(&bytes);
        }
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(&self, ctx: &RequestContext, token: &str) -> Result<Option<ViewTuple>, StateError> {
        let Ok(mut bytes) = URL_SAFE_NO_PAD.decode(token) else {
            warn!("client state token is not valid base64; treating state as absent");
            return Ok(None);
        };

        if self.encrypt {
            let key = self.keys.key_for(ctx.session().map(Arc::as_ref));
            match StateGuard::new(key).decrypt(&bytes) {
                Some(plain) => bytes = plain,
                // Unauthenticated bytes are never parsed.
                None => return Ok(None),
            }
        }

        if self.compress {
            bytes = gunzip(&bytes)?;
        }

        self.provider.deserialize_tuple(&bytes).map(Some)
    }
}

impl StateCodec for ClientStateCodec {
    fn write_state(
        &self,
        ctx: &mut RequestContext,
        state: Option<&ViewTuple>,
        capture: Option<&mut String>,
    ) -> Result<(), StateError> {
        let token = if ctx.is_transient_view() {
            fields::STATELESS.to_owned()
        } else {
            let tuple = state.ok_or(StateError::MissingState)?;
            self.encode(ctx, tuple)?
        };

        write_postback_fields(ctx, &token, capture, self.autocomplete_off);
        Ok(())
    }

    fn get_state(
        &self,
        ctx: &mut RequestContext,
        view_id: &str,
    ) -> Result<Option<RestoredState>, StateError> {
        let Some(token) = ctx.state_param().map(str::to_owned) else {
            debug!(view_id, "no state parameter; initial request");
            return Ok(None);
        };

        if token == fields::STATELESS {
            return Ok(Some(RestoredState::Stateless));
        }

        Ok(self.decode(ctx, &token)?.map(RestoredState::View))
    }

    fn is_stateless(&self, ctx: &RequestContext, _view_id: &str) -> Result<bool, StateError> {
        if !ctx.is_postback() {
            return Err(StateError::NotPostback);
        }
        Ok(ctx.state_param() == Some(fields::STATELESS))
    }
}
