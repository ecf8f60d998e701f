//! Server-side state saving.
//!
//! A hybrid strategy: state stays in two nested LRU maps inside the session
//! while the client only carries the `logical:actual` composite key. Eviction
//! anywhere along that path makes a later postback come back empty, which the
//! lifecycle surfaces as a recoverable "view expired" condition.

use crate::adapters::BincodeProvider;
use crate::domain::{CompositeToken, IdGenerator, SavedState, SessionViewStore};
use crate::errors::StateError;
use crate::ports::{RestoredState, SerializationProvider, StateCodec};
use crate::service::{gunzip, gzip, write_postback_fields};
use shared_types::{
    fields, session_keys, ComponentState, RequestContext, ViewTuple, WebConfig,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Persists view snapshots in the session, bounded by the two LRU capacities.
///
/// All logical/actual map access happens under the owning session's mutex;
/// the maps themselves are not thread-safe and concurrent requests in one
/// session are common (frames, AJAX bursts).
pub struct ServerStateCodec {
    provider: Arc<dyn SerializationProvider>,
    ids: IdGenerator,
    number_of_logical_views: usize,
    number_of_views: usize,
    serialize_server_state: bool,
    compress: bool,
    autocomplete_off: bool,
}

impl ServerStateCodec {
    pub fn new(config: &WebConfig) -> Self {
        Self::with_provider(config, Arc::new(BincodeProvider))
    }

    pub fn with_provider(config: &WebConfig, provider: Arc<dyn SerializationProvider>) -> Self {
        Self {
            provider,
            ids: IdGenerator::new(config.generate_unique_server_state_ids),
            number_of_logical_views: config.number_of_logical_views,
            number_of_views: config.number_of_views,
            serialize_server_state: config.serialize_server_state,
            compress: config.compress_view_state,
            autocomplete_off: config.auto_complete_off_on_view_state,
        }
    }

    /// Converts live state to its session-resident form. With
    /// `serialize_server_state` the graph becomes a (compressed) blob,
    /// shrinking the per-entry footprint of a memory-resident cache.
    fn handle_save_state(&self, state: &ComponentState) -> Result<SavedState, StateError> {
        if !self.serialize_server_state {
            return Ok(SavedState::Live(state.clone()));
        }
        let mut bytes = self.provider.serialize_state(state)?;
        if self.compress {
            bytes = gzip(&bytes)?;
        }
        Ok(SavedState::Blob(bytes))
    }

    fn handle_restore_state(&self, saved: &SavedState) -> Result<ComponentState, StateError> {
        match saved {
            SavedState::Live(state) => Ok(state.clone()),
            SavedState::Blob(bytes) => {
                let raw = if self.compress {
                    gunzip(bytes)?
                } else {
                    bytes.clone()
                };
                self.provider.deserialize_state(&raw)
            }
        }
    }

    /// Installs the snapshot and returns the composite token.
    fn store_state(
        &self,
        ctx: &mut RequestContext,
        tuple: &ViewTuple,
    ) -> Result<String, StateError> {
        let saved = self.handle_save_state(&tuple.state)?;
        let session = ctx.ensure_session();

        // Everything below happens under the session lock: id minting, both
        // map lookups and the snapshot install are one atomic step for
        // concurrent requests in this session.
        let mut attrs = session.lock();

        let logical_id = match ctx.attributes.logical_view_id.clone() {
            Some(id) => id,
            None => self.ids.next(&mut attrs),
        };

        // A partial request re-renders the same page, so the actual id from
        // the inbound state is reused; minting one per AJAX interaction
        // would churn the cache with snapshots nobody will post back to.
        let actual_id = ctx
            .attributes
            .actual_view_id
            .clone()
            .filter(|_| ctx.is_partial_request())
            .unwrap_or_else(|| self.ids.next(&mut attrs));

        let store = attrs.get_or_insert_with(session_keys::LOGICAL_VIEW_MAP, || {
            SessionViewStore::new(self.number_of_logical_views, self.number_of_views)
        });
        store.save(&logical_id, &actual_id, tuple.structure.clone(), saved);
        drop(attrs);

        let token = CompositeToken::new(logical_id.clone(), actual_id.clone()).to_string();
        ctx.attributes.logical_view_id = Some(logical_id);
        ctx.attributes.actual_view_id = Some(actual_id);
        Ok(token)
    }
}

impl StateCodec for ServerStateCodec {
    fn write_state(
        &self,
        ctx: &mut RequestContext,
        state: Option<&ViewTuple>,
        capture: Option<&mut String>,
    ) -> Result<(), StateError> {
        let token = if ctx.is_transient_view() {
            fields::STATELESS.to_owned()
        } else if let Some(token) = ctx.attributes.view_state_token.clone() {
            // Already persisted during this request; reuse the token.
            token
        } else {
            let tuple = state.ok_or(StateError::MissingState)?;
            let token = self.store_state(ctx, tuple)?;
            ctx.attributes.view_state_token = Some(token.clone());
            token
        };

        write_postback_fields(ctx, &token, capture, self.autocomplete_off);
        Ok(())
    }

    fn get_state(
        &self,
        ctx: &mut RequestContext,
        view_id: &str,
    ) -> Result<Option<RestoredState>, StateError> {
        let Some(raw) = ctx.state_param().map(str::to_owned) else {
            debug!(view_id, "no state parameter; initial request");
            return Ok(None);
        };

        if raw == fields::STATELESS {
            return Ok(Some(RestoredState::Stateless));
        }

        let Some(token) = CompositeToken::parse(&raw) else {
            warn!(view_id, "malformed composite state token; treating view as expired");
            return Ok(None);
        };

        let Some(session) = ctx.session().cloned() else {
            debug!(view_id, "no session available to restore server side state");
            return Ok(None);
        };

        let mut attrs = session.lock();
        let Some(store) = attrs.get_mut::<SessionViewStore>(session_keys::LOGICAL_VIEW_MAP)
        else {
            return Ok(None);
        };

        let Some(entry) = store.restore(&token.logical, &token.actual) else {
            debug!(
                view_id,
                token = %token,
                "logical or actual view evicted; view has expired"
            );
            return Ok(None);
        };

        let structure = entry.structure.clone();
        let saved = entry.state.clone();
        drop(attrs);

        ctx.attributes.logical_view_id = Some(token.logical);
        ctx.attributes.actual_view_id = Some(token.actual);

        let state = self.handle_restore_state(&saved)?;
        Ok(Some(RestoredState::View(ViewTuple::new(structure, state))))
    }

    fn is_stateless(&self, ctx: &RequestContext, _view_id: &str) -> Result<bool, StateError> {
        if !ctx.is_postback() {
            return Err(StateError::NotPostback);
        }
        Ok(ctx.state_param() == Some(fields::STATELESS))
    }
}
