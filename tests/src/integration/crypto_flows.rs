//! Client-state token integrity: key sourcing, tampering, session scoping.

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
    use base64::Engine;
    use sc_02_state_guard::{StateGuard, StateKey};
    use sc_03_state_codec::RestoredState;
    use sc_runtime::ApplicationRuntime;
    use shared_types::{
        fields, ComponentState, RequestContext, Session, StateSaving, StateValue,
        StructureNode, TreeStructure, ViewTuple, WebConfig,
    };
    use std::sync::Arc;

    fn tuple() -> ViewTuple {
        let mut state = ComponentState::new();
        state.insert("form:secret".into(), StateValue::Text("hello-view-state".into()));
        ViewTuple::new(
            TreeStructure::new("/login.xhtml", StructureNode::new("root", "ui.ViewRoot")),
            state,
        )
    }

    fn client_runtime(config_key: Option<&str>, pin: bool) -> ApplicationRuntime {
        let mut builder = WebConfig::builder()
            .state_saving(StateSaving::Client)
            .pin_state_key_in_session(pin);
        if let Some(key) = config_key {
            builder = builder.client_state_secret_key(key);
        }
        ApplicationRuntime::new(builder.build().unwrap()).unwrap()
    }

    fn write(runtime: &ApplicationRuntime, mut ctx: RequestContext) -> String {
        let mut capture = String::new();
        runtime
            .state_codec()
            .write_state(&mut ctx, Some(&tuple()), Some(&mut capture))
            .unwrap();
        capture
    }

    fn read(
        runtime: &ApplicationRuntime,
        mut ctx: RequestContext,
        token: &str,
    ) -> Option<RestoredState> {
        ctx = ctx.with_param(fields::VIEW_STATE_PARAM, token);
        runtime
            .state_codec()
            .get_state(&mut ctx, "/login.xhtml")
            .unwrap()
    }

    #[test]
    fn test_guard_round_trip_and_wrong_key() {
        let key = StateKey::generate();
        let guard = StateGuard::new(key);
        let blob = guard.encrypt(b"hello-view-state");
        assert_eq!(guard.decrypt(&blob).as_deref(), Some(&b"hello-view-state"[..]));

        let stranger = StateGuard::new(StateKey::generate());
        assert_eq!(stranger.decrypt(&blob), None);
    }

    #[test]
    fn test_preshared_key_spans_deployments() {
        // Two runtime instances configured with the same key, as in a
        // multi-node deployment behind a balancer without sticky sessions.
        let key = STANDARD.encode([7u8; 16]);
        let node_a = client_runtime(Some(&key), false);
        let node_b = client_runtime(Some(&key), false);

        let token = write(&node_a, RequestContext::new());
        let restored = read(&node_b, RequestContext::new(), &token);
        assert_eq!(restored, Some(RestoredState::View(tuple())));
    }

    #[test]
    fn test_process_keys_differ_across_deployments() {
        // Without a configured key each process generates its own; tokens
        // do not transfer.
        let node_a = client_runtime(None, false);
        let node_b = client_runtime(None, false);

        let token = write(&node_a, RequestContext::new());
        assert!(read(&node_a, RequestContext::new(), &token).is_some());
        assert_eq!(read(&node_b, RequestContext::new(), &token), None);
    }

    #[test]
    fn test_session_pinned_key_scopes_tokens_to_session() {
        let runtime = client_runtime(None, true);
        let alice = Arc::new(Session::new());
        let mallory = Arc::new(Session::new());

        let token = write(&runtime, RequestContext::new().with_session(alice.clone()));
        assert!(read(&runtime, RequestContext::new().with_session(alice), &token).is_some());
        assert_eq!(
            read(&runtime, RequestContext::new().with_session(mallory), &token),
            None
        );
    }

    #[test]
    fn test_tampered_runtime_token_treated_as_expired() {
        let runtime = client_runtime(None, false);
        let token = write(&runtime, RequestContext::new());

        let mut raw = URL_SAFE_NO_PAD.decode(&token).unwrap();
        let mid = raw.len() / 2;
        raw[mid] ^= 0x80;
        let tampered = URL_SAFE_NO_PAD.encode(raw);

        assert_eq!(read(&runtime, RequestContext::new(), &tampered), None);
        assert!(read(&runtime, RequestContext::new(), &token).is_some());
    }

    #[test]
    fn test_malformed_preshared_key_rejected_at_bootstrap() {
        let config = WebConfig::builder()
            .state_saving(StateSaving::Client)
            .client_state_secret_key("@@not-base64@@")
            .build()
            .unwrap();
        assert!(ApplicationRuntime::new(config).is_err());
    }
}
