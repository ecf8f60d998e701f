//! Server-side state saving across whole request sequences: browsing
//! lineages, history depth, eviction-driven expiry.

#[cfg(test)]
mod tests {
    use sc_01_view_cache::ViewCache;
    use sc_03_state_codec::RestoredState;
    use sc_runtime::ApplicationRuntime;
    use shared_types::{
        fields, ComponentState, RequestContext, Session, StateValue, StructureNode,
        TreeStructure, ViewTuple, WebConfig,
    };
    use std::sync::Arc;

    fn tuple(marker: i64) -> ViewTuple {
        let mut state = ComponentState::new();
        state.insert("form:counter".into(), StateValue::Int(marker));
        ViewTuple::new(
            TreeStructure::new("/page.xhtml", StructureNode::new("root", "ui.ViewRoot")),
            state,
        )
    }

    /// One render cycle: restore the inbound token if any, then write the
    /// given state and return the fresh token.
    fn render(
        runtime: &ApplicationRuntime,
        session: &Arc<Session>,
        inbound: Option<&str>,
        state: &ViewTuple,
    ) -> String {
        let mut ctx = RequestContext::new().with_session(session.clone());
        if let Some(token) = inbound {
            ctx = ctx.with_param(fields::VIEW_STATE_PARAM, token);
            runtime
                .state_codec()
                .get_state(&mut ctx, "/page.xhtml")
                .unwrap()
                .unwrap();
        }
        let mut capture = String::new();
        runtime
            .state_codec()
            .write_state(&mut ctx, Some(state), Some(&mut capture))
            .unwrap();
        capture
    }

    fn restore(
        runtime: &ApplicationRuntime,
        session: &Arc<Session>,
        token: &str,
    ) -> Option<RestoredState> {
        let mut ctx = RequestContext::new()
            .with_session(session.clone())
            .with_param(fields::VIEW_STATE_PARAM, token);
        runtime.state_codec().get_state(&mut ctx, "/page.xhtml").unwrap()
    }

    #[test]
    fn test_history_depth_bounded_per_lineage() {
        let config = WebConfig::builder().number_of_views(2).build().unwrap();
        let runtime = ApplicationRuntime::new(config).unwrap();
        let session = Arc::new(Session::new());

        // Three postbacks along one browsing lineage with room for two
        // snapshots: the oldest falls off, the newer two survive.
        let first = render(&runtime, &session, None, &tuple(1));
        let second = render(&runtime, &session, Some(&first), &tuple(2));
        let third = render(&runtime, &session, Some(&second), &tuple(3));

        assert_eq!(restore(&runtime, &session, &first), None);
        assert!(restore(&runtime, &session, &second).is_some());
        assert_eq!(
            restore(&runtime, &session, &third),
            Some(RestoredState::View(tuple(3)))
        );
    }

    #[test]
    fn test_lineages_share_logical_prefix() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let session = Arc::new(Session::new());

        let first = render(&runtime, &session, None, &tuple(1));
        let second = render(&runtime, &session, Some(&first), &tuple(2));

        let logical = |token: &str| token.split(':').next().unwrap().to_owned();
        assert_eq!(logical(&first), logical(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_abandoned_lineage_evicted() {
        let config = WebConfig::builder()
            .number_of_logical_views(1)
            .build()
            .unwrap();
        let runtime = ApplicationRuntime::new(config).unwrap();
        let session = Arc::new(Session::new());

        // Two fresh GETs start two lineages; only one fits.
        let abandoned = render(&runtime, &session, None, &tuple(1));
        let active = render(&runtime, &session, None, &tuple(2));

        assert_eq!(restore(&runtime, &session, &abandoned), None);
        assert!(restore(&runtime, &session, &active).is_some());
    }

    #[test]
    fn test_partial_rerender_updates_snapshot_in_place() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let session = Arc::new(Session::new());
        let token = render(&runtime, &session, None, &tuple(1));

        // AJAX re-render: restore, mutate, write. The token must not move.
        let mut ctx = RequestContext::new()
            .with_session(session.clone())
            .with_param(fields::VIEW_STATE_PARAM, &*token)
            .partial();
        runtime
            .state_codec()
            .get_state(&mut ctx, "/page.xhtml")
            .unwrap()
            .unwrap();
        let mut rewritten = String::new();
        runtime
            .state_codec()
            .write_state(&mut ctx, Some(&tuple(2)), Some(&mut rewritten))
            .unwrap();
        assert_eq!(rewritten, token);

        assert_eq!(
            restore(&runtime, &session, &token),
            Some(RestoredState::View(tuple(2)))
        );
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let alice = Arc::new(Session::new());
        let mallory = Arc::new(Session::new());

        let token = render(&runtime, &alice, None, &tuple(1));
        // Same composite key presented from another session finds nothing.
        assert_eq!(restore(&runtime, &mallory, &token), None);
        assert!(restore(&runtime, &alice, &token).is_some());
    }

    #[test]
    fn test_stateless_view_through_runtime() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let mut render_ctx = RequestContext::new().transient_view();
        let mut capture = String::new();
        runtime
            .state_codec()
            .write_state(&mut render_ctx, None, Some(&mut capture))
            .unwrap();
        assert_eq!(capture, fields::STATELESS);

        let postback =
            RequestContext::new().with_param(fields::VIEW_STATE_PARAM, fields::STATELESS);
        assert!(runtime
            .state_codec()
            .is_stateless(&postback, "/page.xhtml")
            .unwrap());
    }

    #[test]
    fn test_view_cache_generic_over_key_type() {
        // The LRU primitive is not tied to string ids.
        let mut cache: ViewCache<u64, &str> = ViewCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.put(3, "three"), Some((1, "one")));
        assert_eq!(cache.get(&2), Some(&"two"));
    }
}
