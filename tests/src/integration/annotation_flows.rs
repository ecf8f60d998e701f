//! Annotation resolution wired through the runtime: scan-once semantics
//! under contention and handler application against live instances.

#[cfg(test)]
mod tests {
    use sc_04_annotation_cache::{
        AnnotatedInstance, AnnotationType, ClassMetadata, DeclaredAnnotation,
        ProcessingTarget,
    };
    use sc_runtime::ApplicationRuntime;
    use shared_types::{RequestContext, WebConfig};
    use std::sync::{Arc, Barrier};
    use std::thread;

    struct PanelInstance {
        subscriptions: Vec<String>,
    }

    impl AnnotatedInstance for PanelInstance {
        fn subscribe(&mut self, event: &str, _source: Option<&str>) {
            self.subscriptions.push(event.to_owned());
        }
    }

    fn panel_class() -> ClassMetadata {
        ClassMetadata::new("app.PanelComponent")
            .with_annotation(DeclaredAnnotation::ResourceDependency {
                name: "panel.css".into(),
                library: Some("components".into()),
                target: Some("head".into()),
            })
            .with_annotation(DeclaredAnnotation::ListenerFor {
                event: "preRenderView".into(),
                source: None,
            })
    }

    #[test]
    fn test_resolve_then_apply_full_flow() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let handlers = runtime
            .annotations()
            .resolve(&panel_class(), ProcessingTarget::Component)
            .unwrap();
        assert_eq!(handlers.len(), 2);

        let mut ctx = RequestContext::new();
        let mut instance = PanelInstance {
            subscriptions: vec![],
        };
        runtime
            .annotations()
            .apply(&handlers, &mut ctx, &mut instance)
            .unwrap();

        assert_eq!(ctx.view_resources.len(), 1);
        assert_eq!(ctx.view_resources[0].name, "panel.css");
        assert_eq!(instance.subscriptions, vec!["preRenderView"]);
    }

    #[test]
    fn test_two_instances_one_resource_per_request() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let handlers = runtime
            .annotations()
            .resolve(&panel_class(), ProcessingTarget::Component)
            .unwrap();

        let mut ctx = RequestContext::new();
        for _ in 0..2 {
            let mut instance = PanelInstance {
                subscriptions: vec![],
            };
            runtime
                .annotations()
                .apply(&handlers, &mut ctx, &mut instance)
                .unwrap();
            assert_eq!(instance.subscriptions.len(), 1);
        }
        // Both instances rendered, but the stylesheet reached the view root
        // only once.
        assert_eq!(ctx.view_resources.len(), 1);
    }

    #[test]
    fn test_contended_resolution_yields_one_shared_map() {
        let runtime = Arc::new(ApplicationRuntime::new(WebConfig::default()).unwrap());
        let barrier = Arc::new(Barrier::new(8));

        let maps: Vec<_> = (0..8)
            .map(|_| {
                let runtime = runtime.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    runtime
                        .annotations()
                        .resolve(&panel_class(), ProcessingTarget::Component)
                        .unwrap()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        for map in &maps[1..] {
            assert!(Arc::ptr_eq(&maps[0], map));
        }
        assert_eq!(runtime.annotations().len(), 1);
    }

    #[test]
    fn test_warm_covers_discovered_classes() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let mut classes = vec![(panel_class(), ProcessingTarget::Component)];
        for i in 0..10 {
            classes.push((
                ClassMetadata::new(format!("app.Converter{i}")),
                ProcessingTarget::Converter,
            ));
        }

        runtime.warm_annotations(&classes).unwrap();
        assert_eq!(runtime.annotations().len(), classes.len());

        // Post-warm resolution hits the memoized entries.
        let handlers = runtime
            .annotations()
            .resolve(&panel_class(), ProcessingTarget::Component)
            .unwrap();
        assert!(handlers.contains_key(&AnnotationType::ResourceDependency));
        assert_eq!(runtime.annotations().len(), classes.len());
    }

    #[test]
    fn test_listener_only_class_empty_for_validators() {
        let runtime = ApplicationRuntime::new(WebConfig::default()).unwrap();
        let class = ClassMetadata::new("app.AuditListener").with_annotation(
            DeclaredAnnotation::ListenerFor {
                event: "postValidate".into(),
                source: None,
            },
        );

        let as_validator = runtime
            .annotations()
            .resolve(&class, ProcessingTarget::Validator)
            .unwrap();
        assert!(as_validator.is_empty());

        let plain = runtime
            .annotations()
            .resolve(&ClassMetadata::new("app.Plain"), ProcessingTarget::Converter)
            .unwrap();
        // Empty results share one allocation application-wide.
        assert!(Arc::ptr_eq(&as_validator, &plain));
    }
}
