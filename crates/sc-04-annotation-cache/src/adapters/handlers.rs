//! Handlers produced by the built-in scanners.

use crate::domain::AnnotationType;
use crate::errors::AnnotationError;
use crate::ports::{AnnotatedInstance, RuntimeAnnotationHandler};
use shared_types::{ComponentResource, RequestContext};
use tracing::trace;

/// Pushes a class's declared resources into the view root.
///
/// Deduplicated per request through the context's processed set: however
/// many component instances of the class render, each resource reaches the
/// view root once.
pub struct ResourceDependencyHandler {
    resources: Vec<ComponentResource>,
}

impl ResourceDependencyHandler {
    pub fn new(resources: Vec<ComponentResource>) -> Self {
        Self { resources }
    }
}

impl RuntimeAnnotationHandler for ResourceDependencyHandler {
    fn annotation_type(&self) -> AnnotationType {
        AnnotationType::ResourceDependency
    }

    fn apply(
        &self,
        ctx: &mut RequestContext,
        _instance: &mut dyn AnnotatedInstance,
    ) -> Result<(), AnnotationError> {
        for resource in &self.resources {
            if !ctx.attributes.processed_dependencies.insert(resource.clone()) {
                trace!(resource = %resource.name, "resource already added this request");
                continue;
            }
            ctx.view_resources.push(resource.clone());
        }
        Ok(())
    }
}

/// Subscribes an instance to the system events its class declared.
pub struct ListenerForHandler {
    subscriptions: Vec<(String, Option<String>)>,
}

impl ListenerForHandler {
    pub fn new(subscriptions: Vec<(String, Option<String>)>) -> Self {
        Self { subscriptions }
    }
}

impl RuntimeAnnotationHandler for ListenerForHandler {
    fn annotation_type(&self) -> AnnotationType {
        AnnotationType::ListenerFor
    }

    fn apply(
        &self,
        _ctx: &mut RequestContext,
        instance: &mut dyn AnnotatedInstance,
    ) -> Result<(), AnnotationError> {
        for (event, source) in &self.subscriptions {
            instance.subscribe(event, source.as_deref());
        }
        Ok(())
    }
}
