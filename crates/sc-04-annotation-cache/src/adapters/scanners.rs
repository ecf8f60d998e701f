//! The two built-in resolution strategies.

use crate::domain::{AnnotationType, ClassMetadata, DeclaredAnnotation};
use crate::errors::AnnotationError;
use crate::adapters::handlers::{ListenerForHandler, ResourceDependencyHandler};
use crate::ports::{RuntimeAnnotationHandler, Scanner};
use shared_types::ComponentResource;
use std::sync::Arc;

/// Collects every `ResourceDependency` declaration on a class into one
/// handler. A class commonly declares several (a stylesheet plus scripts),
/// so the handler captures the whole list.
pub struct ResourceDependencyScanner;

impl Scanner for ResourceDependencyScanner {
    fn annotation_type(&self) -> AnnotationType {
        AnnotationType::ResourceDependency
    }

    fn scan(
        &self,
        class: &ClassMetadata,
    ) -> Result<Option<Arc<dyn RuntimeAnnotationHandler>>, AnnotationError> {
        let mut resources = Vec::new();
        for declared in &class.declared {
            if let DeclaredAnnotation::ResourceDependency {
                name,
                library,
                target,
            } = declared
            {
                // A dependency without a resource name cannot be served.
                if name.is_empty() {
                    return Err(AnnotationError::ScanFailed {
                        class: class.name.clone(),
                        reason: "ResourceDependency declares an empty resource name".to_owned(),
                    });
                }
                resources.push(ComponentResource {
                    name: name.clone(),
                    library: library.clone(),
                    target: target.clone(),
                });
            }
        }

        if resources.is_empty() {
            return Ok(None);
        }
        Ok(Some(Arc::new(ResourceDependencyHandler::new(resources))))
    }
}

/// Collects every `ListenerFor` declaration on a class into one handler.
pub struct ListenerForScanner;

impl Scanner for ListenerForScanner {
    fn annotation_type(&self) -> AnnotationType {
        AnnotationType::ListenerFor
    }

    fn scan(
        &self,
        class: &ClassMetadata,
    ) -> Result<Option<Arc<dyn RuntimeAnnotationHandler>>, AnnotationError> {
        let mut subscriptions = Vec::new();
        for declared in &class.declared {
            if let DeclaredAnnotation::ListenerFor { event, source } = declared {
                if event.is_empty() {
                    return Err(AnnotationError::ScanFailed {
                        class: class.name.clone(),
                        reason: "ListenerFor declares an empty event name".to_owned(),
                    });
                }
                subscriptions.push((event.clone(), source.clone()));
            }
        }

        if subscriptions.is_empty() {
            return Ok(None);
        }
        Ok(Some(Arc::new(ListenerForHandler::new(subscriptions))))
    }
}
