//! Domain types: what a scannable class looks like and which scanners a
//! processing kind gets.

use std::fmt;

/// The annotation kinds the built-in scanners understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnotationType {
    ResourceDependency,
    ListenerFor,
}

impl AnnotationType {
    pub fn name(self) -> &'static str {
        match self {
            AnnotationType::ResourceDependency => "ResourceDependency",
            AnnotationType::ListenerFor => "ListenerFor",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Annotation data as declared on a class, before any handler exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclaredAnnotation {
    /// A resource this class pulls into the view root when rendered.
    ResourceDependency {
        name: String,
        library: Option<String>,
        /// Insertion target within the page ("head", "body", ...).
        target: Option<String>,
    },
    /// A system event this class wants delivered to its instances.
    ListenerFor {
        event: String,
        /// Restricts delivery to events raised by this source, when set.
        source: Option<String>,
    },
}

/// Descriptor of a class eligible for annotation scanning: its name and the
/// annotations declared on it. Stands in for runtime reflection, which the
/// discovery layer performs before handing classes to this engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassMetadata {
    pub name: String,
    pub declared: Vec<DeclaredAnnotation>,
}

impl ClassMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: DeclaredAnnotation) -> Self {
        self.declared.push(annotation);
        self
    }
}

/// The artifact kind a class is being resolved for. Determines the scanner
/// set: components and renderers participate in event delivery and get the
/// listener scanner on top of the resource-dependency one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessingTarget {
    Component,
    Behavior,
    ClientBehaviorRenderer,
    Validator,
    Converter,
    Renderer,
    SystemEvent,
}

impl ProcessingTarget {
    /// Whether this kind's scanner set includes the listener scanner.
    pub fn scans_listeners(self) -> bool {
        matches!(self, ProcessingTarget::Component | ProcessingTarget::Renderer)
    }
}

/// Cache key: one memoized handler map per class and processing kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassKey {
    pub name: String,
    pub target: ProcessingTarget,
}

impl ClassKey {
    pub fn new(name: &str, target: ProcessingTarget) -> Self {
        Self {
            name: name.to_owned(),
            target,
        }
    }
}
