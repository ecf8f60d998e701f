//! Component-tree snapshot types.
//!
//! The component-tree layer produces a `(structure, saved state)` pair on
//! every render; the state engine persists it opaquely and hands it back on
//! postback. Nothing in here knows how the tree is rendered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of the saved tree structure: enough to rebuild the component
/// hierarchy before its state is reapplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    /// Client id, unique within the view.
    pub client_id: String,
    /// Fully-qualified component type used to re-instantiate the node.
    pub component_type: String,
    /// Named facets, ordered for deterministic serialization.
    ///
    /// Always encoded, even when empty: the binary codec is not
    /// self-describing and must read exactly what was written.
    pub facets: BTreeMap<String, StructureNode>,
    pub children: Vec<StructureNode>,
}

impl StructureNode {
    pub fn new(client_id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            component_type: component_type.into(),
            facets: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: StructureNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_facet(mut self, name: impl Into<String>, facet: StructureNode) -> Self {
        self.facets.insert(name.into(), facet);
        self
    }
}

/// The structural half of a view snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeStructure {
    /// View id the structure was captured for.
    pub view_id: String,
    pub root: StructureNode,
}

impl TreeStructure {
    pub fn new(view_id: impl Into<String>, root: StructureNode) -> Self {
        Self {
            view_id: view_id.into(),
            root,
        }
    }
}

/// A single saved component attribute value.
///
/// Deliberately closed: the save-state graph must round-trip bytes exactly,
/// so it is built from plain data rather than live objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StateValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<StateValue>),
    Map(BTreeMap<String, StateValue>),
}

/// Saved component state keyed by client id.
pub type ComponentState = BTreeMap<String, StateValue>;

/// The full view snapshot: what `write_state` persists and `get_state`
/// recovers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTuple {
    pub structure: TreeStructure,
    pub state: ComponentState,
}

impl ViewTuple {
    pub fn new(structure: TreeStructure, state: ComponentState) -> Self {
        Self { structure, state }
    }
}
