//! Two-level session view store.
//!
//! The outer map is keyed by logical view id (one browsing lineage per
//! entry), the inner maps by actual view id (one rendered snapshot per
//! entry). Both levels are LRU-bounded, so an abandoned lineage eventually
//! falls out of the session along with every snapshot nested under it.
//!
//! Nothing here is thread-safe: the store lives in a session's attribute map
//! and is only touched while the session lock is held.

use sc_01_view_cache::ViewCache;
use shared_types::{ComponentState, TreeStructure};
use tracing::debug;

/// Saved component state as it sits in the session.
#[derive(Clone, Debug, PartialEq)]
pub enum SavedState {
    /// The live value graph, stored as-is (default).
    Live(ComponentState),
    /// Serialized (optionally compressed) bytes, when
    /// `serialize_server_state` trades CPU for session memory.
    Blob(Vec<u8>),
}

/// One rendered snapshot: the tuple the codec persists per actual view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewEntry {
    pub structure: TreeStructure,
    pub state: SavedState,
}

/// The two-level LRU store held per session.
pub struct SessionViewStore {
    logical: ViewCache<String, ViewCache<String, ViewEntry>>,
    views_per_logical: usize,
}

impl SessionViewStore {
    pub fn new(number_of_logical_views: usize, number_of_views: usize) -> Self {
        Self {
            logical: ViewCache::new(number_of_logical_views),
            views_per_logical: number_of_views,
        }
    }

    /// Installs a snapshot under `(logical, actual)`.
    ///
    /// An existing snapshot for the pair is updated in place rather than
    /// re-inserted, so re-rendering the same view never grows the cache.
    /// The actual map for a new lineage is created lazily here.
    pub fn save(
        &mut self,
        logical_id: &str,
        actual_id: &str,
        structure: TreeStructure,
        state: SavedState,
    ) {
        if self.logical.get(logical_id).is_none() {
            if let Some((evicted_id, _)) = self
                .logical
                .put(logical_id.to_owned(), ViewCache::new(self.views_per_logical))
            {
                debug!(logical = evicted_id, "logical view evicted from session");
            }
        }

        let actual_map = self
            .logical
            .get_mut(logical_id)
            .expect("logical entry inserted above");

        if let Some(entry) = actual_map.get_mut(actual_id) {
            entry.structure = structure;
            entry.state = state;
        } else if let Some((evicted_id, _)) =
            actual_map.put(actual_id.to_owned(), ViewEntry { structure, state })
        {
            debug!(actual = evicted_id, "actual view evicted from lineage");
        }
    }

    /// Looks up the snapshot under `(logical, actual)`, refreshing the
    /// recency of both levels. `None` means the lineage or the snapshot has
    /// been evicted — the view has expired.
    pub fn restore(&mut self, logical_id: &str, actual_id: &str) -> Option<&ViewEntry> {
        self.logical.get_mut(logical_id)?.get(actual_id)
    }

    /// Whether any snapshot survives under the given lineage.
    pub fn contains_logical(&self, logical_id: &str) -> bool {
        self.logical.contains(logical_id)
    }

    pub fn logical_len(&self) -> usize {
        self.logical.len()
    }
}
