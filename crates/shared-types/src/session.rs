//! Session abstraction.
//!
//! A [`Session`] is an attribute map guarded by one mutex. That mutex doubles
//! as the per-session lock the server-side state codec holds across its
//! logical/actual map operations, so a session's view store can never be
//! observed mid-update by a concurrent request.

use parking_lot::{Mutex, MutexGuard};
use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Server-side session: identity plus a typed attribute map.
pub struct Session {
    id: String,
    attrs: Mutex<HashMap<&'static str, Box<dyn Any + Send>>>,
}

impl Session {
    /// Creates a fresh session with a process-unique id.
    pub fn new() -> Self {
        let serial = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("session-{serial}"),
            attrs: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Acquires the session mutex. The returned guard is the coarse lock the
    /// state codec holds around every view-map read and write.
    pub fn lock(&self) -> SessionAttrs<'_> {
        SessionAttrs {
            guard: self.attrs.lock(),
        }
    }

    /// Drops every attribute, as on container session invalidation. Any
    /// server-held view state dies with it.
    pub fn invalidate(&self) {
        debug!(session = %self.id, "invalidating session");
        self.attrs.lock().clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Locked view of a session's attributes with typed accessors.
pub struct SessionAttrs<'a> {
    guard: MutexGuard<'a, HashMap<&'static str, Box<dyn Any + Send>>>,
}

impl SessionAttrs<'_> {
    pub fn get<T: Any + Send>(&self, key: &'static str) -> Option<&T> {
        self.guard.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any + Send>(&mut self, key: &'static str) -> Option<&mut T> {
        self.guard.get_mut(key).and_then(|v| v.downcast_mut::<T>())
    }

    pub fn set<T: Any + Send>(&mut self, key: &'static str, value: T) {
        self.guard.insert(key, Box::new(value));
    }

    pub fn remove(&mut self, key: &'static str) {
        self.guard.remove(key);
    }

    pub fn contains(&self, key: &'static str) -> bool {
        self.guard.contains_key(key)
    }

    /// Returns the attribute under `key`, inserting `init()` first if the
    /// slot is empty. A slot holding a different type than `T` is replaced;
    /// reserved keys each map to exactly one type.
    pub fn get_or_insert_with<T, F>(&mut self, key: &'static str, init: F) -> &mut T
    where
        T: Any + Send,
        F: FnOnce() -> T,
    {
        let slot = match self.guard.entry(key) {
            Entry::Occupied(occupied) => {
                let slot = occupied.into_mut();
                if !slot.is::<T>() {
                    *slot = Box::new(init());
                }
                slot
            }
            Entry::Vacant(vacant) => vacant.insert(Box::new(init())),
        };
        slot.downcast_mut::<T>()
            .expect("slot was just checked or replaced with type T")
    }
}
