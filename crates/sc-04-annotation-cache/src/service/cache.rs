//! Concurrent memoized scan-and-cache.
//!
//! One handler map per `(class, processing kind)`, computed exactly once
//! application-wide. Concurrent callers for the same key coalesce: the
//! first thread in runs the scanners, the rest block on the entry's
//! condvar and observe the identical map. A failed or abandoned
//! computation evicts its entry so the key can be retried.

use crate::adapters::{ListenerForScanner, ResourceDependencyScanner};
use crate::domain::{AnnotationType, ClassKey, ClassMetadata, ProcessingTarget};
use crate::errors::AnnotationError;
use crate::ports::{AnnotatedInstance, HandlerMap, Scanner};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};
use rayon::prelude::*;
use shared_types::{ProjectStage, RequestContext, WebConfig};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared for every class with no matching annotation, so unannotated
/// classes (the overwhelming majority) cost one map allocation total.
static EMPTY_HANDLERS: Lazy<Arc<HandlerMap>> = Lazy::new(|| Arc::new(HandlerMap::new()));

#[derive(Clone)]
enum CellState {
    Pending,
    Ready(Arc<HandlerMap>),
    Failed(AnnotationError),
    /// The computing thread went away without producing a result. Waiters
    /// evict the entry and retry.
    Cancelled,
}

/// One in-flight or completed computation. Waiters block on the condvar
/// until the state leaves `Pending`.
struct ScanCell {
    state: Mutex<CellState>,
    done: Condvar,
}

impl ScanCell {
    fn new() -> Self {
        Self {
            state: Mutex::new(CellState::Pending),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> CellState {
        let mut state = self.state.lock();
        while matches!(*state, CellState::Pending) {
            self.done.wait(&mut state);
        }
        state.clone()
    }

    fn finish(&self, next: CellState) {
        *self.state.lock() = next;
        self.done.notify_all();
    }
}

/// Marks the cell cancelled and evicts it if the computing thread unwinds
/// before reaching a result, so blocked waiters are released.
struct CancelGuard<'a> {
    cache: &'a AnnotationCache,
    key: &'a ClassKey,
    cell: &'a Arc<ScanCell>,
    armed: bool,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.cache.evict(self.key, self.cell);
            self.cell.finish(CellState::Cancelled);
        }
    }
}

/// Application-scoped annotation registry.
///
/// `resolve` is safe to call from any number of request or bootstrap
/// threads; `warm` runs the bootstrap scan across a bounded worker pool.
pub struct AnnotationCache {
    entries: DashMap<ClassKey, Arc<ScanCell>>,
    scanners: Vec<Arc<dyn Scanner>>,
    scan_threads: usize,
}

impl AnnotationCache {
    pub fn new(config: &WebConfig) -> Self {
        Self::with_scanners(
            config,
            vec![
                Arc::new(ResourceDependencyScanner),
                Arc::new(ListenerForScanner),
            ],
        )
    }

    /// Registry with a custom scanner set. Listener scanners still only run
    /// for kinds that participate in event delivery.
    pub fn with_scanners(config: &WebConfig, scanners: Vec<Arc<dyn Scanner>>) -> Self {
        Self {
            entries: DashMap::new(),
            scanners,
            scan_threads: config.annotation_scan_threads,
        }
    }

    /// Resolves the handler map for `class` as a `target` artifact.
    ///
    /// Exactly one thread runs the scanners per key; every caller gets the
    /// same map instance. Scan failures propagate to all coalesced callers
    /// and evict the entry.
    pub fn resolve(
        &self,
        class: &ClassMetadata,
        target: ProcessingTarget,
    ) -> Result<Arc<HandlerMap>, AnnotationError> {
        let key = ClassKey::new(&class.name, target);
        loop {
            let (cell, winner) = match self.entries.entry(key.clone()) {
                Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
                Entry::Vacant(vacant) => {
                    let cell = Arc::new(ScanCell::new());
                    vacant.insert(Arc::clone(&cell));
                    (cell, true)
                }
            };

            if winner {
                return self.compute(&key, &cell, class, target);
            }

            match cell.wait() {
                CellState::Ready(map) => return Ok(map),
                CellState::Failed(err) => return Err(err),
                CellState::Cancelled => {
                    // Only remove the cell we waited on; a retry may already
                    // have installed a fresh one under this key.
                    self.evict(&key, &cell);
                    continue;
                }
                CellState::Pending => unreachable!("wait returns a settled state"),
            }
        }
    }

    /// Scans `classes` up front on a worker pool bounded at the configured
    /// thread count. The first scan failure aborts the warm-up.
    pub fn warm(
        &self,
        classes: &[(ClassMetadata, ProcessingTarget)],
    ) -> Result<(), AnnotationError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.scan_threads)
            .build()
            .map_err(|e| AnnotationError::Pool(e.to_string()))?;
        debug!(
            classes = classes.len(),
            threads = self.scan_threads,
            "warming annotation cache"
        );
        pool.install(|| {
            classes
                .par_iter()
                .try_for_each(|(class, target)| self.resolve(class, *target).map(drop))
        })
    }

    /// Applies every resolved handler to a live instance, in deterministic
    /// order. Failures are swallowed with a log line in Production and
    /// surfaced in Development.
    pub fn apply(
        &self,
        handlers: &HandlerMap,
        ctx: &mut RequestContext,
        instance: &mut dyn AnnotatedInstance,
    ) -> Result<(), AnnotationError> {
        for handler in handlers.values() {
            if let Err(err) = handler.apply(ctx, instance) {
                match ctx.stage() {
                    ProjectStage::Development => return Err(err),
                    ProjectStage::Production => {
                        warn!(error = %err, "annotation handler failed; continuing")
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of memoized `(class, kind)` entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn compute(
        &self,
        key: &ClassKey,
        cell: &Arc<ScanCell>,
        class: &ClassMetadata,
        target: ProcessingTarget,
    ) -> Result<Arc<HandlerMap>, AnnotationError> {
        let mut guard = CancelGuard {
            cache: self,
            key,
            cell,
            armed: true,
        };
        let result = self.run_scanners(class, target);
        guard.armed = false;

        match result {
            Ok(map) => {
                cell.finish(CellState::Ready(Arc::clone(&map)));
                Ok(map)
            }
            Err(err) => {
                self.evict(key, cell);
                cell.finish(CellState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    fn run_scanners(
        &self,
        class: &ClassMetadata,
        target: ProcessingTarget,
    ) -> Result<Arc<HandlerMap>, AnnotationError> {
        let mut map = HandlerMap::new();
        for scanner in &self.scanners {
            if scanner.annotation_type() == AnnotationType::ListenerFor
                && !target.scans_listeners()
            {
                continue;
            }
            if let Some(handler) = scanner.scan(class)? {
                map.insert(scanner.annotation_type(), handler);
            }
        }

        if map.is_empty() {
            Ok(Arc::clone(&EMPTY_HANDLERS))
        } else {
            Ok(Arc::new(map))
        }
    }

    /// Removes the entry only while it still holds this exact cell.
    fn evict(&self, key: &ClassKey, cell: &Arc<ScanCell>) {
        self.entries.remove_if(key, |_, current| Arc::ptr_eq(current, cell));
    }
}
