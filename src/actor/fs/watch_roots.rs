use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

use crate::core::WatchError;

/// Watch-root consistency manager.
///
/// Responsibility:
/// - Attach existing roots at startup, warning about the rest
/// - Re-attach roots that appear later or were removed and recreated
pub(super) struct WatchRoots {
    desired: Vec<PathBuf>,
    attached: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            desired: paths,
            attached: FxHashSet::default(),
        }
    }

    /// Attach every root that can be watched.
    ///
    /// Roots that are missing or refuse a watch are returned as warnings;
    /// watching continues on the rest.
    pub(super) fn attach_existing(&mut self, watcher: &mut RecommendedWatcher) -> Vec<WatchError> {
        let mut warnings = Vec::new();

        for path in &self.desired {
            if !path.exists() {
                warnings.push(WatchError::Missing(path.clone()));
                continue;
            }
            match watcher.watch(path, RecursiveMode::Recursive) {
                Ok(()) => {
                    self.attached.insert(path.clone());
                }
                Err(e) => warnings.push(WatchError::Attach(path.clone(), e)),
            }
        }

        warnings
    }

    pub(super) fn maintain(&mut self, watcher: &mut RecommendedWatcher) {
        // Drop stale handles for roots that no longer exist.
        self.attached.retain(|path| path.exists());

        for path in &self.desired {
            if self.attached.contains(path) || !path.exists() {
                continue;
            }

            if watcher.watch(path, RecursiveMode::Recursive).is_ok() {
                self.attached.insert(path.clone());
                crate::debug!("watch"; "re-attached watch: {}", path.display());
            }
        }
    }

    pub(super) fn attached_count(&self) -> usize {
        self.attached.len()
    }
}
