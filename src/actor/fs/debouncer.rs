use std::path::{Path, PathBuf};
use std::time::Duration;

use rustc_hash::FxHashSet;
use tokio::time::Instant;

use crate::utils::path::normalize_path;

/// Quiet period after the last qualifying event before a rebuild fires.
pub(super) const DEBOUNCE_MS: u64 = 100;

/// Sleep used while nothing is pending.
const IDLE_SLEEP: Duration = Duration::from_secs(86400);

/// Trailing-edge debouncer: every qualifying event restarts the window.
/// No business logic, no global state access.
pub(super) struct Debouncer {
    /// Paths changed in the current window (dedup via set).
    pub(super) pending: FxHashSet<PathBuf>,
    pub(super) last_event: Option<Instant>,
    /// Trees whose events never qualify (the output root).
    ignored: Vec<PathBuf>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            ignored: Vec::new(),
        }
    }

    /// Never react to changes under `root`.
    pub(super) fn ignoring(mut self, root: &Path) -> Self {
        self.ignored.push(normalize_path(root));
        self
    }

    /// Add a notify event. Returns whether it restarted the window.
    pub(super) fn add_event(&mut self, event: &notify::Event) -> bool {
        use notify::EventKind;

        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            // mtime/atime/chmod noise would otherwise loop rebuilds
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => return false,
            EventKind::Modify(_) => {}
            _ => return false,
        }

        let mut qualified = false;
        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            let path = normalize_path(path);
            if self.ignored.iter().any(|root| path.starts_with(root)) {
                continue;
            }

            crate::debug!("watch"; "{:?}: {}", event.kind, path.display());
            self.pending.insert(path);
            qualified = true;
        }

        if qualified {
            self.last_event = Some(Instant::now());
        }
        qualified
    }

    /// Take the pending paths once the quiet period has elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<Vec<PathBuf>> {
        if !self.is_ready() {
            return None;
        }

        self.last_event = None;
        let mut paths: Vec<_> = std::mem::take(&mut self.pending).into_iter().collect();
        paths.sort();
        Some(paths)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };
        last_event.elapsed() >= Duration::from_millis(DEBOUNCE_MS) && !self.pending.is_empty()
    }

    /// Precise sleep duration until the window can close.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return IDLE_SLEEP;
        };

        Duration::from_millis(DEBOUNCE_MS)
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
