//! Path normalization helpers.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first; falls back to joining with the current
/// directory when the path does not exist yet.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Accept `reference` only as a plain relative path that stays inside its base.
///
/// Rejects absolute paths and any `..` component; strips `.` components.
pub fn safe_relative(reference: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(reference.trim()).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}
