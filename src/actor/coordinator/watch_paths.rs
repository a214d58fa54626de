use std::path::PathBuf;

use crate::config::AppConfig;

/// Roots observed in watch mode: profile directory, themes directory, user assets.
///
/// The whole themes directory is watched so that switching `theme` in the
/// profile keeps edits to the newly selected theme live. Roots are kept even
/// when missing; the watcher warns and re-attaches them once they appear.
/// Nested roots are dropped in favor of their ancestor.
pub(super) fn collect_watch_paths(config: &AppConfig) -> Vec<PathBuf> {
    let paths = &config.paths;
    let mut roots = vec![
        paths.profile_dir(),
        paths.themes.clone(),
        paths.assets.clone(),
    ];
    dedupe_nested(&mut roots);
    roots
}

/// Drop duplicates and roots already covered by a recursive ancestor.
fn dedupe_nested(paths: &mut Vec<PathBuf>) {
    let snapshot = paths.clone();
    let mut seen = Vec::new();
    paths.retain(|path| {
        let covered = snapshot
            .iter()
            .any(|other| other != path && path.starts_with(other));
        let keep = !covered && !seen.contains(path);
        seen.push(path.clone());
        keep
    });
}
