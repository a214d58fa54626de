//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Resolve a request URL to a file under `serve_root`.
///
/// Directories resolve to their `index.html`. Anything that would escape
/// the root, directly or through a symlink, resolves to nothing.
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = url_path(url)?;

    let root = serve_root.canonicalize().ok()?;
    let candidate = root.join(clean.trim_matches('/')).canonicalize().ok()?;
    if !candidate.starts_with(&root) {
        return None;
    }

    if candidate.is_file() {
        return Some(candidate);
    }

    let index = candidate.join(crate::render::PAGE_FILE);
    index.is_file().then_some(index)
}

/// Decoded path part of a request URL, without query or fragment.
///
/// `None` for undecodable input or any `..` segment.
pub fn url_path(url: &str) -> Option<String> {
    let raw = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;

    if decoded.split(['/', '\\']).any(|segment| segment == "..") {
        return None;
    }
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "page").unwrap();
        fs::create_dir_all(temp.path().join("styles")).unwrap();
        fs::write(temp.path().join("styles/base.css"), "css").unwrap();
        fs::write(temp.path().join("my avatar.png"), "png").unwrap();
        temp
    }

    #[test]
    fn test_root_resolves_to_page() {
        let temp = site();
        let resolved = resolve_path("/", temp.path()).unwrap();
        assert!(resolved.ends_with("index.html"));
    }

    #[test]
    fn test_files_resolve_with_query_and_encoding() {
        let temp = site();
        let css = resolve_path("/styles/base.css?v=2", temp.path()).unwrap();
        assert!(css.ends_with("styles/base.css"));
        let avatar = resolve_path("/my%20avatar.png", temp.path()).unwrap();
        assert!(avatar.ends_with("my avatar.png"));
    }

    #[test]
    fn test_traversal_rejected() {
        let temp = site();
        let inner = temp.path().join("dist");
        fs::create_dir_all(&inner).unwrap();
        fs::write(temp.path().join("secret.txt"), "no").unwrap();

        assert!(resolve_path("/../secret.txt", &inner).is_none());
        assert!(resolve_path("/%2e%2e/secret.txt", &inner).is_none());
    }

    #[test]
    fn test_missing_file_and_bare_dir() {
        let temp = site();
        assert!(resolve_path("/nope.css", temp.path()).is_none());
        assert!(resolve_path("/styles/", temp.path()).is_none());
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("/__livereload?x=1").as_deref(), Some("/__livereload"));
        assert_eq!(url_path("/a#frag").as_deref(), Some("/a"));
        assert_eq!(url_path("/a/../b"), None);
    }
}
