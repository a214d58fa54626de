//! Asset copying into the output tree.
//!
//! Every build re-copies everything: destinations are overwritten without
//! comparing contents or timestamps, and nothing is ever pruned.

use std::fs;
use std::path::Path;

use crate::core::BuildError;

/// Copy one file, creating parent directories as needed.
pub fn copy_file(src: &Path, dest: &Path) -> Result<(), BuildError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::AssetCopy(parent.to_path_buf(), e))?;
    }
    fs::copy(src, dest).map_err(|e| BuildError::AssetCopy(src.to_path_buf(), e))?;
    Ok(())
}

/// Recursively copy `src_dir` into `dest_dir`, depth-first.
///
/// Returns the number of files copied.
pub fn copy_dir(src_dir: &Path, dest_dir: &Path) -> Result<usize, BuildError> {
    let mut count = 0;
    copy_dir_recursive(src_dir, dest_dir, &mut count)?;
    Ok(count)
}

fn copy_dir_recursive(
    src_dir: &Path,
    dest_dir: &Path,
    count: &mut usize,
) -> Result<(), BuildError> {
    let read_err = |e| BuildError::AssetCopy(src_dir.to_path_buf(), e);

    fs::create_dir_all(dest_dir).map_err(|e| BuildError::AssetCopy(dest_dir.to_path_buf(), e))?;

    for entry in fs::read_dir(src_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let src_path = entry.path();
        let dest_path = dest_dir.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path, count)?;
        } else {
            fs::copy(&src_path, &dest_path)
                .map_err(|e| BuildError::AssetCopy(src_path.clone(), e))?;
            *count += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_preserves_structure() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::write(src.join("a.css"), "a").unwrap();
        fs::write(src.join("nested/b.css"), "b").unwrap();
        fs::write(src.join("nested/deeper/c.css"), "c").unwrap();

        let dest = temp.path().join("out/styles");
        let count = copy_dir(&src, &dest).unwrap();

        assert_eq!(count, 3);
        assert_eq!(fs::read_to_string(dest.join("a.css")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dest.join("nested/deeper/c.css")).unwrap(), "c");
    }

    #[test]
    fn test_copy_overwrites_and_keeps_unrelated_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();
        fs::write(src.join("a.css"), "new").unwrap();
        fs::write(dest.join("a.css"), "old").unwrap();
        fs::write(dest.join("stale.css"), "stale").unwrap();

        copy_dir(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.css")).unwrap(), "new");
        assert!(dest.join("stale.css").exists());
    }

    #[test]
    fn test_copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("avatar.png");
        fs::write(&src, [1u8, 2, 3]).unwrap();

        let dest = temp.path().join("out/img/avatar.png");
        copy_file(&src, &dest).unwrap();
        assert_eq!(fs::read(dest).unwrap(), [1, 2, 3]);
    }

    #[test]
    fn test_missing_source_is_asset_copy_error() {
        let temp = TempDir::new().unwrap();
        let err = copy_dir(&temp.path().join("missing"), &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, BuildError::AssetCopy(..)));
    }
}
