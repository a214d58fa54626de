//! Failure taxonomy for builds and the watcher.

use std::path::PathBuf;
use thiserror::Error;

use crate::profile::ProfileError;
use crate::theme::ThemeError;

/// Why a build did not produce an output tree.
///
/// Every variant names the stage that failed; the wrapped source carries the
/// detail. Displayed with `{:#}` the whole chain reads as one diagnostic.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to load profile")]
    Profile(#[from] ProfileError),

    #[error("failed to load theme")]
    Theme(#[from] ThemeError),

    #[error("cannot read template `{0}`")]
    Template(PathBuf, #[source] std::io::Error),

    #[error("failed to render template `{0}`")]
    Render(PathBuf, #[source] minijinja::Error),

    #[error("failed to copy asset `{0}`")]
    AssetCopy(PathBuf, #[source] std::io::Error),

    #[error("cannot write `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

impl BuildError {
    /// Short stage label for status lines.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Profile(_) => "profile",
            Self::Theme(_) => "theme",
            Self::Template(..) | Self::Render(..) => "render",
            Self::AssetCopy(..) => "assets",
            Self::Io(..) => "output",
        }
    }
}

/// A watch root that could not be observed. Reported, never fatal.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watch root `{0}` does not exist, skipping")]
    Missing(PathBuf),

    #[error("cannot watch `{0}`")]
    Attach(PathBuf, #[source] notify::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_display_names_stage_and_path() {
        let err = BuildError::AssetCopy(
            PathBuf::from("themes/default/styles/base.css"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.stage(), "assets");
        assert!(err.to_string().contains("styles/base.css"));
    }

    #[test]
    fn test_chain_includes_source() {
        let err: BuildError =
            ProfileError::Io(PathBuf::from("config/profile.toml"), Error::other("gone")).into();
        let chain = format!("{:#}", anyhow::Error::from(err));
        assert!(chain.starts_with("failed to load profile"));
        assert!(chain.contains("config/profile.toml"));
        assert!(chain.contains("gone"));
    }

    #[test]
    fn test_watch_error_names_root() {
        let err = WatchError::Missing(PathBuf::from("/site/assets"));
        assert_eq!(err.to_string(), "watch root `/site/assets` does not exist, skipping");
    }
}
