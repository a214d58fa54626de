//! Single-build orchestration.
//!
//! Pipeline: load profile -> resolve theme -> render page -> copy assets.
//!
//! The profile and theme are loaded before the output directory is touched,
//! so a broken profile never creates or modifies `dist/`.

use crate::{
    config::AppConfig,
    core::BuildError,
    icons::IconTable,
    profile::Profile,
    render::{self, OutputTree},
    theme::Theme,
};

/// Run one complete build.
pub fn build_site(config: &AppConfig, icons: &IconTable) -> Result<OutputTree, BuildError> {
    let paths = &config.paths;

    let profile = Profile::load(&paths.profile)?;
    let schema = &profile.schema_version;
    crate::debug!("build"; "profile {} (schema {})", paths.profile.display(), schema);

    let theme = Theme::load(paths.theme_dir(&profile.theme))?;
    let manifest = &theme.manifest;
    let root = theme.root.display();
    crate::debug!("build"; "theme {} {} at {}", manifest.name, manifest.version, root);

    render::generate(&profile, &theme, icons, paths)
}
