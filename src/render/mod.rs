//! Render pipeline: profile + theme → output tree.
//!
//! ```text
//! dist/
//! ├── index.html     # rendered theme template
//! ├── styles/        # theme styles/
//! ├── scripts/       # theme scripts/
//! ├── assets/        # theme assets/, then user assets/
//! ├── styles.css     # legacy root stylesheet, if any
//! ├── *.js           # legacy root scripts, if any
//! └── <avatar>       # local avatar, relative name kept
//! ```
//!
//! The page is rendered fully in memory before anything is written, so a
//! template error leaves the previous `index.html` untouched.

mod context;
mod copy;

pub use context::RenderContext;
use copy::{copy_dir, copy_file};

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;

use crate::config::SitePaths;
use crate::core::BuildError;
use crate::icons::IconTable;
use crate::profile::Profile;
use crate::theme::{LEGACY_STYLESHEET, TEMPLATE_FILE, Theme};
use crate::utils::path::safe_relative;

/// Rendered page file name at the output root.
pub const PAGE_FILE: &str = "index.html";

/// Theme subtrees mirrored into the output root.
const THEME_SUBTREES: [&str; 3] = ["styles", "scripts", "assets"];

/// Result of one successful build.
#[derive(Debug, Clone)]
pub struct OutputTree {
    pub root: PathBuf,
    pub page: PathBuf,
    /// Number of asset files copied.
    pub assets: usize,
}

/// Run the full pipeline for one build.
pub fn generate(
    profile: &Profile,
    theme: &Theme,
    icons: &IconTable,
    paths: &SitePaths,
) -> Result<OutputTree, BuildError> {
    let output = &paths.output;
    fs::create_dir_all(output).map_err(|e| BuildError::Io(output.clone(), e))?;

    let context = RenderContext::new(profile, &theme.manifest, icons);
    let html = render_page(&theme.template_path(), &context)?;

    let page = paths.page();
    fs::write(&page, html).map_err(|e| BuildError::Io(page.clone(), e))?;

    let mut assets = copy_theme_assets(theme, output)?;
    assets += copy_user_assets(profile, &paths.assets, output)?;

    crate::debug!("build"; "wrote {} and {} assets", page.display(), assets);

    Ok(OutputTree {
        root: output.clone(),
        page,
        assets,
    })
}

/// Render the theme template against `context`, entirely in memory.
pub fn render_page(template: &Path, context: &RenderContext<'_>) -> Result<String, BuildError> {
    let source = fs::read_to_string(template)
        .map_err(|e| BuildError::Template(template.to_path_buf(), e))?;

    let env = Environment::new();
    // The `.html` name turns on HTML auto-escaping.
    let tmpl = env
        .template_from_named_str(TEMPLATE_FILE, &source)
        .map_err(|e| BuildError::Render(template.to_path_buf(), e))?;
    tmpl.render(context)
        .map_err(|e| BuildError::Render(template.to_path_buf(), e))
}

/// Copy theme subtrees, legacy root files and declared asset files.
fn copy_theme_assets(theme: &Theme, output: &Path) -> Result<usize, BuildError> {
    let root = &theme.root;
    let mut count = 0;

    for subtree in THEME_SUBTREES {
        let src = root.join(subtree);
        if src.is_dir() {
            count += copy_dir(&src, &output.join(subtree))?;
        }
    }

    let legacy_css = root.join(LEGACY_STYLESHEET);
    if legacy_css.is_file() {
        copy_file(&legacy_css, &output.join(LEGACY_STYLESHEET))?;
        count += 1;
    }

    for script in root_scripts(root)? {
        if let Some(name) = script.file_name() {
            copy_file(&script, &output.join(name))?;
            count += 1;
        }
    }

    let manifest = &theme.manifest;
    for declared in manifest.styles.iter().chain(&manifest.scripts) {
        let Some(relative) = safe_relative(declared) else {
            crate::debug!("build"; "skipping unsafe asset path `{}`", declared);
            continue;
        };
        if is_in_subtree(&relative) || relative == Path::new(LEGACY_STYLESHEET) {
            continue;
        }
        let src = root.join(&relative);
        if src.is_file() && !is_root_script(&relative) {
            copy_file(&src, &output.join(&relative))?;
            count += 1;
        }
    }

    Ok(count)
}

/// `*.js` files directly under the theme root.
fn root_scripts(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(root).map_err(|e| BuildError::AssetCopy(root.to_path_buf(), e))?;
    let mut scripts = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| BuildError::AssetCopy(root.to_path_buf(), e))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "js") {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(scripts)
}

fn is_in_subtree(relative: &Path) -> bool {
    relative.components().count() > 1
        && THEME_SUBTREES
            .iter()
            .any(|subtree| relative.starts_with(subtree))
}

fn is_root_script(relative: &Path) -> bool {
    relative.components().count() == 1 && relative.extension().is_some_and(|ext| ext == "js")
}

/// Copy the local avatar and the user assets directory.
fn copy_user_assets(
    profile: &Profile,
    assets_dir: &Path,
    output: &Path,
) -> Result<usize, BuildError> {
    let mut count = 0;

    if profile.has_local_avatar() {
        match safe_relative(&profile.avatar) {
            Some(relative) => {
                let src = assets_dir.join(&relative);
                if src.is_file() {
                    copy_file(&src, &output.join(&relative))?;
                    count += 1;
                } else {
                    let dir = assets_dir.display();
                    crate::debug!("build"; "avatar `{}` not found in {}", profile.avatar, dir);
                }
            }
            None => crate::debug!("build"; "skipping unsafe avatar path `{}`", profile.avatar),
        }
    }

    if assets_dir.is_dir() {
        count += copy_dir(assets_dir, &output.join("assets"))?;
    }

    Ok(count)
}
