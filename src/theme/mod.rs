//! Theme manifest resolution.
//!
//! A theme is a directory holding `template.html` plus optional assets and an
//! optional `theme.toml` manifest:
//!
//! ```toml
//! name = "Neon"
//! version = "2.1.0"
//! author = "Ada"
//! default_color_scheme = "dark"
//! styles = ["styles/base.css", "styles/neon.css"]
//! scripts = ["scripts/particles.js"]
//!
//! [features]
//! particles = true
//! animations = true
//! ```
//!
//! Without a manifest the theme is treated as a legacy theme: name from the
//! directory, and a root-level `styles.css` if one exists.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_FILE: &str = "theme.toml";
pub const TEMPLATE_FILE: &str = "template.html";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_COLOR_SCHEME: &str = "dark";

/// Stylesheets tried, in order, when a theme declares none.
const STYLE_CANDIDATES: [&str; 2] = ["styles/base.css", LEGACY_STYLESHEET];

/// Root-level stylesheet of pre-manifest themes.
pub const LEGACY_STYLESHEET: &str = "styles.css";

/// Manifest exists but could not be used.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("cannot read theme manifest `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("cannot parse theme manifest `{0}`")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// Optional theme capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeFeatures {
    pub particles: bool,
    pub animations: bool,
}

/// Theme metadata with every default applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeManifest {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    pub license: String,
    /// `"light"` or `"dark"`.
    pub default_color_scheme: String,
    pub features: ThemeFeatures,
    /// Stylesheets, relative to the theme root.
    pub styles: Vec<String>,
    /// Scripts, relative to the theme root.
    pub scripts: Vec<String>,
}

impl ThemeManifest {
    /// Resolve the manifest of the theme at `root`.
    ///
    /// A missing manifest is not an error; an unreadable or malformed one is.
    pub fn resolve(root: &Path) -> Result<Self, ThemeError> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            let root_display = root.display();
            crate::debug!("theme"; "no {} in {}, using legacy layout", MANIFEST_FILE, root_display);
            return Ok(Self::legacy(root));
        }

        let content = fs::read_to_string(&manifest_path)
            .map_err(|e| ThemeError::Io(manifest_path.clone(), e))?;

        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(&content);
        let mut manifest: Self = serde_ignored::deserialize(deserializer, |path| {
            ignored.push(path.to_string());
        })
        .map_err(|e| ThemeError::Parse(manifest_path.clone(), e))?;

        if !ignored.is_empty() {
            let keys = ignored.join(", ");
            let manifest_display = manifest_path.display();
            crate::debug!("theme"; "ignoring unknown keys in {}: {}", manifest_display, keys);
        }

        manifest.apply_defaults(root);
        Ok(manifest)
    }

    /// Manifest synthesized for a theme without `theme.toml`.
    fn legacy(root: &Path) -> Self {
        let mut manifest = Self {
            name: dir_name(root),
            version: DEFAULT_VERSION.to_string(),
            default_color_scheme: DEFAULT_COLOR_SCHEME.to_string(),
            ..Self::default()
        };
        if root.join(LEGACY_STYLESHEET).is_file() {
            manifest.styles.push(LEGACY_STYLESHEET.to_string());
        }
        manifest
    }

    /// Fill each missing field independently.
    fn apply_defaults(&mut self, root: &Path) {
        if self.name.trim().is_empty() {
            self.name = dir_name(root);
        }
        if self.version.trim().is_empty() {
            self.version = DEFAULT_VERSION.to_string();
        }
        if self.default_color_scheme.trim().is_empty() {
            self.default_color_scheme = DEFAULT_COLOR_SCHEME.to_string();
        }
        if self.styles.is_empty()
            && let Some(candidate) = STYLE_CANDIDATES.iter().find(|p| root.join(p).is_file())
        {
            self.styles.push((*candidate).to_string());
        }
    }
}

fn dir_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A theme selected for one build: where it lives and what it declares.
#[derive(Debug, Clone)]
pub struct Theme {
    pub root: PathBuf,
    pub manifest: ThemeManifest,
}

impl Theme {
    /// Resolve the theme rooted at `root`.
    pub fn load(root: PathBuf) -> Result<Self, ThemeError> {
        let manifest = ThemeManifest::resolve(&root)?;
        Ok(Self { root, manifest })
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_FILE)
    }
}
