//! User profile: the page definition read from `config/profile.toml`.
//!
//! # Example
//!
//! ```toml
//! name = "Ada"
//! description = "Engineer.\nWriter."
//! avatar = "avatar.png"
//! theme = "default"
//!
//! [background]
//! type = "gradient"
//! value = "linear-gradient(45deg, #000, #333)"
//!
//! [[links]]
//! title = "Blog"
//! url = "https://ada.test"
//! icon = "rss"
//!
//! [[sections]]
//! title = "Projects"
//! [[sections.links]]
//! title = "Engine"
//! url = "https://engine.test"
//!
//! [[socials]]
//! icon = "x"
//! url = "https://x.com/ada"
//! ```
//!
//! Missing keys are default-filled; unknown keys are ignored (and reported
//! under `--verbose`).

mod background;

pub use background::{
    Background, BackgroundKind, DEFAULT_BACKGROUND_COLOR, normalize_blur, normalize_opacity,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SCHEMA_VERSION: &str = "1.0";
pub const DEFAULT_THEME: &str = "default";

/// Profile could not be loaded.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("cannot read profile `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("cannot parse profile `{0}`")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// A link button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub title: String,
    pub url: String,
    /// Icon slug in the bundled dataset.
    pub icon: String,
    /// Custom icon image, takes precedence over `icon` in themes.
    pub icon_url: String,
    pub color: String,
}

/// A titled group of links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    pub links: Vec<Link>,
}

/// A social icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub icon: String,
    pub url: String,
    pub color: String,
}

/// The on-disk shape of `[background]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBackground {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    /// Accepts any TOML number; normalized to whole non-negative pixels.
    blur: f64,
    opacity: f64,
}

impl From<RawBackground> for Background {
    fn from(raw: RawBackground) -> Self {
        let kind = if raw.kind.trim().is_empty() {
            BackgroundKind::Color(DEFAULT_BACKGROUND_COLOR.to_string())
        } else {
            BackgroundKind::parse(&raw.kind, &raw.value)
        };
        Self {
            kind,
            blur: normalize_blur(raw.blur),
            opacity: normalize_opacity(raw.opacity),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProfile {
    schema_version: String,
    name: String,
    subtitle: String,
    description: String,
    avatar: String,
    theme: String,
    background: RawBackground,
    links: Vec<Link>,
    sections: Vec<Section>,
    socials: Vec<Social>,
}

/// Validated, default-filled profile. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub schema_version: String,
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub avatar: String,
    pub theme: String,
    pub background: Background,
    pub links: Vec<Link>,
    pub sections: Vec<Section>,
    pub socials: Vec<Social>,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            schema_version: or_default(raw.schema_version, DEFAULT_SCHEMA_VERSION),
            name: raw.name,
            subtitle: raw.subtitle,
            description: raw.description,
            avatar: raw.avatar,
            theme: or_default(raw.theme, DEFAULT_THEME),
            background: raw.background.into(),
            links: raw.links,
            sections: raw.sections,
            socials: raw.socials,
        }
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl Profile {
    /// Read and validate the profile at `path`.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content =
            fs::read_to_string(path).map_err(|e| ProfileError::Io(path.to_path_buf(), e))?;
        let (profile, ignored) =
            Self::parse(&content).map_err(|e| ProfileError::Parse(path.to_path_buf(), e))?;

        if !ignored.is_empty() {
            let keys = ignored.join(", ");
            crate::debug!("profile"; "ignoring unknown keys in {}: {}", path.display(), keys);
        }

        Ok(profile)
    }

    /// Parse profile TOML, returning the unknown keys alongside.
    pub fn parse(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let raw: RawProfile = serde_ignored::deserialize(deserializer, |path| {
            ignored.push(path.to_string());
        })?;
        Ok((raw.into(), ignored))
    }

    /// Whether the avatar refers to a file shipped with the site.
    pub fn has_local_avatar(&self) -> bool {
        is_local_reference(&self.avatar)
    }
}

/// A non-empty reference that is neither a network URL nor absolute.
pub fn is_local_reference(reference: &str) -> bool {
    let reference = reference.trim();
    if reference.is_empty() {
        return false;
    }
    if let Ok(url) = url::Url::parse(reference)
        && matches!(url.scheme(), "http" | "https")
    {
        return false;
    }
    !reference.starts_with("//") && !Path::new(reference).is_absolute()
}
