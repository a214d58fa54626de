//! Brand icon lookup.
//!
//! The table is built once at startup from the bundled `icons.json` dataset
//! and shared by reference with every build. A missing or malformed dataset
//! yields an empty table: every lookup then resolves to the placeholder glyph.

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Bundled icon dataset (Simple Icons format).
const BUNDLED_ICONS: &str = include_str!("icons.json");

/// Glyph returned for unknown slugs.
pub const PLACEHOLDER_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor">"#,
    r#"<circle cx="12" cy="12" r="10"/></svg>"#
);

/// Color returned for unknown slugs.
pub const DEFAULT_BRAND_COLOR: &str = "#ffffff";

/// One dataset entry.
#[derive(Debug, Clone, Deserialize)]
pub struct IconData {
    #[serde(default)]
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub hex: String,
    pub path: String,
}

/// Slug → icon table.
#[derive(Debug, Default)]
pub struct IconTable {
    icons: FxHashMap<String, IconData>,
}

impl IconTable {
    /// Load the dataset compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_ICONS)
    }

    /// Parse a dataset, degrading to an empty table on malformed input.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<IconData>>(json) {
            Ok(icons) => {
                let table = Self::from_entries(icons);
                if table.is_empty() {
                    crate::log!("warning"; "icon dataset is empty, using placeholders");
                }
                crate::debug!("icons"; "loaded {} icons", table.len());
                table
            }
            Err(e) => {
                crate::log!("warning"; "icon dataset unreadable, using placeholders: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = IconData>) -> Self {
        let icons = entries
            .into_iter()
            .map(|icon| (icon.slug.to_lowercase(), icon))
            .collect();
        Self { icons }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    fn get(&self, slug: &str) -> Option<&IconData> {
        self.icons.get(&slug.to_lowercase())
    }

    /// Inline SVG markup for `slug`, or the placeholder circle.
    pub fn resolve(&self, slug: &str) -> String {
        match self.get(slug) {
            Some(icon) => format!(
                concat!(
                    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" "#,
                    r#"fill="currentColor"><path d="{}"/></svg>"#
                ),
                icon.path
            ),
            None => PLACEHOLDER_SVG.to_string(),
        }
    }

    /// Brand color for `slug` as `#rrggbb`, or white.
    pub fn brand_color(&self, slug: &str) -> String {
        match self.get(slug) {
            Some(icon) if !icon.hex.is_empty() => format!("#{}", icon.hex),
            _ => DEFAULT_BRAND_COLOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IconTable {
        IconTable::from_entries([IconData {
            title: "RSS".into(),
            slug: "rss".into(),
            hex: "FFA500".into(),
            path: "M0 0h24v24H0z".into(),
        }])
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let icons = IconTable::bundled();
        assert!(!icons.is_empty());
        assert!(icons.resolve("rss").contains("<path d=\""));
    }

    #[test]
    fn test_resolve_known_slug() {
        let svg = table().resolve("rss");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"<path d="M0 0h24v24H0z"/>"#));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(table().resolve("RsS"), table().resolve("rss"));
        assert_eq!(table().brand_color("RSS"), "#FFA500");
    }

    #[test]
    fn test_unknown_slug_falls_back_to_placeholder() {
        assert_eq!(table().resolve("nope"), PLACEHOLDER_SVG);
        assert_eq!(table().resolve(""), PLACEHOLDER_SVG);
        assert_eq!(table().brand_color("nope"), DEFAULT_BRAND_COLOR);
    }

    #[test]
    fn test_empty_dataset_resolves_to_placeholders() {
        let icons = IconTable::from_json("[]");
        assert!(icons.is_empty());
        assert_eq!(icons.brand_color("rss"), DEFAULT_BRAND_COLOR);
    }

    #[test]
    fn test_malformed_dataset_is_empty_not_fatal() {
        let icons = IconTable::from_json("{ not json");
        assert!(icons.is_empty());
        assert_eq!(icons.resolve("rss"), PLACEHOLDER_SVG);
    }
}
