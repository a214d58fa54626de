//! Page background variants and their CSS.

use serde::{Serialize, Serializer, ser::SerializeStruct};

/// Fallback fill for missing or unrecognized backgrounds.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1e1f26";

/// Style emitted for [`BackgroundKind::Unknown`].
pub const DEFAULT_BACKGROUND_CSS: &str = "background-color: #1e1f26;";

/// Background variant, closed over the tags a profile may declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundKind {
    Color(String),
    Image(String),
    Gradient(String),
    /// Solid fill; the animated layer is drawn by the theme.
    Particles(String),
    Unknown,
}

impl BackgroundKind {
    /// Map a declared `type`/`value` pair onto a variant.
    ///
    /// Unknown tags and empty values both land on `Unknown`.
    pub fn parse(tag: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::Unknown;
        }
        let value = value.to_string();
        match tag.trim().to_ascii_lowercase().as_str() {
            "color" => Self::Color(value),
            "image" => Self::Image(value),
            "gradient" => Self::Gradient(value),
            "particles" => Self::Particles(value),
            _ => Self::Unknown,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Image(_) => "image",
            Self::Gradient(_) => "gradient",
            Self::Particles(_) => "particles",
            Self::Unknown => "unknown",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Color(v) | Self::Image(v) | Self::Gradient(v) | Self::Particles(v) => v,
            Self::Unknown => "",
        }
    }
}

/// Resolved page background.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub kind: BackgroundKind,
    /// Blur radius in pixels, image backgrounds only.
    pub blur: u32,
    /// Overlay opacity in (0, 1].
    pub opacity: f64,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color(DEFAULT_BACKGROUND_COLOR.to_string()),
            blur: 0,
            opacity: 1.0,
        }
    }
}

impl Background {
    /// CSS declarations for the page body. Total: never fails.
    pub fn css(&self) -> String {
        match &self.kind {
            BackgroundKind::Color(value) | BackgroundKind::Particles(value) => {
                format!("background-color: {value};")
            }
            BackgroundKind::Image(value) => {
                let mut css = format!(
                    "background-image: url('{value}'); background-size: cover; \
                     background-position: center; background-repeat: no-repeat;"
                );
                if self.blur > 0 {
                    css.push_str(&format!(" filter: blur({}px);", self.blur));
                }
                css
            }
            BackgroundKind::Gradient(value) => format!("background: {value};"),
            BackgroundKind::Unknown => DEFAULT_BACKGROUND_CSS.to_string(),
        }
    }
}

/// Clamp a declared opacity into (0, 1]; anything unusable becomes 1.0.
pub fn normalize_opacity(opacity: f64) -> f64 {
    if opacity > 0.0 && opacity.is_finite() {
        opacity.min(1.0)
    } else {
        1.0
    }
}

/// Round a declared blur radius to whole pixels; non-positive or unusable means none.
pub fn normalize_blur(blur: f64) -> u32 {
    if blur.is_finite() && blur > 0.0 {
        // `as` saturates at u32::MAX
        blur.round() as u32
    } else {
        0
    }
}

impl Serialize for Background {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Background", 4)?;
        state.serialize_field("type", self.kind.tag())?;
        state.serialize_field("value", self.kind.value())?;
        state.serialize_field("blur", &self.blur)?;
        state.serialize_field("opacity", &self.opacity)?;
        state.end()
    }
}
