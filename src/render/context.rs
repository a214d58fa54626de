//! Template context for one render pass.

use minijinja::Value;
use serde::Serialize;

use crate::icons::IconTable;
use crate::profile::{Link, Profile, Section, Social};
use crate::theme::ThemeManifest;
use crate::utils::html::text_to_html;

/// A link with its icon resolved.
#[derive(Debug, Serialize)]
pub struct LinkView<'a> {
    pub title: &'a str,
    pub url: &'a str,
    /// Inline SVG, marked safe.
    pub icon_svg: Value,
    pub icon_url: &'a str,
    pub color: &'a str,
    pub brand_color: String,
}

#[derive(Debug, Serialize)]
pub struct SectionView<'a> {
    pub title: &'a str,
    pub links: Vec<LinkView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SocialView<'a> {
    pub url: &'a str,
    pub icon: &'a str,
    pub icon_svg: Value,
    pub color: &'a str,
    pub brand_color: String,
}

/// Everything a theme template can see.
///
/// Markup produced here (icons, background CSS, description) is marked safe;
/// all other strings are escaped by the template engine.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub profile: &'a Profile,
    pub theme: &'a ThemeManifest,
    pub links: Vec<LinkView<'a>>,
    pub sections: Vec<SectionView<'a>>,
    pub socials: Vec<SocialView<'a>>,
    pub background_css: Value,
    pub description_html: Value,
    pub default_theme: &'a str,
    pub theme_styles: &'a [String],
    pub theme_scripts: &'a [String],
}

impl<'a> RenderContext<'a> {
    pub fn new(profile: &'a Profile, theme: &'a ThemeManifest, icons: &IconTable) -> Self {
        Self {
            profile,
            theme,
            links: link_views(&profile.links, icons),
            sections: profile
                .sections
                .iter()
                .map(|section| section_view(section, icons))
                .collect(),
            socials: profile
                .socials
                .iter()
                .map(|social| social_view(social, icons))
                .collect(),
            background_css: Value::from_safe_string(profile.background.css()),
            description_html: Value::from_safe_string(text_to_html(&profile.description)),
            default_theme: &theme.default_color_scheme,
            theme_styles: &theme.styles,
            theme_scripts: &theme.scripts,
        }
    }
}

fn link_views<'a>(links: &'a [Link], icons: &IconTable) -> Vec<LinkView<'a>> {
    links
        .iter()
        .map(|link| LinkView {
            title: &link.title,
            url: &link.url,
            icon_svg: Value::from_safe_string(icons.resolve(&link.icon)),
            icon_url: &link.icon_url,
            color: &link.color,
            brand_color: icons.brand_color(&link.icon),
        })
        .collect()
}

fn section_view<'a>(section: &'a Section, icons: &IconTable) -> SectionView<'a> {
    SectionView {
        title: &section.title,
        links: link_views(&section.links, icons),
    }
}

fn social_view<'a>(social: &'a Social, icons: &IconTable) -> SocialView<'a> {
    SocialView {
        url: &social.url,
        icon: &social.icon,
        icon_svg: Value::from_safe_string(icons.resolve(&social.icon)),
        color: &social.color,
        brand_color: icons.brand_color(&social.icon),
    }
}
