//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `serve` - Preview server resources (livereload.js)
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{LIVERELOAD_JS, LiveReloadVars};
//!
//! let js = LIVERELOAD_JS.render(&LiveReloadVars::new(35729));
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// URL the client script is served from.
    pub const LIVERELOAD_SCRIPT_URL: &str = "/__livereload.js";

    /// Delay before a dropped client reloads or reconnects.
    pub const RETRY_MS: u32 = 1000;

    /// Variables for livereload.js.
    pub struct LiveReloadVars {
        /// Port of the push listener, on the same host as the page.
        pub push_port: u16,
        pub retry_ms: u32,
    }

    impl LiveReloadVars {
        pub fn new(push_port: u16) -> Self {
            Self {
                push_port,
                retry_ms: RETRY_MS,
            }
        }
    }

    impl TemplateVars for LiveReloadVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__PUSH_PORT__", &self.push_port.to_string())
                .replace("__RETRY_MS__", &self.retry_ms.to_string())
        }
    }

    /// Live reload client script.
    pub const LIVERELOAD_JS: Template<LiveReloadVars> =
        Template::new(include_str!("serve/livereload.js"));

    /// `<script>` tag injected into served HTML pages.
    pub fn script_tag() -> String {
        format!(r#"<script src="{LIVERELOAD_SCRIPT_URL}"></script>"#)
    }

}
