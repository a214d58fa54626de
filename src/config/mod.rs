//! Runtime configuration: project paths and preview server settings.
//!
//! Resolution order (later wins):
//!
//! | Source               | Affects                         |
//! |----------------------|---------------------------------|
//! | built-in defaults    | everything                      |
//! | CLI path flags       | profile/themes/assets/output    |
//! | `PORT` environment   | preview port                    |
//! | `watch --port`       | preview port                    |
//!
//! Live reload is pushed over a separate WebSocket listener starting at
//! [`DEFAULT_PUSH_PORT`] on the same interface.
//!
//! Default layout, relative to the project root:
//!
//! ```text
//! config/profile.toml   # profile
//! themes/<name>/        # themes, one directory each
//! assets/               # user assets (avatar, images)
//! dist/                 # output tree
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::{Cli, Commands};
use crate::log;

pub const DEFAULT_PROFILE: &str = "config/profile.toml";
pub const DEFAULT_THEMES_DIR: &str = "themes";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const DEFAULT_PORT: u16 = 3000;
/// First port tried for the live reload push listener.
pub const DEFAULT_PUSH_PORT: u16 = 35729;

/// Environment variable overriding the preview port.
pub const PORT_ENV: &str = "PORT";

/// Absolute locations of every input and the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub root: PathBuf,
    pub profile: PathBuf,
    pub themes: PathBuf,
    pub assets: PathBuf,
    pub output: PathBuf,
}

impl SitePaths {
    /// Default layout under `root`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            profile: root.join(DEFAULT_PROFILE),
            themes: root.join(DEFAULT_THEMES_DIR),
            assets: root.join(DEFAULT_ASSETS_DIR),
            output: root.join(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Directory of the theme called `name`.
    pub fn theme_dir(&self, name: &str) -> PathBuf {
        self.themes.join(name)
    }

    /// Directory holding the profile document.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile
            .parent()
            .map_or_else(|| self.root.clone(), Path::to_path_buf)
    }

    pub fn page(&self) -> PathBuf {
        self.output.join(crate::render::PAGE_FILE)
    }
}

/// Preview server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    /// Network interface to bind (`127.0.0.1` = localhost only).
    pub interface: IpAddr,
    pub port: u16,
    /// Base port of the WebSocket push listener (next free port is used if busy).
    pub push_port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: DEFAULT_PORT,
            push_port: DEFAULT_PUSH_PORT,
        }
    }
}

/// Fully resolved configuration, immutable after load.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: SitePaths,
    pub serve: ServeConfig,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and the environment.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let root = match &cli.root {
            Some(root) => cwd.join(root),
            None => cwd,
        };

        let mut config = Self {
            paths: SitePaths::from_root(&root),
            serve: ServeConfig::default(),
        };
        config.apply_path_overrides(cli);
        config.apply_port_env(std::env::var(PORT_ENV).ok().as_deref());

        if let Commands::Watch { port, interface } = &cli.command {
            if let Some(port) = port {
                config.serve.port = *port;
            }
            if let Some(interface) = interface {
                config.serve.interface = *interface;
            }
        }

        Ok(config)
    }

    fn apply_path_overrides(&mut self, cli: &Cli) {
        let root = self.paths.root.clone();
        let resolve = |path: &PathBuf| root.join(path);

        if let Some(profile) = &cli.profile {
            self.paths.profile = resolve(profile);
        }
        if let Some(themes) = &cli.themes {
            self.paths.themes = resolve(themes);
        }
        if let Some(assets) = &cli.assets {
            self.paths.assets = resolve(assets);
        }
        if let Some(output) = &cli.output {
            self.paths.output = resolve(output);
        }
    }

    /// Apply a `PORT` value; unusable values are reported and ignored.
    fn apply_port_env(&mut self, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        match value.parse::<u16>() {
            Ok(port) if port > 0 => self.serve.port = port,
            _ => log!(
                "warning";
                "ignoring invalid {}={:?}, using port {}",
                PORT_ENV,
                value,
                self.serve.port
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> AppConfig {
        let cli = Cli::parse_from(args);
        let mut config = AppConfig {
            paths: SitePaths::from_root(Path::new("/site")),
            serve: ServeConfig::default(),
        };
        config.apply_path_overrides(&cli);
        config
    }

    #[test]
    fn test_default_layout() {
        let paths = SitePaths::from_root(Path::new("/site"));
        assert_eq!(paths.profile, PathBuf::from("/site/config/profile.toml"));
        assert_eq!(paths.themes, PathBuf::from("/site/themes"));
        assert_eq!(paths.assets, PathBuf::from("/site/assets"));
        assert_eq!(paths.output, PathBuf::from("/site/dist"));
        assert_eq!(paths.profile_dir(), PathBuf::from("/site/config"));
        assert_eq!(paths.theme_dir("neon"), PathBuf::from("/site/themes/neon"));
        assert_eq!(paths.page(), PathBuf::from("/site/dist/index.html"));
    }

    #[test]
    fn test_path_overrides_are_root_relative() {
        let config = config(&["linkhub", "--output", "public", "--profile", "me.toml", "build"]);
        assert_eq!(config.paths.output, PathBuf::from("/site/public"));
        assert_eq!(config.paths.profile, PathBuf::from("/site/me.toml"));
        assert_eq!(config.paths.themes, PathBuf::from("/site/themes"));
    }

    #[test]
    fn test_port_env_override() {
        let mut config = config(&["linkhub", "watch"]);
        assert_eq!(config.serve.port, DEFAULT_PORT);
        assert_eq!(config.serve.push_port, DEFAULT_PUSH_PORT);

        config.apply_port_env(Some("8080"));
        assert_eq!(config.serve.port, 8080);

        config.apply_port_env(Some("not-a-port"));
        assert_eq!(config.serve.port, 8080);

        config.apply_port_env(Some("0"));
        assert_eq!(config.serve.port, 8080);

        config.apply_port_env(None);
        assert_eq!(config.serve.port, 8080);
    }
}
