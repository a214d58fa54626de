//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Link page generator with live-reload preview
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Project root (default: current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Profile file path, relative to the root (default: config/profile.toml)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub profile: Option<PathBuf>,

    /// Themes directory, relative to the root (default: themes)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub themes: Option<PathBuf>,

    /// User assets directory, relative to the root (default: assets)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub assets: Option<PathBuf>,

    /// Output directory, relative to the root (default: dist)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the page once into the output directory
    #[command(visible_alias = "b")]
    Build,

    /// Build, then serve with live reload and rebuild on changes
    #[command(visible_alias = "w")]
    Watch {
        /// Port number to listen on (overrides $PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,
    },
}
