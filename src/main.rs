//! Linkhub - a link page generator with live-reload preview.

mod actor;
mod cli;
mod config;
mod core;
mod embed;
mod icons;
mod logger;
mod profile;
mod reload;
mod render;
mod theme;
mod utils;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, serve::ActorContext};
use config::AppConfig;
use icons::IconTable;
use reload::Notifier;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Arc::new(AppConfig::load(&cli)?);
    let icons = Arc::new(IconTable::bundled());
    debug!("icons"; "{} bundled icons", icons.len());

    match &cli.command {
        Commands::Build => build_once(&config, &icons),
        Commands::Watch { .. } => watch(config, icons),
    }
}

/// One-shot build. Any failure exits non-zero with the full error chain.
fn build_once(config: &AppConfig, icons: &IconTable) -> Result<()> {
    let started = Instant::now();
    let tree = build_site(config, icons).context("build failed")?;

    log!("build"; "wrote {} ({} assets under {}) in {}ms",
        tree.page.display(), tree.assets, tree.root.display(), started.elapsed().as_millis());
    Ok(())
}

/// Initial build, then the preview server with watcher and rebuild loop.
fn watch(config: Arc<AppConfig>, icons: Arc<IconTable>) -> Result<()> {
    let tree = build_site(&config, &icons).context("initial build failed")?;
    log!("build"; "wrote {}", tree.page.display());

    let server = cli::serve::bind_server(&config.serve)?;
    server.run(ActorContext {
        config,
        icons,
        notifier: Notifier::new(),
    })
}
