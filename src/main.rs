//! sitehook - build hooks and post tools for a static blog.

mod asset;
mod cli;
mod config;
mod hooks;
mod logger;
mod posts;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Generate { .. } => cli::generate::generate_assets(&config),
        Commands::Caption { args } => cli::caption::caption_files(args, &config),
        Commands::Locals { input } => cli::locals::print_locals(input.as_deref(), &config),
        Commands::Posts { command, .. } => cli::posts::run_posts(command, &config),
    }
}
