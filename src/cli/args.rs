//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::posts::redirects::DEFAULT_KEY;

/// Build hooks for a static blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sitehook.toml)
    #[arg(short = 'C', long, global = true, default_value = "sitehook.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

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
    /// Fetch remote assets (umami.js, badges) into the output directory
    #[command(visible_alias = "g")]
    Generate {
        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Wrap captioned images in rendered HTML
    #[command(visible_alias = "c")]
    Caption {
        #[command(flatten)]
        args: CaptionArgs,
    },

    /// Add derived values to template locals (JSON)
    #[command(visible_alias = "l")]
    Locals {
        /// Locals JSON file, or `-` for stdin. If omitted, built from `site.url`.
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Maintain post sources
    #[command(visible_alias = "p")]
    Posts {
        /// Posts directory path (relative to project root)
        #[arg(short = 'd', long, global = true, value_hint = clap::ValueHint::DirPath)]
        posts_dir: Option<PathBuf>,

        #[command(subcommand)]
        command: PostsCommand,
    },
}

/// Caption command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CaptionArgs {
    /// HTML files or directories to rewrite in place. Use `-` for stdin to stdout.
    #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Layout the documents were rendered with
    #[arg(short, long, default_value = "post")]
    pub layout: String,

    /// Class of the wrapping <figure>
    #[arg(long)]
    pub class_name: Option<String>,
}

/// Post maintenance subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PostsCommand {
    /// Write new ids from `_redirects` into front matter
    RedirectIds {
        #[command(flatten)]
        apply: ApplyArgs,

        /// Redirects file (default: <root>/_redirects)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        redirects: Option<PathBuf>,

        /// Front-matter key to write
        #[arg(long, default_value = DEFAULT_KEY)]
        key: String,
    },

    /// Move posts into YYYY/MM folders by date
    Organize {
        #[command(flatten)]
        apply: ApplyArgs,
    },

    /// Pick `updated` for posts from their git history
    Updated {
        /// Show choices without writing files
        #[arg(long)]
        preview: bool,
    },
}

/// Shared flags for commands that preview before writing.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ApplyArgs {
    /// Write changes (otherwise only preview)
    #[arg(long)]
    pub apply: bool,

    /// Skip confirmation with --apply
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    /// Commands that cannot run on default configuration.
    pub const fn requires_config(&self) -> bool {
        matches!(self.command, Commands::Generate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from(["sitehook", "-v", "generate", "-o", "dist"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.requires_config());
        assert!(matches!(
            cli.command,
            Commands::Generate { output: Some(ref p) } if p == &PathBuf::from("dist")
        ));
    }

    #[test]
    fn test_parse_caption_requires_path() {
        assert!(Cli::try_parse_from(["sitehook", "caption"]).is_err());

        let cli = Cli::try_parse_from(["sitehook", "caption", "-l", "page", "-"]).unwrap();
        let Commands::Caption { args } = cli.command else {
            panic!("expected caption");
        };
        assert_eq!(args.layout, "page");
        assert_eq!(args.paths, vec![PathBuf::from("-")]);
    }

    #[test]
    fn test_parse_posts() {
        let cli = Cli::try_parse_from([
            "sitehook", "posts", "redirect-ids", "--apply", "-y", "-d", "content",
        ])
        .unwrap();
        assert!(!cli.requires_config());
        let Commands::Posts { posts_dir, command } = cli.command else {
            panic!("expected posts");
        };
        assert_eq!(posts_dir, Some(PathBuf::from("content")));
        let PostsCommand::RedirectIds { apply, key, .. } = command else {
            panic!("expected redirect-ids");
        };
        assert!(apply.apply && apply.yes);
        assert_eq!(key, "id");
    }
}
