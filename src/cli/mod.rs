//! Command-line interface module.

mod args;
pub mod caption;
pub mod generate;
pub mod locals;
pub mod posts;

pub use args::{ApplyArgs, CaptionArgs, Cli, Commands, PostsCommand};
