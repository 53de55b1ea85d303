//! Shared helpers for hooks and post tools.

pub mod date;
pub mod exec;
pub mod git;
pub mod html;
pub mod mime;
pub mod plural;
pub mod walk;
