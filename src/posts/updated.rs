//! Fill a missing `updated` field from the git history of a post.
//!
//! The interactive loop lives in the CLI; this module holds the parts that
//! don't talk to a terminal.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::FrontMatter;
use crate::utils::date::DateTime;

/// Most recent commits offered per post.
pub const MAX_COMMITS: usize = 20;

/// Message lines shown per commit.
pub const PREVIEW_LINES: usize = 3;

pub const HELP: &str = "\
Actions: v=show diff for this file in that commit, m=show full commit message, o=show commit web URL.
Enter e.g. '1v' to preview commit 1's diff, or just '1' to pick it. Blank to skip.";

static CHOICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([a-zA-Z]+)?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Diff,
    Message,
    Open,
    Unknown(char),
}

impl From<char> for Action {
    fn from(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'v' => Self::Diff,
            'm' => Self::Message,
            'o' => Self::Open,
            _ => Self::Unknown(c),
        }
    }
}

/// One answer at the prompt. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Skip,
    Help,
    Pick(usize),
    Inspect(usize, Vec<Action>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChoiceError {
    #[error("invalid input, enter a number, number+actions (e.g. 1v), 'h' for help, or blank to skip")]
    Invalid,

    #[error("number out of range")]
    OutOfRange,
}

/// Parse a prompt answer against `count` listed commits.
pub fn parse_choice(input: &str, count: usize) -> Result<Choice, ChoiceError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Choice::Skip);
    }
    if input.eq_ignore_ascii_case("h") || input.eq_ignore_ascii_case("help") {
        return Ok(Choice::Help);
    }

    let caps = CHOICE.captures(input).ok_or(ChoiceError::Invalid)?;
    let number: usize = caps[1].parse().map_err(|_| ChoiceError::OutOfRange)?;
    if number == 0 || number > count {
        return Err(ChoiceError::OutOfRange);
    }
    let index = number - 1;

    Ok(match caps.get(2) {
        Some(actions) => Choice::Inspect(index, actions.as_str().chars().map(Action::from).collect()),
        None => Choice::Pick(index),
    })
}

/// Whether the post has front matter without an `updated` key.
pub fn needs_updated(text: &str) -> bool {
    FrontMatter::parse(text).is_some_and(|fm| !fm.has_key("updated"))
}

/// `YYYY-MM-DD HH:MM:SS` in the commit's own offset. Unparseable times are
/// kept as given.
pub fn format_updated(commit_time: &str) -> String {
    DateTime::parse(commit_time).map_or_else(|| commit_time.trim().to_string(), |dt| dt.to_string())
}

/// Source with `updated: <value>` inserted, if it has front matter.
pub fn with_updated(text: &str, value: &str) -> Option<String> {
    FrontMatter::parse(text).map(|fm| fm.insert_after_date(&format!("updated: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("", 3), Ok(Choice::Skip));
        assert_eq!(parse_choice("  \n", 3), Ok(Choice::Skip));
        assert_eq!(parse_choice("H", 3), Ok(Choice::Help));
        assert_eq!(parse_choice("2", 3), Ok(Choice::Pick(1)));
        assert_eq!(
            parse_choice("1vM", 3),
            Ok(Choice::Inspect(0, vec![Action::Diff, Action::Message]))
        );
        assert_eq!(
            parse_choice("3ox", 3),
            Ok(Choice::Inspect(2, vec![Action::Open, Action::Unknown('x')]))
        );
    }

    #[test]
    fn test_parse_choice_errors() {
        assert_eq!(parse_choice("0", 3), Err(ChoiceError::OutOfRange));
        assert_eq!(parse_choice("4", 3), Err(ChoiceError::OutOfRange));
        assert_eq!(parse_choice("v1", 3), Err(ChoiceError::Invalid));
        assert_eq!(parse_choice("1 v", 3), Err(ChoiceError::Invalid));
        assert_eq!(
            parse_choice("99999999999999999999999", 3),
            Err(ChoiceError::OutOfRange)
        );
    }

    #[test]
    fn test_needs_updated() {
        assert!(needs_updated("---\ntitle: x\n---\n"));
        assert!(!needs_updated("---\nupdated: 2020-01-01\n---\n"));
        assert!(!needs_updated("no front matter"));
    }

    #[test]
    fn test_format_updated() {
        assert_eq!(format_updated("2023-11-02T23:05:09+09:00"), "2023-11-02 23:05:09");
        assert_eq!(format_updated("garbage"), "garbage");
    }

    #[test]
    fn test_with_updated() {
        let text = "---\ntitle: x\ndate: 2015-02-22\n---\nBody";
        assert_eq!(
            with_updated(text, "2023-11-02 23:05:09").unwrap(),
            "---\ntitle: x\ndate: 2015-02-22\nupdated: 2023-11-02 23:05:09\n---\nBody"
        );
        assert!(with_updated("Body", "x").is_none());
    }
}
