//! YAML front matter at the top of a Markdown post.
//!
//! Only flat `key: value` lines are understood. Edits are line-based and
//! leave every other byte of the file as it was, including CRLF endings.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `---` line, block, `---` line. Group 1 is the block.
static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---[ \t]*\r?\n((?s:.*?))\r?\n---[ \t]*(?:\r?\n|\z)").unwrap()
});

static YMD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

#[derive(Debug, Clone)]
pub struct FrontMatter<'a> {
    source: &'a str,
    /// Byte range of the block, without delimiters.
    span: Range<usize>,
}

impl<'a> FrontMatter<'a> {
    /// Front matter of `source`, if the file starts with one.
    pub fn parse(source: &'a str) -> Option<Self> {
        let block = BLOCK.captures(source)?.get(1)?;
        Some(Self {
            source,
            span: block.range(),
        })
    }

    pub fn content(&self) -> &'a str {
        &self.source[self.span.clone()]
    }

    /// Unquoted value of `key` (case-insensitive). Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.lines()
            .find_map(|(_, line)| key_value(line, key))
            .map(unquote)
            .filter(|v| !v.is_empty())
    }

    /// Whether a `key:` line exists, with or without a value.
    pub fn has_key(&self, key: &str) -> bool {
        self.lines().any(|(_, line)| key_value(line, key).is_some())
    }

    /// First `YYYY-MM-DD` inside the `date` value.
    pub fn date_ymd(&self) -> Option<&'a str> {
        self.get("date")
            .and_then(|date| YMD.find(date))
            .map(|m| m.as_str())
    }

    /// Source with `key` set to `value`, or `None` when it already holds it.
    ///
    /// An existing line is replaced in place; otherwise the key is appended
    /// as the last line of the block.
    pub fn set(&self, key: &str, value: &str) -> Option<String> {
        let new_line = format!("{key}: {}", yaml_quote(value));

        if let Some((start, line)) = self.lines().find(|(_, l)| key_value(l, key).is_some()) {
            if key_value(line, key).map(unquote) == Some(value) {
                return None;
            }
            let end = start + line.len();
            return Some([&self.source[..start], new_line.as_str(), &self.source[end..]].concat());
        }

        let at = self.span.end;
        let sep = if self.span.is_empty() { "" } else { self.newline() };
        Some([&self.source[..at], sep, new_line.as_str(), &self.source[at..]].concat())
    }

    /// Source with `line` inserted after the `date:` line, or as the first
    /// line of the block when there is none.
    pub fn insert_after_date(&self, line: &str) -> String {
        let nl = self.newline();
        match self.lines().find(|(_, l)| key_value(l, "date").is_some()) {
            Some((start, date_line)) => {
                let at = start + date_line.len();
                [&self.source[..at], nl, line, &self.source[at..]].concat()
            }
            None => {
                let at = self.span.start;
                [&self.source[..at], line, nl, &self.source[at..]].concat()
            }
        }
    }

    /// Lines of the block with their absolute byte offset, `\r` stripped.
    fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> {
        let mut offset = self.span.start;
        self.content().split('\n').map(move |raw| {
            let start = offset;
            offset += raw.len() + 1;
            (start, raw.strip_suffix('\r').unwrap_or(raw))
        })
    }

    fn newline(&self) -> &'static str {
        if self.source[..self.span.start].ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}

/// Value of a `key: value` line when the key matches.
fn key_value<'l>(line: &'l str, key: &str) -> Option<&'l str> {
    let (k, v) = line.split_once(':')?;
    k.trim().eq_ignore_ascii_case(key).then(|| v.trim())
}

fn unquote(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Single-quote `value` when plain YAML would misread it.
pub fn yaml_quote(value: &str) -> String {
    if value.contains(|c: char| c.is_whitespace() || matches!(c, ':' | '\'' | '\\')) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}
