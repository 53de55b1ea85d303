use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Ask before writing. Anything but `y`/`yes` declines.
pub(super) fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    read_yes(&mut io::stdin().lock())
}

fn read_yes(input: &mut impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_yes() {
        assert!(read_yes(&mut Cursor::new("y\n")).unwrap());
        assert!(read_yes(&mut Cursor::new("YES\n")).unwrap());
        assert!(!read_yes(&mut Cursor::new("\n")).unwrap());
        assert!(!read_yes(&mut Cursor::new("nope\n")).unwrap());
        assert!(!read_yes(&mut Cursor::new("")).unwrap());
    }
}
