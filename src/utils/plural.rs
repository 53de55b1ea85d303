//! Count formatting for log lines.

/// `1 file`, `0 files`, `14 files`
pub fn count(n: usize, noun: &str) -> String {
    let suffix = if n == 1 { "" } else { "s" };
    format!("{n} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count() {
        assert_eq!(count(0, "file"), "0 files");
        assert_eq!(count(1, "file"), "1 file");
        assert_eq!(count(14, "redirect"), "14 redirects");
    }
}
