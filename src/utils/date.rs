//! Wall-clock datetime parsing without timezone dependencies.
//!
//! Git's `%cI` and front-matter dates carry the author's local time. The
//! offset is parsed and dropped, so formatting yields the time as it was
//! written.
//!
//! ```ignore
//! let dt = DateTime::parse("2024-06-15T14:30:45+09:00").unwrap();
//! assert_eq!(dt.to_string(), "2024-06-15 14:30:45");
//! ```

use anyhow::{Result, bail};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parse `YYYY-MM-DD`, optionally followed by `[T ]HH:MM[:SS]`,
    /// fractional seconds and a `Z` or `±HH:MM` offset.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;

        let (hour, minute, second) = match bytes.get(10) {
            None => (0, 0, 0),
            Some(b'T' | b' ') => parse_time(&s[11..])?,
            Some(_) => return None,
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }
        if day == 0 || day > Self::days_in_month(year, month) {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }
        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS`
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// `HH:MM[:SS][.fff][Z|±HH:MM]`
fn parse_time(s: &str) -> Option<(u8, u8, u8)> {
    let bytes = s.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return None;
    }
    let hour = parse_u8(&bytes[0..2])?;
    let minute = parse_u8(&bytes[3..5])?;

    let (second, mut rest) = if bytes.get(5) == Some(&b':') && bytes.len() >= 8 {
        (parse_u8(&bytes[6..8])?, &s[8..])
    } else {
        (0, &s[5..])
    };

    if let Some(frac) = rest.strip_prefix('.') {
        let digits = frac.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        rest = &frac[digits..];
    }

    let rest = rest.trim_start();
    let offset_ok = match rest.as_bytes() {
        [] | [b'Z' | b'z'] => true,
        [b'+' | b'-', h1, h2, b':', m1, m2] | [b'+' | b'-', h1, h2, m1, m2] => {
            [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    };
    offset_ok.then_some((hour, minute, second))
}

fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTime::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTime::new(2024, 6, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_git_iso_keeps_local_time() {
        let dt = DateTime::parse("2023-11-02T23:05:09+09:00").unwrap();
        assert_eq!(dt.to_string(), "2023-11-02 23:05:09");

        let dt = DateTime::parse("2023-11-02T01:02:03-05:00").unwrap();
        assert_eq!(dt.to_string(), "2023-11-02 01:02:03");
    }

    #[test]
    fn test_parse_front_matter_style() {
        let dt = DateTime::parse("2015-02-22 10:30:00").unwrap();
        assert_eq!(dt, DateTime::new(2015, 2, 22, 10, 30, 0));

        let dt = DateTime::parse("2015-02-22 10:30").unwrap();
        assert_eq!(dt.second, 0);
    }

    #[test]
    fn test_parse_zulu_and_fraction() {
        let dt = DateTime::parse("2024-01-01T00:00:01.250Z").unwrap();
        assert_eq!(dt.to_string(), "2024-01-01 00:00:01");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateTime::parse("2024-13-01").is_none());
        assert!(DateTime::parse("2023-02-29").is_none());
        assert!(DateTime::parse("2024/01/01").is_none());
        assert!(DateTime::parse("2024-01-01T25:00:00Z").is_none());
        assert!(DateTime::parse("2024-01-01Tnoon").is_none());
        assert!(DateTime::parse("yesterday").is_none());
    }

    #[test]
    fn test_leap_year() {
        assert!(DateTime::parse("2024-02-29").is_some());
        assert!(DateTime::parse("2000-02-29").is_some());
        assert!(DateTime::parse("1900-02-29").is_none());
    }
}
