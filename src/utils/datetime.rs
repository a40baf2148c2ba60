//! PREMIS date/time values
//!
//! `eventDateTime` carries a full ISO 8601 timestamp. Unlike vocabularies
//! that tolerate partial dates, this codec rejects anything short of a
//! complete `YYYY-MM-DDThh:mm:ss`; a partial or ambiguous event date is
//! useless for preservation auditing. Fractional seconds and a timezone
//! (`Z` or `+hh:mm`/`-hh:mm`) are optional.

use std::fmt;
use std::str::FromStr;

/// A complete ISO 8601 date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PremisDateTime {
    /// Year
    pub year: i32,
    /// Month (1-12)
    pub month: u8,
    /// Day (1-31, checked against the month)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Nanoseconds (0-999999999)
    pub nanosecond: u32,
    /// Offset from UTC in minutes; `None` when the input carried no zone
    pub tz_offset_minutes: Option<i32>,
}

impl PremisDateTime {
    /// Create a date/time with no fractional seconds, in UTC
    pub fn utc(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond: 0,
            tz_offset_minutes: Some(0),
        }
    }

    /// Parse a strict ISO 8601 date/time string
    ///
    /// Accepted forms:
    /// - `YYYY-MM-DDThh:mm:ss`
    /// - `YYYY-MM-DDThh:mm:ss.fff` (1 to 9 fractional digits)
    /// - either of the above followed by `Z`, `+hh:mm` or `-hh:mm`
    ///
    /// Partial dates (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) are rejected; the
    /// error string names the missing or malformed component.
    pub fn parse(s: &str) -> Result<Self, String> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        let year = parse_year(bytes, &mut pos)?;
        expect(bytes, &mut pos, b'-', "expected '-' after year")?;
        let month = parse_two_digits(bytes, &mut pos, "month")?;
        expect(bytes, &mut pos, b'-', "expected '-' after month")?;
        let day = parse_two_digits(bytes, &mut pos, "day")?;

        if pos >= bytes.len() {
            return Err("partial date: time component is required".to_string());
        }
        expect(bytes, &mut pos, b'T', "expected 'T' between date and time")?;

        let hour = parse_two_digits(bytes, &mut pos, "hour")?;
        expect(bytes, &mut pos, b':', "expected ':' after hour")?;
        let minute = parse_two_digits(bytes, &mut pos, "minute")?;
        expect(bytes, &mut pos, b':', "expected ':' after minute")?;
        let second = parse_two_digits(bytes, &mut pos, "second")?;

        let mut nanosecond = 0u32;
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            let frac_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            let digits = pos - frac_start;
            if digits == 0 || digits > 9 {
                return Err("fractional seconds must have 1 to 9 digits".to_string());
            }
            for &b in &bytes[frac_start..pos] {
                nanosecond = nanosecond * 10 + (b - b'0') as u32;
            }
            nanosecond *= 10u32.pow(9 - digits as u32);
        }

        let tz_offset_minutes = if pos < bytes.len() {
            Some(parse_timezone(bytes, &mut pos)?)
        } else {
            None
        };

        if pos != bytes.len() {
            return Err(format!(
                "unexpected trailing input '{}'",
                &s[pos.min(s.len())..]
            ));
        }

        if !(1..=12).contains(&month) {
            return Err(format!("month {} out of range 1-12", month));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(format!("day {} out of range for {:04}-{:02}", day, year, month));
        }
        if hour > 23 {
            return Err(format!("hour {} out of range 0-23", hour));
        }
        if minute > 59 {
            return Err(format!("minute {} out of range 0-59", minute));
        }
        if second > 59 {
            return Err(format!("second {} out of range 0-59", second));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            tz_offset_minutes,
        })
    }
}

fn expect(bytes: &[u8], pos: &mut usize, expected: u8, message: &str) -> Result<(), String> {
    if *pos < bytes.len() && bytes[*pos] == expected {
        *pos += 1;
        Ok(())
    } else {
        Err(message.to_string())
    }
}

fn parse_year(bytes: &[u8], pos: &mut usize) -> Result<i32, String> {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos - start != 4 {
        return Err("year must have exactly 4 digits".to_string());
    }
    let mut year = 0i32;
    for &b in &bytes[start..*pos] {
        year = year * 10 + (b - b'0') as i32;
    }
    Ok(year)
}

fn parse_two_digits(bytes: &[u8], pos: &mut usize, component: &str) -> Result<u8, String> {
    if *pos + 2 > bytes.len()
        || !bytes[*pos].is_ascii_digit()
        || !bytes[*pos + 1].is_ascii_digit()
    {
        return Err(format!("{} must have exactly 2 digits", component));
    }
    let value = (bytes[*pos] - b'0') * 10 + (bytes[*pos + 1] - b'0');
    *pos += 2;
    Ok(value)
}

fn parse_timezone(bytes: &[u8], pos: &mut usize) -> Result<i32, String> {
    match bytes[*pos] {
        b'Z' => {
            *pos += 1;
            Ok(0)
        }
        sign @ (b'+' | b'-') => {
            *pos += 1;
            let hours = parse_two_digits(bytes, pos, "timezone hour")?;
            expect(bytes, pos, b':', "expected ':' in timezone offset")?;
            let minutes = parse_two_digits(bytes, pos, "timezone minute")?;
            if hours > 14 || minutes > 59 {
                return Err("timezone offset out of range".to_string());
            }
            let total = hours as i32 * 60 + minutes as i32;
            Ok(if sign == b'-' { -total } else { total })
        }
        other => Err(format!(
            "unexpected character '{}' after seconds",
            other as char
        )),
    }
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for PremisDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.nanosecond > 0 {
            let frac = format!("{:09}", self.nanosecond);
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        match self.tz_offset_minutes {
            Some(0) => f.write_str("Z")?,
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let abs = offset.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)?;
            }
            None => {}
        }
        Ok(())
    }
}

impl FromStr for PremisDateTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let dt = PremisDateTime::parse("2023-12-25T10:30:00Z").unwrap();
        assert_eq!(dt.year, 2023);
        assert_eq!(dt.month, 12);
        assert_eq!(dt.day, 25);
        assert_eq!(dt.hour, 10);
        assert_eq!(dt.tz_offset_minutes, Some(0));
    }

    #[test]
    fn test_parse_offset_and_fraction() {
        let dt = PremisDateTime::parse("2023-01-02T03:04:05.5+02:30").unwrap();
        assert_eq!(dt.nanosecond, 500_000_000);
        assert_eq!(dt.tz_offset_minutes, Some(150));

        let dt = PremisDateTime::parse("2023-01-02T03:04:05-05:00").unwrap();
        assert_eq!(dt.tz_offset_minutes, Some(-300));
    }

    #[test]
    fn test_parse_without_zone() {
        let dt = PremisDateTime::parse("2023-01-02T03:04:05").unwrap();
        assert_eq!(dt.tz_offset_minutes, None);
        assert_eq!(dt.to_string(), "2023-01-02T03:04:05");
    }

    #[test]
    fn test_partial_dates_rejected() {
        assert!(PremisDateTime::parse("2023").is_err());
        assert!(PremisDateTime::parse("2023-05").is_err());
        assert!(PremisDateTime::parse("2023-05-01").is_err());
        assert!(PremisDateTime::parse("2023-05-01T10:30").is_err());
    }

    #[test]
    fn test_invalid_components_rejected() {
        assert!(PremisDateTime::parse("2023-13-01T00:00:00Z").is_err());
        assert!(PremisDateTime::parse("2023-02-29T00:00:00Z").is_err());
        assert!(PremisDateTime::parse("2024-02-29T00:00:00Z").is_ok());
        assert!(PremisDateTime::parse("2023-06-01T24:00:00Z").is_err());
        assert!(PremisDateTime::parse("2023-06-01T00:00:00Q").is_err());
        assert!(PremisDateTime::parse("2023-06-01T00:00:00Z ").is_err());
        assert!(PremisDateTime::parse("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for input in [
            "2023-12-25T10:30:00Z",
            "2023-01-02T03:04:05.25+02:30",
            "1999-06-30T23:59:59-08:00",
            "2023-01-02T03:04:05",
        ] {
            let dt = PremisDateTime::parse(input).unwrap();
            assert_eq!(dt.to_string(), input);
            assert_eq!(PremisDateTime::parse(&dt.to_string()).unwrap(), dt);
        }
    }
}
