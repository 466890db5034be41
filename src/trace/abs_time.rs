use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::types::abs_time::AbsoluteTime;

/// Tries to read an absolute start time out of a header line.
///
/// Two header conventions are recognized: the Vector ASC `date ...` line and
/// the PCAN `;$STARTTIME=` comment. Anything else yields `None`.
pub(crate) fn from_header(line: &str) -> Option<AbsoluteTime> {
    from_asc_header(line).or_else(|| from_trc_header(line))
}

// Example: date Mon Sep 30 03:06:13.191 pm 2019
//          date Mon Sep 30 15:06:13.191 2019
fn from_asc_header(line: &str) -> Option<AbsoluteTime> {
    let mut parts = line.split_ascii_whitespace();
    if parts.next()? != "date" {
        return None;
    }

    let date_str: String = parts.collect::<Vec<_>>().join(" ");

    // 12-hour clock with am/pm marker, then the 24-hour variant
    let value: NaiveDateTime =
        NaiveDateTime::parse_from_str(&date_str, "%a %b %d %I:%M:%S%.3f %P %Y")
            .or_else(|_| NaiveDateTime::parse_from_str(&date_str, "%a %b %d %H:%M:%S%.3f %Y"))
            .ok()?;

    Some(AbsoluteTime {
        text: date_str,
        value: Some(value),
    })
}

// Example: ;$STARTTIME=43290.5120793982
// Fractional days since 1899-12-30 (the PCAN epoch).
fn from_trc_header(line: &str) -> Option<AbsoluteTime> {
    let raw: &str = line.trim().strip_prefix(";$STARTTIME=")?.trim();
    let days: f64 = raw.parse().ok()?;
    if !days.is_finite() || days < 0.0 {
        return None;
    }

    let epoch: NaiveDateTime = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis: i64 = (days * 86_400_000.0).round() as i64;
    let value: NaiveDateTime = epoch.checked_add_signed(Duration::milliseconds(millis))?;

    Some(AbsoluteTime {
        text: raw.to_string(),
        value: Some(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_asc_date_with_meridiem() {
        let abs = from_header("date Mon Mar 10 12:34:56.789 pm 2025").expect("should parse");
        assert_eq!(abs.text, "Mon Mar 10 12:34:56.789 pm 2025");
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_milli_opt(12, 34, 56, 789)
            .unwrap();
        assert_eq!(abs.value, Some(expected));
    }

    #[test]
    fn parses_asc_date_24_hour_variant() {
        let abs = from_header("date Mon Sep 30 15:06:13.191 2019").expect("should parse");
        let expected = NaiveDate::from_ymd_opt(2019, 9, 30)
            .unwrap()
            .and_hms_milli_opt(15, 6, 13, 191)
            .unwrap();
        assert_eq!(abs.value, Some(expected));
    }

    #[test]
    fn parses_trc_starttime_days() {
        // 43290.5 days after 1899-12-30 = 2018-07-09 12:00:00
        let abs = from_header(";$STARTTIME=43290.5").expect("should parse");
        let expected = NaiveDate::from_ymd_opt(2018, 7, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(abs.value, Some(expected));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(from_header("DATE Mon Mar 10 12:00:00.000 pm 2025").is_none());
        assert!(from_header("date not a date").is_none());
        assert!(from_header(";$FILEVERSION=1.1").is_none());
        assert!(from_header(";$STARTTIME=abc").is_none());
        assert!(from_header("(0.1) can0 123#AABB").is_none());
        assert!(from_header("").is_none());
    }
}
