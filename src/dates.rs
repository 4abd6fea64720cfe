use chrono::{DateTime, NaiveDate, NaiveDateTime, ParseResult};

/// Short display form: month abbreviation, day, 12-hour clock.
const DISPLAY_FORMAT: &str = "%b %-d, %I:%M %p";

const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Best-effort display formatting. Anything that does not parse as a calendar
/// date comes back verbatim, so "TBD" or "9:00" survive untouched.
pub fn format_date(input: &str) -> String {
    match parse_date_time(input) {
        Ok(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        Err(_) => input.to_string(),
    }
}

/// Zoned inputs keep their own wall-clock time; the offset is dropped rather
/// than converted so the rendered day matches what the agent sent.
fn parse_date_time(input: &str) -> ParseResult<NaiveDateTime> {
    let trimmed = input.trim();

    let zoned = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed));
    let mut last_err = match zoned {
        Ok(parsed) => return Ok(parsed.naive_local()),
        Err(err) => err,
    };

    for format in NAIVE_DATE_TIME_FORMATS {
        match NaiveDateTime::parse_from_str(trimmed, format) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => last_err = err,
        }
    }

    for format in NAIVE_DATE_FORMATS {
        match NaiveDate::parse_from_str(trimmed, format) {
            Ok(date) => return Ok(date.and_time(chrono::NaiveTime::MIN)),
            Err(err) => last_err = err,
        }
    }

    Err(last_err)
}
