//! Timestamp values exchanged with the API.
//!
//! The service emits timestamps as `2023-01-15 10:30:00.123-0500`, with a
//! variable number of fractional digits and a numeric UTC offset of one to
//! four digits. Some payloads instead carry the POSIX `date` rendering
//! (`Mon Jan 15 10:30:00 UTC 2023`). Both are accepted; the canonical output
//! is always the first dialect with six fractional digits and a four digit
//! offset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Weekday};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::domain::error::{PaciError, PaciResult};

/// Canonical data layout: `date time.ffffff±hhmm`.
pub const DATA_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f%z";

/// Human readable form of the layout accepted by `--from`/`--to` arguments.
pub const ARG_TIMESTAMP_FORMAT: &str = "YYYY-MM-DD hh:mm TZ";

const FRACTION_DIGITS: usize = 6;
const OFFSET_DIGITS: usize = 4;

type Dialect = fn(&str) -> Option<DateTime<FixedOffset>>;

/// Input dialects in the order they are tried.
const DIALECTS: [Dialect; 2] = [parse_data_dialect, parse_unix_dialect];

/// An absolute instant carried by API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parse either wire dialect, trying the data dialect first.
    pub fn parse(text: &str) -> PaciResult<Self> {
        DIALECTS
            .iter()
            .find_map(|dialect| dialect(text))
            .map(Self)
            .ok_or_else(|| PaciError::InvalidTimestamp(text.to_string()))
    }

    /// Parse a command line argument such as `2023-01-15 10:30 UTC`.
    pub fn parse_arg(text: &str) -> PaciResult<Self> {
        let invalid = || PaciError::InvalidTimestamp(text.to_string());

        let mut fields = text.split_whitespace();
        let (Some(date), Some(time), Some(zone), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid());
        };

        let naive = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
            .map_err(|_| invalid())?;
        zone_offset(zone)
            .and_then(|offset| offset.from_local_datetime(&naive).single())
            .map(Self)
            .ok_or_else(invalid)
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Canonical wire text of the instant.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

/// Data dialect with lenient fraction and offset widths.
///
/// The offset sign is looked up after the date, so the hyphens inside
/// `YYYY-MM-DD` are never taken for a negative offset: a `+` wins, otherwise
/// the last `-` of the time portion is used.
fn parse_data_dialect(text: &str) -> Option<DateTime<FixedOffset>> {
    let time_start = text.find(' ')? + 1;
    let time_portion = &text[time_start..];
    let sign_at = time_portion
        .find('+')
        .or_else(|| time_portion.rfind('-'))?
        + time_start;

    let (datetime, rest) = text.split_at(sign_at);
    let sign = &rest[..1];
    let offset = &rest[1..];
    if datetime.is_empty() || offset.is_empty() {
        return None;
    }

    let mut normalized = normalize_fraction(datetime, time_start)?;
    normalized.push_str(sign);
    normalized.push_str(&normalize_offset(offset)?);

    DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f%z").ok()
}

/// Pad the date-time prefix to exactly six fractional digits.
fn normalize_fraction(datetime: &str, time_start: usize) -> Option<String> {
    let mut normalized = datetime.to_string();
    match datetime.split_once('.') {
        Some((_, fraction)) => {
            if fraction.contains('.') || fraction.len() > FRACTION_DIGITS {
                return None;
            }
            normalized.push_str(&"0".repeat(FRACTION_DIGITS - fraction.len()));
        }
        None => {
            // `hh:mm` without seconds
            if datetime[time_start..].matches(':').count() == 1 {
                normalized.push_str(":00");
            }
            normalized.push('.');
            normalized.push_str(&"0".repeat(FRACTION_DIGITS));
        }
    }
    Some(normalized)
}

/// Right-pad the offset digits with zeros up to four digits.
fn normalize_offset(offset: &str) -> Option<String> {
    if offset.len() > OFFSET_DIGITS {
        return None;
    }
    Some(format!("{offset}{}", "0".repeat(OFFSET_DIGITS - offset.len())))
}

/// POSIX `date` dialect: `Mon Jan _2 15:04:05 MST 2006`.
fn parse_unix_dialect(text: &str) -> Option<DateTime<FixedOffset>> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [weekday, month, day, time, zone, year] = fields.as_slice() else {
        return None;
    };
    weekday.parse::<Weekday>().ok()?;

    let naive = NaiveDateTime::parse_from_str(
        &format!("{month} {day} {year} {time}"),
        "%b %d %Y %H:%M:%S",
    )
    .ok()?;
    zone_offset(zone)?.from_local_datetime(&naive).single()
}

/// Resolve a zone abbreviation.
///
/// Abbreviations carry no offset information of their own, so everything
/// other than an explicit `GMT±h` is taken as UTC.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    if let Some(hours) = zone.strip_prefix("GMT").filter(|rest| !rest.is_empty()) {
        let hours: i32 = hours.parse().ok()?;
        if !(-12..=14).contains(&hours) {
            return None;
        }
        return FixedOffset::east_opt(hours * 3600);
    }
    if (3..=5).contains(&zone.len()) && zone.bytes().all(|b| b.is_ascii_alphabetic()) {
        return FixedOffset::east_opt(0);
    }
    None
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATA_TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = PaciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    #[test]
    fn test_short_fraction_is_widened() {
        let ts = Timestamp::parse("2023-01-15 10:30:00.123-0500").unwrap();
        assert_eq!(ts.to_text(), "2023-01-15 10:30:00.123000-0500");
    }

    #[test]
    fn test_missing_fraction_and_seconds() {
        let ts = Timestamp::parse("2023-01-15 10:30-0500").unwrap();
        assert_eq!(ts.to_text(), "2023-01-15 10:30:00.000000-0500");

        let ts = Timestamp::parse("2023-01-15 10:30:45+0900").unwrap();
        assert_eq!(ts.to_text(), "2023-01-15 10:30:45.000000+0900");
    }

    #[test]
    fn test_short_offset_is_right_padded() {
        let ts = Timestamp::parse("2014-06-02 08:15:01.5+09").unwrap();
        assert_eq!(ts.to_text(), "2014-06-02 08:15:01.500000+0900");

        let ts = Timestamp::parse("2014-06-02 08:15:01.5-055").unwrap();
        assert_eq!(ts.to_text(), "2014-06-02 08:15:01.500000-0550");
    }

    #[test]
    fn test_negative_offset_is_not_confused_with_date_hyphens() {
        let ts = Timestamp::parse("2023-12-31 23:59:59.999999-0800").unwrap();
        assert_eq!(ts.instant().offset().local_minus_utc(), -8 * 3600);
        assert_eq!(ts.instant().nanosecond(), 999_999_000);
    }

    #[test]
    fn test_unix_dialect_fallback() {
        let ts = Timestamp::parse("Mon Jan 15 10:30:00 UTC 2023").unwrap();
        assert_eq!(ts.to_text(), "2023-01-15 10:30:00.000000+0000");

        let padded = Timestamp::parse("Thu Feb  2 07:04:05 JST 2023").unwrap();
        assert_eq!(padded.to_text(), "2023-02-02 07:04:05.000000+0000");
    }

    #[test]
    fn test_invalid_timestamps() {
        for text in [
            "",
            "yesterday",
            "2023-01-15",
            "2023-01-15 10:30:00",
            "2023-01-15 10:30:00.1234567-0500",
            "2023-01-15 10:30:00-05000",
            "2023-01-15 10:30:00+",
            "Mon Foo 15 10:30:00 UTC 2023",
        ] {
            let err = Timestamp::parse(text).unwrap_err();
            assert!(matches!(err, PaciError::InvalidTimestamp(_)), "{text}");
        }
    }

    #[test]
    fn test_equality_is_by_instant() {
        let a = Timestamp::parse("2023-01-15 10:30:00.000000-0500").unwrap();
        let b = Timestamp::parse("2023-01-15 15:30:00+00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_arg() {
        let ts = Timestamp::parse_arg("2023-01-15 10:30 UTC").unwrap();
        assert_eq!(ts.to_text(), "2023-01-15 10:30:00.000000+0000");

        let ts = Timestamp::parse_arg("2023-01-15 10:30 GMT+9").unwrap();
        assert_eq!(ts.to_text(), "2023-01-15 10:30:00.000000+0900");

        assert!(Timestamp::parse_arg("2023-01-15 10:30").is_err());
        assert!(Timestamp::parse_arg("2023-01-15T10:30 UTC").is_err());
        assert!(Timestamp::parse_arg("2023-01-15 10:30 UTC extra").is_err());
    }

    #[test]
    fn test_serde_uses_wire_text() {
        let ts = Timestamp::parse("2023-01-15 10:30:00.1+01").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2023-01-15 10:30:00.100000+0100\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    proptest! {
        #[test]
        fn prop_canonical_text_round_trips(
            secs in 0i64..4_102_444_800,
            micros in 0u32..1_000_000,
            offset_minutes in -720i32..=840,
        ) {
            let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
            let instant = DateTime::from_timestamp(secs, micros * 1000)
                .unwrap()
                .with_timezone(&offset);
            let ts = Timestamp::from(instant);
            let text = ts.to_text();
            let parsed = Timestamp::parse(&text).unwrap();
            prop_assert_eq!(parsed, ts);
            prop_assert_eq!(parsed.to_text(), text);
        }

        #[test]
        fn prop_fraction_is_widened_to_six_digits(digits in "[0-9]{0,6}") {
            let text = if digits.is_empty() {
                "2020-02-29 12:00:00+0000".to_string()
            } else {
                format!("2020-02-29 12:00:00.{digits}+0000")
            };
            let expected = format!("2020-02-29 12:00:00.{:0<6}+0000", digits);
            prop_assert_eq!(Timestamp::parse(&text).unwrap().to_text(), expected);
        }
    }
}
