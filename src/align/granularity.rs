use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use thiserror::Error;

use crate::error::AlignError;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Width of the time bucket every timestamp is snapped to before plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    Millisecond,
    Second,
    #[default]
    Minute,
    Hour,
    /// Calendar day in UTC
    Day,
    /// Calendar month in UTC
    Month,
    /// Calendar year in UTC
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 7] = [
        Granularity::Millisecond,
        Granularity::Second,
        Granularity::Minute,
        Granularity::Hour,
        Granularity::Day,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Granularity::Millisecond => "millisecond",
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Floor `millis` to the start of its bucket.
    pub fn snap(self, millis: i64) -> Result<i64, AlignError> {
        match self {
            Granularity::Millisecond => Ok(millis),
            Granularity::Second => floor_to(millis, MS_PER_SECOND),
            Granularity::Minute => floor_to(millis, MS_PER_MINUTE),
            Granularity::Hour => floor_to(millis, MS_PER_HOUR),
            Granularity::Day => floor_to(millis, MS_PER_DAY),
            Granularity::Month => {
                let dt = to_datetime(millis)?;
                start_of(dt.year(), dt.month(), millis)
            }
            Granularity::Year => {
                let dt = to_datetime(millis)?;
                start_of(dt.year(), 1, millis)
            }
        }
    }

    /// Start of the bucket following the one `bucket` opens.
    pub fn next_bucket(self, bucket: i64) -> Result<i64, AlignError> {
        let overflow = || AlignError::TimestampOutOfRange(bucket);
        match self {
            Granularity::Millisecond => bucket.checked_add(1).ok_or_else(overflow),
            Granularity::Second => bucket.checked_add(MS_PER_SECOND).ok_or_else(overflow),
            Granularity::Minute => bucket.checked_add(MS_PER_MINUTE).ok_or_else(overflow),
            Granularity::Hour => bucket.checked_add(MS_PER_HOUR).ok_or_else(overflow),
            Granularity::Day => bucket.checked_add(MS_PER_DAY).ok_or_else(overflow),
            Granularity::Month => {
                let dt = to_datetime(bucket)?;
                let (year, month) = if dt.month() == 12 {
                    (dt.year() + 1, 1)
                } else {
                    (dt.year(), dt.month() + 1)
                };
                start_of(year, month, bucket)
            }
            Granularity::Year => {
                let dt = to_datetime(bucket)?;
                start_of(dt.year() + 1, 1, bucket)
            }
        }
    }
}

fn floor_to(millis: i64, span: i64) -> Result<i64, AlignError> {
    millis
        .div_euclid(span)
        .checked_mul(span)
        .ok_or(AlignError::TimestampOutOfRange(millis))
}

fn to_datetime(millis: i64) -> Result<DateTime<Utc>, AlignError> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or(AlignError::TimestampOutOfRange(millis))
}

fn start_of(year: i32, month: u32, millis: i64) -> Result<i64, AlignError> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp_millis())
        .ok_or(AlignError::TimestampOutOfRange(millis))
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown granularity '{0}' (expected millisecond, second, minute, hour, day, month or year)")]
pub struct ParseGranularityError(String);

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Granularity::ALL
            .into_iter()
            .find(|g| g.name() == wanted || wanted.strip_suffix('s') == Some(g.name()))
            .ok_or_else(|| ParseGranularityError(s.to_string()))
    }
}
