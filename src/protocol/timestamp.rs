// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Date and time columns.
//!
//! The generated/logged timestamps are required, so a column that does not
//! parse is replaced by a sentinel instead of being dropped:
//! [`sentinel_date`] (1970-01-01) and [`sentinel_time`] (00:00:00).

use chrono::{NaiveDate, NaiveTime, Timelike};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y/%m/%d";
// `%.f` also accepts the millisecond suffix dump1090 appends ("12:00:00.000").
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Why a date or time column was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("expected YYYY/MM/DD, got {0:?}")]
    DateShape(String),

    #[error("expected HH:MM:SS, got {0:?}")]
    TimeShape(String),

    #[error("second out of range in {0:?}")]
    SecondOutOfRange(String),

    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
}

/// Date substituted for an unparseable date column.
#[must_use]
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::default()
}

/// Time substituted for an unparseable time column.
#[must_use]
pub fn sentinel_time() -> NaiveTime {
    NaiveTime::default()
}

/// Parse a `YYYY/MM/DD` column.
pub fn parse_date(field: &str) -> Result<NaiveDate, TimestampError> {
    if !has_shape(field, b"dddd/dd/dd") {
        return Err(TimestampError::DateShape(field.to_string()));
    }
    Ok(NaiveDate::parse_from_str(field, DATE_FORMAT)?)
}

/// Parse a 24-hour `HH:MM:SS` column, optionally followed by a fraction.
pub fn parse_time(field: &str) -> Result<NaiveTime, TimestampError> {
    let whole = field.get(..8).unwrap_or(field);
    if !has_shape(whole, b"dd:dd:dd") {
        return Err(TimestampError::TimeShape(field.to_string()));
    }
    let time = NaiveTime::parse_from_str(field, TIME_FORMAT)?;
    // chrono encodes `:60` as a leap second (nanosecond >= 1e9).
    if time.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::SecondOutOfRange(field.to_string()));
    }
    Ok(time)
}

// `d` is any ASCII digit, every other byte must match literally.
fn has_shape(field: &str, pattern: &[u8]) -> bool {
    field.len() == pattern.len()
        && field
            .bytes()
            .zip(pattern.iter())
            .all(|(byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                _ => byte == expected,
            })
}
