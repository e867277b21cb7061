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

//! Protocol layer for BaseStation/SBS-1 line decoding.
//!
//! A line is split into columns, the columns are coerced one by one and the
//! results are assembled into a [`ParsedMessage`]. Only a line with fewer
//! than two columns is an error; every other problem degrades a single column.

mod basestation;
pub mod coerce;
mod field;
pub mod timestamp;

pub use basestation::BaseStationDecoder;
pub use field::{Field, FieldTier};
pub use timestamp::TimestampError;

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while decoding a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("too few fields: expected at least 2, got {count}")]
    TooFewFields { count: usize },
}

/// One decoded BaseStation line.
///
/// Optional columns are `None` when the sender left them empty, sent a value
/// that does not parse, or the line was too short to reach them. `None` is
/// never used for a zero or empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Message class, e.g. `MSG`, `STA`, `AIR`. Kept verbatim, possibly empty.
    pub message_type: String,
    /// Transmission type `1`-`8` for `MSG` lines. Not validated.
    pub transmission_type: Option<String>,
    /// Receiver session the line belongs to.
    pub session_id: Option<String>,
    /// Kept verbatim, possibly empty.
    pub aircraft_id: String,
    /// ICAO 24-bit address as hex.
    pub hex_ident: Option<String>,
    /// Kept verbatim, possibly empty.
    pub flight_id: String,
    /// Date the message was generated; sentinel when unparseable.
    pub date_generated: NaiveDate,
    /// Time the message was generated; sentinel when unparseable.
    pub time_generated: NaiveTime,
    /// Date the message was logged; sentinel when unparseable.
    pub date_logged: NaiveDate,
    /// Time the message was logged; sentinel when unparseable.
    pub time_logged: NaiveTime,
    /// Flight callsign, kept verbatim (e.g. `UAL123`).
    pub callsign: Option<String>,
    /// Altitude in feet.
    pub altitude: Option<i32>,
    /// Ground speed in knots.
    pub ground_speed: Option<f64>,
    /// Track angle in degrees.
    pub track: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Vertical rate in feet per minute.
    pub vertical_rate: Option<f64>,
    /// Transponder code, kept as text to preserve leading zeros.
    pub squawk: Option<String>,
    /// Squawk changed. See [`coerce::optional_bool`] for the flag polarity.
    pub alert: Option<bool>,
    /// Emergency flag.
    pub emergency: Option<bool>,
    /// SPI (Special Position Identification).
    pub ident: Option<bool>,
    /// Whether the aircraft is on the ground.
    pub is_on_ground: Option<bool>,
}

impl ParsedMessage {
    /// Generation date and time combined.
    #[must_use]
    pub fn generated_at(&self) -> NaiveDateTime {
        self.date_generated.and_time(self.time_generated)
    }

    /// Logging date and time combined.
    #[must_use]
    pub fn logged_at(&self) -> NaiveDateTime {
        self.date_logged.and_time(self.time_logged)
    }

    /// True when either generated column carries its sentinel value.
    ///
    /// A real `00:00:00` is indistinguishable from a replaced time, so this
    /// can report false positives at midnight.
    #[must_use]
    pub fn has_sentinel_generated(&self) -> bool {
        self.date_generated == timestamp::sentinel_date()
            || self.time_generated == timestamp::sentinel_time()
    }

    /// True when either logged column carries its sentinel value.
    #[must_use]
    pub fn has_sentinel_logged(&self) -> bool {
        self.date_logged == timestamp::sentinel_date()
            || self.time_logged == timestamp::sentinel_time()
    }
}

impl FromStr for ParsedMessage {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseStationDecoder::new().decode(s)
    }
}

/// Trait for protocol parsers.
///
/// Implement this trait to add support for new ADS-B protocol formats.
pub trait Protocol {
    /// The message type produced by this parser.
    type Message;
    /// The error type for parsing failures.
    type Error;

    /// Parse one framed line of input bytes into a message.
    fn parse(&mut self, input: &[u8]) -> Result<Self::Message, Self::Error>;
}
