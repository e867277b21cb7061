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

//! Wire positions of the BaseStation line and the tiers that gate them.
//!
//! Older feed variants stop after the logged timestamp or after the callsign,
//! so the number of comma groups on a line decides which trailing fields are
//! attempted at all. That decision lives in [`FieldTier`].

use std::fmt;

/// A column of the BaseStation line, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    MessageType,
    TransmissionType,
    SessionId,
    AircraftId,
    HexIdent,
    FlightId,
    DateGenerated,
    TimeGenerated,
    DateLogged,
    TimeLogged,
    Callsign,
    Altitude,
    GroundSpeed,
    Track,
    Longitude,
    Latitude,
    VerticalRate,
    Squawk,
    Alert,
    Emergency,
    Ident,
    IsOnGround,
}

impl Field {
    /// Every field, ordered by wire position.
    pub const ALL: [Field; 22] = [
        Field::MessageType,
        Field::TransmissionType,
        Field::SessionId,
        Field::AircraftId,
        Field::HexIdent,
        Field::FlightId,
        Field::DateGenerated,
        Field::TimeGenerated,
        Field::DateLogged,
        Field::TimeLogged,
        Field::Callsign,
        Field::Altitude,
        Field::GroundSpeed,
        Field::Track,
        Field::Longitude,
        Field::Latitude,
        Field::VerticalRate,
        Field::Squawk,
        Field::Alert,
        Field::Emergency,
        Field::Ident,
        Field::IsOnGround,
    ];

    /// Zero-based column of this field on the wire.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable column name, as used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Field::MessageType => "message type",
            Field::TransmissionType => "transmission type",
            Field::SessionId => "session id",
            Field::AircraftId => "aircraft id",
            Field::HexIdent => "hex ident",
            Field::FlightId => "flight id",
            Field::DateGenerated => "date generated",
            Field::TimeGenerated => "time generated",
            Field::DateLogged => "date logged",
            Field::TimeLogged => "time logged",
            Field::Callsign => "callsign",
            Field::Altitude => "altitude",
            Field::GroundSpeed => "ground speed",
            Field::Track => "track",
            Field::Longitude => "longitude",
            Field::Latitude => "latitude",
            Field::VerticalRate => "vertical rate",
            Field::Squawk => "squawk",
            Field::Alert => "alert",
            Field::Emergency => "emergency",
            Field::Ident => "ident",
            Field::IsOnGround => "is on ground",
        }
    }

    /// The lowest tier at which this field is read from the line.
    #[must_use]
    pub const fn tier(self) -> FieldTier {
        match self {
            Field::Callsign => FieldTier::Callsign,
            Field::Altitude
            | Field::GroundSpeed
            | Field::Track
            | Field::Longitude
            | Field::Latitude
            | Field::VerticalRate
            | Field::Squawk
            | Field::Alert
            | Field::Emergency
            | Field::Ident
            | Field::IsOnGround => FieldTier::Full,
            _ => FieldTier::Header,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How much of the schema a line carries, judged by its comma groups.
///
/// The count of extra groups is the number of separators on the line
/// (`fields - 1`). Fewer than 10 extra groups only reach the header, exactly
/// 10 adds the callsign, and 11 or more attempts the whole trailing block
/// from altitude through the on-ground flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldTier {
    /// Fields 0-9: identity and the two timestamp pairs.
    Header,
    /// Header plus field 10.
    Callsign,
    /// Header, callsign and fields 11-21.
    Full,
}

impl FieldTier {
    /// Classify a line that split into `count` fields.
    #[must_use]
    pub const fn for_field_count(count: usize) -> Self {
        match count.saturating_sub(1) {
            0..=9 => FieldTier::Header,
            10 => FieldTier::Callsign,
            _ => FieldTier::Full,
        }
    }

    /// Whether a line of this tier attempts `field`.
    #[must_use]
    pub fn reaches(self, field: Field) -> bool {
        self >= field.tier()
    }

    /// The fields attempted at this tier, in wire order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |field| self.reaches(*field))
    }
}
