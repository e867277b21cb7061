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

//! Decoder for BaseStation/SBS-1 ADS-B feed lines.
//!
//! Each line of a BaseStation feed (as served by dump1090 on port 30003)
//! describes one observation of an aircraft. This crate turns one such line
//! into a typed [`ParsedMessage`]. It does no I/O: reading the feed and
//! storing the records is up to the caller.
//!
//! Decoding is forgiving. Only a line with fewer than two comma-separated
//! fields is rejected; a malformed optional column becomes `None` and a
//! malformed date or time becomes a sentinel value.
//!
//! # Quick Start
//!
//! ```
//! use basestation_decoder::decode;
//!
//! let line = "MSG,3,1,1,ABC123,1,2023/05/01,12:00:00,2023/05/01,12:00:05,UAL123,35000,450.5,270.0,-122.4,37.6,0,1200,0,0,0,0";
//! let msg = decode(line).unwrap();
//! assert_eq!(msg.hex_ident.as_deref(), Some("ABC123"));
//! assert_eq!(msg.altitude, Some(35000));
//!
//! // Older variants stop early; the trailing block stays absent.
//! let short = decode("MSG,1,1,1,ABC123,1,2023/05/01,12:00:00,2023/05/01,12:00:05,UAL123").unwrap();
//! assert_eq!(short.callsign.as_deref(), Some("UAL123"));
//! assert_eq!(short.altitude, None);
//! ```
//!
//! # Diagnostics
//!
//! Install a [`DecodeObserver`] to see parsed timestamps and rejected
//! columns. [`LogObserver`] forwards them to the `log` facade:
//!
//! ```
//! use basestation_decoder::{BaseStationDecoder, LogObserver};
//!
//! let decoder = BaseStationDecoder::with_observer(LogObserver);
//! let msg = decoder.decode("MSG,3,1,1,ABC123,1,2023/05/01,bad,2023/05/01,12:00:05").unwrap();
//! assert!(msg.has_sentinel_generated());
//! ```
//!
//! # Byte streams
//!
//! [`BaseStationDecoder`] also implements [`Protocol`] for framed lines read
//! off a socket:
//!
//! ```
//! use basestation_decoder::{BaseStationDecoder, Protocol};
//!
//! let mut decoder = BaseStationDecoder::new();
//! let msg = decoder.parse(b"MSG,5,1,1,A1B2C3,1,2024/01/01,12:00:00.000,2024/01/01,12:00:00.000,,30000\r\n").unwrap();
//! assert_eq!(msg.altitude, Some(30000));
//! ```

pub mod observer;
pub mod protocol;

pub use observer::{DecodeObserver, LogObserver, NoopObserver};
pub use protocol::{
    BaseStationDecoder, DecodeError, Field, FieldTier, ParsedMessage, Protocol, TimestampError,
};

/// Decode a single BaseStation line without diagnostics.
pub fn decode(line: &str) -> Result<ParsedMessage, DecodeError> {
    BaseStationDecoder::new().decode(line)
}
