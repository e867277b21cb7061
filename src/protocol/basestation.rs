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

//! BaseStation/SBS-1 line decoder.
//!
//! Decodes the CSV-based BaseStation protocol format commonly used by
//! dump1090 and similar ADS-B decoders.
//!
//! Message format:
//! ```text
//! MSG,<type>,<session>,<aircraft>,<icao>,<flight>,<date>,<time>,<date>,<time>,<fields...>
//! ```
//!
//! Columns a short line does not carry are read as empty, so they come out
//! absent (optional columns), empty (required text) or as the sentinel
//! (timestamps).

use chrono::{NaiveDate, NaiveTime};

use super::coerce::{optional_bool, optional_float, optional_int, optional_string};
use super::timestamp::{parse_date, parse_time, sentinel_date, sentinel_time};
use super::{DecodeError, Field, FieldTier, ParsedMessage, Protocol};
use crate::observer::{DecodeObserver, NoopObserver};

const DELIMITER: char = ',';
const MIN_FIELDS: usize = 2;

/// Decoder for BaseStation/SBS-1 lines.
///
/// Decoding is a pure function of the line; the observer only receives
/// diagnostics.
#[derive(Debug, Default, Clone)]
pub struct BaseStationDecoder<O = NoopObserver> {
    observer: O,
}

impl BaseStationDecoder {
    /// Create a decoder without diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: DecodeObserver> BaseStationDecoder<O> {
    /// Create a decoder that reports to `observer`.
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// The installed observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Decode a single line (without its line terminator).
    pub fn decode(&self, line: &str) -> Result<ParsedMessage, DecodeError> {
        let parts: Vec<&str> = line.split(DELIMITER).collect();

        if parts.len() < MIN_FIELDS {
            let err = DecodeError::TooFewFields { count: parts.len() };
            self.observer.line_rejected(line, &err);
            return Err(err);
        }

        let tier = FieldTier::for_field_count(parts.len());
        let raw = |field: Field| {
            if tier.reaches(field) {
                parts.get(field.index()).copied().unwrap_or("")
            } else {
                ""
            }
        };

        Ok(ParsedMessage {
            message_type: raw(Field::MessageType).to_string(),
            transmission_type: optional_string(raw(Field::TransmissionType)),
            session_id: optional_string(raw(Field::SessionId)),
            aircraft_id: raw(Field::AircraftId).to_string(),
            hex_ident: optional_string(raw(Field::HexIdent)),
            flight_id: raw(Field::FlightId).to_string(),
            date_generated: self.date(Field::DateGenerated, raw(Field::DateGenerated)),
            time_generated: self.time(Field::TimeGenerated, raw(Field::TimeGenerated)),
            date_logged: self.date(Field::DateLogged, raw(Field::DateLogged)),
            time_logged: self.time(Field::TimeLogged, raw(Field::TimeLogged)),
            callsign: optional_string(raw(Field::Callsign)),
            altitude: self.numeric(Field::Altitude, raw(Field::Altitude), optional_int),
            ground_speed: self.numeric(Field::GroundSpeed, raw(Field::GroundSpeed), optional_float),
            track: self.numeric(Field::Track, raw(Field::Track), optional_float),
            longitude: self.numeric(Field::Longitude, raw(Field::Longitude), optional_float),
            latitude: self.numeric(Field::Latitude, raw(Field::Latitude), optional_float),
            vertical_rate: self.numeric(Field::VerticalRate, raw(Field::VerticalRate), optional_float),
            squawk: optional_string(raw(Field::Squawk)),
            alert: optional_bool(raw(Field::Alert)),
            emergency: optional_bool(raw(Field::Emergency)),
            ident: optional_bool(raw(Field::Ident)),
            is_on_ground: optional_bool(raw(Field::IsOnGround)),
        })
    }

    fn date(&self, field: Field, raw: &str) -> NaiveDate {
        match parse_date(raw) {
            Ok(date) => {
                self.observer.date_parsed(field, date);
                date
            }
            Err(e) => {
                self.observer.timestamp_rejected(field, raw, &e);
                sentinel_date()
            }
        }
    }

    fn time(&self, field: Field, raw: &str) -> NaiveTime {
        match parse_time(raw) {
            Ok(time) => {
                self.observer.time_parsed(field, time);
                time
            }
            Err(e) => {
                self.observer.timestamp_rejected(field, raw, &e);
                sentinel_time()
            }
        }
    }

    fn numeric<T>(&self, field: Field, raw: &str, coerce: fn(&str) -> Option<T>) -> Option<T> {
        let value = coerce(raw);
        if value.is_none() && !raw.is_empty() {
            self.observer.field_rejected(field, raw);
        }
        value
    }
}

impl<O: DecodeObserver> Protocol for BaseStationDecoder<O> {
    type Message = ParsedMessage;
    type Error = DecodeError;

    /// Decode one framed line. A trailing `\n` or `\r\n` is stripped and
    /// invalid UTF-8 is replaced rather than rejected.
    fn parse(&mut self, input: &[u8]) -> Result<ParsedMessage, DecodeError> {
        let input = match input.strip_suffix(b"\n") {
            Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
            None => input,
        };
        let line = String::from_utf8_lossy(input);

        self.decode(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::TimestampError;
    use std::sync::Mutex;

    const FULL_LINE: &str = "MSG,3,1,1,ABC123,1,2023/05/01,12:00:00,2023/05/01,12:00:05,UAL123,35000,450.5,270.0,-122.4,37.6,0,1200,0,0,0,0";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[derive(Debug, Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl DecodeObserver for Recorder {
        fn date_parsed(&self, field: Field, date: NaiveDate) {
            self.push(format!("{field}={date}"));
        }

        fn time_parsed(&self, field: Field, time: NaiveTime) {
            self.push(format!("{field}={time}"));
        }

        fn timestamp_rejected(&self, field: Field, raw: &str, _error: &TimestampError) {
            self.push(format!("{field}!{raw}"));
        }

        fn field_rejected(&self, field: Field, raw: &str) {
            self.push(format!("{field}!{raw}"));
        }

        fn line_rejected(&self, line: &str, _error: &DecodeError) {
            self.push(format!("line!{line}"));
        }
    }

    #[test]
    fn test_decode_full_line() {
        let msg = BaseStationDecoder::new().decode(FULL_LINE).unwrap();
        assert_eq!(msg.message_type, "MSG");
        assert_eq!(msg.transmission_type.as_deref(), Some("3"));
        assert_eq!(msg.session_id.as_deref(), Some("1"));
        assert_eq!(msg.aircraft_id, "1");
        assert_eq!(msg.hex_ident.as_deref(), Some("ABC123"));
        assert_eq!(msg.flight_id, "1");
        assert_eq!(msg.date_generated, ymd(2023, 5, 1));
        assert_eq!(msg.time_generated, hms(12, 0, 0));
        assert_eq!(msg.date_logged, ymd(2023, 5, 1));
        assert_eq!(msg.time_logged, hms(12, 0, 5));
        assert_eq!(msg.callsign.as_deref(), Some("UAL123"));
        assert_eq!(msg.altitude, Some(35000));
        assert_eq!(msg.ground_speed, Some(450.5));
        assert_eq!(msg.track, Some(270.0));
        assert_eq!(msg.longitude, Some(-122.4));
        assert_eq!(msg.latitude, Some(37.6));
        assert_eq!(msg.vertical_rate, Some(0.0));
        assert_eq!(msg.squawk.as_deref(), Some("1200"));
        // "0" is the raised-flag token for all four status columns.
        assert_eq!(msg.alert, Some(true));
        assert_eq!(msg.emergency, Some(true));
        assert_eq!(msg.ident, Some(true));
        assert_eq!(msg.is_on_ground, Some(true));
    }

    #[test]
    fn test_decode_too_few_fields() {
        let decoder = BaseStationDecoder::new();
        assert_eq!(
            decoder.decode(""),
            Err(DecodeError::TooFewFields { count: 1 })
        );
        assert_eq!(
            decoder.decode("MSG"),
            Err(DecodeError::TooFewFields { count: 1 })
        );
    }

    #[test]
    fn test_decode_two_fields() {
        let msg = BaseStationDecoder::new().decode("MSG,3").unwrap();
        assert_eq!(msg.message_type, "MSG");
        assert_eq!(msg.transmission_type.as_deref(), Some("3"));
        assert_eq!(msg.session_id, None);
        assert_eq!(msg.aircraft_id, "");
        assert_eq!(msg.hex_ident, None);
        assert_eq!(msg.flight_id, "");
        assert_eq!(msg.date_generated, sentinel_date());
        assert_eq!(msg.time_generated, sentinel_time());
        assert_eq!(msg.date_logged, sentinel_date());
        assert_eq!(msg.time_logged, sentinel_time());
        assert_eq!(msg.callsign, None);
        assert_eq!(msg.altitude, None);
    }

    #[test]
    fn test_decode_header_only() {
        let line = "MSG,3,1,1,ABC123,1,2023/05/01,12:00:00,2023/05/01,12:00:05";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.time_logged, hms(12, 0, 5));
        assert_eq!(msg.callsign, None);
        assert_eq!(msg.altitude, None);
        assert_eq!(msg.is_on_ground, None);
    }

    #[test]
    fn test_decode_callsign_tier() {
        let line = "MSG,3,1,1,A,1,2023/05/01,12:00:00,2023/05/01,12:00:05,UAL1";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.callsign.as_deref(), Some("UAL1"));
        assert_eq!(msg.altitude, None);
        assert_eq!(msg.ground_speed, None);
        assert_eq!(msg.squawk, None);
        assert_eq!(msg.alert, None);
        assert_eq!(msg.is_on_ground, None);
    }

    #[test]
    fn test_decode_full_tier_on_twelve_fields() {
        let line = "MSG,5,1,1,A,1,2023/05/01,12:00:00,2023/05/01,12:00:05,,30000";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.callsign, None);
        assert_eq!(msg.altitude, Some(30000));
        assert_eq!(msg.ground_speed, None);
        assert_eq!(msg.is_on_ground, None);
    }

    #[test]
    fn test_decode_truncated_full_tier() {
        let line = "MSG,3,1,1,A,1,2023/05/01,12:00:00,2023/05/01,12:00:05,,35000,,,33.9425,-118.4081";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.altitude, Some(35000));
        assert_eq!(msg.longitude, Some(33.9425));
        assert_eq!(msg.latitude, Some(-118.4081));
        assert_eq!(msg.vertical_rate, None);
        assert_eq!(msg.squawk, None);
        assert_eq!(msg.is_on_ground, None);
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let line = format!("{FULL_LINE},extra,more");
        let msg = BaseStationDecoder::new().decode(&line).unwrap();
        assert_eq!(msg, BaseStationDecoder::new().decode(FULL_LINE).unwrap());
    }

    #[test]
    fn test_decode_flag_one_is_absent() {
        let line = "MSG,5,1,1,A,1,2023/05/01,12:00:00,2023/05/01,12:00:05,,30000,,,,,,7700,1,-1,,0";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.squawk.as_deref(), Some("7700"));
        assert_eq!(msg.alert, None);
        assert_eq!(msg.emergency, None);
        assert_eq!(msg.ident, None);
        assert_eq!(msg.is_on_ground, Some(true));
    }

    #[test]
    fn test_decode_malformed_numbers_are_absent() {
        let line = "MSG,3,1,1,A,1,2023/05/01,12:00:00,2023/05/01,12:00:05,,high,abc,270,x,37.6,1e2";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.altitude, None);
        assert_eq!(msg.ground_speed, None);
        assert_eq!(msg.track, Some(270.0));
        assert_eq!(msg.longitude, None);
        assert_eq!(msg.latitude, Some(37.6));
        assert_eq!(msg.vertical_rate, Some(100.0));
    }

    #[test]
    fn test_decode_zero_is_not_absent() {
        let line = "MSG,2,1,1,A,1,2023/05/01,12:00:00,2023/05/01,12:00:05,,0,0,0,0,0,0,0000";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.altitude, Some(0));
        assert_eq!(msg.ground_speed, Some(0.0));
        assert_eq!(msg.vertical_rate, Some(0.0));
        assert_eq!(msg.squawk.as_deref(), Some("0000"));
    }

    #[test]
    fn test_decode_malformed_timestamps_use_sentinel() {
        let line = "MSG,3,1,1,A,1,05/01/2023,noon,2023/05/01,12:00:05.123";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.date_generated, sentinel_date());
        assert_eq!(msg.time_generated, sentinel_time());
        assert_eq!(msg.date_logged, ymd(2023, 5, 1));
        assert_eq!(
            msg.time_logged,
            NaiveTime::from_hms_milli_opt(12, 0, 5, 123).unwrap()
        );
    }

    #[test]
    fn test_decode_keeps_required_strings_verbatim() {
        let line = ",, , ,,,2023/05/01,12:00:00,2023/05/01,12:00:05";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.message_type, "");
        assert_eq!(msg.transmission_type, None);
        assert_eq!(msg.session_id.as_deref(), Some(" "));
        assert_eq!(msg.aircraft_id, " ");
        assert_eq!(msg.hex_ident, None);
        assert_eq!(msg.flight_id, "");
    }

    #[test]
    fn test_decode_does_not_validate_message_type() {
        let line = "STA,9,1,1,ABC123,1,2023/05/01,12:00:00,2023/05/01,12:00:05,RM";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.message_type, "STA");
        assert_eq!(msg.transmission_type.as_deref(), Some("9"));
        assert_eq!(msg.callsign.as_deref(), Some("RM"));
    }

    #[test]
    fn test_protocol_strips_line_terminator() {
        let mut decoder = BaseStationDecoder::new();
        let framed = format!("{FULL_LINE}\r\n");
        let msg = decoder.parse(framed.as_bytes()).unwrap();
        assert_eq!(msg.is_on_ground, Some(true));

        assert!(matches!(
            decoder.parse(b"\r\n"),
            Err(DecodeError::TooFewFields { count: 1 })
        ));
    }

    #[test]
    fn test_protocol_keeps_lone_carriage_return() {
        let mut decoder = BaseStationDecoder::new();
        let msg = decoder.parse(b"MSG,3\r").unwrap();
        assert_eq!(msg.transmission_type.as_deref(), Some("3\r"));

        let msg = decoder.parse(b"MSG,3\n").unwrap();
        assert_eq!(msg.transmission_type.as_deref(), Some("3"));
    }

    #[test]
    fn test_decode_second_sixty_uses_sentinel() {
        let line = "MSG,3,1,1,A,1,2023/05/01,23:59:60,2023/05/01,12:30:60";
        let msg = BaseStationDecoder::new().decode(line).unwrap();
        assert_eq!(msg.date_generated, ymd(2023, 5, 1));
        assert_eq!(msg.time_generated, sentinel_time());
        assert_eq!(msg.time_logged, sentinel_time());
    }

    #[test]
    fn test_protocol_replaces_invalid_utf8() {
        let mut decoder = BaseStationDecoder::new();
        let msg = decoder.parse(b"MSG,3,1,1,\xFF\xFE,1").unwrap();
        assert_eq!(msg.hex_ident.as_deref(), Some("\u{FFFD}\u{FFFD}"));
    }

    #[test]
    fn test_observer_events() {
        let recorder = Recorder::default();
        let decoder = BaseStationDecoder::with_observer(&recorder);
        let line = "MSG,3,1,1,A,1,2023/05/01,bad,2023/05/01,12:00:05,,high";
        decoder.decode(line).unwrap();
        decoder.decode("MSG").unwrap_err();

        assert_eq!(
            recorder.events(),
            vec![
                "date generated=2023-05-01",
                "time generated!bad",
                "date logged=2023-05-01",
                "time logged=12:00:05",
                "altitude!high",
                "line!MSG",
            ]
        );
    }

    #[test]
    fn test_observer_does_not_change_result() {
        let recorder = Recorder::default();
        let observed = BaseStationDecoder::with_observer(&recorder);
        let plain = BaseStationDecoder::new();
        for line in [FULL_LINE, "MSG,3", "", "MSG,1,1,1,A,1,x,y,z,w,CS,abc"] {
            assert_eq!(observed.decode(line), plain.decode(line));
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let decoder = &BaseStationDecoder::new();
        let lines: Vec<String> = (0..8)
            .map(|i| format!("MSG,3,1,1,ABC{i:03},1,2023/05/01,12:00:00,2023/05/01,12:00:05,,{i}000"))
            .collect();

        let altitudes: Vec<Option<i32>> = std::thread::scope(|s| {
            let handles: Vec<_> = lines
                .iter()
                .map(|line| s.spawn(move || decoder.decode(line).unwrap().altitude))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(altitudes[3], Some(3000));
        assert_eq!(altitudes.len(), 8);
    }
}
