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

//! Diagnostics hooks for the decoder.
//!
//! The decoder itself never writes anywhere. Callers that want to see parsed
//! timestamps or rejected columns hand it a [`DecodeObserver`]; whether one is
//! installed has no effect on the decoded record.

use chrono::{NaiveDate, NaiveTime};
use log::{debug, trace, warn};

use crate::protocol::{DecodeError, Field, TimestampError};

/// Receives diagnostic events while a line is decoded.
///
/// Every method defaults to doing nothing, so implementors only override the
/// events they care about.
pub trait DecodeObserver {
    /// A date column parsed successfully.
    fn date_parsed(&self, _field: Field, _date: NaiveDate) {}

    /// A time column parsed successfully.
    fn time_parsed(&self, _field: Field, _time: NaiveTime) {}

    /// A date or time column failed to parse and was replaced by its sentinel.
    fn timestamp_rejected(&self, _field: Field, _raw: &str, _error: &TimestampError) {}

    /// A non-empty numeric column failed to parse and became absent.
    fn field_rejected(&self, _field: Field, _raw: &str) {}

    /// The whole line was rejected.
    fn line_rejected(&self, _line: &str, _error: &DecodeError) {}
}

impl<T: DecodeObserver + ?Sized> DecodeObserver for &T {
    fn date_parsed(&self, field: Field, date: NaiveDate) {
        (**self).date_parsed(field, date);
    }

    fn time_parsed(&self, field: Field, time: NaiveTime) {
        (**self).time_parsed(field, time);
    }

    fn timestamp_rejected(&self, field: Field, raw: &str, error: &TimestampError) {
        (**self).timestamp_rejected(field, raw, error);
    }

    fn field_rejected(&self, field: Field, raw: &str) {
        (**self).field_rejected(field, raw);
    }

    fn line_rejected(&self, line: &str, error: &DecodeError) {
        (**self).line_rejected(line, error);
    }
}

/// Observer that ignores every event. This is the decoder default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}

/// Observer that forwards events to the [`log`] facade.
///
/// Parsed timestamps go to `trace`, rejected columns to `debug` and rejected
/// lines to `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl DecodeObserver for LogObserver {
    fn date_parsed(&self, field: Field, date: NaiveDate) {
        trace!("{}: {}", field, date);
    }

    fn time_parsed(&self, field: Field, time: NaiveTime) {
        trace!("{}: {}", field, time);
    }

    fn timestamp_rejected(&self, field: Field, raw: &str, error: &TimestampError) {
        debug!("Invalid {} {:?}, using sentinel: {}", field, raw, error);
    }

    fn field_rejected(&self, field: Field, raw: &str) {
        debug!("Invalid {} {:?}, treating as absent", field, raw);
    }

    fn line_rejected(&self, line: &str, error: &DecodeError) {
        warn!("Rejected line {:?}: {}", line, error);
    }
}
