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

//! Coercers for the optional columns of a BaseStation line.
//!
//! None of these can fail: an empty or unparseable column is simply absent.

/// Empty column is absent, anything else is kept verbatim (no trimming).
#[must_use]
pub fn optional_string(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Base-10 integer. Values outside the `i32` range are absent.
#[must_use]
pub fn optional_int(field: &str) -> Option<i32> {
    if field.is_empty() {
        return None;
    }
    field.parse::<i32>().ok()
}

/// Decimal or exponential float.
#[must_use]
pub fn optional_float(field: &str) -> Option<f64> {
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok()
}

/// Status flag column.
///
/// Only the literal `"0"` yields `Some(true)`. Every other token, `"1"` and
/// `"-1"` included, is absent rather than `Some(false)`. Feeders such as
/// dump1090 send `-1` for a raised flag, so this polarity is inverted
/// relative to the wire convention. Consumers depend on it; do not flip it.
#[must_use]
pub fn optional_bool(field: &str) -> Option<bool> {
    if field.eq_ignore_ascii_case("0") {
        Some(true)
    } else {
        None
    }
}
