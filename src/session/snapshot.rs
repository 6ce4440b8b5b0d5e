// Copyright 2025 Fernando Borretti
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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;
use crate::types::category::ALL;

/// The persisted form of a session's state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_index: usize,
    pub show_reading: bool,
    pub show_meaning: bool,
    pub current_category: String,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            current_index: 0,
            show_reading: true,
            show_meaning: true,
            current_category: ALL.to_string(),
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored blob. Each field that is missing or has the wrong
    /// type falls back to its default on its own; a blob that is not a JSON
    /// object yields the defaults.
    pub fn decode(blob: &str) -> Self {
        let value: Value = match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring unreadable saved state: {e}");
                return Self::default();
            }
        };
        let Some(fields) = value.as_object() else {
            log::warn!("Ignoring saved state that is not an object.");
            return Self::default();
        };
        Self::from_fields(fields)
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let current_index = fields
            .get("currentIndex")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(defaults.current_index);
        let show_reading = fields
            .get("showReading")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.show_reading);
        let show_meaning = fields
            .get("showMeaning")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.show_meaning);
        // An empty category has always meant "no filter".
        let current_category = fields
            .get("currentCategory")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.current_category);
        Self {
            current_index,
            show_reading,
            show_meaning,
            current_category,
        }
    }
}
