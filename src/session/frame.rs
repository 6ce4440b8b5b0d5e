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

use serde::Serialize;

use crate::types::entry::VocabEntry;

/// Everything a presenter needs to draw the session after a state change.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// The entry on screen, or `None` when the filter matches nothing.
    pub entry: Option<VocabEntry>,
    /// Whether the reading is visible right now, peek included.
    pub show_reading: bool,
    /// Whether the meaning is visible right now, peek included.
    pub show_meaning: bool,
    pub reading_toggle: bool,
    pub meaning_toggle: bool,
    pub peeking: bool,
    pub category: String,
    /// `"<position> / <total>"`, 1-based; `"0 / 0"` when empty.
    pub position: String,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

pub fn position_label(index: usize, total: usize) -> String {
    if total == 0 {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", index + 1, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_label() {
        assert_eq!(position_label(0, 3), "1 / 3");
        assert_eq!(position_label(2, 3), "3 / 3");
        assert_eq!(position_label(0, 0), "0 / 0");
    }
}
