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

/// A single vocabulary item. Deck files written for the browser version name
/// the term field `kanji`, so both spellings are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabEntry {
    #[serde(alias = "kanji")]
    term: String,
    reading: String,
    meaning: String,
    category: String,
}

impl VocabEntry {
    pub fn new(
        term: impl Into<String>,
        reading: impl Into<String>,
        meaning: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            reading: reading.into(),
            meaning: meaning.into(),
            category: category.into(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}
