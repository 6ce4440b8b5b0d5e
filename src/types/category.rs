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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::entry::VocabEntry;

/// The name of the filter that selects the whole deck.
pub const ALL: &str = "all";

/// A category filter over a deck.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Parses a filter name. The empty string is read as `all`, which is how
    /// older saved states encode "no filter".
    pub fn parse(name: &str) -> Self {
        match name {
            "" | ALL => Category::All,
            other => Category::Named(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => ALL,
            Category::Named(name) => name,
        }
    }

    pub fn matches(&self, entry: &VocabEntry) -> bool {
        match self {
            Category::All => true,
            Category::Named(name) => entry.category() == name,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Category::parse("all"), Category::All);
        assert_eq!(Category::parse(""), Category::All);
        assert_eq!(Category::parse("verb"), Category::Named("verb".to_string()));
    }

    #[test]
    fn test_matches() {
        let entry = VocabEntry::new("走る", "はしる", "달리다", "verb");
        assert!(Category::All.matches(&entry));
        assert!(Category::parse("verb").matches(&entry));
        assert!(!Category::parse("noun").matches(&entry));
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::All.to_string(), "all");
        assert_eq!(Category::parse("noun").to_string(), "noun");
    }
}
