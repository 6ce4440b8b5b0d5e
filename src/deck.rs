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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::entry::VocabEntry;

/// An ordered, immutable sequence of vocabulary entries.
#[derive(Clone, Debug)]
pub struct Deck {
    /// The deck's name, taken from the file stem when loaded from disk.
    name: String,
    entries: Vec<VocabEntry>,
}

/// The TOML deck layout: a list of `[[words]]` tables.
#[derive(Deserialize)]
struct TomlDeck {
    words: Vec<VocabEntry>,
}

impl Deck {
    pub fn new(name: impl Into<String>, entries: Vec<VocabEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Loads a deck from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.is_file() {
            return fail(format!("deck file does not exist: {}", path.display()));
        }
        let name: String = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => return fail(format!("invalid deck path: {}", path.display())),
        };
        log::debug!("Loading deck from {}...", path.display());
        let start = Instant::now();
        let content = read_to_string(path)?;
        let entries: Vec<VocabEntry> = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str::<TomlDeck>(&content)?.words,
            _ => return fail(format!("unsupported deck format: {}", path.display())),
        };
        let duration = start.elapsed().as_millis();
        log::debug!("Loaded {} words in {duration}ms.", entries.len());
        Ok(Self::new(name, entries))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The distinct categories in the deck, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category()) {
                categories.push(entry.category());
            }
        }
        categories
    }

    /// Checks that the deck can be drilled.
    pub fn validate(&self) -> Fallible<()> {
        if self.entries.is_empty() {
            return fail(format!("deck '{}' has no words.", self.name));
        }
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.term().trim().is_empty() {
                return fail(format!(
                    "deck '{}': word #{} has an empty term.",
                    self.name,
                    idx + 1
                ));
            }
        }
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

pub fn is_deck_file(path: &Path) -> bool {
    path.is_file() && matches!(extension(path), Some("json") | Some("toml"))
}

/// Finds every deck file under `directory`, sorted by path. Generated chapter
/// manifests and the config file are skipped.
pub fn find_decks(directory: &Path) -> Fallible<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(directory) {
        let entry = entry?;
        let path = entry.path();
        if !is_deck_file(path) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with("chapters-") || file_name == crate::config::CONFIG_FILE {
            continue;
        }
        paths.push(path.to_path_buf());
    }
    paths.sort();
    Ok(paths)
}
