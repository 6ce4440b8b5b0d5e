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

use std::path::Path;

use crate::deck::Deck;
use crate::deck::find_decks;
use crate::error::Fallible;
use crate::error::fail;

/// Loads and validates every deck file under `directory`.
pub fn check_decks(directory: &Path) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let paths = find_decks(directory)?;
    if paths.is_empty() {
        return fail("no deck files found.");
    }
    for path in paths {
        let deck = Deck::load(&path)?;
        deck.validate()?;
        log::debug!(
            "{}: {} words in {} categories.",
            path.display(),
            deck.len(),
            deck.categories().len()
        );
    }
    println!("ok");
    Ok(())
}
