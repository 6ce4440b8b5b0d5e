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

use rand::Rng;

use crate::deck::Deck;
use crate::types::category::Category;
use crate::types::entry::VocabEntry;

/// The part of a deck being studied, as positions into the deck.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// The entries of `deck` matching `category`, in deck order.
    pub fn new(deck: &Deck, category: &Category) -> Self {
        let indices = deck
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| category.matches(entry))
            .map(|(idx, _)| idx)
            .collect();
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get<'a>(&self, deck: &'a Deck, position: usize) -> Option<&'a VocabEntry> {
        self.indices
            .get(position)
            .and_then(|idx| deck.entries().get(*idx))
    }

    pub fn entries<'a>(&self, deck: &'a Deck) -> Vec<&'a VocabEntry> {
        self.indices
            .iter()
            .filter_map(|idx| deck.entries().get(*idx))
            .collect()
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.indices.len()).rev() {
            let j = rng.random_range(0..=i);
            self.indices.swap(i, j);
        }
    }
}
