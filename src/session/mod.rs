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

//! The flashcard session state machine.

pub mod cooldown;
pub mod frame;
pub mod snapshot;
pub mod view;

use rand::Rng;

use crate::deck::Deck;
use crate::input::Command;
use crate::session::cooldown::Cooldown;
use crate::session::frame::Frame;
use crate::session::frame::position_label;
use crate::session::snapshot::Snapshot;
use crate::session::view::FilteredView;
use crate::store::StateStore;
use crate::types::category::Category;
use crate::types::entry::VocabEntry;
use crate::types::timestamp::Timestamp;

/// A study session over one deck. Every state change is written to the store
/// under the session key.
pub struct FlashcardSession<S: StateStore> {
    deck: Deck,
    store: S,
    key: String,
    view: FilteredView,
    index: usize,
    show_reading: bool,
    show_meaning: bool,
    category: Category,
    /// Transient full reveal. Never persisted.
    peeking: bool,
    cooldown: Cooldown,
}

impl<S: StateStore> FlashcardSession<S> {
    /// Starts a session, restoring whatever state `store` holds for `key`.
    pub fn new(deck: Deck, store: S, key: impl Into<String>, cooldown_ms: u64) -> Self {
        let key: String = key.into();
        let snapshot: Snapshot = match store.load(&key) {
            Ok(Some(blob)) => {
                log::debug!("Restoring saved state for '{key}'.");
                Snapshot::decode(&blob)
            }
            Ok(None) => Snapshot::default(),
            Err(e) => {
                log::error!("Failed to read saved state for '{key}': {e}");
                Snapshot::default()
            }
        };
        let category = Category::parse(&snapshot.current_category);
        let view = FilteredView::new(&deck, &category);
        let index = if snapshot.current_index < view.len() {
            snapshot.current_index
        } else {
            0
        };
        Self {
            deck,
            store,
            key,
            view,
            index,
            show_reading: snapshot.show_reading,
            show_meaning: snapshot.show_meaning,
            category,
            peeking: false,
            cooldown: Cooldown::new(cooldown_ms),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn show_reading(&self) -> bool {
        self.show_reading
    }

    pub fn show_meaning(&self) -> bool {
        self.show_meaning
    }

    pub fn is_peeking(&self) -> bool {
        self.peeking
    }

    /// The entries currently being studied, in study order.
    pub fn view_entries(&self) -> Vec<&VocabEntry> {
        self.view.entries(&self.deck)
    }

    pub fn current(&self) -> Option<&VocabEntry> {
        self.view.get(&self.deck, self.index)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_index: self.index,
            show_reading: self.show_reading,
            show_meaning: self.show_meaning,
            current_category: self.category.to_string(),
        }
    }

    pub fn frame(&self) -> Frame {
        Frame {
            entry: self.current().cloned(),
            show_reading: self.show_reading || self.peeking,
            show_meaning: self.show_meaning || self.peeking,
            reading_toggle: self.show_reading,
            meaning_toggle: self.show_meaning,
            peeking: self.peeking,
            category: self.category.to_string(),
            position: position_label(self.index, self.view.len()),
        }
    }

    /// Advances to the next entry, wrapping around. Returns false if the
    /// command was dropped.
    pub fn next(&mut self, now: Timestamp) -> bool {
        self.navigate(now, "next", |index, len| (index + 1) % len)
    }

    /// Steps back to the previous entry, wrapping around. Returns false if the
    /// command was dropped.
    pub fn prev(&mut self, now: Timestamp) -> bool {
        self.navigate(now, "prev", |index, len| (index + len - 1) % len)
    }

    fn navigate(&mut self, now: Timestamp, name: &str, step: fn(usize, usize) -> usize) -> bool {
        if self.view.is_empty() {
            log::debug!("Ignoring {name}: nothing to show.");
            return false;
        }
        if self.cooldown.is_active(now) {
            log::debug!("Ignoring {name}: navigation cooldown.");
            return false;
        }
        self.cooldown.start(now);
        self.index = step(self.index, self.view.len());
        self.persist();
        true
    }

    /// Studies only `category`. A category no entry has gives an empty view.
    pub fn set_filter(&mut self, category: Category) {
        log::debug!("Filter set to '{category}'.");
        self.view = FilteredView::new(&self.deck, &category);
        self.category = category;
        self.index = 0;
        self.persist();
    }

    pub fn reshuffle(&mut self) {
        self.reshuffle_with(&mut rand::rng());
    }

    pub fn reshuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.view.shuffle(rng);
        self.index = 0;
        self.persist();
    }

    /// Puts the current view back in deck order.
    pub fn reset_order(&mut self) {
        self.view = FilteredView::new(&self.deck, &self.category);
        self.index = 0;
        self.persist();
    }

    pub fn toggle_reading(&mut self) {
        self.show_reading = !self.show_reading;
        self.persist();
    }

    pub fn toggle_meaning(&mut self) {
        self.show_meaning = !self.show_meaning;
        self.persist();
    }

    pub fn peek_reveal(&mut self) {
        self.peeking = true;
    }

    pub fn peek_hide(&mut self) {
        self.peeking = false;
    }

    /// Applies a command from an input adapter.
    pub fn dispatch(&mut self, command: Command, now: Timestamp) {
        match command {
            Command::Next => {
                self.next(now);
            }
            Command::Prev => {
                self.prev(now);
            }
            Command::PeekReveal => self.peek_reveal(),
            Command::PeekHide => self.peek_hide(),
        }
    }

    /// Consumes the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let blob = match self.snapshot().to_json() {
            Ok(blob) => blob,
            Err(e) => {
                log::error!("Failed to serialize session state: {e}");
                return;
            }
        };
        if let Err(e) = self.store.save(&self.key, &blob) {
            log::error!("Failed to save session state for '{}': {e}", self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::Fallible;
    use crate::error::fail;
    use crate::store::MemoryStore;

    const KEY: &str = "n3-ch01";
    const COOLDOWN: u64 = 250;

    fn deck() -> Deck {
        Deck::new(
            "n3",
            vec![
                VocabEntry::new("A", "a", "alpha", "verb"),
                VocabEntry::new("B", "b", "bravo", "noun"),
                VocabEntry::new("C", "c", "charlie", "verb"),
            ],
        )
    }

    fn larger_deck() -> Deck {
        let entries = (0..8)
            .map(|i| {
                let category = if i % 2 == 0 { "even" } else { "odd" };
                VocabEntry::new(format!("w{i}"), "", "", category)
            })
            .collect();
        Deck::new("larger", entries)
    }

    fn session() -> FlashcardSession<MemoryStore> {
        FlashcardSession::new(deck(), MemoryStore::new(), KEY, COOLDOWN)
    }

    /// Timestamps far enough apart to clear the cooldown.
    struct Clock {
        now: Timestamp,
    }

    impl Clock {
        fn new() -> Self {
            Self {
                now: Timestamp::from_millis(1_000_000),
            }
        }

        fn tick(&mut self) -> Timestamp {
            self.now = self.now.plus_millis(COOLDOWN);
            self.now
        }
    }

    fn terms<S: StateStore>(session: &FlashcardSession<S>) -> Vec<String> {
        session
            .view_entries()
            .iter()
            .map(|e| e.term().to_string())
            .collect()
    }

    fn stored(store: &MemoryStore) -> Fallible<Snapshot> {
        match store.load(KEY)? {
            Some(blob) => Ok(Snapshot::decode(&blob)),
            None => fail("nothing stored"),
        }
    }

    #[test]
    fn test_defaults() {
        let s = session();
        assert_eq!(s.index(), 0);
        assert!(s.show_reading());
        assert!(s.show_meaning());
        assert_eq!(s.category(), &Category::All);
        assert!(!s.is_peeking());
        let frame = s.frame();
        assert_eq!(frame.position, "1 / 3");
        assert_eq!(frame.entry.map(|e| e.term().to_string()), Some("A".to_string()));
    }

    #[test]
    fn test_accessors() {
        let s = session();
        assert_eq!(s.key(), KEY);
        assert_eq!(s.deck().name(), "n3");
        assert_eq!(s.deck().categories(), vec!["verb", "noun"]);
    }

    #[test]
    fn test_filter_scenario() {
        let mut clock = Clock::new();
        let mut s = session();
        s.set_filter(Category::parse("verb"));
        assert_eq!(terms(&s), vec!["A", "C"]);
        assert_eq!(s.index(), 0);
        assert!(s.next(clock.tick()));
        assert_eq!(s.index(), 1);
        assert_eq!(s.current().map(|e| e.term()), Some("C"));
        assert!(s.next(clock.tick()));
        assert_eq!(s.index(), 0);
        assert_eq!(s.current().map(|e| e.term()), Some("A"));
    }

    #[test]
    fn test_empty_filter_scenario() {
        let mut clock = Clock::new();
        let mut s = session();
        s.set_filter(Category::parse("adjective"));
        let frame = s.frame();
        assert!(frame.is_empty());
        assert_eq!(frame.position, "0 / 0");
        assert_eq!(frame.category, "adjective");
        assert!(!s.next(clock.tick()));
        assert!(!s.prev(clock.tick()));
        assert_eq!(s.index(), 0);
        assert!(s.current().is_none());
        s.reshuffle();
        s.reset_order();
        assert!(s.frame().is_empty());
    }

    #[test]
    fn test_next_then_prev_restores_index() {
        let mut clock = Clock::new();
        let mut s = FlashcardSession::new(larger_deck(), MemoryStore::new(), KEY, COOLDOWN);
        for start in 0..8 {
            while s.index() != start {
                s.next(clock.tick());
            }
            s.next(clock.tick());
            s.prev(clock.tick());
            assert_eq!(s.index(), start);
        }
    }

    #[test]
    fn test_prev_wraps_from_start() {
        let mut clock = Clock::new();
        let mut s = session();
        assert!(s.prev(clock.tick()));
        assert_eq!(s.index(), 2);
        assert_eq!(s.frame().position, "3 / 3");
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut clock = Clock::new();
        for filter in ["all", "even", "odd"] {
            let mut s = FlashcardSession::new(larger_deck(), MemoryStore::new(), KEY, COOLDOWN);
            s.set_filter(Category::parse(filter));
            s.next(clock.tick());
            let start = s.index();
            let len = s.view_entries().len();
            for _ in 0..len {
                assert!(s.next(clock.tick()));
            }
            assert_eq!(s.index(), start);
        }
    }

    #[test]
    fn test_cooldown_drops_rapid_navigation() {
        let t0 = Timestamp::from_millis(5_000);
        let mut s = session();
        assert!(s.next(t0));
        assert!(!s.next(t0.plus_millis(10)));
        assert!(!s.prev(t0.plus_millis(249)));
        assert_eq!(s.index(), 1);
        assert!(s.next(t0.plus_millis(250)));
        assert_eq!(s.index(), 2);
    }

    #[test]
    fn test_dropped_navigation_does_not_extend_cooldown() {
        let t0 = Timestamp::from_millis(5_000);
        let mut s = session();
        assert!(s.next(t0));
        assert!(!s.next(t0.plus_millis(200)));
        assert!(s.next(t0.plus_millis(260)));
    }

    #[test]
    fn test_reshuffle_preserves_entries_and_resets_index() {
        let mut clock = Clock::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut s = FlashcardSession::new(larger_deck(), MemoryStore::new(), KEY, COOLDOWN);
        s.next(clock.tick());
        s.next(clock.tick());
        let mut before = terms(&s);
        s.reshuffle_with(&mut rng);
        assert_eq!(s.index(), 0);
        let mut after = terms(&s);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reshuffle_stays_within_filter() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = FlashcardSession::new(larger_deck(), MemoryStore::new(), KEY, COOLDOWN);
        s.set_filter(Category::parse("odd"));
        s.reshuffle_with(&mut rng);
        for entry in s.view_entries() {
            assert_eq!(entry.category(), "odd");
        }
        assert_eq!(s.view_entries().len(), 4);
    }

    #[test]
    fn test_reset_order_after_reshuffle() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut s = FlashcardSession::new(larger_deck(), MemoryStore::new(), KEY, COOLDOWN);
        s.set_filter(Category::parse("even"));
        let original = terms(&s);
        for _ in 0..5 {
            s.reshuffle_with(&mut rng);
        }
        s.reset_order();
        assert_eq!(terms(&s), original);
        assert_eq!(s.index(), 0);
        assert_eq!(s.category(), &Category::parse("even"));
    }

    #[test]
    fn test_toggles_are_independent_of_navigation() {
        let mut clock = Clock::new();
        let mut s = session();
        s.next(clock.tick());
        s.toggle_reading();
        assert!(!s.show_reading());
        assert!(s.show_meaning());
        assert_eq!(s.index(), 1);
        s.toggle_meaning();
        s.toggle_reading();
        assert!(s.show_reading());
        assert!(!s.show_meaning());
        assert_eq!(s.index(), 1);
    }

    #[test]
    fn test_peek_overrides_visibility_without_persisting() -> Fallible<()> {
        let mut s = session();
        s.toggle_reading();
        s.toggle_meaning();
        let frame = s.frame();
        assert!(!frame.show_reading);
        assert!(!frame.show_meaning);

        s.peek_reveal();
        let frame = s.frame();
        assert!(frame.peeking);
        assert!(frame.show_reading);
        assert!(frame.show_meaning);
        assert!(!frame.reading_toggle);
        assert!(!frame.meaning_toggle);
        assert!(!s.show_reading());

        s.peek_hide();
        let frame = s.frame();
        assert!(!frame.show_reading);
        assert!(!frame.show_meaning);

        let store = s.into_store();
        let snapshot = stored(&store)?;
        assert!(!snapshot.show_reading);
        assert!(!snapshot.show_meaning);
        Ok(())
    }

    #[test]
    fn test_peek_does_not_write() -> Fallible<()> {
        let mut s = session();
        s.peek_reveal();
        s.peek_hide();
        let store = s.into_store();
        assert_eq!(store.load(KEY)?, None);
        Ok(())
    }

    #[test]
    fn test_every_mutation_is_persisted() -> Fallible<()> {
        let mut clock = Clock::new();
        let mut s = session();
        s.next(clock.tick());
        s.toggle_meaning();
        s.set_filter(Category::parse("verb"));
        s.next(clock.tick());
        let store = s.into_store();
        let snapshot = stored(&store)?;
        assert_eq!(
            snapshot,
            Snapshot {
                current_index: 1,
                show_reading: true,
                show_meaning: false,
                current_category: "verb".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn test_persistence_round_trip() {
        let mut clock = Clock::new();
        let mut s = session();
        s.set_filter(Category::parse("verb"));
        s.next(clock.tick());
        s.toggle_reading();
        let before = s.snapshot();
        let store = s.into_store();

        let restored = FlashcardSession::new(deck(), store, KEY, COOLDOWN);
        assert_eq!(restored.snapshot(), before);
        assert_eq!(restored.index(), 1);
        assert!(!restored.show_reading());
        assert!(restored.show_meaning());
        assert_eq!(restored.category(), &Category::parse("verb"));
        assert_eq!(restored.current().map(|e| e.term()), Some("C"));
    }

    #[test]
    fn test_restore_out_of_range_index() {
        let blob = r#"{"currentIndex": 7, "showReading": false, "showMeaning": true, "currentCategory": "verb"}"#;
        let store = MemoryStore::new().with(KEY, blob);
        let s = FlashcardSession::new(deck(), store, KEY, COOLDOWN);
        assert_eq!(s.index(), 0);
        assert!(!s.show_reading());
        assert_eq!(s.category(), &Category::parse("verb"));
    }

    #[test]
    fn test_restore_malformed_fields() {
        let blob = r#"{"currentIndex": "two", "showReading": false, "currentCategory": 5}"#;
        let store = MemoryStore::new().with(KEY, blob);
        let s = FlashcardSession::new(deck(), store, KEY, COOLDOWN);
        assert_eq!(s.index(), 0);
        assert!(!s.show_reading());
        assert!(s.show_meaning());
        assert_eq!(s.category(), &Category::All);
    }

    #[test]
    fn test_restore_garbage_blob() {
        let store = MemoryStore::new().with(KEY, "{{{");
        let s = FlashcardSession::new(deck(), store, KEY, COOLDOWN);
        assert_eq!(s.snapshot(), Snapshot::default());
    }

    #[test]
    fn test_restore_unknown_category() {
        let blob = r#"{"currentIndex": 0, "currentCategory": "adjective"}"#;
        let store = MemoryStore::new().with(KEY, blob);
        let s = FlashcardSession::new(deck(), store, KEY, COOLDOWN);
        assert!(s.frame().is_empty());
    }

    #[test]
    fn test_keys_are_isolated() {
        let mut clock = Clock::new();
        let mut s = session();
        s.next(clock.tick());
        let store = s.into_store();
        let other = FlashcardSession::new(deck(), store, "n2-ch01", COOLDOWN);
        assert_eq!(other.index(), 0);
    }

    #[test]
    fn test_dispatch() {
        let mut clock = Clock::new();
        let mut s = session();
        s.dispatch(Command::Next, clock.tick());
        assert_eq!(s.index(), 1);
        s.dispatch(Command::Prev, clock.tick());
        assert_eq!(s.index(), 0);
        s.dispatch(Command::PeekReveal, clock.tick());
        assert!(s.is_peeking());
        s.dispatch(Command::PeekHide, clock.tick());
        assert!(!s.is_peeking());
    }

    struct FailingStore;

    impl StateStore for FailingStore {
        fn load(&self, _key: &str) -> Fallible<Option<String>> {
            fail("disk on fire")
        }

        fn save(&mut self, _key: &str, _blob: &str) -> Fallible<()> {
            fail("disk on fire")
        }
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let mut clock = Clock::new();
        let mut s = FlashcardSession::new(deck(), FailingStore, KEY, COOLDOWN);
        assert_eq!(s.snapshot(), Snapshot::default());
        assert!(s.next(clock.tick()));
        s.toggle_reading();
        assert_eq!(s.index(), 1);
        assert!(!s.show_reading());
    }
}
