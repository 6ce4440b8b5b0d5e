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

//! Vocabulary flashcards: a drill session over a word deck, its persistence,
//! input adapters, a local browser front-end, and a chapter manifest tool.

pub mod check;
pub mod cli;
pub mod config;
pub mod db;
pub mod deck;
pub mod drill;
pub mod error;
pub mod input;
pub mod manifest;
pub mod presenter;
pub mod session;
pub mod store;
pub mod types;
