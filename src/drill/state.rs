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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::db::Database;
use crate::input::gesture::GestureRecognizer;
use crate::input::keys::KeyAdapter;
use crate::session::FlashcardSession;

#[derive(Clone)]
pub struct ServerState {
    pub port: u16,
    /// The deck's categories, for the filter selector.
    pub categories: Vec<String>,
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    pub session: FlashcardSession<Database>,
    pub gestures: GestureRecognizer,
    pub keys: KeyAdapter,
}

impl ServerState {
    pub fn lock(&self) -> MutexGuard<'_, MutableState> {
        self.mutable.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
