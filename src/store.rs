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

use std::collections::HashMap;

use crate::error::Fallible;

/// A key/blob store holding serialized session snapshots.
pub trait StateStore {
    /// Returns the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Fallible<Option<String>>;

    /// Overwrites the blob stored under `key`.
    fn save(&mut self, key: &str, blob: &str) -> Fallible<()>;
}

/// A store that lives and dies with the process.
#[derive(Default, Debug)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a blob.
    pub fn with(mut self, key: &str, blob: &str) -> Self {
        self.blobs.insert(key.to_string(), blob.to_string());
        self
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Fallible<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
