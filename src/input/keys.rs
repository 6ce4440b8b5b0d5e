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

use crate::input::Command;

/// A key the drill reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Maps key presses and releases to commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyAdapter;

impl KeyAdapter {
    pub fn key_down(&self, key: Key) -> Option<Command> {
        match key {
            Key::ArrowRight => Some(Command::Next),
            Key::ArrowLeft => Some(Command::Prev),
            Key::Space => Some(Command::PeekReveal),
        }
    }

    pub fn key_up(&self, key: Key) -> Option<Command> {
        match key {
            Key::Space => Some(Command::PeekHide),
            Key::ArrowLeft | Key::ArrowRight => None,
        }
    }

    /// Convenience entry point for raw DOM key names.
    pub fn handle(&self, key: &str, pressed: bool) -> Option<Command> {
        let key = Key::from_dom(key)?;
        if pressed {
            self.key_down(key)
        } else {
            self.key_up(key)
        }
    }
}
