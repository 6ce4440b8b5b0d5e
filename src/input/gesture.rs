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
use crate::types::timestamp::Timestamp;

/// Horizontal travel needed for a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Movement on either axis that cancels a pending long press.
pub const MOVE_TOLERANCE: f64 = 10.0;

/// How long a still press must be held to count as a long press.
pub const LONG_PRESS_MS: i64 = 300;

#[derive(Clone, Debug)]
struct Press {
    start_x: f64,
    start_y: f64,
    started_at: Timestamp,
    /// Set once the pointer strays past the tolerance.
    moved: bool,
    /// Set once the long press has fired.
    long_press: bool,
}

impl Press {
    fn long_press_due(&self, now: Timestamp) -> bool {
        !self.moved && now.millis_since(self.started_at) >= LONG_PRESS_MS
    }
}

/// Recognizes swipes and press-and-hold from pointer events.
///
/// The recognizer owns no timer. Callers schedule a `tick` once
/// `LONG_PRESS_MS` have passed on their own clock; the tick fires the long
/// press if the pointer is still down and has not moved.
///
/// Events may carry a sequence number. Events older than the newest one seen
/// are dropped, so a `down` that arrives after its `up` cannot leave a press
/// hanging.
#[derive(Clone, Debug, Default)]
pub struct GestureRecognizer {
    press: Option<Press>,
    last_seq: Option<u64>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `seq` and returns true if it is newer than every sequence
    /// number seen so far.
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(last) if seq <= last => {
                log::debug!("Dropping stale pointer event #{seq} (newest #{last}).");
                false
            }
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, now: Timestamp) {
        self.press = Some(Press {
            start_x: x,
            start_y: y,
            started_at: now,
            moved: false,
            long_press: false,
        });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(press) = self.press.as_mut() {
            let dx = (x - press.start_x).abs();
            let dy = (y - press.start_y).abs();
            if dx > MOVE_TOLERANCE || dy > MOVE_TOLERANCE {
                press.moved = true;
            }
        }
    }

    /// Fires the long press. The caller has already waited `LONG_PRESS_MS`,
    /// so only the press itself is checked, not the server-side clock.
    pub fn tick(&mut self) -> Option<Command> {
        let press = self.press.as_mut()?;
        if !press.long_press && !press.moved {
            press.long_press = true;
            return Some(Command::PeekReveal);
        }
        None
    }

    pub fn pointer_up(&mut self, x: f64, now: Timestamp) -> Option<Command> {
        let press = self.press.take()?;
        if press.long_press || press.long_press_due(now) {
            return Some(Command::PeekHide);
        }
        let diff = press.start_x - x;
        if diff.abs() > SWIPE_THRESHOLD {
            if diff > 0.0 {
                Some(Command::Next)
            } else {
                Some(Command::Prev)
            }
        } else {
            None
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}
