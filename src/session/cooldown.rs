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

use crate::types::timestamp::Timestamp;

/// Enforces a minimum interval between accepted navigation commands.
#[derive(Clone, Debug)]
pub struct Cooldown {
    window_ms: u64,
    until: Option<Timestamp>,
}

impl Cooldown {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            until: None,
        }
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        matches!(self.until, Some(until) if now < until)
    }

    pub fn start(&mut self, now: Timestamp) {
        self.until = Some(now.plus_millis(self.window_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        let t0 = Timestamp::from_millis(10_000);
        let mut cooldown = Cooldown::new(250);
        assert!(!cooldown.is_active(t0));
        cooldown.start(t0);
        assert!(cooldown.is_active(t0));
        assert!(cooldown.is_active(t0.plus_millis(249)));
        assert!(!cooldown.is_active(t0.plus_millis(250)));
    }

    #[test]
    fn test_zero_window() {
        let t0 = Timestamp::from_millis(0);
        let mut cooldown = Cooldown::new(0);
        cooldown.start(t0);
        assert!(!cooldown.is_active(t0));
    }
}
