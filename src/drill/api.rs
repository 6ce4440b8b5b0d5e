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

//! JSON endpoints used by the page script for keyboard and touch input.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::input::Command;
use crate::presenter::JsonPresenter;
use crate::presenter::Presenter;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
pub struct KeyEvent {
    /// The DOM `KeyboardEvent.key` value.
    key: String,
    pressed: bool,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum PointerPhase {
    Down,
    Move,
    Up,
    Tick,
}

#[derive(Deserialize)]
pub struct PointerEvent {
    phase: PointerPhase,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    /// Increases with every event the page sends.
    seq: Option<u64>,
}

pub async fn frame_handler(State(state): State<ServerState>) -> (StatusCode, Json<Value>) {
    let mutable = state.lock();
    frame_response(&mutable)
}

pub async fn key_handler(
    State(state): State<ServerState>,
    Json(event): Json<KeyEvent>,
) -> (StatusCode, Json<Value>) {
    let mut mutable = state.lock();
    let command: Option<Command> = mutable.keys.handle(&event.key, event.pressed);
    if let Some(command) = command {
        mutable.session.dispatch(command, Timestamp::now());
    }
    frame_response(&mutable)
}

pub async fn pointer_handler(
    State(state): State<ServerState>,
    Json(event): Json<PointerEvent>,
) -> (StatusCode, Json<Value>) {
    let mut mutable = state.lock();
    let now = Timestamp::now();
    if let Some(seq) = event.seq {
        if !mutable.gestures.accept(seq) {
            return frame_response(&mutable);
        }
    }
    let command: Option<Command> = match event.phase {
        PointerPhase::Down => {
            mutable.gestures.pointer_down(event.x, event.y, now);
            None
        }
        PointerPhase::Move => {
            mutable.gestures.pointer_move(event.x, event.y);
            None
        }
        PointerPhase::Up => mutable.gestures.pointer_up(event.x, now),
        PointerPhase::Tick => {
            if !mutable.gestures.is_pressed() {
                log::debug!("Stale long press tick.");
            }
            mutable.gestures.tick()
        }
    };
    if let Some(command) = command {
        log::debug!("Gesture recognized: {command:?}");
        mutable.session.dispatch(command, now);
    }
    frame_response(&mutable)
}

fn frame_response(mutable: &MutableState) -> (StatusCode, Json<Value>) {
    match JsonPresenter.present(&mutable.session.frame()) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => {
            log::error!("Failed to render frame: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null))
        }
    }
}
