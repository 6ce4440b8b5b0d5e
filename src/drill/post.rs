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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::category::Category;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
enum Action {
    Next,
    Prev,
    ToggleReading,
    ToggleMeaning,
    Shuffle,
    Reset,
    Filter,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    category: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    let mut mutable = state.lock();
    let session = &mut mutable.session;
    let now = Timestamp::now();
    match form.action {
        Action::Next => {
            session.next(now);
        }
        Action::Prev => {
            session.prev(now);
        }
        Action::ToggleReading => session.toggle_reading(),
        Action::ToggleMeaning => session.toggle_meaning(),
        Action::Shuffle => session.reshuffle(),
        Action::Reset => session.reset_order(),
        Action::Filter => match form.category {
            Some(name) => session.set_filter(Category::parse(&name)),
            None => return fail("filter action without a category."),
        },
    }
    Ok(())
}
