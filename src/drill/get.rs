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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::drill::state::ServerState;
use crate::drill::template::page_template;
use crate::presenter::HtmlPresenter;
use crate::presenter::Presenter;
use crate::types::category::ALL;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let frame = state.lock().session.frame();
    let card: Markup = match HtmlPresenter.present(&frame) {
        Ok(card) => card,
        Err(e) => {
            log::error!("Failed to render card: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            );
        }
    };
    let reading_label = if frame.reading_toggle {
        "Reading: shown"
    } else {
        "Reading: hidden"
    };
    let meaning_label = if frame.meaning_toggle {
        "Meaning: shown"
    } else {
        "Meaning: hidden"
    };
    let body = html! {
        div.root {
            div.toolbar {
                form.filter action="/" method="post" {
                    input type="hidden" name="action" value="Filter";
                    select #category-select name="category" {
                        option value=(ALL) selected[frame.category == ALL] { "All" }
                        @for category in &state.categories {
                            option value=(category) selected[&frame.category == category] {
                                (category)
                            }
                        }
                    }
                    input #apply-filter type="submit" value="Apply";
                }
                form.toggles action="/" method="post" {
                    button #toggle-reading .toggle .active[frame.reading_toggle] type="submit" name="action" value="ToggleReading" {
                        (reading_label)
                    }
                    button #toggle-meaning .toggle .active[frame.meaning_toggle] type="submit" name="action" value="ToggleMeaning" {
                        (meaning_label)
                    }
                }
            }
            div #card-area {
                (card)
            }
            form.controls action="/" method="post" {
                input #prev type="submit" name="action" value="Prev";
                input #shuffle type="submit" name="action" value="Shuffle";
                input #reset type="submit" name="action" value="Reset";
                input #next type="submit" name="action" value="Next";
            }
            p.hint {
                "← → to move, hold Space or press and hold the card to peek."
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}
