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

use maud::Markup;
use maud::html;
use serde_json::Value;

use crate::error::Fallible;
use crate::session::frame::Frame;

/// Turns a frame into something a rendering surface can show.
pub trait Presenter {
    type Output;

    fn present(&self, frame: &Frame) -> Fallible<Self::Output>;
}

/// Renders the card as HTML.
pub struct HtmlPresenter;

impl Presenter for HtmlPresenter {
    type Output = Markup;

    fn present(&self, frame: &Frame) -> Fallible<Markup> {
        let markup = match &frame.entry {
            None => html! {
                div.card .empty {
                    div.header {
                        span.category { (frame.category) }
                        span.progress { (frame.position) }
                    }
                    p.empty-message { "No words in this category." }
                }
            },
            Some(entry) => html! {
                div.card {
                    div.header {
                        span #category .category { (entry.category()) }
                        span #progress .progress { (frame.position) }
                    }
                    div #term .term { (entry.term()) }
                    div #reading .reading .hidden[!frame.show_reading] { (entry.reading()) }
                    div #meaning .meaning .hidden[!frame.show_meaning] { (entry.meaning()) }
                }
            },
        };
        Ok(markup)
    }
}

/// Renders the frame as JSON for the browser script.
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    type Output = Value;

    fn present(&self, frame: &Frame) -> Fallible<Value> {
        Ok(serde_json::to_value(frame)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::frame::position_label;
    use crate::types::entry::VocabEntry;

    fn frame(show_reading: bool, show_meaning: bool) -> Frame {
        Frame {
            entry: Some(VocabEntry::new("雨", "あめ", "비", "noun")),
            show_reading,
            show_meaning,
            reading_toggle: show_reading,
            meaning_toggle: show_meaning,
            peeking: false,
            category: "all".to_string(),
            position: position_label(1, 4),
        }
    }

    #[test]
    fn test_html_visible() -> Fallible<()> {
        let html = HtmlPresenter.present(&frame(true, true))?.into_string();
        assert!(html.contains("雨"));
        assert!(html.contains("あめ"));
        assert!(html.contains("2 / 4"));
        assert!(!html.contains("hidden"));
        Ok(())
    }

    #[test]
    fn test_html_hidden_meaning() -> Fallible<()> {
        let html = HtmlPresenter.present(&frame(true, false))?.into_string();
        assert!(html.contains(r#"class="meaning hidden""#));
        assert!(!html.contains("reading hidden"));
        Ok(())
    }

    #[test]
    fn test_html_empty() -> Fallible<()> {
        let empty = Frame {
            entry: None,
            position: position_label(0, 0),
            category: "adjective".to_string(),
            ..frame(true, true)
        };
        let html = HtmlPresenter.present(&empty)?.into_string();
        assert!(html.contains("No words in this category."));
        assert!(html.contains("0 / 0"));
        Ok(())
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let value = JsonPresenter.present(&frame(false, true))?;
        assert_eq!(value["entry"]["term"], "雨");
        assert_eq!(value["showReading"], false);
        assert_eq!(value["meaningToggle"], true);
        assert_eq!(value["position"], "2 / 4");
        Ok(())
    }
}
