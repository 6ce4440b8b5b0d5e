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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::time::sleep;

use crate::db::DATABASE_FILE;
use crate::db::Database;
use crate::deck::Deck;
use crate::drill::api::frame_handler;
use crate::drill::api::key_handler;
use crate::drill::api::pointer_handler;
use crate::drill::get::get_handler;
use crate::drill::post::post_handler;
use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::input::gesture::GestureRecognizer;
use crate::input::keys::KeyAdapter;
use crate::session::FlashcardSession;

pub struct ServerOptions {
    pub deck_path: PathBuf,
    /// Key the session state is saved under. Defaults to the deck name.
    pub key: Option<String>,
    /// Defaults to `kanjicards.db` beside the deck.
    pub database_path: Option<PathBuf>,
    pub port: u16,
    pub cooldown_ms: u64,
    pub open_browser: bool,
}

pub async fn start_server(options: ServerOptions) -> Fallible<()> {
    let deck = Deck::load(&options.deck_path)?;
    deck.validate()?;

    let db_path: PathBuf = match options.database_path {
        Some(path) => path,
        None => match options.deck_path.parent() {
            Some(parent) => parent.join(DATABASE_FILE),
            None => PathBuf::from(DATABASE_FILE),
        },
    };
    log::debug!("Using state database {}", db_path.display());
    let db = Database::new(&db_path)?;

    let key: String = options.key.unwrap_or_else(|| deck.name().to_string());
    let updated_at = db.updated_at(&key)?;
    let session = FlashcardSession::new(deck, db, key, options.cooldown_ms);
    if let Some(updated_at) = updated_at {
        log::info!(
            "Resuming '{}' (last saved {updated_at:?}).",
            session.key()
        );
    }
    let categories: Vec<String> = session
        .deck()
        .categories()
        .into_iter()
        .map(String::from)
        .collect();

    let state = ServerState {
        port: options.port,
        categories,
        mutable: Arc::new(Mutex::new(MutableState {
            session,
            gestures: GestureRecognizer::new(),
            keys: KeyAdapter,
        })),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler).post(post_handler));
    let app = app.route("/api/frame", get(frame_handler));
    let app = app.route("/api/key", post(key_handler));
    let app = app.route("/api/pointer", post(pointer_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("0.0.0.0:{}", state.port);

    // Open the browser once the server is accepting connections.
    if options.open_browser {
        let bind = bind.clone();
        let url = format!("http://{bind}/");
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(bind.as_str()).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind.as_str()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {e}");
    }
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
