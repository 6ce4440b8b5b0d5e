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

use std::env::current_dir;
use std::path::PathBuf;

use clap::Parser;

use crate::check::check_decks;
use crate::config::Config;
use crate::config::DEFAULT_CHAPTER_COUNT;
use crate::config::LevelConfig;
use crate::config::ManifestConfig;
use crate::drill::server::ServerOptions;
use crate::drill::server::start_server;
use crate::error::Fallible;
use crate::manifest::generate;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill a word deck in the browser.
    Drill {
        /// Path to the deck file (`.json` or `.toml`).
        deck: String,
        /// Key to save the session state under. Defaults to the deck name.
        #[arg(long)]
        key: Option<String>,
        /// Port to serve on.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open a browser tab.
        #[arg(long)]
        no_open: bool,
    },
    /// Check that every deck in a directory is valid.
    Check {
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Generate chapter availability manifests.
    Manifest {
        /// Optional path to the site root.
        directory: Option<String>,
        /// Number of chapters to look for per level.
        #[arg(long)]
        max: Option<u32>,
        /// Level to generate a manifest for. May be repeated.
        #[arg(long = "level")]
        levels: Vec<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            deck,
            key,
            port,
            no_open,
        } => {
            let deck_path = PathBuf::from(deck);
            let directory: PathBuf = match deck_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => current_dir()?,
            };
            let config = Config::load(&directory)?.drill;
            let options = ServerOptions {
                deck_path,
                key,
                database_path: None,
                port: port.unwrap_or(config.port),
                cooldown_ms: config.cooldown_ms,
                open_browser: config.open_browser && !no_open,
            };
            start_server(options).await
        }
        Command::Check { directory } => {
            let directory: PathBuf = resolve_directory(directory)?;
            check_decks(&directory)
        }
        Command::Manifest {
            directory,
            max,
            levels,
        } => {
            let directory: PathBuf = resolve_directory(directory)?;
            let config = Config::load(&directory)?.manifest;
            let config = override_manifest(config, max, levels);
            for path in generate(&directory, &config)? {
                println!("Generated {}", path.display());
            }
            Ok(())
        }
    }
}

fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    Ok(match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    })
}

/// Applies command line overrides on top of the configured manifest.
fn override_manifest(
    mut config: ManifestConfig,
    max: Option<u32>,
    levels: Vec<String>,
) -> ManifestConfig {
    if !levels.is_empty() {
        config.levels = levels
            .into_iter()
            .map(|name| LevelConfig::new(name, DEFAULT_CHAPTER_COUNT))
            .collect();
    }
    if let Some(max) = max {
        for level in config.levels.iter_mut() {
            level.max = max;
        }
    }
    config
}
