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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

/// Name of the optional configuration file, looked up in the deck directory
/// or the manifest root.
pub const CONFIG_FILE: &str = "kanjicards.toml";

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_COOLDOWN_MS: u64 = 250;
pub const DEFAULT_CHAPTER_COUNT: u32 = 10;
pub const DEFAULT_CHAPTER_LABEL: &str = "챕터";

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub drill: DrillConfig,
    pub manifest: ManifestConfig,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct DrillConfig {
    /// Port the drill server listens on.
    pub port: u16,
    /// Minimum interval between accepted navigation commands.
    pub cooldown_ms: u64,
    /// Whether to open a browser tab once the server is up.
    pub open_browser: bool,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            open_browser: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    /// The word placed between the level and the chapter number in titles.
    pub label: String,
    pub levels: Vec<LevelConfig>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_CHAPTER_LABEL.to_string(),
            levels: vec![
                LevelConfig::new("n2", DEFAULT_CHAPTER_COUNT),
                LevelConfig::new("n3", DEFAULT_CHAPTER_COUNT),
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub name: String,
    #[serde(default = "default_chapter_count")]
    pub max: u32,
}

impl LevelConfig {
    pub fn new(name: impl Into<String>, max: u32) -> Self {
        Self {
            name: name.into(),
            max,
        }
    }
}

fn default_chapter_count() -> u32 {
    DEFAULT_CHAPTER_COUNT
}

impl Config {
    /// Reads `kanjicards.toml` from `directory`, or returns the defaults if
    /// there is no such file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults.", directory.display());
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("Loaded configuration from {}.", path.display());
        Ok(config)
    }
}
