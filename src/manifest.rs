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

use std::fs::create_dir_all;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::LevelConfig;
use crate::config::ManifestConfig;
use crate::error::Fallible;
use crate::error::fail;

/// One chapter page in a level's manifest.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Chapter {
    pub title: String,
    /// Path relative to the site root.
    pub path: String,
    pub available: bool,
}

/// Lists chapters `1..=level.max` and whether their pages exist under `root`.
pub fn build_level(root: &Path, level: &LevelConfig, label: &str) -> Vec<Chapter> {
    (1..=level.max)
        .map(|i| {
            let num = format!("{i:02}");
            let path = format!("{}/ch{num}.html", level.name);
            let available = root.join(&path).is_file();
            Chapter {
                title: format!("{} - {label} {num}", level.name.to_uppercase()),
                path,
                available,
            }
        })
        .collect()
}

/// Writes `chapters-<level>.json` under `root` for every configured level and
/// returns the written paths.
pub fn generate(root: &Path, config: &ManifestConfig) -> Fallible<Vec<PathBuf>> {
    if !root.is_dir() {
        return fail("directory does not exist.");
    }
    let mut written = Vec::new();
    for level in &config.levels {
        if level.name.is_empty() {
            return fail("level names cannot be empty.");
        }
        create_dir_all(root.join(&level.name))?;
        let chapters = build_level(root, level, &config.label);
        let available = chapters.iter().filter(|c| c.available).count();
        let out = root.join(format!("chapters-{}.json", level.name));
        write(&out, serde_json::to_string_pretty(&chapters)?)?;
        log::info!(
            "Generated {} ({available}/{} chapters available)",
            out.display(),
            chapters.len()
        );
        written.push(out);
    }
    Ok(written)
}
