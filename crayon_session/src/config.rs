// Copyright 2025 the Crayon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// File names used by a [`crate::Session`].
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory, under the cache directory, that holds the history file.
    pub history_dir_name: String,
    /// Name of the history file inside `history_dir_name`.
    pub history_file: String,
    /// Marker file, under the cache directory, present while a session runs.
    pub session_flag: String,
    /// Prefix of exported picture names, as in `<prefix>_20250101_120000.png`.
    pub export_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_dir_name: "art_history".into(),
            history_file: "history.json".into(),
            session_flag: "session_active".into(),
            export_prefix: "ArtAttack".into(),
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from JSON, filling in missing fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
