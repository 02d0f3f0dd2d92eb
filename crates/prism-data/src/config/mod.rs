// Copyright 2025 eraflo
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

//! JSON configuration documents read once at startup.
//!
//! Every document keeps the field spelling of the files shipped with the demo
//! and implements [`JsonDocument`] for loading and saving.

mod camera;
mod light;
mod records;
mod scene;
mod settings;

pub use camera::*;
pub use light::*;
pub use records::*;
pub use scene::*;
pub use settings::*;

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened, read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but does not match the document layout.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        /// The offending path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// An in-memory document could not be (de)serialized.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load and save helpers shared by all configuration documents.
pub trait JsonDocument: Serialize + DeserializeOwned + Sized {
    /// Parses the document from a JSON string.
    fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses the document from a file.
    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes the document as pretty-printed JSON.
    fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to a file, replacing any previous content.
    fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_json_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the document, falling back to `Default` when it is missing or invalid.
    ///
    /// The failure is logged as a warning; configuration problems never abort startup.
    fn load_or_default(path: impl AsRef<Path>) -> Self
    where
        Self: Default,
    {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(document) => {
                log::info!("Loaded configuration '{}'", path.display());
                document
            }
            Err(e) => {
                log::warn!("{e}; using built-in defaults");
                Self::default()
            }
        }
    }
}
