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

//! Lanes that decode asset files on the CPU.

mod heightmap_loader_lane;
mod obj_loader_lane;
mod texture_loader_lane;

pub use heightmap_loader_lane::*;
pub use obj_loader_lane::*;
pub use texture_loader_lane::*;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or decoding an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read.
    #[error("failed to read asset '{path}'")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The OBJ parser rejected the file.
    #[error("invalid OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),
    /// The image decoder rejected the file.
    #[error("invalid image data: {0}")]
    Image(#[from] image::ImageError),
    /// The file decoded but holds nothing usable.
    #[error("{0}")]
    Invalid(String),
}

/// A lane that parses the bytes of one asset file into an asset of type `A`.
///
/// Loaders are shared between the startup worker threads, so they must be
/// `Send + Sync` and must not keep per-call state.
pub trait AssetLoaderLane<A>: Send + Sync {
    /// Parses a byte slice into an asset.
    fn load(&self, bytes: &[u8]) -> Result<A, AssetError>;

    /// Reads a file and parses it.
    fn load_file(&self, path: &Path) -> Result<A, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Decoding '{}' ({} bytes)", path.display(), bytes.len());
        self.load(&bytes)
    }
}
