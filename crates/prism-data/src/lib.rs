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

//! Data layouts of the Prism framework.
//!
//! This crate holds everything the frame loop reads but does not render by
//! itself: the JSON configuration documents, entity transforms and cameras,
//! CPU-side geometry and textures, and the path-keyed [`ResourceCache`] that
//! guarantees each asset is loaded at most once.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod geometry;
pub mod overlay;
pub mod scene;
pub mod texture;

pub use cache::ResourceCache;
pub use texture::CpuTexture;
