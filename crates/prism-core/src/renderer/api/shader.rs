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

//! Defines shader modules and shader stage visibility.

use std::borrow::Cow;

/// An opaque handle to a compiled shader module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderModuleId(pub usize);

/// A descriptor used to create a [`ShaderModuleId`] from WGSL source.
#[derive(Debug, Clone)]
pub struct ShaderModuleDescriptor<'a> {
    /// A label used in logs and compiler diagnostics.
    pub label: &'a str,
    /// The WGSL source text.
    pub source: Cow<'a, str>,
}

prism_flags! {
    /// Which shader stages can see a binding.
    pub struct ShaderStageFlags: u32 {
        /// Vertex shader stage.
        const VERTEX = 1 << 0;
        /// Fragment shader stage.
        const FRAGMENT = 1 << 1;
        /// Vertex and fragment stages.
        const VERTEX_FRAGMENT = (1 << 0) | (1 << 1);
    }
}
