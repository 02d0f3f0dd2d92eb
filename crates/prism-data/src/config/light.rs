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

use super::{JsonDocument, RgbaRecord, Vec3Record};
use serde::{Deserialize, Serialize};

/// A material colour paired with the matching light colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightTerm {
    /// Surface reflectance for this term.
    pub material: RgbaRecord,
    /// Light intensity for this term.
    pub light: RgbaRecord,
}

/// The specular term, which also carries the shininess exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecularTerm {
    /// Surface reflectance.
    pub material: RgbaRecord,
    /// Light intensity.
    pub light: RgbaRecord,
    /// Specular exponent.
    pub power: f32,
}

/// The "Light Variables" document: one directional light and its material terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDocument {
    /// Direction from the surface towards the light.
    #[serde(rename = "lightDirection")]
    pub light_direction: Vec3Record,
    /// Diffuse term.
    pub diffuse: LightTerm,
    /// Ambient term.
    pub ambient: LightTerm,
    /// Specular term.
    pub specular: SpecularTerm,
}

impl JsonDocument for LightDocument {}

impl Default for LightDocument {
    fn default() -> Self {
        Self {
            light_direction: Vec3Record::new(0.0, 0.5, 1.0),
            diffuse: LightTerm {
                material: RgbaRecord::new(1.0, 1.0, 1.0, 1.0),
                light: RgbaRecord::new(0.8, 0.8, 0.8, 1.0),
            },
            ambient: LightTerm {
                material: RgbaRecord::new(0.3, 0.3, 0.3, 1.0),
                light: RgbaRecord::new(0.4, 0.4, 0.4, 1.0),
            },
            specular: SpecularTerm {
                material: RgbaRecord::new(0.8, 0.8, 0.8, 1.0),
                light: RgbaRecord::new(0.5, 0.5, 0.5, 1.0),
                power: 10.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_document_parses_original_field_names() {
        let json = r#"{
            "lightDirection": { "x": 0.0, "y": 0.5, "z": -1.0 },
            "diffuse": {
                "material": { "r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0 },
                "light": { "r": 0.5, "g": 0.5, "b": 0.5, "a": 1.0 }
            },
            "ambient": {
                "material": { "r": 0.2, "g": 0.2, "b": 0.2, "a": 1.0 },
                "light": { "r": 0.1, "g": 0.1, "b": 0.1, "a": 1.0 }
            },
            "specular": {
                "material": { "r": 0.9, "g": 0.9, "b": 0.9, "a": 1.0 },
                "light": { "r": 0.4, "g": 0.4, "b": 0.4, "a": 1.0 },
                "power": 12.0
            }
        }"#;
        let doc = LightDocument::from_json_str(json).unwrap();
        assert_eq!(doc.light_direction, Vec3Record::new(0.0, 0.5, -1.0));
        assert_eq!(doc.diffuse.light.r, 0.5);
        assert_eq!(doc.ambient.material.g, 0.2);
        assert_eq!(doc.specular.power, 12.0);
    }

    #[test]
    fn test_light_document_missing_field_is_an_error() {
        let result = LightDocument::from_json_str(r#"{ "lightDirection": { "x": 0, "y": 0, "z": 0 } }"#);
        assert!(result.is_err());
    }
}
