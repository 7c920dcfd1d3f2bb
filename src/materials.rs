//! Named material presets.

use glam::Vec3;

/// How a surface responds to the scene light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub ambient_color: Vec3,
    pub shininess: f32,
    pub ambient_strength: f32,
}

impl Material {
    pub const GLASS: Material = Material {
        diffuse_color: Vec3::new(0.10, 0.10, 0.10),
        specular_color: Vec3::new(0.90, 0.90, 0.90),
        ambient_color: Vec3::new(0.60, 0.60, 0.60),
        shininess: 128.0,
        ambient_strength: 40.0,
    };

    pub const PLASTIC: Material = Material {
        diffuse_color: Vec3::new(0.2, 0.2, 0.2),
        specular_color: Vec3::new(0.5, 0.5, 0.5),
        ambient_color: Vec3::new(0.15, 0.15, 0.15),
        shininess: 80.0,
        ambient_strength: 1.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialEntry {
    pub tag: String,
    pub material: Material,
}

/// Materials in definition order. Lookups return the first entry with a matching tag.
#[derive(Debug, Default)]
pub struct MaterialTable {
    entries: Vec<MaterialEntry>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines the presets the desk scene uses. Does nothing if the table is already populated.
    pub fn define_defaults(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Materials already defined, skipping");
            return;
        }
        self.define("glass", Material::GLASS);
        self.define("plastic", Material::PLASTIC);
    }

    pub fn define(&mut self, tag: &str, material: Material) {
        self.entries.push(MaterialEntry {
            tag: tag.to_owned(),
            material,
        });
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.material)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
