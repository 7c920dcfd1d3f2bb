//! Per-draw shader state.
//!
//! [`RenderContext`] bundles the shader program with the texture registry and material table
//! so that placing, coloring and texturing an object is a handful of calls before each draw.

use glam::{Vec2, Vec3, Vec4};

use crate::{
    abs::UniformSink,
    camera::Camera,
    error::SceneError,
    materials::MaterialTable,
    textures::TextureRegistry,
    transform::{TransformParams, compose},
};

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const VIEW_POSITION: &str = "viewPosition";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";
pub const MATERIAL_AMBIENT: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";

/// Size of the `pointLights` array in the scene shader.
pub const MAX_POINT_LIGHTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub active: bool,
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// Everything a draw step needs to push its state into the shader.
pub struct RenderContext<'a> {
    shader: &'a mut dyn UniformSink,
    textures: &'a TextureRegistry,
    materials: &'a MaterialTable,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        shader: &'a mut dyn UniformSink,
        textures: &'a TextureRegistry,
        materials: &'a MaterialTable,
    ) -> Self {
        Self {
            shader,
            textures,
            materials,
        }
    }

    /// Composes the model matrix and uploads it.
    pub fn set_transformations(&mut self, params: &TransformParams) {
        self.shader.set(MODEL, compose(params));
    }

    /// Switches to flat color for the next draw.
    pub fn set_color(&mut self, color: Vec4) {
        self.shader.set(USE_TEXTURE, false);
        self.shader.set(OBJECT_COLOR, color);
    }

    /// Switches to sampling the texture tagged `tag` for the next draw.
    ///
    /// An unknown tag leaves the shader untouched.
    pub fn set_texture(&mut self, tag: &str) -> Result<(), SceneError> {
        let Some(slot) = self.textures.find_slot(tag) else {
            log::warn!("No texture tagged {tag:?}");
            return Err(SceneError::UnknownTexture(tag.to_owned()));
        };
        self.shader.set(USE_TEXTURE, true);
        self.shader.set(OBJECT_TEXTURE, slot as i32);
        Ok(())
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.shader.set(UV_SCALE, Vec2::new(u, v));
    }

    /// Pushes every field of the material tagged `tag`.
    ///
    /// An unknown tag leaves the previous material in effect.
    pub fn set_material(&mut self, tag: &str) -> Result<(), SceneError> {
        let Some(material) = self.materials.find(tag) else {
            log::warn!("No material tagged {tag:?}, keeping the previous one");
            return Err(SceneError::UnknownMaterial(tag.to_owned()));
        };
        self.shader.set(MATERIAL_DIFFUSE, material.diffuse_color);
        self.shader.set(MATERIAL_SPECULAR, material.specular_color);
        self.shader.set(MATERIAL_SHININESS, material.shininess);
        self.shader.set(MATERIAL_AMBIENT, material.ambient_color);
        self.shader
            .set(MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
        Ok(())
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        self.shader.set(USE_LIGHTING, enabled);
    }

    pub fn set_point_light(&mut self, index: usize, light: &PointLight) {
        debug_assert!(index < MAX_POINT_LIGHTS);
        let field = |name: &str| format!("pointLights[{index}].{name}");
        self.shader.set(&field("bActive"), light.active);
        self.shader.set(&field("position"), light.position);
        self.shader.set(&field("ambient"), light.ambient);
        self.shader.set(&field("diffuse"), light.diffuse);
        self.shader.set(&field("specular"), light.specular);
    }

    pub fn set_camera(&mut self, camera: &Camera, aspect_ratio: f32) {
        self.shader.set(VIEW, camera.view());
        self.shader
            .set(PROJECTION, camera.projection_matrix(aspect_ratio));
        self.shader.set(VIEW_POSITION, camera.position);
    }
}

#[cfg(test)]
mod tests {
    use std::{num::NonZero, path::Path};

    use glam::Mat4;

    use super::*;
    use crate::{
        abs::{TextureHandle, UniformValue},
        materials::Material,
        textures::{PixelData, TextureBackend},
    };

    #[derive(Default)]
    struct Recorder(Vec<(String, UniformValue)>);

    impl Recorder {
        fn last(&self, name: &str) -> Option<UniformValue> {
            self.0
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| *v)
        }
    }

    impl UniformSink for Recorder {
        fn set_value(&mut self, name: &str, value: UniformValue) {
            self.0.push((name.to_owned(), value));
        }
    }

    struct CountingBackend(u32);

    impl TextureBackend for CountingBackend {
        fn upload(&mut self, pixels: &PixelData) -> Result<TextureHandle, SceneError> {
            self.0 += 1;
            let id = NonZero::new(self.0).ok_or_else(|| SceneError::Gpu("zero".into()))?;
            Ok(TextureHandle::new(id, pixels.width, pixels.height))
        }

        fn bind(&mut self, _unit: u32, _handle: TextureHandle) {}

        fn release(&mut self, _handle: TextureHandle) {}
    }

    fn registry_with(name: &str, tags: &[&str]) -> TextureRegistry {
        let dir = std::env::temp_dir().join(format!(
            "deskscene-render-{}-{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tile.png");
        image::RgbImage::new(2, 2).save(&path).unwrap();

        let mut backend = CountingBackend(0);
        let mut registry = TextureRegistry::new();
        for tag in tags {
            registry
                .load_texture(&mut backend, Path::new(&path), tag)
                .unwrap();
        }
        registry
    }

    #[test]
    fn color_after_texture_disables_texturing() {
        let textures = registry_with("color_after_texture", &["wood", "keyboard"]);
        let materials = MaterialTable::new();
        let mut recorder = Recorder::default();
        let mut ctx = RenderContext::new(&mut recorder, &textures, &materials);

        ctx.set_texture("keyboard").unwrap();
        ctx.set_color(Vec4::new(1.0, 0.0, 0.0, 1.0));

        assert_eq!(recorder.last(USE_TEXTURE), Some(UniformValue::Bool(false)));
        assert_eq!(
            recorder.last(OBJECT_COLOR),
            Some(UniformValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 1.0)))
        );
        assert_eq!(recorder.last(OBJECT_TEXTURE), Some(UniformValue::Int(1)));
    }

    #[test]
    fn unknown_texture_leaves_the_shader_untouched() {
        let textures = registry_with("unknown_texture", &["wood"]);
        let materials = MaterialTable::new();
        let mut recorder = Recorder::default();
        let mut ctx = RenderContext::new(&mut recorder, &textures, &materials);

        let err = ctx.set_texture("marble").unwrap_err();

        assert!(matches!(err, SceneError::UnknownTexture(tag) if tag == "marble"));
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn material_pushes_all_fields() {
        let textures = TextureRegistry::new();
        let mut materials = MaterialTable::new();
        materials.define_defaults();
        let mut recorder = Recorder::default();
        let mut ctx = RenderContext::new(&mut recorder, &textures, &materials);

        ctx.set_material("glass").unwrap();

        let glass = Material::GLASS;
        assert_eq!(
            recorder.0,
            vec![
                (MATERIAL_DIFFUSE.to_owned(), UniformValue::Vec3(glass.diffuse_color)),
                (MATERIAL_SPECULAR.to_owned(), UniformValue::Vec3(glass.specular_color)),
                (MATERIAL_SHININESS.to_owned(), UniformValue::Float(glass.shininess)),
                (MATERIAL_AMBIENT.to_owned(), UniformValue::Vec3(glass.ambient_color)),
                (
                    MATERIAL_AMBIENT_STRENGTH.to_owned(),
                    UniformValue::Float(glass.ambient_strength)
                ),
            ]
        );
    }

    #[test]
    fn unknown_material_is_reported() {
        let textures = TextureRegistry::new();
        let mut materials = MaterialTable::new();
        materials.define_defaults();
        let mut recorder = Recorder::default();
        let mut ctx = RenderContext::new(&mut recorder, &textures, &materials);

        assert!(matches!(
            ctx.set_material("chrome"),
            Err(SceneError::UnknownMaterial(_))
        ));
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn transformations_go_to_the_model_uniform() {
        let textures = TextureRegistry::new();
        let materials = MaterialTable::new();
        let mut recorder = Recorder::default();
        let mut ctx = RenderContext::new(&mut recorder, &textures, &materials);

        ctx.set_transformations(&TransformParams::default());

        assert_eq!(recorder.0, vec![(MODEL.to_owned(), UniformValue::Mat4(Mat4::IDENTITY))]);
    }

    #[test]
    fn point_light_fields_are_indexed() {
        let textures = TextureRegistry::new();
        let materials = MaterialTable::new();
        let mut recorder = Recorder::default();
        let mut ctx = RenderContext::new(&mut recorder, &textures, &materials);

        ctx.set_point_light(
            2,
            &PointLight {
                active: true,
                position: Vec3::ONE,
                ambient: Vec3::ZERO,
                diffuse: Vec3::ZERO,
                specular: Vec3::ZERO,
            },
        );

        let names: Vec<_> = recorder.0.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "pointLights[2].bActive",
                "pointLights[2].position",
                "pointLights[2].ambient",
                "pointLights[2].diffuse",
                "pointLights[2].specular",
            ]
        );
    }
}
