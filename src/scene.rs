//! The desk scene: a monitor, keyboard, mouse, mug with pencils and a row of books on a wooden
//! desk, lit by a single point light.

use std::path::Path;

use glam::{Vec3, Vec4};

use crate::{
    abs::UniformSink,
    error::SceneError,
    materials::MaterialTable,
    render::{PointLight, RenderContext},
    shapes::{MeshLibrary, ShapeKind},
    textures::{TextureBackend, TextureRegistry},
    transform::TransformParams,
};

/// `(file name, tag)` pairs loaded from the texture directory, in texture unit order.
pub const SCENE_TEXTURES: [(&str, &str); 4] = [
    ("wood.jpg", "wood"),
    ("keyboard.jpg", "keyboard"),
    ("notebook.jpg", "notebook"),
    ("mug.jpg", "mug"),
];

/// Index of the light in the shader's `pointLights` array.
pub const SUN_LIGHT_INDEX: usize = 2;

/// Sits above the top left of the monitor to fake sunlight.
pub const SUN_LIGHT: PointLight = PointLight {
    active: true,
    position: Vec3::new(-1.20, 1.00, -1.20),
    ambient: Vec3::new(0.32, 0.30, 0.22),
    diffuse: Vec3::new(3.00, 2.80, 2.50),
    specular: Vec3::new(3.50, 3.40, 3.10),
};

/// One object of the scene.
///
/// Color and texture are applied in that order, so a step with both ends up textured. A step
/// with neither keeps whatever the previous step left in the shader.
#[derive(Clone, Copy, Debug)]
pub struct SceneStep {
    pub name: &'static str,
    pub shape: ShapeKind,
    pub transform: TransformParams,
    pub color: Option<Vec4>,
    pub texture: Option<&'static str>,
    pub material: Option<&'static str>,
}

impl SceneStep {
    const fn new(name: &'static str, shape: ShapeKind, transform: TransformParams) -> Self {
        Self {
            name,
            shape,
            transform,
            color: None,
            texture: None,
            material: None,
        }
    }

    const fn color(mut self, rgb: [f32; 3]) -> Self {
        self.color = Some(Vec4::new(rgb[0], rgb[1], rgb[2], 1.0));
        self
    }

    const fn texture(mut self, tag: &'static str) -> Self {
        self.texture = Some(tag);
        self
    }

    const fn material(mut self, tag: &'static str) -> Self {
        self.material = Some(tag);
        self
    }
}

const fn at(scale: [f32; 3], position: [f32; 3]) -> TransformParams {
    TransformParams::new(
        Vec3::new(scale[0], scale[1], scale[2]),
        Vec3::new(position[0], position[1], position[2]),
    )
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const MUG_GRAY: [f32; 3] = [0.5, 0.5, 0.5];
const PENCIL_BODY: [f32; 3] = [0.0, 0.0, 0.0];
const PENCIL_TIP: [f32; 3] = [0.30, 0.20, 0.15];
const PAPER: [f32; 3] = [0.85, 0.85, 0.85];

/// The fixed draw sequence, in draw order.
pub const DESK_SCRIPT: &[SceneStep] = &[
    SceneStep::new("desk", ShapeKind::Plane, at([20.0, 1.0, 10.0], [0.0, 0.0, 0.0]))
        .color([0.96, 0.87, 0.70])
        .texture("wood"),
    // Monitor
    SceneStep::new("monitor base", ShapeKind::Cylinder, at([0.70, 0.05, 0.70], [0.0, 0.025, -1.0]))
        .color(WHITE),
    SceneStep::new("monitor stand", ShapeKind::Cylinder, at([0.10, 0.25, 0.10], [0.0, 0.175, -1.0]))
        .color(WHITE),
    SceneStep::new("monitor bezel", ShapeKind::Box, at([1.80, 0.50, 0.06], [0.0, 0.55, -1.0]))
        .color([0.02, 0.02, 0.03])
        .material("glass"),
    SceneStep::new("monitor screen", ShapeKind::Box, at([1.74, 0.45, 0.03], [0.0, 0.550, -0.98]))
        .color(WHITE)
        .material("glass"),
    // Keyboard
    SceneStep::new("keyboard", ShapeKind::Box, at([1.6, 0.05, 0.45], [0.0, 0.025, 0.30]))
        .texture("keyboard"),
    // Mouse
    SceneStep::new("mouse base", ShapeKind::Box, at([0.22, 0.05, 0.30], [1.05, 0.025, 0.35]))
        .color(WHITE)
        .material("plastic"),
    SceneStep::new("mouse hump", ShapeKind::Cone, at([0.15, 0.10, 0.15], [1.05, 0.100, 0.35]))
        .material("plastic"),
    // Mug
    SceneStep::new("mug body", ShapeKind::Cylinder, at([0.20, 0.35, 0.20], [1.8, 0.175, -0.6]))
        .color(MUG_GRAY),
    SceneStep::new("mug rim", ShapeKind::Cylinder, at([0.215, 0.015, 0.215], [1.80, 0.3575, -0.6]))
        .color(MUG_GRAY),
    SceneStep::new(
        "mug handle",
        ShapeKind::Torus,
        at([0.13, 0.035, 0.13], [2.02, 0.355, -0.60]).rotated(180.0, 0.0, 0.0)
    )
    .color(MUG_GRAY),
    // Pencils standing in the mug
    SceneStep::new(
        "pencil 1",
        ShapeKind::Cylinder,
        at([0.03, 0.5, 0.03], [1.77, 0.18, -0.62]).rotated(0.0, 10.0, 0.0)
    )
    .color(PENCIL_BODY),
    SceneStep::new(
        "pencil 1 tip",
        ShapeKind::Cone,
        at([0.03, 0.4, 0.03], [1.77, 0.42, -0.62]).rotated(0.0, 10.0, 0.0)
    )
    .color(PENCIL_TIP),
    SceneStep::new(
        "pencil 2",
        ShapeKind::Cylinder,
        at([0.03, 0.5, 0.03], [1.835, 0.175, -0.585]).rotated(0.0, -8.0, 0.0)
    )
    .color(PENCIL_BODY),
    SceneStep::new(
        "pencil 2 tip",
        ShapeKind::Cone,
        at([0.03, 0.4, 0.03], [1.83, 0.425, -0.585]).rotated(0.0, -8.0, 0.0)
    )
    .color(PENCIL_TIP),
    SceneStep::new(
        "pencil 3",
        ShapeKind::Cylinder,
        at([0.03, 0.4, 0.03], [1.75, 0.178, -0.555]).rotated(0.0, 4.0, 0.0)
    )
    .color(PENCIL_BODY),
    SceneStep::new(
        "pencil 3 tip",
        ShapeKind::Cone,
        at([0.03, 0.5, 0.03], [1.75, 0.428, -0.555]).rotated(0.0, 4.0, 0.0)
    )
    .color(PENCIL_TIP),
    // Books
    SceneStep::new("book 1", ShapeKind::Box, at([0.40, 0.07, 0.60], [-2.60, 0.035, -0.20]))
        .color(PAPER),
    SceneStep::new(
        "book 2",
        ShapeKind::Box,
        at([0.42, 0.08, 0.58], [-2.10, 0.04, -0.18]).rotated(0.0, 2.5, 0.0)
    )
    .color(PAPER),
    SceneStep::new(
        "book 3",
        ShapeKind::Box,
        at([0.38, 0.06, 0.62], [-1.7, 0.03, -0.22]).rotated(0.0, -6.0, 0.0)
    )
    .color(PAPER),
];

/// Owns the textures and materials of the desk scene and knows how to draw it.
#[derive(Debug, Default)]
pub struct DeskScene {
    textures: TextureRegistry,
    materials: MaterialTable,
}

impl DeskScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines materials, loads and binds the textures found in `texture_dir` and loads every
    /// mesh kind once.
    ///
    /// Missing textures are logged and skipped. Only a mesh upload failure is returned.
    pub fn prepare(
        &mut self,
        texture_backend: &mut impl TextureBackend,
        meshes: &mut impl MeshLibrary,
        texture_dir: &Path,
    ) -> Result<(), SceneError> {
        self.materials.define_defaults();

        if self.textures.is_empty() {
            let loaded = self
                .textures
                .load_all(texture_backend, texture_dir, &SCENE_TEXTURES);
            log::info!(
                "Loaded {loaded} of {} textures from {}",
                SCENE_TEXTURES.len(),
                texture_dir.display()
            );
        } else {
            log::debug!("Textures already loaded, rebinding");
        }
        self.textures.bind_all(texture_backend);

        for kind in ShapeKind::ALL {
            meshes.load(kind)?;
        }
        Ok(())
    }

    /// Lights the scene and draws every step of [`DESK_SCRIPT`].
    ///
    /// The caller binds the shader program and sets the camera uniforms beforehand.
    pub fn render_frame(&self, shader: &mut dyn UniformSink, meshes: &impl MeshLibrary) {
        let mut ctx = self.context(shader);
        ctx.set_lighting(true);
        ctx.set_point_light(SUN_LIGHT_INDEX, &SUN_LIGHT);
        ctx.set_uv_scale(1.0, 1.0);

        for step in DESK_SCRIPT {
            ctx.set_transformations(&step.transform);
            if let Some(color) = step.color {
                ctx.set_color(color);
            }
            if let Some(tag) = step.texture {
                skip_unresolved(step, ctx.set_texture(tag));
            }
            if let Some(tag) = step.material {
                skip_unresolved(step, ctx.set_material(tag));
            }
            meshes.draw(step.shape);
        }
    }

    /// A render context over this scene's textures and materials.
    pub fn context<'a>(&'a self, shader: &'a mut dyn UniformSink) -> RenderContext<'a> {
        RenderContext::new(shader, &self.textures, &self.materials)
    }

    /// Releases every texture.
    pub fn destroy(&mut self, texture_backend: &mut impl TextureBackend) {
        self.textures.destroy(texture_backend);
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }
}

/// The setter already warned, the step is drawn with the state it has.
fn skip_unresolved(step: &SceneStep, result: Result<(), SceneError>) {
    if let Err(err) = result {
        log::debug!("Drawing {} without its state: {err}", step.name);
    }
}
