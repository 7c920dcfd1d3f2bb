use std::{
    cell::RefCell,
    num::NonZero,
    path::{Path, PathBuf},
    rc::Rc,
};

use deskscene::{
    SceneError,
    abs::{TextureHandle, UniformSink, UniformValue},
    materials::Material,
    render,
    scene::{DESK_SCRIPT, DeskScene, SUN_LIGHT},
    shapes::{MeshLibrary, ShapeKind},
    textures::{PixelData, TextureBackend},
};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Uniform(String, UniformValue),
    Draw(ShapeKind),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct RecordingShader(Log);

impl UniformSink for RecordingShader {
    fn set_value(&mut self, name: &str, value: UniformValue) {
        self.0.borrow_mut().push(Event::Uniform(name.to_owned(), value));
    }
}

struct RecordingMeshes {
    log: Log,
    uploads: Vec<ShapeKind>,
}

impl MeshLibrary for RecordingMeshes {
    fn load(&mut self, kind: ShapeKind) -> Result<(), SceneError> {
        if !self.is_loaded(kind) {
            self.uploads.push(kind);
        }
        Ok(())
    }

    fn is_loaded(&self, kind: ShapeKind) -> bool {
        self.uploads.contains(&kind)
    }

    fn draw(&self, kind: ShapeKind) {
        self.log.borrow_mut().push(Event::Draw(kind));
    }
}

#[derive(Default)]
struct StubTextures {
    next_id: u32,
    bound: Vec<(u32, u32)>,
    released: Vec<u32>,
}

impl TextureBackend for StubTextures {
    fn upload(&mut self, pixels: &PixelData) -> Result<TextureHandle, SceneError> {
        self.next_id += 1;
        let id = NonZero::new(self.next_id).ok_or_else(|| SceneError::Gpu("zero".into()))?;
        Ok(TextureHandle::new(id, pixels.width, pixels.height))
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        self.bound.push((unit, handle.id()));
    }

    fn release(&mut self, handle: TextureHandle) {
        self.released.push(handle.id());
    }
}

fn texture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deskscene-it-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for file in ["wood.jpg", "keyboard.jpg", "notebook.jpg", "mug.jpg"] {
        image::RgbImage::from_pixel(8, 8, image::Rgb([120, 80, 40]))
            .save(dir.join(file))
            .unwrap();
    }
    dir
}

struct Harness {
    scene: DeskScene,
    textures: StubTextures,
    meshes: RecordingMeshes,
    log: Log,
}

impl Harness {
    fn prepared(dir: &Path) -> Self {
        let log: Log = Rc::default();
        let mut harness = Self {
            scene: DeskScene::new(),
            textures: StubTextures::default(),
            meshes: RecordingMeshes {
                log: Rc::clone(&log),
                uploads: Vec::new(),
            },
            log,
        };
        harness
            .scene
            .prepare(&mut harness.textures, &mut harness.meshes, dir)
            .unwrap();
        harness
    }

    fn render(&self) -> Vec<Event> {
        self.log.borrow_mut().clear();
        let mut shader = RecordingShader(Rc::clone(&self.log));
        self.scene.render_frame(&mut shader, &self.meshes);
        self.log.borrow().clone()
    }
}

fn draws(events: &[Event]) -> Vec<ShapeKind> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Draw(kind) => Some(*kind),
            Event::Uniform(..) => None,
        })
        .collect()
}

/// Last value written to `name` before the `n`th draw.
fn state_at_draw(events: &[Event], n: usize, name: &str) -> Option<UniformValue> {
    let draw_pos = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, Event::Draw(_)))
        .nth(n)
        .map(|(i, _)| i)?;
    events[..draw_pos].iter().rev().find_map(|event| match event {
        Event::Uniform(uniform, value) if uniform == name => Some(*value),
        _ => None,
    })
}

fn draw_index(name: &str) -> usize {
    DESK_SCRIPT
        .iter()
        .position(|step| step.name == name)
        .unwrap()
}

#[test]
fn frame_draws_the_desk_in_order() {
    use ShapeKind::*;

    let harness = Harness::prepared(&texture_dir("order"));
    let events = harness.render();

    assert_eq!(
        draws(&events),
        vec![
            Plane, // desk
            Cylinder, Cylinder, Box, Box, // monitor
            Box,  // keyboard
            Box, Cone, // mouse
            Cylinder, Cylinder, Torus, // mug
            Cylinder, Cone, Cylinder, Cone, Cylinder, Cone, // pencils
            Box, Box, Box, // books
        ]
    );
}

#[test]
fn prepare_loads_each_shape_once() {
    let dir = texture_dir("prepare_twice");
    let mut harness = Harness::prepared(&dir);
    harness
        .scene
        .prepare(&mut harness.textures, &mut harness.meshes, &dir)
        .unwrap();

    assert_eq!(harness.meshes.uploads.len(), 6);
    for kind in ShapeKind::ALL {
        assert!(harness.meshes.is_loaded(kind));
    }
    assert_eq!(harness.scene.materials().len(), 2);
    assert_eq!(harness.scene.textures().len(), 4);
}

#[test]
fn textures_are_bound_in_load_order() {
    let harness = Harness::prepared(&texture_dir("bind"));

    assert_eq!(harness.scene.textures().len(), 4);
    assert_eq!(harness.textures.bound, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!(harness.scene.textures().find_slot("mug"), Some(3));
}

#[test]
fn lighting_is_configured_before_the_first_draw() {
    let harness = Harness::prepared(&texture_dir("lighting"));
    let events = harness.render();

    assert_eq!(
        state_at_draw(&events, 0, render::USE_LIGHTING),
        Some(UniformValue::Bool(true))
    );
    assert_eq!(
        state_at_draw(&events, 0, "pointLights[2].position"),
        Some(UniformValue::Vec3(SUN_LIGHT.position))
    );
    assert_eq!(
        state_at_draw(&events, 0, "pointLights[2].bActive"),
        Some(UniformValue::Bool(true))
    );
}

#[test]
fn textured_and_colored_steps_set_the_right_mode() {
    let harness = Harness::prepared(&texture_dir("modes"));
    let events = harness.render();

    let desk = draw_index("desk");
    assert_eq!(
        state_at_draw(&events, desk, render::USE_TEXTURE),
        Some(UniformValue::Bool(true))
    );
    assert_eq!(
        state_at_draw(&events, desk, render::OBJECT_TEXTURE),
        Some(UniformValue::Int(0))
    );

    let base = draw_index("monitor base");
    assert_eq!(
        state_at_draw(&events, base, render::USE_TEXTURE),
        Some(UniformValue::Bool(false))
    );

    let keyboard = draw_index("keyboard");
    assert_eq!(
        state_at_draw(&events, keyboard, render::USE_TEXTURE),
        Some(UniformValue::Bool(true))
    );
    assert_eq!(
        state_at_draw(&events, keyboard, render::OBJECT_TEXTURE),
        Some(UniformValue::Int(1))
    );

    let mouse = draw_index("mouse base");
    assert_eq!(
        state_at_draw(&events, mouse, render::USE_TEXTURE),
        Some(UniformValue::Bool(false))
    );
}

#[test]
fn materials_reach_the_shader() {
    let harness = Harness::prepared(&texture_dir("materials"));
    let events = harness.render();

    let bezel = draw_index("monitor bezel");
    assert_eq!(
        state_at_draw(&events, bezel, render::MATERIAL_SHININESS),
        Some(UniformValue::Float(Material::GLASS.shininess))
    );

    let hump = draw_index("mouse hump");
    assert_eq!(
        state_at_draw(&events, hump, render::MATERIAL_AMBIENT),
        Some(UniformValue::Vec3(Material::PLASTIC.ambient_color))
    );
}

#[test]
fn model_matrix_places_the_handle_upside_down() {
    let harness = Harness::prepared(&texture_dir("handle"));
    let events = harness.render();

    let handle = draw_index("mug handle");
    let Some(UniformValue::Mat4(model)) = state_at_draw(&events, handle, render::MODEL) else {
        panic!("no model matrix before the mug handle");
    };
    let top = model.transform_point3(Vec3::Y);
    assert!(top.abs_diff_eq(Vec3::new(2.02, 0.355 - 0.035, -0.60), 1e-4));
}

#[test]
fn missing_textures_do_not_stop_the_frame() {
    let dir = std::env::temp_dir().join(format!("deskscene-it-{}-empty", std::process::id()));
    let harness = Harness::prepared(&dir);
    assert!(harness.scene.textures().is_empty());

    let events = harness.render();

    assert_eq!(draws(&events).len(), DESK_SCRIPT.len());
    // The desk falls back to its color.
    assert_eq!(
        state_at_draw(&events, 0, render::USE_TEXTURE),
        Some(UniformValue::Bool(false))
    );
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, Event::Uniform(name, _) if name == render::OBJECT_TEXTURE))
    );
}

#[test]
fn destroy_releases_the_scene_textures() {
    let mut harness = Harness::prepared(&texture_dir("destroy"));
    harness.scene.destroy(&mut harness.textures);

    assert_eq!(harness.textures.released, vec![1, 2, 3, 4]);
    assert!(harness.scene.textures().is_empty());
}
