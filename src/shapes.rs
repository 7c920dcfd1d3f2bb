//! Procedural meshes for the basic shapes the scene is built from.
//!
//! Geometry is generated on the CPU by the `*_data` functions and uploaded once per kind by
//! [`ShapeMeshes`]. All shapes use counter-clockwise front faces and carry positions, normals
//! and texture coordinates.
//!
//! | Shape    | Extent |
//! |----------|--------|
//! | plane    | 2 x 2 on XZ, centered, facing +Y |
//! | box      | 1 x 1 x 1, centered |
//! | cylinder | radius 1, from y = 0 to y = 1, capped |
//! | cone     | radius 1, base at y = 0, apex at y = 1 |
//! | sphere   | radius 1, centered |
//! | torus    | ring radius 1, tube radius 0.2, around Y |

use std::{f32::consts::TAU, sync::Arc};

use fxhash::FxHashMap;
use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::{
    abs::{Mesh, Vertex},
    error::SceneError,
};

const RADIAL_SEGMENTS: u32 = 36;
const SPHERE_RINGS: u32 = 18;
const TORUS_TUBE_SEGMENTS: u32 = 18;
const TORUS_TUBE_RADIUS: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    Cone,
    Sphere,
    Torus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Plane,
        ShapeKind::Cylinder,
        ShapeKind::Box,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::Torus,
    ];

    /// Generates the geometry for this kind.
    pub fn data(self) -> ShapeData {
        match self {
            ShapeKind::Plane => plane_data(),
            ShapeKind::Box => box_data(),
            ShapeKind::Cylinder => cylinder_data(RADIAL_SEGMENTS),
            ShapeKind::Cone => cone_data(RADIAL_SEGMENTS),
            ShapeKind::Sphere => sphere_data(RADIAL_SEGMENTS, SPHERE_RINGS),
            ShapeKind::Torus => torus_data(RADIAL_SEGMENTS, TORUS_TUBE_SEGMENTS, TORUS_TUBE_RADIUS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ShapeVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl ShapeVertex {
    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

impl Vertex for ShapeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ShapeVertex>() as i32;

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, size_of::<Vec3>() as i32);

            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                (2 * size_of::<Vec3>()) as i32,
            );
        }
    }
}

/// Triangle list geometry.
#[derive(Clone, Debug, Default)]
pub struct ShapeData {
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl ShapeData {
    fn push_quad(&mut self, corners: [ShapeVertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(corners);
        self.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    /// Adds a (segments + 1) x (rows + 1) vertex grid and stitches it into triangles.
    fn push_grid(&mut self, segments: u32, rows: u32, vertex: impl Fn(u32, u32) -> ShapeVertex) {
        let base = self.vertices.len() as u32;
        for row in 0..=rows {
            for seg in 0..=segments {
                self.vertices.push(vertex(seg, row));
            }
        }
        for row in 0..rows {
            for seg in 0..segments {
                let current = base + row * (segments + 1) + seg;
                let next = current + segments + 1;
                self.indices
                    .extend([current, next, current + 1, current + 1, next, next + 1]);
            }
        }
    }

    /// Adds a triangle fan disc at height `y` facing up or down.
    fn push_disc(&mut self, segments: u32, y: f32, facing_up: bool) {
        let normal = if facing_up { Vec3::Y } else { Vec3::NEG_Y };
        let center = self.vertices.len() as u32;
        self.vertices.push(ShapeVertex::new(
            Vec3::new(0.0, y, 0.0),
            normal,
            Vec2::splat(0.5),
        ));
        for seg in 0..=segments {
            let theta = TAU * seg as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            self.vertices.push(ShapeVertex::new(
                Vec3::new(cos, y, sin),
                normal,
                Vec2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
            ));
        }
        for seg in 0..segments {
            let a = center + 1 + seg;
            let b = a + 1;
            if facing_up {
                self.indices.extend([center, b, a]);
            } else {
                self.indices.extend([center, a, b]);
            }
        }
    }
}

pub fn plane_data() -> ShapeData {
    let mut data = ShapeData::default();
    let up = Vec3::Y;
    data.push_quad([
        ShapeVertex::new(Vec3::new(-1.0, 0.0, 1.0), up, Vec2::new(0.0, 0.0)),
        ShapeVertex::new(Vec3::new(1.0, 0.0, 1.0), up, Vec2::new(1.0, 0.0)),
        ShapeVertex::new(Vec3::new(1.0, 0.0, -1.0), up, Vec2::new(1.0, 1.0)),
        ShapeVertex::new(Vec3::new(-1.0, 0.0, -1.0), up, Vec2::new(0.0, 1.0)),
    ]);
    data
}

pub fn box_data() -> ShapeData {
    let mut data = ShapeData::default();
    // (normal, u axis, v axis); u x v == normal keeps the winding counter-clockwise.
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    for (normal, u, v) in faces {
        let center = normal * 0.5;
        let corner = |su: f32, sv: f32, uv: Vec2| {
            ShapeVertex::new(center + u * 0.5 * su + v * 0.5 * sv, normal, uv)
        };
        data.push_quad([
            corner(-1.0, -1.0, Vec2::new(0.0, 0.0)),
            corner(1.0, -1.0, Vec2::new(1.0, 0.0)),
            corner(1.0, 1.0, Vec2::new(1.0, 1.0)),
            corner(-1.0, 1.0, Vec2::new(0.0, 1.0)),
        ]);
    }
    data
}

pub fn cylinder_data(segments: u32) -> ShapeData {
    let mut data = ShapeData::default();
    data.push_grid(segments, 1, |seg, row| {
        let u = seg as f32 / segments as f32;
        let (sin, cos) = (TAU * u).sin_cos();
        let normal = Vec3::new(cos, 0.0, sin);
        ShapeVertex::new(normal + Vec3::Y * row as f32, normal, Vec2::new(u, row as f32))
    });
    data.push_disc(segments, 0.0, false);
    data.push_disc(segments, 1.0, true);
    data
}

pub fn cone_data(segments: u32) -> ShapeData {
    let mut data = ShapeData::default();
    // Slant normal for a cone of radius 1 and height 1.
    let slope = std::f32::consts::FRAC_1_SQRT_2;
    data.push_grid(segments, 1, |seg, row| {
        let u = seg as f32 / segments as f32;
        let (sin, cos) = (TAU * u).sin_cos();
        let normal = Vec3::new(cos * slope, slope, sin * slope);
        let radius = 1.0 - row as f32;
        ShapeVertex::new(
            Vec3::new(cos * radius, row as f32, sin * radius),
            normal,
            Vec2::new(u, row as f32),
        )
    });
    data.push_disc(segments, 0.0, false);
    data
}

pub fn sphere_data(segments: u32, rings: u32) -> ShapeData {
    let mut data = ShapeData::default();
    data.push_grid(segments, rings, |seg, ring| {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let theta = TAU * seg as f32 / segments as f32;
        let normal = Vec3::new(phi.sin() * theta.cos(), -phi.cos(), phi.sin() * theta.sin());
        ShapeVertex::new(
            normal,
            normal,
            Vec2::new(seg as f32 / segments as f32, ring as f32 / rings as f32),
        )
    });
    data
}

pub fn torus_data(segments: u32, tube_segments: u32, tube_radius: f32) -> ShapeData {
    let mut data = ShapeData::default();
    data.push_grid(segments, tube_segments, |seg, tube| {
        let theta = TAU * seg as f32 / segments as f32;
        let phi = TAU * tube as f32 / tube_segments as f32;
        let ring_dir = Vec3::new(theta.cos(), 0.0, theta.sin());
        let normal = ring_dir * phi.cos() + Vec3::Y * phi.sin();
        ShapeVertex::new(
            ring_dir + normal * tube_radius,
            normal,
            Vec2::new(
                seg as f32 / segments as f32,
                tube as f32 / tube_segments as f32,
            ),
        )
    });
    data
}

/// Loads and draws the basic shapes.
pub trait MeshLibrary {
    /// Makes `kind` drawable. Loading a kind twice is a no-op.
    fn load(&mut self, kind: ShapeKind) -> Result<(), SceneError>;

    fn is_loaded(&self, kind: ShapeKind) -> bool;

    /// Draws `kind` with the current shader state.
    fn draw(&self, kind: ShapeKind);
}

/// GPU copies of the basic shapes.
pub struct ShapeMeshes {
    gl: Arc<glow::Context>,
    meshes: FxHashMap<ShapeKind, Mesh>,
}

impl ShapeMeshes {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            meshes: FxHashMap::default(),
        }
    }
}

impl MeshLibrary for ShapeMeshes {
    fn load(&mut self, kind: ShapeKind) -> Result<(), SceneError> {
        if self.meshes.contains_key(&kind) {
            log::debug!("{kind:?} mesh already loaded");
            return Ok(());
        }
        let data = kind.data();
        let mesh = Mesh::new(&self.gl, &data.vertices, &data.indices, glow::TRIANGLES)?;
        self.meshes.insert(kind, mesh);
        Ok(())
    }

    fn is_loaded(&self, kind: ShapeKind) -> bool {
        self.meshes.contains_key(&kind)
    }

    fn draw(&self, kind: ShapeKind) {
        match self.meshes.get(&kind) {
            Some(mesh) => mesh.draw(),
            None => log::warn!("Tried to draw {kind:?} before loading it"),
        }
    }
}
