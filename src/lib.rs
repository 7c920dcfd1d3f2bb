//! A small OpenGL scene-composition layer.
//!
//! The crate loads textures into texture units, keeps a table of material presets, composes
//! model matrices and pushes per-object state into a shader program before drawing procedural
//! meshes. [`scene::DeskScene`] ties it together into one hardcoded desk scene.
//!
//! OpenGL access goes through three seams so the scene logic runs without a context:
//! [`abs::UniformSink`] for uniform writes, [`textures::TextureBackend`] for texture objects and
//! [`shapes::MeshLibrary`] for meshes.

pub mod abs;
pub mod camera;
pub mod error;
pub mod materials;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod textures;
pub mod transform;

pub use error::SceneError;
