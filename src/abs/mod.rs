//! Thin wrappers over the OpenGL objects the scene needs: shader programs, meshes and
//! textures.

pub mod mesh;
pub mod shader;
pub mod texture;

pub use mesh::*;
pub use shader::*;
pub use texture::*;
