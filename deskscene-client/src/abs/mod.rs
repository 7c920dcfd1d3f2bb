//! Window and OpenGL context setup.

pub mod app;

pub use app::*;
