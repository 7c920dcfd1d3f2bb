//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders,
//! the [`Uniform`] trait for typed uniform uploads and the [`UniformSink`] trait, which is the
//! seam the scene code writes its per-draw state through.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, shader_type: u32, source: &str) -> Result<Self, String> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(|e| e.to_string())?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(log);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A single typed value destined for a named uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

macro_rules! uniform_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    UniformValue::$variant(value)
                }
            }
        )*
    };
}

uniform_value_from! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat4 => Mat4,
}

/// Anything that accepts named uniform writes for the currently bound program.
///
/// [`ShaderProgram`] forwards to OpenGL; tests substitute a recorder.
pub trait UniformSink {
    /// Writes `value` to the uniform called `name`. Last write wins.
    fn set_value(&mut self, name: &str, value: UniformValue);
}

impl dyn UniformSink + '_ {
    /// Convenience wrapper converting plain values into a [`UniformValue`].
    pub fn set<T: Into<UniformValue>>(&mut self, name: &str, value: T) {
        self.set_value(name, value.into());
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

fn location(
    gl: &glow::Context,
    program: glow::Program,
    name: &str,
) -> Option<glow::UniformLocation> {
    unsafe { gl.get_uniform_location(program, name) }
}

impl Uniform for bool {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self as i32).set_uniform(gl, program, name);
    }
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        if let Some(loc) = location(gl, program, name) {
            unsafe { gl.uniform_1_i32(Some(&loc), *self) }
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        if let Some(loc) = location(gl, program, name) {
            unsafe { gl.uniform_1_f32(Some(&loc), *self) }
        }
    }
}

impl Uniform for Vec2 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        if let Some(loc) = location(gl, program, name) {
            unsafe { gl.uniform_2_f32(Some(&loc), self.x, self.y) }
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        if let Some(loc) = location(gl, program, name) {
            unsafe { gl.uniform_3_f32(Some(&loc), self.x, self.y, self.z) }
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        if let Some(loc) = location(gl, program, name) {
            unsafe { gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w) }
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        if let Some(loc) = location(gl, program, name) {
            unsafe { gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref()) }
        }
    }
}

impl Uniform for UniformValue {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        match self {
            UniformValue::Bool(v) => v.set_uniform(gl, program, name),
            UniformValue::Int(v) => v.set_uniform(gl, program, name),
            UniformValue::Float(v) => v.set_uniform(gl, program, name),
            UniformValue::Vec2(v) => v.set_uniform(gl, program, name),
            UniformValue::Vec3(v) => v.set_uniform(gl, program, name),
            UniformValue::Vec4(v) => v.set_uniform(gl, program, name),
            UniformValue::Mat4(v) => v.set_uniform(gl, program, name),
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, String> {
        unsafe {
            let program = gl.create_program().map_err(|e| e.to_string())?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(log);
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles a vertex and a fragment shader and links them into a program.
    pub fn from_sources(gl: &Arc<glow::Context>, vert: &str, frag: &str) -> Result<Self, String> {
        let vert = Shader::new(gl, glow::VERTEX_SHADER, vert)
            .map_err(|log| format!("vertex shader: {log}"))?;
        let frag = Shader::new(gl, glow::FRAGMENT_SHADER, frag)
            .map_err(|log| format!("fragment shader: {log}"))?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl UniformSink for ShaderProgram {
    fn set_value(&mut self, name: &str, value: UniformValue) {
        self.set_uniform(name, value);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
