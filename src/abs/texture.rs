//! Structs and functions for handling textures on the GPU.
//!
//! [`TextureHandle`] is a cheap copyable reference to a texture object and [`GlTextures`] is the
//! OpenGL implementation of [`TextureBackend`](crate::textures::TextureBackend).

use std::{num::NonZero, sync::Arc};

use glow::HasContext;

use crate::{
    error::SceneError,
    textures::{PixelData, PixelFormat, TextureBackend},
};

/// Represents a handle to a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub NonZero<u32>, u32, u32);

impl TextureHandle {
    pub fn new(id: NonZero<u32>, width: u32, height: u32) -> Self {
        Self(id, width, height)
    }

    /// Binds the texture handle to the specified texture unit.
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(glow::NativeTexture(self.0)));
        }
    }

    /// Returns the raw OpenGL texture name.
    pub fn id(&self) -> u32 {
        self.0.get()
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.1
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.2
    }
}

/// Creates, binds and deletes 2D textures through a shared GL context.
pub struct GlTextures {
    gl: Arc<glow::Context>,
}

impl GlTextures {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self { gl: Arc::clone(gl) }
    }
}

impl TextureBackend for GlTextures {
    fn upload(&mut self, pixels: &PixelData) -> Result<TextureHandle, SceneError> {
        let (internal_format, format) = match pixels.format {
            PixelFormat::Rgb8 => (glow::RGB8, glow::RGB),
            PixelFormat::Rgba8 => (glow::RGBA8, glow::RGBA),
        };
        let gl = &self.gl;
        unsafe {
            let texture = gl.create_texture().map_err(SceneError::Gpu)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            // RGB rows are not 4-byte aligned in general.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                pixels.width as i32,
                pixels.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels.bytes.as_slice())),
            );
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);

            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(TextureHandle::new(texture.0, pixels.width, pixels.height))
        }
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        handle.bind(&self.gl, unit);
    }

    fn release(&mut self, handle: TextureHandle) {
        unsafe {
            self.gl.delete_texture(glow::NativeTexture(handle.0));
        }
    }
}
