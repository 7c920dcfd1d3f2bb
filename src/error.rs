//! Error type shared by the texture loader, the shader state setters and the scene script.

use std::path::PathBuf;

/// Everything that can go wrong while preparing or rendering the scene.
///
/// None of these are fatal. The scene script logs them and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The image file could not be read or decoded.
    #[error("could not load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded fine but has a channel count other than 3 or 4.
    #[error("image {path} has {channels} channels, only RGB and RGBA are supported")]
    UnsupportedFormat { path: PathBuf, channels: u8 },

    /// Every texture unit is already taken.
    #[error("texture registry is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },

    #[error("no texture tagged {0:?}")]
    UnknownTexture(String),

    #[error("no material tagged {0:?}")]
    UnknownMaterial(String),

    /// An OpenGL object could not be created.
    #[error("gpu error: {0}")]
    Gpu(String),
}
