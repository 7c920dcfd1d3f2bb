//! Texture loading and the tag-to-texture-unit registry.
//!
//! Every successfully loaded image is appended to a [`TextureRegistry`]. Its position in the
//! registry is the texture unit it gets bound to, so the order textures are loaded in decides
//! which sampler index a tag resolves to.

use std::path::{Path, PathBuf};

use fxhash::FxHashMap;

use crate::{abs::TextureHandle, error::SceneError};

/// Number of texture units the registry hands out.
pub const MAX_TEXTURES: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Decoded, vertically flipped pixel rows ready for upload.
#[derive(Clone, Debug)]
pub struct PixelData {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub bytes: Vec<u8>,
}

/// Reads an image file and converts it into 8-bit RGB or RGBA rows.
///
/// Images are flipped vertically since image files store the top row first while GL texture
/// coordinates start at the bottom.
pub fn decode_image(path: &Path) -> Result<PixelData, SceneError> {
    let image = image::open(path).map_err(|source| SceneError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image.flipv();

    let (width, height) = (image.width(), image.height());
    match image.color().channel_count() {
        3 => Ok(PixelData {
            width,
            height,
            format: PixelFormat::Rgb8,
            bytes: image.into_rgb8().into_raw(),
        }),
        4 => Ok(PixelData {
            width,
            height,
            format: PixelFormat::Rgba8,
            bytes: image.into_rgba8().into_raw(),
        }),
        channels => Err(SceneError::UnsupportedFormat {
            path: path.to_path_buf(),
            channels,
        }),
    }
}

/// Whatever owns the actual texture objects.
pub trait TextureBackend {
    /// Creates a repeating, linearly filtered, mipmapped 2D texture from the pixels.
    fn upload(&mut self, pixels: &PixelData) -> Result<TextureHandle, SceneError>;

    /// Makes `unit` the active texture unit and binds `handle` to it.
    fn bind(&mut self, unit: u32, handle: TextureHandle);

    /// Deletes the texture object.
    fn release(&mut self, handle: TextureHandle);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry {
    pub handle: TextureHandle,
    pub tag: String,
}

/// Loaded textures in texture unit order.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    /// First slot seen for each tag.
    by_tag: FxHashMap<String, usize>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path`, uploads it through `backend` and registers it under `tag`.
    ///
    /// Returns the texture unit the new entry occupies. On failure nothing is registered and
    /// the reason is logged.
    pub fn load_texture(
        &mut self,
        backend: &mut impl TextureBackend,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<usize, SceneError> {
        let path = path.as_ref();
        let result = self.try_load(backend, path, tag);
        if let Err(err) = &result {
            log::warn!("Could not load texture {tag:?}: {err}");
        }
        result
    }

    fn try_load(
        &mut self,
        backend: &mut impl TextureBackend,
        path: &Path,
        tag: &str,
    ) -> Result<usize, SceneError> {
        if self.entries.len() >= MAX_TEXTURES {
            return Err(SceneError::CapacityExceeded {
                capacity: MAX_TEXTURES,
            });
        }

        let pixels = decode_image(path)?;
        log::info!(
            "Loaded image {}, width: {}, height: {}, channels: {}",
            path.display(),
            pixels.width,
            pixels.height,
            pixels.format.channels()
        );
        let handle = backend.upload(&pixels)?;

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            handle,
            tag: tag.to_owned(),
        });
        self.by_tag.entry(tag.to_owned()).or_insert(slot);
        Ok(slot)
    }

    /// Loads each `(file name, tag)` pair from `dir`, skipping the ones that fail.
    ///
    /// Returns how many textures were registered.
    pub fn load_all(
        &mut self,
        backend: &mut impl TextureBackend,
        dir: &Path,
        files: &[(&str, &str)],
    ) -> usize {
        files
            .iter()
            .filter(|(file, tag)| {
                let path: PathBuf = dir.join(file);
                self.load_texture(&mut *backend, path, tag).is_ok()
            })
            .count()
    }

    /// Binds entry N to texture unit N.
    pub fn bind_all(&self, backend: &mut impl TextureBackend) {
        for (unit, entry) in self.entries.iter().enumerate() {
            backend.bind(unit as u32, entry.handle);
        }
    }

    /// Texture unit of the first entry tagged `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.by_tag.get(tag).copied()
    }

    /// Handle of the first entry tagged `tag`.
    pub fn find_id(&self, tag: &str) -> Option<TextureHandle> {
        self.find_slot(tag).map(|slot| self.entries[slot].handle)
    }

    /// Releases every texture and empties the registry.
    pub fn destroy(&mut self, backend: &mut impl TextureBackend) {
        for entry in self.entries.drain(..) {
            backend.release(entry.handle);
        }
        self.by_tag.clear();
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
