//! Decoded images and the textures uploaded from them.

use std::path::Path;
use std::rc::Rc;

use image;

use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::video::prelude::{
    TextureData, TextureFilter, TextureFormat, TextureHandle, TextureParams, TextureWrap,
    VideoSystem,
};

/// Tightly packed RGBA8 pixels, with the first row at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub dimensions: Vector2<u32>,
    pub pixels: Vec<u8>,
}

/// Decodes image files.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<Image>;
}

/// Decodes PNG and JPEG files with the `image` crate. Every image is converted
/// to RGBA8 and flipped vertically to match the bottom-left origin of textures.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<Image> {
        let image = image::open(path)
            .map_err(|err| Error::ImageDecode(path.display().to_string(), err.to_string()))?;

        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Image {
            dimensions: Vector2::new(width, height),
            pixels: rgba.into_raw(),
        })
    }
}

/// An immutable RGBA8 texture.
pub struct Texture2D {
    video: Rc<VideoSystem>,
    handle: TextureHandle,
    dimensions: Vector2<u32>,
}

impl Texture2D {
    pub fn new(video: &Rc<VideoSystem>, image: Image) -> Result<Self> {
        let params = TextureParams {
            format: TextureFormat::U8U8U8U8,
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Linear,
            dimensions: image.dimensions,
        };

        if params.len() != image.pixels.len() {
            return Err(Error::ImageDecode(
                format!("{}x{}", image.dimensions.x, image.dimensions.y),
                format!("expected {} bytes, got {}", params.len(), image.pixels.len()),
            )
            .into());
        }

        let data = TextureData {
            bytes: image.pixels,
        };

        let handle = video.create_texture(params, data)?;
        Ok(Texture2D {
            video: video.clone(),
            handle,
            dimensions: image.dimensions,
        })
    }

    /// Decodes the image at `path` and uploads it.
    pub fn load<D>(video: &Rc<VideoSystem>, decoder: &D, path: &Path) -> Result<Self>
    where
        D: ImageDecoder + ?Sized,
    {
        let image = decoder.decode(path)?;
        info!(
            "Loaded texture {:?} ({}x{}).",
            path, image.dimensions.x, image.dimensions.y
        );

        Self::new(video, image)
    }

    #[inline]
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        if let Err(err) = self.video.delete_texture(self.handle) {
            warn!("Failed to delete {}: {}", self.handle, err);
        }
    }
}
