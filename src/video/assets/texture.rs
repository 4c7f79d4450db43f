//! Immutable 2D textures and render textures. A texture can be the source of a
//! texture access from a shader; a render texture is an attachment of a surface.

use crate::math;

impl_handle!(TextureHandle);
impl_handle!(RenderTextureHandle);

/// The parameters of a texture object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureParams {
    /// Sets the wrap parameter for texture.
    pub wrap: TextureWrap,
    /// Specify how the texture is used whenever the pixel being sampled.
    pub filter: TextureFilter,
    /// Sets the format of data.
    pub format: TextureFormat,
    /// Sets the dimensions of texture.
    pub dimensions: math::Vector2<u32>,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            format: TextureFormat::U8U8U8U8,
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Linear,
            dimensions: math::Vector2::new(0, 0),
        }
    }
}

impl TextureParams {
    /// Returns the number of bytes the pixel data of this texture occupies.
    pub fn len(&self) -> usize {
        self.format.size() as usize * self.dimensions.x as usize * self.dimensions.y as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pixel data uploaded once at creation.
#[derive(Debug, Clone, Default)]
pub struct TextureData {
    pub bytes: Vec<u8>,
}

/// A `RenderTexture` object is basicly texture object with special format. It is
/// the attachment of a surface and can be sampled from a shader afterwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderTextureParams {
    pub format: RenderTextureFormat,
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
    pub dimensions: math::Vector2<u32>,
}

impl Default for RenderTextureParams {
    fn default() -> Self {
        RenderTextureParams {
            format: RenderTextureFormat::Depth24,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            dimensions: math::Vector2::new(0, 0),
        }
    }
}

/// Specify how the texture is used whenever the pixel being sampled.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureFilter {
    /// Returns the value of the texture element that is nearest (in Manhattan distance)
    /// to the center of the pixel being textured.
    Nearest,
    /// Returns the weighted average of the four texture elements that are closest to the
    /// center of the pixel being textured.
    Linear,
}

/// Sets the wrap parameter for texture.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureWrap {
    /// Samples at coord x + 1 map to coord x.
    Repeat,
    /// Samples at coord x + 1 map to coord 1.
    Clamp,
    /// Samples outside of [0, 1] return the border value, which is the far plane
    /// for depth textures.
    Border,
}

/// List of all the possible formats of renderable texture which could be use as
/// attachment of framebuffer.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RenderTextureFormat {
    Depth24,
}

/// List of all the possible formats of input data when uploading to texture.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureFormat {
    U8U8U8U8,
}

impl TextureFormat {
    /// Returns the number of components of this client format.
    pub fn components(self) -> u8 {
        match self {
            TextureFormat::U8U8U8U8 => 4,
        }
    }

    /// Returns the size in bytes of a pixel of this type.
    pub fn size(self) -> u8 {
        self.components()
    }
}

/// Anything that can be bound to a texture unit and sampled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sampler {
    Texture(TextureHandle),
    RenderTexture(RenderTextureHandle),
}

impl From<TextureHandle> for Sampler {
    fn from(handle: TextureHandle) -> Self {
        Sampler::Texture(handle)
    }
}

impl From<RenderTextureHandle> for Sampler {
    fn from(handle: RenderTextureHandle) -> Self {
        Sampler::RenderTexture(handle)
    }
}
