//! Off-screen render targets.

use crate::math;
use crate::video::assets::texture::RenderTextureHandle;

impl_handle!(SurfaceHandle);

/// A surface is a depth-only framebuffer object whose attachment is a render
/// texture.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SurfaceParams {
    pub depth: Option<RenderTextureHandle>,
}

/// The rectangle of the current render target that draws are mapped to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceViewport {
    pub position: math::Vector2<i32>,
    pub size: math::Vector2<u32>,
}

impl SurfaceViewport {
    /// A viewport covering a target of `size` from the origin.
    pub fn from_size(size: math::Vector2<u32>) -> Self {
        SurfaceViewport {
            position: math::Vector2::new(0, 0),
            size,
        }
    }
}
