//! The backend of renderer, which should be responsible for only one thing:
//! submitting commands using low-level video APIs.

pub mod gl;
pub mod headless;

use super::assets::prelude::*;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};

pub trait Visitor {
    unsafe fn create_shader(&mut self, handle: ShaderHandle, vs: &str, fs: &str) -> Result<()>;

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    /// Makes the program active.
    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    /// Writes a uniform of the program, activating it if necessary. Names that
    /// do not resolve to a location are ignored.
    unsafe fn set_uniform(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()>;

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: TextureData,
    ) -> Result<()>;

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()>;

    unsafe fn create_render_texture(
        &mut self,
        handle: RenderTextureHandle,
        params: RenderTextureParams,
    ) -> Result<()>;

    unsafe fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()>;

    /// Binds `sampler` to the texture unit `unit`, leaving `unit` active.
    unsafe fn bind_texture(&mut self, unit: u32, sampler: Sampler) -> Result<()>;

    /// Makes texture unit 0 the active one.
    unsafe fn reset_texture_unit(&mut self) -> Result<()>;

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()>;

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()>;

    unsafe fn create_surface(&mut self, handle: SurfaceHandle, params: SurfaceParams)
        -> Result<()>;

    unsafe fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()>;

    /// Binds the surface as render target, or the default framebuffer when `surface`
    /// is none, and resets the viewport to cover the whole target. `dimensions` is the
    /// size of the default framebuffer.
    unsafe fn bind_surface(
        &mut self,
        surface: Option<SurfaceHandle>,
        dimensions: Vector2<u32>,
    ) -> Result<()>;

    unsafe fn update_surface_viewport(&mut self, vp: SurfaceViewport) -> Result<()>;

    unsafe fn clear(
        &mut self,
        color: Option<Color<f32>>,
        depth: Option<f32>,
        stencil: Option<i32>,
    ) -> Result<()>;

    unsafe fn update_render_state(&mut self, state: RenderState) -> Result<()>;

    /// Draws the indexed triangle list of `mesh` with the program `shader`, returns
    /// the number of triangles submitted.
    unsafe fn draw(&mut self, shader: ShaderHandle, mesh: MeshHandle) -> Result<u32>;

    /// Blocks until all execution is complete.
    unsafe fn flush(&mut self) -> Result<()>;
}

pub fn new() -> Result<Box<dyn Visitor>> {
    let visitor = unsafe { self::gl::visitor::GLVisitor::new()? };
    Ok(Box::new(visitor))
}

pub fn new_headless() -> (Box<dyn Visitor>, headless::HeadlessRecorder) {
    let (visitor, recorder) = self::headless::HeadlessVisitor::new();
    (Box::new(visitor), recorder)
}
