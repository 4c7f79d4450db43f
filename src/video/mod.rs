//! A thin, stateful layer over the GPU API.
//!
//! `VideoSystem` is the single owner of the backend `Visitor`. It hands out typed
//! handles for every object it creates and forwards commands to the backend
//! immediately, there is no command buffering. Objects are released explicitly
//! with the matching `delete_*` call; the RAII wrappers in `graphics` do that from
//! their `Drop` implementations.
//!
//! The real backend talks to OpenGL through the `gl` crate, the headless one only
//! validates and records what it is asked to do:
//!
//! ```rust
//! use chequer::video::VideoSystem;
//!
//! let (video, recorder) = VideoSystem::headless();
//! video.clear(None, Some(1.0), None).unwrap();
//! assert_eq!(recorder.commands().len(), 1);
//! ```

pub mod assets;
pub mod backends;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::headless::{Command, HeadlessRecorder};
    pub use super::VideoSystem;
}

use std::cell::{Cell, RefCell};

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::HandlePool;

use self::assets::prelude::*;
use self::backends::headless::HeadlessRecorder;
use self::backends::Visitor;

/// The centralized management of video sub-system.
pub struct VideoSystem {
    visitor: RefCell<Box<dyn Visitor>>,
    shaders: RefCell<HandlePool<ShaderHandle>>,
    meshes: RefCell<HandlePool<MeshHandle>>,
    textures: RefCell<HandlePool<TextureHandle>>,
    render_textures: RefCell<HandlePool<RenderTextureHandle>>,
    surfaces: RefCell<HandlePool<SurfaceHandle>>,
    dimensions: Cell<Vector2<u32>>,
    render_state: Cell<RenderState>,
}

impl VideoSystem {
    /// Creates a `VideoSystem` on top of the OpenGL context current on this thread.
    pub fn new(dimensions: Vector2<u32>) -> Result<Self> {
        let visitor = backends::new()?;
        Ok(Self::with_visitor(visitor, dimensions))
    }

    /// Creates a headless `VideoSystem`, along with the recorder of every command
    /// it submits.
    pub fn headless() -> (Self, HeadlessRecorder) {
        let (visitor, recorder) = backends::new_headless();
        (Self::with_visitor(visitor, Vector2::new(0, 0)), recorder)
    }

    /// Creates a `VideoSystem` driving an arbitrary backend.
    pub fn with_visitor(visitor: Box<dyn Visitor>, dimensions: Vector2<u32>) -> Self {
        VideoSystem {
            visitor: RefCell::new(visitor),
            shaders: RefCell::new(HandlePool::new()),
            meshes: RefCell::new(HandlePool::new()),
            textures: RefCell::new(HandlePool::new()),
            render_textures: RefCell::new(HandlePool::new()),
            surfaces: RefCell::new(HandlePool::new()),
            dimensions: Cell::new(dimensions),
            render_state: Cell::new(RenderState::default()),
        }
    }

    /// The size in pixels of the default framebuffer.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions.get()
    }

    /// Updates the size of the default framebuffer, usually after the window has
    /// been resized.
    pub fn set_dimensions(&self, dimensions: Vector2<u32>) {
        if self.dimensions.get() != dimensions {
            debug!("Default framebuffer resized to {:?}.", dimensions);
            self.dimensions.set(dimensions);
        }
    }

    /// The render state last applied with `set_render_state`.
    #[inline]
    pub fn render_state(&self) -> RenderState {
        self.render_state.get()
    }
}

impl VideoSystem {
    /// Compiles and links a program from vertex and fragment sources.
    pub fn create_shader(&self, vs: &str, fs: &str) -> Result<ShaderHandle> {
        let handle = self.shaders.borrow_mut().create();
        if let Err(err) = unsafe { self.visitor.borrow_mut().create_shader(handle, vs, fs) } {
            self.shaders.borrow_mut().free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_shader(&self, handle: ShaderHandle) -> Result<()> {
        if !self.shaders.borrow_mut().free(handle) {
            return Err(Error::HandleInvalid(format!("{}", handle)).into());
        }

        unsafe { self.visitor.borrow_mut().delete_shader(handle) }
    }

    pub fn bind_shader(&self, handle: ShaderHandle) -> Result<()> {
        unsafe { self.visitor.borrow_mut().bind_shader(handle) }
    }

    /// Writes a uniform of `handle`. Writing a name the program does not use is a no-op.
    pub fn set_uniform<T>(&self, handle: ShaderHandle, name: &str, variable: T) -> Result<()>
    where
        T: Into<UniformVariable>,
    {
        unsafe {
            self.visitor
                .borrow_mut()
                .set_uniform(handle, name, variable.into())
        }
    }

    /// Creates an immutable texture object.
    pub fn create_texture(&self, params: TextureParams, data: TextureData) -> Result<TextureHandle> {
        let handle = self.textures.borrow_mut().create();
        if let Err(err) = unsafe { self.visitor.borrow_mut().create_texture(handle, params, data) } {
            self.textures.borrow_mut().free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_texture(&self, handle: TextureHandle) -> Result<()> {
        if !self.textures.borrow_mut().free(handle) {
            return Err(Error::HandleInvalid(format!("{}", handle)).into());
        }

        unsafe { self.visitor.borrow_mut().delete_texture(handle) }
    }

    /// Creates a render texture object, which could be attached to a surface.
    pub fn create_render_texture(&self, params: RenderTextureParams) -> Result<RenderTextureHandle> {
        let handle = self.render_textures.borrow_mut().create();
        if let Err(err) = unsafe {
            self.visitor
                .borrow_mut()
                .create_render_texture(handle, params)
        } {
            self.render_textures.borrow_mut().free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_render_texture(&self, handle: RenderTextureHandle) -> Result<()> {
        if !self.render_textures.borrow_mut().free(handle) {
            return Err(Error::HandleInvalid(format!("{}", handle)).into());
        }

        unsafe { self.visitor.borrow_mut().delete_render_texture(handle) }
    }

    /// Binds a texture or render texture to the texture unit `unit`.
    pub fn bind_texture<T>(&self, unit: u32, sampler: T) -> Result<()>
    where
        T: Into<Sampler>,
    {
        unsafe { self.visitor.borrow_mut().bind_texture(unit, sampler.into()) }
    }

    /// Makes texture unit 0 the active one.
    pub fn reset_texture_unit(&self) -> Result<()> {
        unsafe { self.visitor.borrow_mut().reset_texture_unit() }
    }

    /// Creates an immutable mesh object.
    pub fn create_mesh(&self, params: MeshParams, data: MeshData) -> Result<MeshHandle> {
        let handle = self.meshes.borrow_mut().create();
        if let Err(err) = unsafe { self.visitor.borrow_mut().create_mesh(handle, params, data) } {
            self.meshes.borrow_mut().free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_mesh(&self, handle: MeshHandle) -> Result<()> {
        if !self.meshes.borrow_mut().free(handle) {
            return Err(Error::HandleInvalid(format!("{}", handle)).into());
        }

        unsafe { self.visitor.borrow_mut().delete_mesh(handle) }
    }

    /// Creates a surface, failing with `Error::SurfaceIncomplete` if the attachments
    /// do not make a complete framebuffer.
    pub fn create_surface(&self, params: SurfaceParams) -> Result<SurfaceHandle> {
        let handle = self.surfaces.borrow_mut().create();
        if let Err(err) = unsafe { self.visitor.borrow_mut().create_surface(handle, params) } {
            self.surfaces.borrow_mut().free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_surface(&self, handle: SurfaceHandle) -> Result<()> {
        if !self.surfaces.borrow_mut().free(handle) {
            return Err(Error::HandleInvalid(format!("{}", handle)).into());
        }

        unsafe { self.visitor.borrow_mut().delete_surface(handle) }
    }
}

impl VideoSystem {
    /// Binds `surface` as render target, or the default framebuffer if none. The
    /// viewport is reset to cover the whole target.
    pub fn bind_surface(&self, surface: Option<SurfaceHandle>) -> Result<()> {
        let dimensions = self.dimensions.get();
        unsafe { self.visitor.borrow_mut().bind_surface(surface, dimensions) }
    }

    pub fn set_viewport(&self, vp: SurfaceViewport) -> Result<()> {
        unsafe { self.visitor.borrow_mut().update_surface_viewport(vp) }
    }

    /// Clears the buffers of the bound render target. Clears are subject to the
    /// depth and stencil write masks of the current render state.
    pub fn clear<C, D, S>(&self, color: C, depth: D, stencil: S) -> Result<()>
    where
        C: Into<Option<Color<f32>>>,
        D: Into<Option<f32>>,
        S: Into<Option<i32>>,
    {
        unsafe {
            self.visitor
                .borrow_mut()
                .clear(color.into(), depth.into(), stencil.into())
        }
    }

    pub fn set_render_state(&self, state: RenderState) -> Result<()> {
        unsafe { self.visitor.borrow_mut().update_render_state(state)? };
        self.render_state.set(state);
        Ok(())
    }

    /// Draws `mesh` with `shader`, returns the number of triangles.
    pub fn draw(&self, shader: ShaderHandle, mesh: MeshHandle) -> Result<u32> {
        unsafe { self.visitor.borrow_mut().draw(shader, mesh) }
    }

    /// Blocks until all submitted commands are complete.
    pub fn flush(&self) -> Result<()> {
        unsafe { self.visitor.borrow_mut().flush() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handles_are_recycled_after_failure() {
        let (video, recorder) = VideoSystem::headless();
        assert!(video.create_shader("", "").is_err());

        let shader = video.create_shader("void main() {}", "void main() {}").unwrap();
        assert_eq!(shader.index(), 0);
        assert_eq!(recorder.shaders_alive(), 1);

        video.delete_shader(shader).unwrap();
        assert!(video.delete_shader(shader).is_err());
        assert_eq!(recorder.shaders_alive(), 0);
    }

    #[test]
    fn incomplete_surface() {
        let (video, _) = VideoSystem::headless();
        assert!(video.create_surface(SurfaceParams::default()).is_err());

        let mut params = RenderTextureParams::default();
        params.dimensions = Vector2::new(16, 16);
        let depth = video.create_render_texture(params).unwrap();

        let surface = video
            .create_surface(SurfaceParams { depth: Some(depth) })
            .unwrap();

        video.bind_surface(Some(surface)).unwrap();
    }
}
