//! A backend without any GPU behind it. Every command is validated against the
//! objects alive in the backend and appended to a trace, which can be inspected
//! through the `HeadlessRecorder` handed out at construction.

use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::super::assets::prelude::*;
use super::Visitor;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::DataVec;

/// One command submitted to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    BindShader(ShaderHandle),
    SetUniform(ShaderHandle, String, UniformVariable),
    CreateTexture(TextureHandle, TextureParams),
    DeleteTexture(TextureHandle),
    CreateRenderTexture(RenderTextureHandle, RenderTextureParams),
    DeleteRenderTexture(RenderTextureHandle),
    BindTexture(u32, Sampler),
    ResetTextureUnit,
    CreateMesh(MeshHandle, MeshParams),
    DeleteMesh(MeshHandle),
    CreateSurface(SurfaceHandle, SurfaceParams),
    DeleteSurface(SurfaceHandle),
    BindSurface(Option<SurfaceHandle>),
    Viewport(SurfaceViewport),
    Clear(Option<Color<f32>>, Option<f32>, Option<i32>),
    RenderState(RenderState),
    Draw(ShaderHandle, MeshHandle),
    Flush,
}

#[derive(Default)]
struct HeadlessState {
    commands: Vec<Command>,
    render_state: RenderState,
    surface: Option<SurfaceHandle>,
    viewport: Option<SurfaceViewport>,
    binded_shader: Option<ShaderHandle>,
    uniforms: HashMap<(ShaderHandle, String), UniformVariable>,
    ignored_uniforms: usize,
    shaders: DataVec<HashSet<String>>,
    textures: DataVec<TextureParams>,
    render_textures: DataVec<RenderTextureParams>,
    meshes: DataVec<MeshParams>,
    surfaces: DataVec<SurfaceParams>,
}

/// Read access to everything a `HeadlessVisitor` has recorded.
#[derive(Clone)]
pub struct HeadlessRecorder {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessRecorder {
    /// Returns the recorded commands.
    pub fn commands(&self) -> Ref<[Command]> {
        Ref::map(self.state.borrow(), |v| v.commands.as_slice())
    }

    /// Drains the recorded commands.
    pub fn take(&self) -> Vec<Command> {
        ::std::mem::replace(&mut self.state.borrow_mut().commands, Vec::new())
    }

    /// Counts the recorded commands matching `predicate`.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Command) -> bool,
    {
        self.state.borrow().commands.iter().filter(|v| predicate(v)).count()
    }

    /// The render state last applied.
    pub fn render_state(&self) -> RenderState {
        self.state.borrow().render_state
    }

    /// The bound render target, none for the default framebuffer.
    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.state.borrow().surface
    }

    /// The current viewport, none until a render target has been bound.
    pub fn viewport(&self) -> Option<SurfaceViewport> {
        self.state.borrow().viewport
    }

    /// The last value written to the uniform `name` of `shader`.
    pub fn uniform(&self, shader: ShaderHandle, name: &str) -> Option<UniformVariable> {
        self.state
            .borrow()
            .uniforms
            .get(&(shader, name.to_owned()))
            .cloned()
    }

    /// The number of writes to uniforms that are not declared by the program.
    pub fn ignored_uniforms(&self) -> usize {
        self.state.borrow().ignored_uniforms
    }

    /// The number of textures alive in the backend.
    pub fn textures_alive(&self) -> usize {
        self.state.borrow().textures.len()
    }

    /// The number of meshes alive in the backend.
    pub fn meshes_alive(&self) -> usize {
        self.state.borrow().meshes.len()
    }

    /// The number of programs alive in the backend.
    pub fn shaders_alive(&self) -> usize {
        self.state.borrow().shaders.len()
    }
}

pub struct HeadlessVisitor {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessVisitor {
    pub fn new() -> (Self, HeadlessRecorder) {
        let state = Rc::new(RefCell::new(HeadlessState::default()));
        let recorder = HeadlessRecorder {
            state: state.clone(),
        };

        (HeadlessVisitor { state }, recorder)
    }

    fn record(&self, cmd: Command) {
        self.state.borrow_mut().commands.push(cmd);
    }
}

/// Collects the names of the uniforms declared in GLSL source, the way a linker
/// would report active uniforms.
fn declared_uniforms(src: &str) -> HashSet<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("uniform "))
        .filter_map(|line| {
            let decl = line.trim_end_matches(';').trim();
            let name = decl.split_whitespace().last()?;
            Some(name.split('[').next().unwrap_or(name).to_owned())
        })
        .collect()
}

impl Visitor for HeadlessVisitor {
    unsafe fn create_shader(&mut self, handle: ShaderHandle, vs: &str, fs: &str) -> Result<()> {
        if vs.trim().is_empty() || fs.trim().is_empty() {
            return Err(Error::ShaderCreation(
                "both vertex and fragment sources are required".into()
            ).into());
        }

        let mut uniforms = declared_uniforms(vs);
        uniforms.extend(declared_uniforms(fs));
        self.state.borrow_mut().shaders.create(handle, uniforms);
        self.record(Command::CreateShader(handle));
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            state
                .shaders
                .free(handle)
                .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

            if state.binded_shader == Some(handle) {
                state.binded_shader = None;
            }
        }

        self.record(Command::DeleteShader(handle));
        Ok(())
    }

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.shaders.get(handle).is_none() {
                return Err(Error::HandleInvalid(format!("{}", handle)).into());
            }

            state.binded_shader = Some(handle);
        }

        self.record(Command::BindShader(handle));
        Ok(())
    }

    unsafe fn set_uniform(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            let declared = state
                .shaders
                .get(handle)
                .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?
                .contains(name);

            if !declared {
                trace!("{} has no active uniform {:?}.", handle, name);
                state.ignored_uniforms += 1;
                return Ok(());
            }

            state.uniforms.insert((handle, name.to_owned()), variable);
        }

        self.record(Command::SetUniform(handle, name.to_owned(), variable));
        Ok(())
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: TextureData,
    ) -> Result<()> {
        if data.bytes.len() != params.len() {
            bail!(
                "{} expects {} bytes of pixels, got {}.",
                handle,
                params.len(),
                data.bytes.len()
            );
        }

        self.state.borrow_mut().textures.create(handle, params);
        self.record(Command::CreateTexture(handle, params));
        Ok(())
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        self.state
            .borrow_mut()
            .textures
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        self.record(Command::DeleteTexture(handle));
        Ok(())
    }

    unsafe fn create_render_texture(
        &mut self,
        handle: RenderTextureHandle,
        params: RenderTextureParams,
    ) -> Result<()> {
        self.state.borrow_mut().render_textures.create(handle, params);
        self.record(Command::CreateRenderTexture(handle, params));
        Ok(())
    }

    unsafe fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()> {
        self.state
            .borrow_mut()
            .render_textures
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        self.record(Command::DeleteRenderTexture(handle));
        Ok(())
    }

    unsafe fn bind_texture(&mut self, unit: u32, sampler: Sampler) -> Result<()> {
        {
            let state = self.state.borrow();
            let alive = match sampler {
                Sampler::Texture(h) => state.textures.get(h).is_some(),
                Sampler::RenderTexture(h) => state.render_textures.get(h).is_some(),
            };

            if !alive {
                return Err(Error::HandleInvalid(format!("{:?}", sampler)).into());
            }
        }

        self.record(Command::BindTexture(unit, sampler));
        Ok(())
    }

    unsafe fn reset_texture_unit(&mut self) -> Result<()> {
        self.record(Command::ResetTextureUnit);
        Ok(())
    }

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()> {
        if data.vptr.len() != params.vertex_buffer_len()
            || data.iptr.len() != params.index_buffer_len()
        {
            bail!("{} has buffers that do not match its layout.", handle);
        }

        self.state.borrow_mut().meshes.create(handle, params);
        self.record(Command::CreateMesh(handle, params));
        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        self.state
            .borrow_mut()
            .meshes
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        self.record(Command::DeleteMesh(handle));
        Ok(())
    }

    unsafe fn create_surface(
        &mut self,
        handle: SurfaceHandle,
        params: SurfaceParams,
    ) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            for &rt in params.depth.iter() {
                if state.render_textures.get(rt).is_none() {
                    return Err(Error::SurfaceIncomplete(format!(
                        "{} is not a valid attachment",
                        rt
                    )).into());
                }
            }

            if params.depth.is_none() {
                return Err(Error::SurfaceIncomplete("no attachment".into()).into());
            }

            state.surfaces.create(handle, params);
        }

        self.record(Command::CreateSurface(handle, params));
        Ok(())
    }

    unsafe fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            state
                .surfaces
                .free(handle)
                .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

            if state.surface == Some(handle) {
                state.surface = None;
            }
        }

        self.record(Command::DeleteSurface(handle));
        Ok(())
    }

    unsafe fn bind_surface(
        &mut self,
        surface: Option<SurfaceHandle>,
        dimensions: Vector2<u32>,
    ) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            let dimensions = match surface {
                Some(handle) => {
                    let params = *state
                        .surfaces
                        .get(handle)
                        .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

                    params
                        .depth
                        .and_then(|rt| state.render_textures.get(rt))
                        .map(|rt| rt.dimensions)
                        .unwrap_or(dimensions)
                }
                None => dimensions,
            };

            state.surface = surface;
            state.viewport = Some(SurfaceViewport::from_size(dimensions));
        }

        self.record(Command::BindSurface(surface));
        Ok(())
    }

    unsafe fn update_surface_viewport(&mut self, vp: SurfaceViewport) -> Result<()> {
        self.state.borrow_mut().viewport = Some(vp);
        self.record(Command::Viewport(vp));
        Ok(())
    }

    unsafe fn clear(
        &mut self,
        color: Option<Color<f32>>,
        depth: Option<f32>,
        stencil: Option<i32>,
    ) -> Result<()> {
        self.record(Command::Clear(color, depth, stencil));
        Ok(())
    }

    unsafe fn update_render_state(&mut self, state: RenderState) -> Result<()> {
        self.state.borrow_mut().render_state = state;
        self.record(Command::RenderState(state));
        Ok(())
    }

    unsafe fn draw(&mut self, shader: ShaderHandle, mesh: MeshHandle) -> Result<u32> {
        let triangles = {
            let state = self.state.borrow();
            if state.binded_shader != Some(shader) {
                bail!("{} must be bound before drawing with it.", shader);
            }

            let params = state
                .meshes
                .get(mesh)
                .ok_or_else(|| Error::HandleInvalid(format!("{}", mesh)))?;

            (params.num_idxes / 3) as u32
        };

        self.record(Command::Draw(shader, mesh));
        Ok(triangles)
    }

    unsafe fn flush(&mut self) -> Result<()> {
        self.record(Command::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_declarations() {
        let src = "#version 330 core\nuniform mat4 model;\n  uniform sampler2D textureDiffuse0;\nuniform vec3 lights[4];\nin vec3 aPos;";
        let names = declared_uniforms(src);
        assert_eq!(names.len(), 3);
        assert!(names.contains("model"));
        assert!(names.contains("textureDiffuse0"));
        assert!(names.contains("lights"));
    }

    #[test]
    fn unknown_uniforms_are_ignored() {
        let (mut visitor, recorder) = HeadlessVisitor::new();
        let shader = ShaderHandle::from(crate::utils::Handle::new(0, 1));

        unsafe {
            visitor
                .create_shader(shader, "uniform mat4 view;", "void main() {}")
                .unwrap();
            visitor
                .set_uniform(shader, "view", UniformVariable::F32(1.0))
                .unwrap();
            visitor
                .set_uniform(shader, "missing", UniformVariable::F32(1.0))
                .unwrap();
        }

        assert_eq!(recorder.ignored_uniforms(), 1);
        assert_eq!(
            recorder.uniform(shader, "view"),
            Some(UniformVariable::F32(1.0))
        );
        assert_eq!(recorder.uniform(shader, "missing"), None);
    }

    #[test]
    fn draw_requires_bound_shader() {
        let (mut visitor, _) = HeadlessVisitor::new();
        let shader = ShaderHandle::from(crate::utils::Handle::new(0, 1));
        let mesh = MeshHandle::from(crate::utils::Handle::new(0, 1));
        let params = MeshParams {
            layout: VertexLayout { texcoord: false },
            num_verts: 3,
            num_idxes: 3,
        };

        unsafe {
            visitor.create_shader(shader, "void main() {}", "void main() {}").unwrap();
            visitor
                .create_mesh(mesh, params, MeshData::new(&[0.0; 18], &[0, 1, 2]))
                .unwrap();
            assert!(visitor.draw(shader, mesh).is_err());
            visitor.bind_shader(shader).unwrap();
            assert_eq!(visitor.draw(shader, mesh).unwrap(), 1);
        }
    }
}
