use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{CStr, CString};

use gl;
use gl::types::*;
use smallvec::SmallVec;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::DataVec;

use super::super::super::assets::prelude::*;
use super::super::Visitor;

#[derive(Debug, Clone)]
struct GLSurfaceData {
    id: GLuint,
    dimensions: Vector2<u32>,
}

#[derive(Debug, Clone)]
struct GLShaderData {
    id: GLuint,
    uniforms: RefCell<HashMap<String, GLint>>,
}

impl GLShaderData {
    unsafe fn uniform_location(&self, name: &str) -> Result<GLint> {
        let mut uniforms = self.uniforms.borrow_mut();
        match uniforms.get(name).cloned() {
            Some(location) => Ok(location),
            None => {
                let c_name = CString::new(name.as_bytes())
                    .map_err(|_| format_err!("Uniform name {:?} contains a nul byte.", name))?;
                let location = gl::GetUniformLocation(self.id, c_name.as_ptr());
                check()?;

                uniforms.insert(name.to_owned(), location);
                Ok(location)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct GLMeshData {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
    params: MeshParams,
}

#[derive(Debug, Clone)]
struct GLTextureData {
    id: GLuint,
}

#[derive(Debug, Copy, Clone)]
struct GLRenderTextureData {
    id: GLuint,
    params: RenderTextureParams,
}

struct GLMutableState {
    render_state: RenderState,
    stencil: StencilState,
    view: SurfaceViewport,
    binded_surface: Option<SurfaceHandle>,
    binded_shader: Option<ShaderHandle>,
    binded_texture_index: u32,
    binded_textures: SmallVec<[Option<Sampler>; 16]>,
}

pub struct GLVisitor {
    state: GLMutableState,
    surfaces: DataVec<GLSurfaceData>,
    shaders: DataVec<GLShaderData>,
    meshes: DataVec<GLMeshData>,
    textures: DataVec<GLTextureData>,
    render_textures: DataVec<GLRenderTextureData>,
}

impl GLVisitor {
    /// Creates a visitor on the OpenGL context that is current on this thread. The
    /// function pointers must have been loaded with `gl::load_with` beforehand.
    pub unsafe fn new() -> Result<Self> {
        if !gl::GetString::is_loaded() {
            return Err(Error::Window("OpenGL functions are not loaded".into()).into());
        }

        info!(
            "GLVisitor {} ({}, {}).",
            gl_string(gl::VERSION),
            gl_string(gl::VENDOR),
            gl_string(gl::RENDERER)
        );

        let state = GLMutableState {
            render_state: RenderState::default(),
            stencil: StencilState::default(),
            view: SurfaceViewport::from_size(Vector2::new(0, 0)),
            binded_surface: None,
            binded_shader: None,
            binded_texture_index: 0,
            binded_textures: SmallVec::new(),
        };

        let mut visitor = GLVisitor {
            state,
            surfaces: DataVec::new(),
            shaders: DataVec::new(),
            meshes: DataVec::new(),
            textures: DataVec::new(),
            render_textures: DataVec::new(),
        };

        Self::reset_render_state(&mut visitor.state)?;
        Ok(visitor)
    }
}

impl Visitor for GLVisitor {
    unsafe fn create_shader(&mut self, handle: ShaderHandle, vs: &str, fs: &str) -> Result<()> {
        let vs = Self::compile(gl::VERTEX_SHADER, vs)?;
        let fs = match Self::compile(gl::FRAGMENT_SHADER, fs) {
            Ok(fs) => fs,
            Err(err) => {
                gl::DeleteShader(vs);
                return Err(err);
            }
        };

        let id = match Self::link(&[vs, fs]) {
            Ok(id) => id,
            Err(err) => {
                gl::DeleteShader(vs);
                gl::DeleteShader(fs);
                return Err(err);
            }
        };

        gl::DetachShader(id, vs);
        gl::DeleteShader(vs);
        gl::DetachShader(id, fs);
        gl::DeleteShader(fs);
        check()?;

        let shader = GLShaderData {
            id,
            uniforms: RefCell::new(HashMap::new()),
        };

        self.shaders.create(handle, shader);
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        if self.state.binded_shader == Some(handle) {
            self.state.binded_shader = None;
        }

        gl::DeleteProgram(shader.id);
        check()
    }

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .get(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        Self::use_program(&mut self.state, handle, shader.id)
    }

    unsafe fn set_uniform(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        variable: UniformVariable,
    ) -> Result<()> {
        let shader = self
            .shaders
            .get(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        let location = shader.uniform_location(name)?;
        if location == -1 {
            trace!("{} has no active uniform {:?}.", handle, name);
            return Ok(());
        }

        Self::use_program(&mut self.state, handle, shader.id)?;
        Self::bind_uniform_variable(location, &variable)
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: TextureData,
    ) -> Result<()> {
        if data.bytes.len() < params.len() {
            bail!(
                "{} expects {} bytes of pixels, got {}.",
                handle,
                params.len(),
                data.bytes.len()
            );
        }

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        if id == 0 {
            bail!("Failed to generate texture object.");
        }

        Self::bind_texture_unit(&mut self.state, Some(Sampler::Texture(handle)), 0, id)?;

        Self::bind_texture_params(params.wrap, params.filter)?;

        let (internal_format, format, pixel_type) = params.format.into();
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            internal_format as GLint,
            params.dimensions.x as GLsizei,
            params.dimensions.y as GLsizei,
            0,
            format,
            pixel_type,
            data.bytes.as_ptr() as *const ::std::os::raw::c_void,
        );

        check()?;
        self.textures.create(handle, GLTextureData { id });
        Ok(())
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        let texture = self
            .textures
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        for v in self.state.binded_textures.iter_mut() {
            if *v == Some(Sampler::Texture(handle)) {
                *v = None;
            }
        }

        gl::DeleteTextures(1, &texture.id);
        check()
    }

    unsafe fn create_render_texture(
        &mut self,
        handle: RenderTextureHandle,
        params: RenderTextureParams,
    ) -> Result<()> {
        let mut id = 0;
        gl::GenTextures(1, &mut id);
        if id == 0 {
            bail!("Failed to generate texture object.");
        }

        Self::bind_texture_unit(&mut self.state, Some(Sampler::RenderTexture(handle)), 0, id)?;
        Self::bind_texture_params(params.wrap, params.filter)?;

        if params.wrap == TextureWrap::Border {
            let border = [1.0f32, 1.0, 1.0, 1.0];
            gl::TexParameterfv(gl::TEXTURE_2D, gl::TEXTURE_BORDER_COLOR, border.as_ptr());
        }

        let (internal_format, format, pixel_type) = params.format.into();
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            internal_format as GLint,
            params.dimensions.x as GLsizei,
            params.dimensions.y as GLsizei,
            0,
            format,
            pixel_type,
            ::std::ptr::null(),
        );

        check()?;

        self.render_textures
            .create(handle, GLRenderTextureData { id, params });

        Ok(())
    }

    unsafe fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()> {
        let rt = self
            .render_textures
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        for v in self.state.binded_textures.iter_mut() {
            if *v == Some(Sampler::RenderTexture(handle)) {
                *v = None;
            }
        }

        gl::DeleteTextures(1, &rt.id);
        check()
    }

    unsafe fn bind_texture(&mut self, unit: u32, sampler: Sampler) -> Result<()> {
        let id = match sampler {
            Sampler::Texture(handle) => {
                self.textures
                    .get(handle)
                    .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?
                    .id
            }
            Sampler::RenderTexture(handle) => {
                self.render_textures
                    .get(handle)
                    .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?
                    .id
            }
        };

        Self::bind_texture_unit(&mut self.state, Some(sampler), unit, id)
    }

    unsafe fn reset_texture_unit(&mut self) -> Result<()> {
        if self.state.binded_texture_index != 0 {
            self.state.binded_texture_index = 0;
            gl::ActiveTexture(gl::TEXTURE0);
        }

        check()
    }

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()> {
        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);

        let vbo = Self::create_buffer(gl::ARRAY_BUFFER, params.vertex_buffer_len(), &data.vptr)?;
        let ibo = Self::create_buffer(
            gl::ELEMENT_ARRAY_BUFFER,
            params.index_buffer_len(),
            &data.iptr,
        )?;

        let stride = params.layout.stride();
        for (attribute, size, offset) in params.layout.attributes() {
            let location = attribute as GLuint;
            gl::EnableVertexAttribArray(location);
            gl::VertexAttribPointer(
                location,
                GLint::from(size),
                gl::FLOAT,
                gl::FALSE,
                stride as GLsizei,
                offset as *const u8 as *const ::std::os::raw::c_void,
            );
        }

        gl::BindVertexArray(0);
        check()?;

        self.meshes.create(
            handle,
            GLMeshData {
                vao,
                vbo,
                ibo,
                params,
            },
        );

        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mesh = self
            .meshes
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        gl::DeleteVertexArrays(1, &mesh.vao);
        gl::DeleteBuffers(1, &mesh.vbo);
        gl::DeleteBuffers(1, &mesh.ibo);
        check()
    }

    unsafe fn create_surface(
        &mut self,
        handle: SurfaceHandle,
        params: SurfaceParams,
    ) -> Result<()> {
        let mut id = 0;
        gl::GenFramebuffers(1, &mut id);
        if id == 0 {
            bail!("Failed to generate framebuffer object.");
        }

        gl::BindFramebuffer(gl::FRAMEBUFFER, id);

        let mut dimensions = None;
        for &rt in params.depth.iter() {
            let rt = match self.render_textures.get(rt) {
                Some(rt) => *rt,
                None => {
                    gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
                    gl::DeleteFramebuffers(1, &id);
                    let msg = format!("{} is not a valid attachment", rt);
                    return Err(Error::SurfaceIncomplete(msg).into());
                }
            };

            Self::update_framebuffer_render_texture(rt.id, rt.params)?;
            dimensions = dimensions.or(Some(rt.params.dimensions));
        }

        gl::DrawBuffer(gl::NONE);
        gl::ReadBuffer(gl::NONE);

        let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        self.state.binded_surface = None;

        if status != gl::FRAMEBUFFER_COMPLETE {
            gl::DeleteFramebuffers(1, &id);
            let msg = format!("Framebuffer status is 0x{:x}", status);
            return Err(Error::SurfaceIncomplete(msg).into());
        }

        check()?;

        let dimensions =
            dimensions.ok_or_else(|| Error::SurfaceIncomplete("no attachment".into()))?;
        self.surfaces
            .create(handle, GLSurfaceData { id, dimensions });

        Ok(())
    }

    unsafe fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()> {
        let surface = self
            .surfaces
            .free(handle)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

        if self.state.binded_surface == Some(handle) {
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
            self.state.binded_surface = None;
        }

        gl::DeleteFramebuffers(1, &surface.id);
        check()
    }

    unsafe fn bind_surface(
        &mut self,
        surface: Option<SurfaceHandle>,
        dimensions: Vector2<u32>,
    ) -> Result<()> {
        let (id, dimensions) = match surface {
            Some(handle) => {
                let surface = self
                    .surfaces
                    .get(handle)
                    .ok_or_else(|| Error::HandleInvalid(format!("{}", handle)))?;

                (surface.id, surface.dimensions)
            }
            None => (0, dimensions),
        };

        gl::BindFramebuffer(gl::FRAMEBUFFER, id);
        check()?;

        self.state.binded_surface = surface;
        Self::set_viewport(&mut self.state, SurfaceViewport::from_size(dimensions))
    }

    unsafe fn update_surface_viewport(&mut self, vp: SurfaceViewport) -> Result<()> {
        Self::set_viewport(&mut self.state, vp)
    }

    unsafe fn clear(
        &mut self,
        color: Option<Color<f32>>,
        depth: Option<f32>,
        stencil: Option<i32>,
    ) -> Result<()> {
        let mut bits = 0;
        if let Some(v) = color {
            bits |= gl::COLOR_BUFFER_BIT;
            gl::ClearColor(v.r, v.g, v.b, v.a);
        }

        if let Some(v) = depth {
            bits |= gl::DEPTH_BUFFER_BIT;
            gl::ClearDepth(f64::from(v));
        }

        if let Some(v) = stencil {
            bits |= gl::STENCIL_BUFFER_BIT;
            gl::ClearStencil(v);
        }

        if bits != 0 {
            gl::Clear(bits);
            check()
        } else {
            Ok(())
        }
    }

    unsafe fn update_render_state(&mut self, rs: RenderState) -> Result<()> {
        Self::set_cull_face(&mut self.state, rs.cull_face)?;
        Self::set_depth_test(&mut self.state, rs.depth_write, rs.depth_test)?;
        Self::set_color_blend(&mut self.state, rs.color_blend)?;
        Self::set_stencil(&mut self.state, rs.stencil)
    }

    unsafe fn draw(&mut self, shader: ShaderHandle, mesh: MeshHandle) -> Result<u32> {
        let id = self
            .shaders
            .get(shader)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", shader)))?
            .id;

        Self::use_program(&mut self.state, shader, id)?;

        let mesh = self
            .meshes
            .get(mesh)
            .ok_or_else(|| Error::HandleInvalid(format!("{}", mesh)))?;

        gl::BindVertexArray(mesh.vao);
        gl::DrawElements(
            gl::TRIANGLES,
            mesh.params.num_idxes as GLsizei,
            gl::UNSIGNED_INT,
            ::std::ptr::null(),
        );
        gl::BindVertexArray(0);

        check()?;
        Ok((mesh.params.num_idxes / 3) as u32)
    }

    unsafe fn flush(&mut self) -> Result<()> {
        gl::Finish();
        check()
    }
}

impl GLVisitor {
    unsafe fn use_program(
        state: &mut GLMutableState,
        handle: ShaderHandle,
        id: GLuint,
    ) -> Result<()> {
        if state.binded_shader == Some(handle) {
            return Ok(());
        }

        gl::UseProgram(id);
        state.binded_shader = Some(handle);
        check()
    }

    unsafe fn bind_uniform_variable(location: GLint, variable: &UniformVariable) -> Result<()> {
        match *variable {
            UniformVariable::Bool(v) => gl::Uniform1i(location, v as GLint),
            UniformVariable::I32(v) => gl::Uniform1i(location, v),
            UniformVariable::F32(v) => gl::Uniform1f(location, v),
            UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
            UniformVariable::Vector3f(v) => gl::Uniform3f(location, v[0], v[1], v[2]),
            UniformVariable::Vector4f(v) => gl::Uniform4f(location, v[0], v[1], v[2], v[3]),
            UniformVariable::Matrix3f(v) => {
                gl::UniformMatrix3fv(location, 1, gl::FALSE, v[0].as_ptr())
            }
            UniformVariable::Matrix4f(v) => {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, v[0].as_ptr())
            }
        }

        check()
    }

    unsafe fn bind_texture_unit(
        state: &mut GLMutableState,
        sampler: Option<Sampler>,
        index: u32,
        id: GLuint,
    ) -> Result<()> {
        if state.binded_texture_index != index {
            state.binded_texture_index = index;
            gl::ActiveTexture(gl::TEXTURE0 + index);
        }

        let slot = index as usize;
        if state.binded_textures.len() <= slot {
            state.binded_textures.resize(slot + 1, None);
        }

        if state.binded_textures[slot] != sampler {
            state.binded_textures[slot] = sampler;
            gl::BindTexture(gl::TEXTURE_2D, id);
        }

        check()
    }
}

impl GLVisitor {
    unsafe fn reset_render_state(state: &mut GLMutableState) -> Result<()> {
        gl::Disable(gl::CULL_FACE);
        state.render_state.cull_face = CullFace::Nothing;

        gl::Disable(gl::DEPTH_TEST);
        gl::DepthMask(gl::FALSE);
        state.render_state.depth_write = false;
        gl::DepthFunc(gl::ALWAYS);
        state.render_state.depth_test = Comparison::Always;

        gl::Disable(gl::BLEND);
        state.render_state.color_blend = None;

        gl::Disable(gl::STENCIL_TEST);
        gl::StencilFunc(gl::ALWAYS, 0, 0xFF);
        gl::StencilMask(0xFF);
        gl::StencilOp(gl::KEEP, gl::KEEP, gl::KEEP);
        state.render_state.stencil = None;
        state.stencil = StencilState::default();

        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

        check()
    }

    /// Specify whether front- or back-facing polygons can be culled.
    unsafe fn set_cull_face(state: &mut GLMutableState, face: CullFace) -> Result<()> {
        let rs = &mut state.render_state;

        if rs.cull_face != face {
            match face {
                CullFace::Nothing => gl::Disable(gl::CULL_FACE),
                CullFace::Front => {
                    gl::Enable(gl::CULL_FACE);
                    gl::CullFace(gl::FRONT);
                }
                CullFace::Back => {
                    gl::Enable(gl::CULL_FACE);
                    gl::CullFace(gl::BACK);
                }
            }

            rs.cull_face = face;
            check()?;
        }

        Ok(())
    }

    /// Enable or disable writing into the depth buffer and specify the value used for depth
    /// buffer comparisons.
    unsafe fn set_depth_test(
        state: &mut GLMutableState,
        write: bool,
        comparsion: Comparison,
    ) -> Result<()> {
        let rs = &mut state.render_state;

        // Note that even if the depth buffer exists and the depth mask is non-zero,
        // the depth buffer is not updated if the depth test is disabled.
        let enable = comparsion != Comparison::Always || write;
        if enable != rs.is_depth_enabled() {
            if enable {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
        }

        if rs.depth_write != write {
            gl::DepthMask(if write { gl::TRUE } else { gl::FALSE });
            rs.depth_write = write;
        }

        if rs.depth_test != comparsion {
            gl::DepthFunc(comparsion.into());
            rs.depth_test = comparsion;
        }

        check()
    }

    // Specifies how source and destination are combined.
    unsafe fn set_color_blend(
        state: &mut GLMutableState,
        blend: Option<(Equation, BlendFactor, BlendFactor)>,
    ) -> Result<()> {
        let rs = &mut state.render_state;

        if rs.color_blend != blend {
            if let Some((equation, src, dst)) = blend {
                if rs.color_blend == None {
                    gl::Enable(gl::BLEND);
                }

                gl::BlendFunc(src.into(), dst.into());
                gl::BlendEquation(equation.into());
            } else if rs.color_blend != None {
                gl::Disable(gl::BLEND);
            }

            rs.color_blend = blend;
            check()?;
        }

        Ok(())
    }

    /// Enable or disable the stencil test, and sets its function, masks and ops. The
    /// last applied parameters are remembered while the test is disabled.
    unsafe fn set_stencil(state: &mut GLMutableState, stencil: Option<StencilState>) -> Result<()> {
        let enabled = state.render_state.stencil.is_some();

        match stencil {
            Some(v) => {
                if !enabled {
                    gl::Enable(gl::STENCIL_TEST);
                }

                let last = state.stencil;
                if last.func != v.func
                    || last.reference != v.reference
                    || last.read_mask != v.read_mask
                {
                    gl::StencilFunc(v.func.into(), v.reference, v.read_mask);
                }

                if last.write_mask != v.write_mask {
                    gl::StencilMask(v.write_mask);
                }

                if last.ops != v.ops {
                    gl::StencilOp(v.ops.0.into(), v.ops.1.into(), v.ops.2.into());
                }

                state.stencil = v;
            }
            None => {
                if enabled {
                    gl::Disable(gl::STENCIL_TEST);
                }
            }
        }

        state.render_state.stencil = stencil;
        check()
    }

    /// Set the viewport relative to the bottom-left corner of the target, in pixels.
    unsafe fn set_viewport(state: &mut GLMutableState, vp: SurfaceViewport) -> Result<()> {
        if state.view != vp {
            gl::Viewport(
                vp.position.x,
                vp.position.y,
                vp.size.x as i32,
                vp.size.y as i32,
            );

            state.view = vp;
            check()?;
        }

        Ok(())
    }
}

impl GLVisitor {
    unsafe fn update_framebuffer_render_texture(
        id: GLuint,
        params: RenderTextureParams,
    ) -> Result<()> {
        let location = match params.format {
            RenderTextureFormat::Depth24 => gl::DEPTH_ATTACHMENT,
        };

        gl::FramebufferTexture2D(gl::FRAMEBUFFER, location, gl::TEXTURE_2D, id, 0);
        check()
    }

    unsafe fn compile(shader: GLenum, src: &str) -> Result<GLuint> {
        let c_str = CString::new(src.as_bytes())
            .map_err(|_| Error::ShaderCreation("source contains a nul byte".into()))?;

        let shader = gl::CreateShader(shader);
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ::std::ptr::null());
        gl::CompileShader(shader);

        // Get the compile status
        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        // Fail on error
        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                len,
                ::std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );

            gl::DeleteShader(shader);
            Err(Error::ShaderCreation(info_log(&buf)).into())
        } else {
            Ok(shader)
        }
    }

    unsafe fn link<'a, T>(shaders: T) -> Result<GLuint>
    where
        T: IntoIterator<Item = &'a GLuint>,
    {
        let program = gl::CreateProgram();
        for shader in shaders {
            gl::AttachShader(program, *shader)
        }

        gl::LinkProgram(program);
        // Get the link status
        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        // Fail on error
        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                program,
                len,
                ::std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );

            gl::DeleteProgram(program);
            Err(Error::ShaderCreation(info_log(&buf)).into())
        } else {
            Ok(program)
        }
    }

    unsafe fn create_buffer(tp: GLuint, size: usize, data: &[u8]) -> Result<GLuint> {
        if data.len() != size {
            bail!("Buffer expects {} bytes, got {}.", size, data.len());
        }

        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            bail!("Failed to generate buffer object.");
        }

        gl::BindBuffer(tp, id);

        let value = if data.is_empty() {
            ::std::ptr::null()
        } else {
            data.as_ptr() as *const ::std::os::raw::c_void
        };

        gl::BufferData(tp, size as isize, value, gl::STATIC_DRAW);
        check()?;
        Ok(id)
    }

    unsafe fn bind_texture_params(wrap: TextureWrap, filter: TextureFilter) -> Result<()> {
        let wrap: GLenum = wrap.into();
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap as GLint);

        let filter = match filter {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        };

        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter as GLint);
        check()
    }
}

fn info_log(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_owned()
}

unsafe fn gl_string(name: GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return String::new();
    }

    CStr::from_ptr(ptr as *const ::std::os::raw::c_char)
        .to_string_lossy()
        .into_owned()
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }

        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),

        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }

        gl::INVALID_FRAMEBUFFER_OPERATION => bail!(
            r"[GL] The command is trying to render to or read from the framebuffer while the \
            currently bound framebuffer is not framebuffer complete."
        ),

        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),
        _ => bail!("[GL] Oops, Unknown OpenGL error."),
    }
}
