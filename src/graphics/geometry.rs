//! GPU-resident vertex and index data of one drawable primitive.

use std::rc::Rc;

use crate::errors::*;
use crate::math::prelude::Color;
use crate::video::prelude::{MeshData, MeshHandle, MeshParams, VertexLayout, VideoSystem};

use super::shader::ShaderProgram;
use super::texture::Texture2D;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: Option<[f32; 2]>,
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Vertex {
            position,
            normal,
            texcoord: None,
        }
    }

    pub fn with_texcoord(mut self, texcoord: [f32; 2]) -> Self {
        self.texcoord = Some(texcoord);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    /// The prefix of the sampler uniforms this kind of texture is bound to.
    pub fn uniform_prefix(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "textureDiffuse",
            TextureKind::Specular => "textureSpecular",
        }
    }
}

/// A texture referenced by a mesh. Textures are shared through the cache of the
/// `Model`, so the last owner releases it.
#[derive(Clone)]
pub struct MeshTexture {
    pub kind: TextureKind,
    pub texture: Rc<Texture2D>,
}

/// Owns the vertex array, vertex buffer and index buffer of one indexed
/// triangle list.
pub struct GeometryBuffer {
    video: Rc<VideoSystem>,
    handle: MeshHandle,
    layout: VertexLayout,
    num_idxes: usize,
    textures: Vec<MeshTexture>,
}

impl GeometryBuffer {
    /// Uploads `vertices` and `indices`. Texture coordinates are part of the
    /// layout if any vertex carries them; vertices without one get `(0, 0)`.
    pub fn new(
        video: &Rc<VideoSystem>,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        textures: Vec<MeshTexture>,
    ) -> Result<Self> {
        if let Some(&i) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            bail!(
                "Index {} is out of bounds of {} vertices.",
                i,
                vertices.len()
            );
        }

        let layout = VertexLayout {
            texcoord: vertices.iter().any(|v| v.texcoord.is_some()),
        };

        let mut floats = Vec::with_capacity(vertices.len() * layout.stride() / 4);
        for v in &vertices {
            floats.extend_from_slice(&v.position);
            floats.extend_from_slice(&v.normal);
            if layout.texcoord {
                floats.extend_from_slice(&v.texcoord.unwrap_or([0.0, 0.0]));
            }
        }

        let params = MeshParams {
            layout,
            num_verts: vertices.len(),
            num_idxes: indices.len(),
        };

        let handle = video.create_mesh(params, MeshData::new(&floats, &indices))?;
        trace!(
            "Created {} with {} vertices and {} indices.",
            handle,
            params.num_verts,
            params.num_idxes
        );

        Ok(GeometryBuffer {
            video: video.clone(),
            handle,
            layout,
            num_idxes: indices.len(),
            textures,
        })
    }

    /// Binds `shader`, writes `objectColor` and the sampler units, and draws
    /// the triangle list. Textures take the units from 0 in order; the active
    /// unit is reset to 0 afterwards.
    pub fn draw(&self, shader: &ShaderProgram, tint: Color<f32>) -> Result<u32> {
        shader.bind()?;
        shader.set_uniform("objectColor", tint)?;
        shader.set_uniform("useTexture", !self.textures.is_empty())?;

        let (mut diffuse, mut specular) = (0, 0);
        for (unit, v) in self.textures.iter().enumerate() {
            let n = match v.kind {
                TextureKind::Diffuse => &mut diffuse,
                TextureKind::Specular => &mut specular,
            };

            let name = format!("{}{}", v.kind.uniform_prefix(), n);
            *n += 1;

            shader.set_uniform(&name, unit as i32)?;
            self.video.bind_texture(unit as u32, v.texture.handle())?;
        }

        let triangles = self.video.draw(shader.handle(), self.handle)?;
        self.video.reset_texture_unit()?;
        Ok(triangles)
    }

    #[inline]
    pub fn handle(&self) -> MeshHandle {
        self.handle
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.num_idxes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_idxes == 0
    }

    #[inline]
    pub fn textures(&self) -> &[MeshTexture] {
        &self.textures
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        if let Err(err) = self.video.delete_mesh(self.handle) {
            warn!("Failed to delete {}: {}", self.handle, err);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graphics::texture::Image;
    use crate::math::prelude::Vector2;
    use crate::video::prelude::*;

    const VS: &str = "uniform mat4 model;\nvoid main() {}";
    const FS: &str = "uniform vec4 objectColor;\nuniform bool useTexture;\n\
                      uniform sampler2D textureDiffuse0;\nuniform sampler2D textureDiffuse1;\n\
                      uniform sampler2D textureSpecular0;\nvoid main() {}";

    fn triangle() -> Vec<Vertex> {
        vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Vertex::new([0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ]
    }

    fn texture(video: &Rc<VideoSystem>) -> Rc<Texture2D> {
        let image = Image {
            dimensions: Vector2::new(1, 1),
            pixels: vec![255; 4],
        };

        Rc::new(Texture2D::new(video, image).unwrap())
    }

    #[test]
    fn layout_follows_texcoords() {
        let (video, recorder) = VideoSystem::headless();
        let video = Rc::new(video);

        let mesh = GeometryBuffer::new(&video, triangle(), vec![0, 1, 2], vec![]).unwrap();
        assert!(!mesh.layout().texcoord);

        let mut vertices = triangle();
        vertices[1] = vertices[1].with_texcoord([1.0, 0.0]);
        let textured = GeometryBuffer::new(&video, vertices, vec![0, 1, 2], vec![]).unwrap();
        assert!(textured.layout().texcoord);
        assert_eq!(recorder.meshes_alive(), 2);

        drop(mesh);
        drop(textured);
        assert_eq!(recorder.meshes_alive(), 0);
    }

    #[test]
    fn rejects_out_of_bounds_indices() {
        let (video, recorder) = VideoSystem::headless();
        let video = Rc::new(video);

        assert!(GeometryBuffer::new(&video, triangle(), vec![0, 1, 3], vec![]).is_err());
        assert_eq!(recorder.meshes_alive(), 0);
    }

    #[test]
    fn draw_binds_textures_in_order() {
        let (video, recorder) = VideoSystem::headless();
        let video = Rc::new(video);
        let shader = ShaderProgram::new(&video, VS, FS).unwrap();

        let (a, b, c) = (texture(&video), texture(&video), texture(&video));
        let textures = vec![
            MeshTexture { kind: TextureKind::Diffuse, texture: a.clone() },
            MeshTexture { kind: TextureKind::Specular, texture: b.clone() },
            MeshTexture { kind: TextureKind::Diffuse, texture: c.clone() },
        ];

        let mesh = GeometryBuffer::new(&video, triangle(), vec![0, 1, 2], textures).unwrap();
        recorder.take();

        assert_eq!(mesh.draw(&shader, Color::white()).unwrap(), 1);

        let h = shader.handle();
        assert_eq!(recorder.uniform(h, "textureDiffuse0"), Some(UniformVariable::I32(0)));
        assert_eq!(recorder.uniform(h, "textureSpecular0"), Some(UniformVariable::I32(1)));
        assert_eq!(recorder.uniform(h, "textureDiffuse1"), Some(UniformVariable::I32(2)));
        assert_eq!(recorder.uniform(h, "useTexture"), Some(UniformVariable::Bool(true)));

        let commands = recorder.take();
        let binds: Vec<_> = commands
            .iter()
            .filter_map(|v| match *v {
                Command::BindTexture(unit, sampler) => Some((unit, sampler)),
                _ => None,
            })
            .collect();

        assert_eq!(
            binds,
            vec![
                (0, Sampler::from(a.handle())),
                (1, Sampler::from(b.handle())),
                (2, Sampler::from(c.handle())),
            ]
        );

        assert_eq!(commands.first(), Some(&Command::BindShader(h)));
        assert_eq!(commands.last(), Some(&Command::ResetTextureUnit));
    }

    #[test]
    fn textures_outlive_the_mesh_while_shared() {
        let (video, recorder) = VideoSystem::headless();
        let video = Rc::new(video);

        let shared = texture(&video);
        let owned = texture(&video);
        let textures = vec![
            MeshTexture { kind: TextureKind::Diffuse, texture: shared.clone() },
            MeshTexture { kind: TextureKind::Specular, texture: owned },
        ];

        let mesh = GeometryBuffer::new(&video, triangle(), vec![0, 1, 2], textures).unwrap();
        assert_eq!(recorder.textures_alive(), 2);

        drop(mesh);
        assert_eq!(recorder.textures_alive(), 1);
        drop(shared);
        assert_eq!(recorder.textures_alive(), 0);
    }
}
