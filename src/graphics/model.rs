use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use crate::errors::*;
use crate::math::prelude::{Color, Matrix4};
use crate::video::prelude::VideoSystem;

use super::geometry::{GeometryBuffer, MeshTexture, TextureKind, Vertex};
use super::importer::{Scene, SceneImporter, SceneMesh, SceneNode};
use super::shader::ShaderProgram;
use super::texture::{ImageDecoder, Texture2D};

/// An ordered collection of `GeometryBuffer`s built from an imported scene,
/// along with the textures they share.
pub struct Model {
    meshes: Vec<GeometryBuffer>,
    textures: HashMap<String, Rc<Texture2D>>,
    directory: String,
}

impl Model {
    /// Imports the scene at `path` and uploads it. Texture paths are resolved
    /// against the directory of `path`.
    pub fn load<I, D>(video: &Rc<VideoSystem>, path: &Path, importer: &I, decoder: &D) -> Result<Self>
    where
        I: SceneImporter + ?Sized,
        D: ImageDecoder + ?Sized,
    {
        let scene = importer.import(path)?;
        let directory = path.parent().unwrap_or_else(|| Path::new(""));

        let model = Self::from_scene(video, &scene, directory, decoder)?;

        info!(
            "Loaded model {:?} with {} meshes and {} textures.",
            path,
            model.meshes.len(),
            model.textures.len()
        );

        Ok(model)
    }

    /// Builds a model from `scene` by walking its nodes depth first, the meshes
    /// of a node before its children. Texture paths are resolved against
    /// `directory`, an empty one standing for the working directory.
    pub fn from_scene<D>(
        video: &Rc<VideoSystem>,
        scene: &Scene,
        directory: &Path,
        decoder: &D,
    ) -> Result<Self>
    where
        D: ImageDecoder + ?Sized,
    {
        let root = match scene.root() {
            Some(root) => root,
            None => {
                return Err(Error::SceneImport(
                    directory.display().to_string(),
                    "the scene is incomplete".into(),
                )
                .into())
            }
        };

        let mut model = Model {
            meshes: Vec::new(),
            textures: HashMap::new(),
            directory: if directory.as_os_str().is_empty() {
                ".".to_owned()
            } else {
                directory.to_string_lossy().into_owned()
            },
        };

        model.process_node(video, scene, root, decoder)?;
        Ok(model)
    }

    fn process_node<D>(
        &mut self,
        video: &Rc<VideoSystem>,
        scene: &Scene,
        node: &SceneNode,
        decoder: &D,
    ) -> Result<()>
    where
        D: ImageDecoder + ?Sized,
    {
        for &index in &node.meshes {
            let mesh = scene
                .meshes
                .get(index)
                .ok_or_else(|| format_err!("node {:?} references missing mesh {}", node.name, index))?;

            let buffer = self.process_mesh(video, scene, mesh, decoder)?;
            self.meshes.push(buffer);
        }

        for child in &node.children {
            self.process_node(video, scene, child, decoder)?;
        }

        Ok(())
    }

    fn process_mesh<D>(
        &mut self,
        video: &Rc<VideoSystem>,
        scene: &Scene,
        mesh: &SceneMesh,
        decoder: &D,
    ) -> Result<GeometryBuffer>
    where
        D: ImageDecoder + ?Sized,
    {
        let vertices = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: mesh.normals.get(i).cloned().unwrap_or([0.0, 0.0, 0.0]),
                texcoord: mesh
                    .texcoords
                    .as_ref()
                    .map(|v| v.get(i).cloned().unwrap_or([0.0, 0.0])),
            })
            .collect();

        let indices = mesh.faces.iter().flat_map(|v| v.iter().cloned()).collect();

        let mut textures = Vec::new();
        if let Some(material) = mesh.material.and_then(|v| scene.materials.get(v)) {
            for rel in &material.diffuse {
                let texture = self.texture(video, rel, decoder)?;
                textures.push(MeshTexture {
                    kind: TextureKind::Diffuse,
                    texture,
                });
            }

            for rel in &material.specular {
                let texture = self.texture(video, rel, decoder)?;
                textures.push(MeshTexture {
                    kind: TextureKind::Specular,
                    texture,
                });
            }
        }

        GeometryBuffer::new(video, vertices, indices, textures)
    }

    /// Returns the cached texture at `rel`, decoding and uploading it on first use.
    fn texture<D>(&mut self, video: &Rc<VideoSystem>, rel: &str, decoder: &D) -> Result<Rc<Texture2D>>
    where
        D: ImageDecoder + ?Sized,
    {
        let path = format!("{}/{}", self.directory, rel);
        if let Some(texture) = self.textures.get(&path) {
            return Ok(texture.clone());
        }

        let texture = Rc::new(Texture2D::load(video, decoder, Path::new(&path))?);
        self.textures.insert(path, texture.clone());
        Ok(texture)
    }

    /// Draws every mesh in order with `shader`.
    pub fn draw(&self, shader: &ShaderProgram, tint: Color<f32>) -> Result<u32> {
        let mut triangles = 0;
        for mesh in &self.meshes {
            triangles += mesh.draw(shader, tint)?;
        }

        Ok(triangles)
    }

    /// Writes `model` to the shader, then draws every mesh.
    pub fn draw_with(
        &self,
        shader: &ShaderProgram,
        tint: Color<f32>,
        transform: Matrix4<f32>,
    ) -> Result<u32> {
        shader.bind()?;
        shader.set_uniform("model", transform)?;
        self.draw(shader, tint)
    }

    #[inline]
    pub fn meshes(&self) -> &[GeometryBuffer] {
        &self.meshes
    }

    /// The number of distinct textures uploaded for this model.
    #[inline]
    pub fn textures_loaded(&self) -> usize {
        self.textures.len()
    }
}
