//! Owning wrappers of GPU objects: shader programs, textures, meshes and the
//! models assembled from them.
//!
//! Every wrapper keeps an `Rc<VideoSystem>` and releases its object when it is
//! dropped.

pub mod geometry;
pub mod importer;
pub mod model;
pub mod shader;
pub mod texture;

pub mod prelude {
    pub use super::geometry::{GeometryBuffer, MeshTexture, TextureKind, Vertex};
    pub use super::importer::{ObjImporter, Scene, SceneImporter, SceneMaterial, SceneMesh, SceneNode};
    pub use super::model::Model;
    pub use super::shader::ShaderProgram;
    pub use super::texture::{FileDecoder, Image, ImageDecoder, Texture2D};
}
