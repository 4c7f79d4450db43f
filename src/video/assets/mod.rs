pub mod mesh;
pub mod shader;
pub mod surface;
pub mod texture;

pub mod prelude {
    pub use super::mesh::{Attribute, MeshData, MeshHandle, MeshParams, VertexLayout};

    pub use super::shader::{
        BlendFactor, BlendValue, Comparison, CullFace, Equation, RenderState, ShaderHandle,
        StencilOp, StencilState, UniformVariable,
    };

    pub use super::surface::{SurfaceHandle, SurfaceParams, SurfaceViewport};

    pub use super::texture::{
        RenderTextureFormat, RenderTextureHandle, RenderTextureParams, Sampler, TextureData,
        TextureFilter, TextureFormat, TextureHandle, TextureParams, TextureWrap,
    };
}
