use std::rc::Rc;

use crate::errors::*;
use crate::graphics::prelude::ShaderProgram;
use crate::math::prelude::*;
use crate::math::ortho;
use crate::utils::finally;
use crate::video::prelude::*;

use super::RenderContext;

const VS: &str = include_str!("shaders/depth.vs");
const FS: &str = include_str!("shaders/depth.fs");

/// Renders the depth of the scene as seen from the light into a square depth
/// texture.
pub struct ShadowPass {
    video: Rc<VideoSystem>,
    shader: ShaderProgram,
    depth: RenderTextureHandle,
    surface: SurfaceHandle,
    size: u32,
}

impl ShadowPass {
    pub fn new(video: &Rc<VideoSystem>, size: u32) -> Result<Self> {
        let shader = ShaderProgram::new(video, VS, FS)?;

        let params = RenderTextureParams {
            format: RenderTextureFormat::Depth24,
            wrap: TextureWrap::Border,
            filter: TextureFilter::Nearest,
            dimensions: Vector2::new(size, size),
        };

        let depth = video.create_render_texture(params)?;

        let params = SurfaceParams { depth: Some(depth) };

        let surface = match video.create_surface(params) {
            Ok(surface) => surface,
            Err(err) => {
                if let Err(err) = video.delete_render_texture(depth) {
                    warn!("Failed to delete {}: {}", depth, err);
                }

                return Err(err);
            }
        };

        info!("Created {}x{} shadow map.", size, size);
        Ok(ShadowPass {
            video: video.clone(),
            shader,
            depth,
            surface,
            size,
        })
    }

    /// The projection from world space into the clip space of the light, which
    /// looks at the origin.
    pub fn light_space_matrix(light: Vector3<f32>) -> Matrix4<f32> {
        let projection = ortho(-10.0, 10.0, -10.0, 10.0, 1.0, 20.0);
        let view = Matrix4::look_at(
            Point3::from_vec(light),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );

        projection * view
    }

    /// Renders the depth of every drawable. The default framebuffer and its
    /// viewport are bound again on return, whether drawing succeeded or not.
    pub fn run(&self, ctx: &RenderContext) -> Result<()> {
        self.video.bind_surface(Some(self.surface))?;

        let video = &self.video;
        let _restore = finally((), |_| {
            if let Err(err) = video.bind_surface(None) {
                warn!("Failed to restore the default framebuffer: {}", err);
            }
        });

        self.video
            .set_viewport(SurfaceViewport::from_size(Vector2::new(self.size, self.size)))?;

        self.video.set_render_state(RenderState {
            depth_test: Comparison::Less,
            depth_write: true,
            ..Default::default()
        })?;

        self.video.clear(None, Some(1.0), None)?;

        self.shader.bind()?;
        self.shader
            .set_uniform("lightSpaceMatrix", Self::light_space_matrix(ctx.light_position))?;

        for v in ctx.drawables() {
            v.model.draw_with(&self.shader, v.tint, v.transform)?;
        }

        Ok(())
    }

    /// The depth texture written by `run`.
    #[inline]
    pub fn depth_map(&self) -> RenderTextureHandle {
        self.depth
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Drop for ShadowPass {
    fn drop(&mut self) {
        if let Err(err) = self.video.delete_surface(self.surface) {
            warn!("Failed to delete {}: {}", self.surface, err);
        }

        if let Err(err) = self.video.delete_render_texture(self.depth) {
            warn!("Failed to delete {}: {}", self.depth, err);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn light_looks_at_origin() {
        let m = ShadowPass::light_space_matrix(Vector3::new(-2.0, 4.0, -1.0));
        let origin = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.x.abs() < 1e-5);
        assert!(origin.y.abs() < 1e-5);
        assert!(origin.z > -1.0 && origin.z < 1.0);
    }
}
