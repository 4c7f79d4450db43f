//! The lit colour pass, with a stencil outline around the pieces.
//!
//! The pass walks through the phases of `OutlinePhase::SEQUENCE` every frame:
//!
//! 1. `Opaque` draws the tiles without touching the stencil buffer.
//! 2. `Outlined` draws the pieces and writes 1 into the stencil buffer wherever
//!    they cover.
//! 3. `Outline` redraws the pieces slightly scaled up with a flat colour, with
//!    depth testing off, only where the stencil buffer is not 1.
//! 4. `Cleanup` makes the stencil buffer writable again and restores depth
//!    testing, so the next clear resets it.

use std::rc::Rc;

use crate::errors::*;
use crate::graphics::prelude::ShaderProgram;
use crate::math::prelude::*;
use crate::video::prelude::*;

use super::shadow::ShadowPass;
use super::RenderContext;

const SCENE_VS: &str = include_str!("shaders/scene.vs");
const SCENE_FS: &str = include_str!("shaders/scene.fs");
const OUTLINE_VS: &str = include_str!("shaders/outline.vs");
const OUTLINE_FS: &str = include_str!("shaders/outline.fs");

/// Texture unit of the shadow map, above the units taken by model textures.
pub const SHADOW_MAP_UNIT: u32 = 8;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlinePhase {
    Opaque,
    Outlined,
    Outline,
    Cleanup,
}

impl OutlinePhase {
    /// The order the phases run in every frame.
    pub const SEQUENCE: [OutlinePhase; 4] = [
        OutlinePhase::Opaque,
        OutlinePhase::Outlined,
        OutlinePhase::Outline,
        OutlinePhase::Cleanup,
    ];

    pub fn render_state(self) -> RenderState {
        let base = RenderState {
            cull_face: CullFace::Nothing,
            depth_test: Comparison::Less,
            depth_write: true,
            color_blend: RenderState::alpha_blend(),
            stencil: None,
        };

        let replace = (StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
        let stencil = match self {
            OutlinePhase::Opaque => StencilState {
                func: Comparison::Always,
                reference: 1,
                write_mask: 0x00,
                ops: replace,
                ..Default::default()
            },
            OutlinePhase::Outlined => StencilState {
                func: Comparison::Always,
                reference: 1,
                write_mask: 0xFF,
                ops: replace,
                ..Default::default()
            },
            OutlinePhase::Outline => StencilState {
                func: Comparison::NotEqual,
                reference: 1,
                write_mask: 0x00,
                ops: replace,
                ..Default::default()
            },
            OutlinePhase::Cleanup => StencilState {
                func: Comparison::Always,
                reference: 0,
                write_mask: 0xFF,
                ops: replace,
                ..Default::default()
            },
        };

        match self {
            OutlinePhase::Outline => RenderState {
                depth_test: Comparison::Always,
                depth_write: false,
                stencil: Some(stencil),
                ..base
            },
            _ => RenderState {
                stencil: Some(stencil),
                ..base
            },
        }
    }
}

/// Draws the lit and shadowed board into the default framebuffer.
pub struct ScenePass {
    video: Rc<VideoSystem>,
    lit: ShaderProgram,
    outline: ShaderProgram,
    outline_enabled: bool,
}

impl ScenePass {
    pub fn new(video: &Rc<VideoSystem>, outline_enabled: bool) -> Result<Self> {
        Ok(ScenePass {
            video: video.clone(),
            lit: ShaderProgram::new(video, SCENE_VS, SCENE_FS)?,
            outline: ShaderProgram::new(video, OUTLINE_VS, OUTLINE_FS)?,
            outline_enabled,
        })
    }

    /// Draws a frame. Shadows are sampled from `shadow` if there is one.
    pub fn run(&self, ctx: &RenderContext, shadow: Option<&ShadowPass>) -> Result<()> {
        self.video.set_render_state(OutlinePhase::Cleanup.render_state())?;
        self.video.clear(ctx.palette.clear, Some(1.0), Some(0))?;

        let dimensions = self.video.dimensions();
        let aspect = if dimensions.x > 0 && dimensions.y > 0 {
            dimensions.x as f32 / dimensions.y as f32
        } else {
            1.0
        };

        let view = ctx.camera.view_matrix();
        let projection = ctx.camera.projection_matrix(aspect, NEAR, FAR);

        self.lit.bind()?;
        self.lit.set_uniform("view", view)?;
        self.lit.set_uniform("projection", projection)?;
        self.lit.set_uniform("lightPos", ctx.light_position)?;
        self.lit.set_uniform("viewPos", ctx.camera.position())?;
        self.lit.set_uniform(
            "lightSpaceMatrix",
            ShadowPass::light_space_matrix(ctx.light_position),
        )?;

        self.lit.set_uniform("shadowsEnabled", shadow.is_some())?;
        self.lit.set_uniform("shadowMap", SHADOW_MAP_UNIT as i32)?;
        if let Some(shadow) = shadow {
            self.video.bind_texture(SHADOW_MAP_UNIT, shadow.depth_map())?;
        }

        self.outline.bind()?;
        self.outline.set_uniform("view", view)?;
        self.outline.set_uniform("projection", projection)?;
        self.outline.set_uniform("outlineColor", ctx.palette.outline)?;

        let tiles = ctx.tiles();
        let pieces = ctx.pieces();

        for &phase in &OutlinePhase::SEQUENCE {
            if !self.outline_enabled && phase == OutlinePhase::Outline {
                continue;
            }

            self.video.set_render_state(phase.render_state())?;

            match phase {
                OutlinePhase::Opaque => {
                    for v in &tiles {
                        v.model.draw_with(&self.lit, v.tint, v.transform)?;
                    }
                }
                OutlinePhase::Outlined => {
                    for v in &pieces {
                        v.model.draw_with(&self.lit, v.tint, v.transform)?;
                    }
                }
                OutlinePhase::Outline => {
                    let scale = Matrix4::from_scale(ctx.outline_scale);
                    for v in &pieces {
                        v.model
                            .draw_with(&self.outline, ctx.palette.outline, v.transform * scale)?;
                    }
                }
                OutlinePhase::Cleanup => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn phases() {
        let states: Vec<_> = OutlinePhase::SEQUENCE
            .iter()
            .map(|v| v.render_state())
            .collect();

        let masks: Vec<_> = states.iter().map(|v| v.stencil.unwrap().write_mask).collect();
        assert_eq!(masks, vec![0x00, 0xFF, 0x00, 0xFF]);

        let outline = states[2];
        assert!(!outline.is_depth_enabled());
        assert_eq!(outline.stencil.unwrap().func, Comparison::NotEqual);
        assert_eq!(outline.stencil.unwrap().reference, 1);

        let cleanup = states[3];
        assert!(cleanup.is_depth_enabled());
        assert_eq!(cleanup.stencil.unwrap().func, Comparison::Always);
        assert_eq!(cleanup.stencil.unwrap().reference, 0);
    }
}
