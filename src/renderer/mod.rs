//! The two passes drawing a frame, and the scene state they share.
//!
//! `ShadowPass` renders the depth of every drawable from the light into an
//! off-screen depth texture, which `ScenePass` samples while drawing the lit
//! board and the outlined pieces into the default framebuffer.

pub mod scene;
pub mod shadow;

pub mod prelude {
    pub use super::scene::{OutlinePhase, ScenePass};
    pub use super::shadow::ShadowPass;
    pub use super::{Drawable, Palette, RenderContext};
}

use crate::board::{Board, Cell};
use crate::camera::Camera;
use crate::graphics::prelude::Model;
use crate::math::prelude::*;

/// The colours of everything on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub light_tile: Color<f32>,
    pub dark_tile: Color<f32>,
    pub light_piece: Color<f32>,
    pub dark_piece: Color<f32>,
    pub outline: Color<f32>,
    pub clear: Color<f32>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            light_tile: Color::new(0.9, 0.85, 0.75, 1.0),
            dark_tile: Color::new(0.35, 0.22, 0.12, 1.0),
            light_piece: Color::new(0.95, 0.95, 0.92, 1.0),
            dark_piece: Color::new(0.12, 0.12, 0.12, 1.0),
            outline: Color::yellow(),
            clear: Color::new(0.1, 0.1, 0.12, 1.0),
        }
    }
}

/// One model placed in the world.
#[derive(Clone, Copy)]
pub struct Drawable<'a> {
    pub model: &'a Model,
    pub transform: Matrix4<f32>,
    pub tint: Color<f32>,
}

/// Everything both passes read while drawing a frame.
pub struct RenderContext {
    pub camera: Camera,
    pub board: Board,
    pub tile: Model,
    pub piece: Model,
    pub light_position: Vector3<f32>,
    pub palette: Palette,
    pub outline_scale: f32,
}

impl RenderContext {
    /// The 64 tiles of the board.
    pub fn tiles(&self) -> Vec<Drawable<'_>> {
        self.board
            .cells()
            .map(|(col, row, _)| {
                let tint = if Board::is_dark_tile(col, row) {
                    self.palette.dark_tile
                } else {
                    self.palette.light_tile
                };

                Drawable {
                    model: &self.tile,
                    transform: Matrix4::from_translation(Board::tile_position(col, row)),
                    tint,
                }
            })
            .collect()
    }

    /// The pieces standing on the board.
    pub fn pieces(&self) -> Vec<Drawable<'_>> {
        self.board
            .pieces()
            .map(|(col, row, cell)| {
                let tint = match cell {
                    Cell::Dark => self.palette.dark_piece,
                    _ => self.palette.light_piece,
                };

                Drawable {
                    model: &self.piece,
                    transform: Matrix4::from_translation(Board::tile_position(col, row)),
                    tint,
                }
            })
            .collect()
    }

    /// Everything that casts a shadow.
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut drawables = self.tiles();
        drawables.extend(self.pieces());
        drawables
    }
}
