//! A checkers board drawn with OpenGL, lit by a single light casting shadows,
//! with a stencil outline around its pieces.
//!
//! The crate is layered bottom-up:
//!
//! * `video` owns the GPU backend and hands out typed handles;
//! * `window` owns the window and its OpenGL context, and collects events;
//! * `graphics` wraps GPU objects into owning shader, texture, mesh and model
//!   types;
//! * `renderer` draws a frame in two passes, shadows then the lit scene;
//! * `application` drives everything frame by frame.
//!
//! Both `video` and `window` come with headless backends, which record what they
//! are asked to do instead of talking to a GPU or a display.

#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate serde;

#[macro_use]
pub mod utils;
pub mod errors;
pub mod math;

pub mod board;
pub mod camera;

pub mod application;
pub mod graphics;
pub mod renderer;
pub mod video;
pub mod window;

pub mod prelude {
    pub use crate::application::{RenderLoop, Settings};
    pub use crate::board::{Board, Cell};
    pub use crate::camera::{Camera, Direction};
    pub use crate::errors::{Error, Result};
    pub use crate::graphics::prelude::*;
    pub use crate::math::prelude::*;
    pub use crate::renderer::prelude::*;
    pub use crate::video::prelude::*;
    pub use crate::window::prelude::*;
}
