//! The per-frame loop: input, then the shadow pass, the scene pass, and
//! presentation.

pub mod settings;

pub use self::settings::{CameraParams, Settings};

use std::rc::Rc;

use crate::board::Board;
use crate::camera::{Camera, Direction};
use crate::errors::*;
use crate::graphics::prelude::*;
use crate::math::prelude::*;
use crate::renderer::prelude::*;
use crate::video::VideoSystem;
use crate::window::prelude::*;

/// Maps a key to a camera movement step, if it is bound to one.
pub fn direction(key: Key) -> Option<Direction> {
    match key {
        Key::W => Some(Direction::Forward),
        Key::S => Some(Direction::Backward),
        Key::A => Some(Direction::Left),
        Key::D => Some(Direction::Right),
        Key::Space => Some(Direction::Up),
        Key::LShift => Some(Direction::Down),
        _ => None,
    }
}

/// Owns the window, the video system and the passes, and drives them frame by
/// frame on the calling thread.
pub struct RenderLoop {
    ctx: RenderContext,
    scene: ScenePass,
    shadow: Option<ShadowPass>,
    video: Rc<VideoSystem>,
    window: WindowSystem,
    looking: bool,
    running: bool,
    frames: u64,
}

impl RenderLoop {
    /// Opens the window, creates the OpenGL context and loads the models named
    /// in `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        let window = WindowSystem::from(&settings.window)?;
        let video = Rc::new(VideoSystem::new(window.dimensions_in_pixels())?);

        let tile = Model::load(&video, &settings.tile_model, &ObjImporter, &FileDecoder)?;
        let piece = Model::load(&video, &settings.piece_model, &ObjImporter, &FileDecoder)?;

        Self::with_models(window, video, settings, tile, piece)
    }

    /// Builds the loop on top of existing systems and models.
    pub fn with_models(
        window: WindowSystem,
        video: Rc<VideoSystem>,
        settings: &Settings,
        tile: Model,
        piece: Model,
    ) -> Result<Self> {
        let camera = Camera::new(
            settings.camera.position,
            Vector3::unit_y(),
            settings.camera.yaw,
            settings.camera.pitch,
        );

        let ctx = RenderContext {
            camera,
            board: Board::initial(),
            tile,
            piece,
            light_position: settings.light_position,
            palette: settings.palette,
            outline_scale: settings.outline_scale,
        };

        debug!("Board:\n{}", ctx.board);

        let shadow = if settings.shadows {
            Some(ShadowPass::new(&video, settings.shadow_map_size)?)
        } else {
            None
        };

        let scene = ScenePass::new(&video, settings.outline)?;

        Ok(RenderLoop {
            ctx,
            scene,
            shadow,
            video,
            window,
            looking: false,
            running: true,
            frames: 0,
        })
    }

    /// Runs until the window is closed or escape is pressed.
    pub fn run(&mut self) -> Result<()> {
        self.window.show();
        while self.advance()? {}

        info!("Stopped after {} frames.", self.frames);
        Ok(())
    }

    /// Runs at most `n` frames, returning the number actually drawn.
    pub fn run_frames(&mut self, n: u64) -> Result<u64> {
        let start = self.frames;
        for _ in 0..n {
            if !self.advance()? {
                break;
            }
        }

        Ok(self.frames - start)
    }

    /// Handles pending events and draws one frame. Returns false once a quit
    /// has been requested, in which case nothing is drawn.
    pub fn advance(&mut self) -> Result<bool> {
        for v in self.window.poll_events() {
            self.handle_event(&v);
        }

        if !self.running {
            return Ok(false);
        }

        self.video.set_dimensions(self.window.dimensions_in_pixels());
        self.video.bind_surface(None)?;

        if let Some(ref shadow) = self.shadow {
            shadow.run(&self.ctx)?;
        }

        self.scene.run(&self.ctx, self.shadow.as_ref())?;

        self.video.flush()?;
        self.window.swap_buffers()?;
        self.frames += 1;
        Ok(true)
    }

    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Window(WindowEvent::Closed) => self.quit(),
            Event::Window(WindowEvent::Resized(width, height)) => {
                debug!("Window resized to {}x{}.", width, height);
            }
            Event::InputDevice(InputEvent::KeyboardPressed { key: Key::Escape }) => self.quit(),
            Event::InputDevice(InputEvent::KeyboardPressed { key }) => {
                if let Some(dir) = direction(key) {
                    self.ctx.camera.process_movement(dir);
                }
            }
            Event::InputDevice(InputEvent::MousePressed { .. }) => self.looking = true,
            Event::InputDevice(InputEvent::MouseReleased { .. }) => self.looking = false,
            Event::InputDevice(InputEvent::MouseMoved { delta }) => {
                if self.looking {
                    self.ctx.camera.process_look(delta.0, delta.1);
                }
            }
            Event::InputDevice(InputEvent::MouseWheel { delta }) => {
                self.ctx.camera.process_zoom(delta.1);
            }
            _ => {}
        }
    }

    fn quit(&mut self) {
        if self.running {
            info!("Quit requested after {} frames.", self.frames);
        }

        self.running = false;
    }

    #[inline]
    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.ctx.camera
    }

    #[inline]
    pub fn is_looking(&self) -> bool {
        self.looking
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn video(&self) -> &Rc<VideoSystem> {
        &self.video
    }
}
