use std::rc::Rc;

use crate::errors::*;
use crate::video::prelude::{ShaderHandle, UniformVariable, VideoSystem};

/// A linked vertex + fragment program.
///
/// The program is compiled and linked at construction, and released when the
/// `ShaderProgram` is dropped. Uniforms are written by name; names that do not
/// resolve to an active uniform (for example because the linker optimised them
/// out) are silently ignored.
pub struct ShaderProgram {
    video: Rc<VideoSystem>,
    handle: ShaderHandle,
}

impl ShaderProgram {
    pub fn new(video: &Rc<VideoSystem>, vs: &str, fs: &str) -> Result<Self> {
        let handle = video.create_shader(vs, fs)?;
        debug!("Created {}.", handle);

        Ok(ShaderProgram {
            video: video.clone(),
            handle,
        })
    }

    /// Makes this program the active one.
    pub fn bind(&self) -> Result<()> {
        self.video.bind_shader(self.handle)
    }

    pub fn set_uniform<T>(&self, name: &str, variable: T) -> Result<()>
    where
        T: Into<UniformVariable>,
    {
        self.video.set_uniform(self.handle, name, variable)
    }

    #[inline]
    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if let Err(err) = self.video.delete_shader(self.handle) {
            warn!("Failed to delete {}: {}", self.handle, err);
        }
    }
}
