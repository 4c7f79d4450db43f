pub mod headless;

mod glutin;
pub use self::glutin::new;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::events::Event;

pub trait Visitor {
    fn show(&self);
    /// Returns the size in points of the client area.
    fn dimensions(&self) -> Vector2<u32>;
    fn device_pixel_ratio(&self) -> f32;
    /// Resizes the drawable, in pixels.
    fn resize(&self, dimensions: Vector2<u32>);
    fn poll_events(&mut self, events: &mut Vec<Event>);
    fn swap_buffers(&self) -> Result<()>;
}

pub fn new_headless(dimensions: Vector2<u32>) -> (Box<dyn Visitor>, headless::HeadlessWindow) {
    let (visitor, window) = headless::HeadlessVisitor::new(dimensions);
    (Box::new(visitor), window)
}
