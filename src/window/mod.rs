//! Represents an OpenGL context and the window or environment around it.

pub mod events;

pub mod prelude {
    pub use super::backends::headless::HeadlessWindow;
    pub use super::events::{Event, InputEvent, Key, MouseButton, WindowEvent};
    pub use super::{WindowParams, WindowSystem};
}

mod backends;

use crate::errors::*;
use crate::math::prelude::Vector2;

use self::backends::headless::HeadlessWindow;
use self::backends::Visitor;
use self::events::{Event, WindowEvent};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// Sets the multisampling level to request. A value of 0 indicates that
    /// multisampling must not be enabled.
    pub multisample: u16,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "Chequer".to_owned(),
            size: Vector2::new(1280, 720),
            multisample: 4,
            vsync: true,
        }
    }
}

/// Owns the window backend, and collects the events it produces.
pub struct WindowSystem {
    visitor: Box<dyn Visitor>,
    events: Vec<Event>,
}

impl WindowSystem {
    /// Creates a window with an OpenGL 3.3 core context, and makes the context
    /// current on this thread.
    pub fn from(params: &WindowParams) -> Result<Self> {
        let visitor = backends::new(params)?;
        Ok(WindowSystem {
            visitor,
            events: Vec::new(),
        })
    }

    /// Creates a window system without any real window behind it. Events are fed
    /// through the returned `HeadlessWindow`.
    pub fn headless(dimensions: Vector2<u32>) -> (Self, HeadlessWindow) {
        let (visitor, window) = backends::new_headless(dimensions);
        let system = WindowSystem {
            visitor,
            events: Vec::new(),
        };

        (system, window)
    }

    /// Shows the window if it was hidden.
    #[inline]
    pub fn show(&self) {
        self.visitor.show();
    }

    /// Returns the size in *points* of the client area of the window.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.visitor.dimensions()
    }

    /// Returns the size in *pixels* of the drawable, which is the size of the
    /// default framebuffer.
    #[inline]
    pub fn dimensions_in_pixels(&self) -> Vector2<u32> {
        let dimensions = self.visitor.dimensions();
        let dpr = self.visitor.device_pixel_ratio();
        Vector2::new(
            (dimensions.x as f32 * dpr) as u32,
            (dimensions.y as f32 * dpr) as u32,
        )
    }

    /// Returns the ratio between the backing framebuffer resolution and the window size in
    /// screen pixels. This is typically one for a normal display and two for a retina display.
    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.visitor.device_pixel_ratio()
    }

    /// Collects the pending events. The drawable is resized along with the window.
    pub fn poll_events(&mut self) -> Vec<Event> {
        self.visitor.poll_events(&mut self.events);

        let resized = self.events.iter().any(|v| match *v {
            Event::Window(WindowEvent::Resized(_, _)) => true,
            _ => false,
        });

        if resized {
            let dimensions = self.dimensions_in_pixels();
            self.visitor.resize(dimensions);
        }

        ::std::mem::replace(&mut self.events, Vec::new())
    }

    /// Presents the back buffer.
    #[inline]
    pub fn swap_buffers(&self) -> Result<()> {
        self.visitor.swap_buffers()
    }
}

#[cfg(test)]
mod test {
    use super::events::*;
    use super::*;

    #[test]
    fn scripted_events() {
        let (mut window, script) = WindowSystem::headless(Vector2::new(800, 600));
        script.push(vec![Event::Window(WindowEvent::Closed)]);
        script.resize(Vector2::new(400, 300));

        assert_eq!(window.poll_events(), vec![Event::Window(WindowEvent::Closed)]);
        assert_eq!(window.dimensions_in_pixels(), Vector2::new(400, 300));
        assert_eq!(
            window.poll_events(),
            vec![Event::Window(WindowEvent::Resized(400, 300))]
        );
        assert!(window.poll_events().is_empty());

        window.swap_buffers().unwrap();
        assert_eq!(script.swaps(), 1);
    }
}
