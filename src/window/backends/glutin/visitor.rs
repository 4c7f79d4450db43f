use gl;
use glutin;
use glutin::GlContext;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::super::super::events::Event;
use super::super::super::WindowParams;
use super::super::Visitor;
use super::types;

pub struct GlutinVisitor {
    window: glutin::GlWindow,
    events_loop: glutin::EventsLoop,
}

impl GlutinVisitor {
    pub fn from(params: &WindowParams) -> Result<Self> {
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ));

        let context = glutin::ContextBuilder::new()
            .with_multisampling(params.multisample)
            .with_gl_profile(glutin::GlProfile::Core)
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
            .with_depth_buffer(24)
            .with_stencil_buffer(8)
            .with_vsync(params.vsync);

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop)
            .map_err(|err| Error::Window(format!("{}", err)))?;

        let mut visitor = GlutinVisitor {
            window,
            events_loop,
        };

        let size = visitor.dimensions();
        let dpr = visitor.device_pixel_ratio();
        let dims = Vector2::new((size.x as f32 * dpr) as u32, (size.y as f32 * dpr) as u32);

        visitor.events_loop.poll_events(|_| {});
        visitor.resize(dims);

        unsafe {
            visitor
                .window
                .make_current()
                .map_err(|err| Error::Window(format!("{}", err)))?;
            gl::load_with(|symbol| visitor.window.get_proc_address(symbol) as *const _);
        }

        info!(
            "Created window {:?} with {}x{} points (dpr {}).",
            params.title, size.x, size.y, dpr
        );

        Ok(visitor)
    }
}

impl Visitor for GlutinVisitor {
    #[inline]
    fn show(&self) {
        self.window.show();
    }

    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.window
            .get_inner_size()
            .map(|size| Vector2::new(size.width as u32, size.height as u32))
            .unwrap_or_else(|| Vector2::new(0, 0))
    }

    #[inline]
    fn device_pixel_ratio(&self) -> f32 {
        self.window.get_hidpi_factor() as f32
    }

    #[inline]
    fn resize(&self, dimensions: Vector2<u32>) {
        let size = glutin::dpi::PhysicalSize::new(f64::from(dimensions.x), f64::from(dimensions.y));
        self.window.resize(size)
    }

    #[inline]
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        self.events_loop.poll_events(|v| {
            if let Some(e) = types::from_event(v) {
                events.push(e);
            }
        });
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        self.window
            .swap_buffers()
            .map_err(|err| Error::Window(format!("{}", err)))?;
        Ok(())
    }
}
