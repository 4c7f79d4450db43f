use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::super::events::{Event, WindowEvent};
use super::Visitor;

#[derive(Default)]
struct Shared {
    frames: RefCell<VecDeque<Vec<Event>>>,
    dimensions: Cell<(u32, u32)>,
    swaps: Cell<usize>,
}

/// Drives a `HeadlessVisitor`: every `push` queues the events delivered by one
/// call to `poll_events`.
#[derive(Clone)]
pub struct HeadlessWindow {
    shared: Rc<Shared>,
}

impl HeadlessWindow {
    /// Queues the events of one poll.
    pub fn push<T>(&self, events: T)
    where
        T: IntoIterator<Item = Event>,
    {
        self.shared
            .frames
            .borrow_mut()
            .push_back(events.into_iter().collect());
    }

    /// Resizes the window, queuing the matching `Resized` event.
    pub fn resize(&self, dimensions: Vector2<u32>) {
        self.shared.dimensions.set((dimensions.x, dimensions.y));
        self.push(Some(Event::Window(WindowEvent::Resized(
            dimensions.x,
            dimensions.y,
        ))));
    }

    /// The number of presented frames.
    pub fn swaps(&self) -> usize {
        self.shared.swaps.get()
    }
}

pub struct HeadlessVisitor {
    shared: Rc<Shared>,
}

impl HeadlessVisitor {
    pub fn new(dimensions: Vector2<u32>) -> (Self, HeadlessWindow) {
        let shared = Rc::new(Shared::default());
        shared.dimensions.set((dimensions.x, dimensions.y));

        let window = HeadlessWindow {
            shared: shared.clone(),
        };

        (HeadlessVisitor { shared }, window)
    }
}

impl Visitor for HeadlessVisitor {
    #[inline]
    fn show(&self) {}

    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.shared.dimensions.get().into()
    }

    #[inline]
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    #[inline]
    fn resize(&self, _: Vector2<u32>) {}

    fn poll_events(&mut self, events: &mut Vec<Event>) {
        if let Some(frame) = self.shared.frames.borrow_mut().pop_front() {
            events.extend(frame);
        }
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        self.shared.swaps.set(self.shared.swaps.get() + 1);
        Ok(())
    }
}
